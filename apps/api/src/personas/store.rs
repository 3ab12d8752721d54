use chrono::Utc;
use sqlx::AnyPool;
use tracing::info;

use crate::models::persona::{PersonaInput, PersonaRow};

const PERSONA_COLUMNS: &str =
    "id, name, description, tone_of_voice, session_id, created_at, updated_at";

/// Inserts a persona owned by `session_id`. `input` must already be validated.
pub async fn create_persona(
    pool: &AnyPool,
    session_id: &str,
    input: &PersonaInput,
) -> Result<PersonaRow, sqlx::Error> {
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query_as::<_, PersonaRow>(&format!(
        r#"
        INSERT INTO personas (name, description, tone_of_voice, session_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {PERSONA_COLUMNS}
        "#
    ))
    .bind(input.name.as_str())
    .bind(input.description.as_str())
    .bind(input.tone_of_voice.as_str())
    .bind(session_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    info!("Created persona {} for session {}", row.id, row.session_id);
    Ok(row)
}

/// All personas of a session, oldest first.
pub async fn list_personas(pool: &AnyPool, session_id: &str) -> Result<Vec<PersonaRow>, sqlx::Error> {
    sqlx::query_as::<_, PersonaRow>(&format!(
        "SELECT {PERSONA_COLUMNS} FROM personas WHERE session_id = $1 ORDER BY id"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
}

pub async fn get_persona(
    pool: &AnyPool,
    session_id: &str,
    id: i64,
) -> Result<Option<PersonaRow>, sqlx::Error> {
    sqlx::query_as::<_, PersonaRow>(&format!(
        "SELECT {PERSONA_COLUMNS} FROM personas WHERE id = $1 AND session_id = $2"
    ))
    .bind(id)
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

/// Overwrites the editable fields. Returns `None` when the session does not own `id`.
pub async fn update_persona(
    pool: &AnyPool,
    session_id: &str,
    id: i64,
    input: &PersonaInput,
) -> Result<Option<PersonaRow>, sqlx::Error> {
    sqlx::query_as::<_, PersonaRow>(&format!(
        r#"
        UPDATE personas
        SET name = $1, description = $2, tone_of_voice = $3, updated_at = $4
        WHERE id = $5 AND session_id = $6
        RETURNING {PERSONA_COLUMNS}
        "#
    ))
    .bind(input.name.as_str())
    .bind(input.description.as_str())
    .bind(input.tone_of_voice.as_str())
    .bind(Utc::now().timestamp_millis())
    .bind(id)
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was deleted.
pub async fn delete_persona(pool: &AnyPool, session_id: &str, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM personas WHERE id = $1 AND session_id = $2")
        .bind(id)
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
