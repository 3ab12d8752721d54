//! Axum route handlers for sessions and personas.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use sqlx::AnyPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::persona::{Persona, PersonaInput, PersonaRow, TONE_PRESETS};
use crate::personas::store;
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct TonePresetsResponse {
    pub tones: Vec<&'static str>,
}

/// POST /api/v1/sessions
///
/// Issues a fresh session identifier for the client to persist and send back
/// in the `x-session-id` header.
pub async fn handle_create_session() -> (StatusCode, Json<SessionResponse>) {
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: Uuid::new_v4().to_string(),
        }),
    )
}

/// GET /api/v1/personas/tones
pub async fn handle_list_tones() -> Json<TonePresetsResponse> {
    Json(TonePresetsResponse {
        tones: TONE_PRESETS.to_vec(),
    })
}

/// GET /api/v1/personas
pub async fn handle_list_personas(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<Vec<Persona>>, AppError> {
    let rows = store::list_personas(&state.db, session.as_str()).await?;
    Ok(Json(rows.into_iter().map(Persona::from).collect()))
}

/// POST /api/v1/personas
pub async fn handle_create_persona(
    State(state): State<AppState>,
    session: SessionId,
    Json(input): Json<PersonaInput>,
) -> Result<(StatusCode, Json<Persona>), AppError> {
    let input = input.validated()?;
    let row = store::create_persona(&state.db, session.as_str(), &input).await?;
    Ok((StatusCode::CREATED, Json(Persona::from(row))))
}

/// GET /api/v1/personas/:id
pub async fn handle_get_persona(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<i64>,
) -> Result<Json<Persona>, AppError> {
    let row = require_persona(&state.db, &session, id).await?;
    Ok(Json(Persona::from(row)))
}

/// PUT /api/v1/personas/:id
pub async fn handle_update_persona(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<i64>,
    Json(input): Json<PersonaInput>,
) -> Result<Json<Persona>, AppError> {
    let input = input.validated()?;
    let row = store::update_persona(&state.db, session.as_str(), id, &input)
        .await?
        .ok_or_else(|| persona_not_found(id))?;
    Ok(Json(Persona::from(row)))
}

/// DELETE /api/v1/personas/:id
pub async fn handle_delete_persona(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if store::delete_persona(&state.db, session.as_str(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(persona_not_found(id))
    }
}

/// Loads a persona the session owns, or fails with 404.
pub async fn require_persona(
    pool: &AnyPool,
    session: &SessionId,
    id: i64,
) -> Result<PersonaRow, AppError> {
    store::get_persona(pool, session.as_str(), id)
        .await?
        .ok_or_else(|| persona_not_found(id))
}

fn persona_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Persona {id} not found"))
}
