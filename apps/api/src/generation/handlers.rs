//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{
    generate_posts, suggest_topics, GeneratedPosts, PostBrief, TopicSuggestions,
};
use crate::generation::platform::Platform;
use crate::llm_client::ModelInfo;
use crate::models::persona::{check_field, PersonaInput};
use crate::personas::handlers::require_persona;
use crate::session::{MaybeSession, SessionId};
use crate::state::AppState;

const MAX_OBJECTIVE_CHARS: usize = 500;
const MAX_TOPIC_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one of `persona` (inline) or `persona_id` (stored, session-owned) is required.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub persona: Option<PersonaInput>,
    pub persona_id: Option<i64>,
    pub objective: String,
    pub topic: String,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestTopicsRequest {
    pub persona: Option<PersonaInput>,
    pub persona_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Builds the prompt, calls the model and returns posts grouped by platform
/// together with the raw model output.
pub async fn handle_generate(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedPosts>, AppError> {
    if request.platforms.is_empty() {
        return Err(AppError::Validation(
            "Select at least one platform".to_string(),
        ));
    }

    let brief = PostBrief {
        objective: check_field("objective", &request.objective, MAX_OBJECTIVE_CHARS)?,
        topic: check_field("topic", &request.topic, MAX_TOPIC_CHARS)?,
        platforms: Platform::canonical(&request.platforms),
        persona: resolve_persona(&state, session.as_ref(), request.persona, request.persona_id)
            .await?,
    };

    let generated = generate_posts(state.llm.as_ref(), &brief).await?;
    Ok(Json(generated))
}

/// POST /api/v1/topics/suggest
pub async fn handle_suggest_topics(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Json(request): Json<SuggestTopicsRequest>,
) -> Result<Json<TopicSuggestions>, AppError> {
    let persona =
        resolve_persona(&state, session.as_ref(), request.persona, request.persona_id).await?;
    let suggestions = suggest_topics(state.llm.as_ref(), &persona).await?;
    Ok(Json(suggestions))
}

/// GET /api/v1/models
///
/// Lists models available to the configured key that can generate content.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state.llm.list_models().await?;
    Ok(Json(ModelsResponse { models }))
}

/// Picks the inline persona or loads the stored one the session owns.
async fn resolve_persona(
    state: &AppState,
    session: Option<&SessionId>,
    inline: Option<PersonaInput>,
    persona_id: Option<i64>,
) -> Result<PersonaInput, AppError> {
    match (inline, persona_id) {
        (Some(persona), None) => persona.validated(),
        (None, Some(id)) => {
            let session = session.ok_or(AppError::SessionRequired)?;
            let row = require_persona(&state.db, session, id).await?;
            Ok(PersonaInput::from(row))
        }
        (Some(_), Some(_)) => Err(AppError::Validation(
            "Provide either persona or persona_id, not both".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "persona or persona_id is required".to_string(),
        )),
    }
}
