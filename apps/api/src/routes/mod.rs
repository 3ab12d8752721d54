pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::personas::handlers as personas;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions & personas
        .route("/api/v1/sessions", post(personas::handle_create_session))
        .route("/api/v1/personas/tones", get(personas::handle_list_tones))
        .route(
            "/api/v1/personas",
            get(personas::handle_list_personas).post(personas::handle_create_persona),
        )
        .route(
            "/api/v1/personas/:id",
            get(personas::handle_get_persona)
                .put(personas::handle_update_persona)
                .delete(personas::handle_delete_persona),
        )
        // Generation
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/topics/suggest", post(generation::handle_suggest_topics))
        .route("/api/v1/models", get(generation::handle_list_models))
        .with_state(state)
}
