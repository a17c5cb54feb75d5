//! 语言列表和健康检查

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::translation::{languages, VERSION};
use crate::web::types::{AppState, HealthResponse, LanguagesResponse};

pub async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        source_lang: state.service.source_lang().to_string(),
        languages: languages::supported_languages(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
        translation_enabled: state.service.is_enabled(),
    })
}
