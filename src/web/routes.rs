//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate_text))
        .route("/api/translate/batch", post(translate_batch))
        .route("/api/translate/object", post(translate_object))
        .route("/api/translate/peek", post(peek_translation))
        .route("/api/cache/stats", get(get_cache_stats))
}
