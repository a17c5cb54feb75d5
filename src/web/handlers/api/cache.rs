//! 缓存相关API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, CacheStatsResponse};

/// 获取缓存统计信息
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let cache = state.service.cache_stats();
    Json(CacheStatsResponse {
        hit_rate: cache.hit_rate(),
        cache,
        engine: state.service.engine_stats(),
    })
}
