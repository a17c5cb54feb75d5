//! 翻译相关API处理器
//!
//! 翻译失败不会产生错误响应，客户端拿到的是原文。

use std::sync::Arc;

use axum::{
    extract::{Json as ExtractJson, State},
    response::Json,
};

use crate::web::types::{
    AppState, BatchTranslateRequest, BatchTranslateResponse, ObjectTranslateRequest,
    ObjectTranslateResponse, TranslateRequest, TranslateResponse,
};

/// 单条翻译
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Json<TranslateResponse> {
    let translated = state
        .service
        .translate_one(&request.text, &request.target_lang)
        .await;

    Json(TranslateResponse {
        translated,
        target_lang: request.target_lang,
    })
}

/// 批量翻译
pub async fn translate_batch(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<BatchTranslateRequest>,
) -> Json<BatchTranslateResponse> {
    tracing::debug!(
        "批量翻译请求: {} 条，目标语言 {}",
        request.texts.len(),
        request.target_lang
    );

    let translated = state
        .service
        .translate_batch(&request.texts, &request.target_lang)
        .await;

    Json(BatchTranslateResponse {
        translated,
        target_lang: request.target_lang,
    })
}

/// 对象翻译
pub async fn translate_object(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<ObjectTranslateRequest>,
) -> Json<ObjectTranslateResponse> {
    let data = state
        .service
        .translate_object(&request.data, &request.target_lang)
        .await;

    Json(ObjectTranslateResponse {
        data,
        target_lang: request.target_lang,
    })
}

/// 只查询缓存，不发起翻译
pub async fn peek_translation(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Json<TranslateResponse> {
    Json(TranslateResponse {
        translated: state.service.peek(&request.text, &request.target_lang),
        target_lang: request.target_lang,
    })
}
