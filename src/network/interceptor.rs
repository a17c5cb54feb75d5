//! 响应翻译拦截器
//!
//! 后端返回的 JSON 在交给界面之前经过这里。只有成功响应会被翻译，
//! 错误响应保持原样，便于调用方按原文处理错误码和消息。

use serde_json::Value;

use crate::translation::TranslationService;

/// 翻译成功响应的 JSON 体，其他情况原样返回
pub async fn translate_response(
    service: &TranslationService,
    status: u16,
    body: Value,
    lang: &str,
) -> Value {
    if !(200..300).contains(&status) || service.is_passthrough(lang) {
        return body;
    }

    tracing::debug!("翻译响应体: 状态 {}，目标语言 {}", status, lang);
    service.translate_object(&body, lang).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::{
        CompletionProvider, CompletionRequest, TranslationConfig, TranslationResult,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct Upper;

    #[async_trait]
    impl CompletionProvider for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        async fn complete(&self, request: CompletionRequest) -> TranslationResult<String> {
            Ok(request.user.to_uppercase())
        }
    }

    fn service() -> TranslationService {
        TranslationService::with_provider(Arc::new(Upper), &TranslationConfig::default())
    }

    #[tokio::test]
    async fn test_success_response_is_translated() {
        let body = json!({ "message": "Booking confirmed" });
        let out = translate_response(&service(), 200, body, "hi").await;
        assert_eq!(out, json!({ "message": "BOOKING CONFIRMED" }));
    }

    #[tokio::test]
    async fn test_error_response_is_untouched() {
        let body = json!({ "message": "Not found" });
        let out = translate_response(&service(), 404, body.clone(), "hi").await;
        assert_eq!(out, body);
    }

    #[tokio::test]
    async fn test_source_language_is_untouched() {
        let body = json!({ "message": "Booking confirmed" });
        let out = translate_response(&service(), 201, body.clone(), "en").await;
        assert_eq!(out, body);
    }
}
