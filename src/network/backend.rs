//! 后端 REST 客户端
//!
//! 请求后端接口并在返回前翻译响应体。后端本身的错误会向上传递，
//! 翻译失败则不会，调用方最差拿到未翻译的响应。

use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::interceptor::translate_response;
use crate::translation::{
    error::{helpers, TranslationResult},
    TranslationSession,
};

/// 后端客户端
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    session: Option<TranslationSession>,
}

impl BackendClient {
    /// `base_url` 应以 `/` 结尾，相对路径会拼接在它后面
    pub fn new(base_url: &str) -> TranslationResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
            session: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 挂接翻译会话后，成功响应会被翻译到会话的当前语言
    pub fn with_session(mut self, session: TranslationSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 解析接口地址，开头的 `/` 会被忽略以保留基础路径
    pub fn endpoint(&self, path: &str) -> TranslationResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get_json(&self, path: &str) -> TranslationResult<Value> {
        let request = self.client.get(self.endpoint(path)?);
        self.send(request).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> TranslationResult<Value> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        self.send(request).await
    }

    async fn send(&self, mut request: reqwest::RequestBuilder) -> TranslationResult<Value> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| helpers::network_error(format!("后端请求失败: {}", e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| helpers::network_error(format!("读取后端响应失败 ({}): {}", status, e)))?;

        if !status.is_success() {
            return Err(helpers::network_error(format!(
                "后端返回 {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| helpers::parse_error(format!("后端响应无法解析 ({}): {}", status, e)))?;

        match &self.session {
            Some(session) => Ok(translate_response(
                session.service(),
                status.as_u16(),
                body,
                &session.current_language(),
            )
            .await),
            None => Ok(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::error::TranslationError;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = BackendClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.endpoint("/bookings/42").unwrap().as_str(),
            "http://localhost:8080/api/bookings/42"
        );
        assert_eq!(
            client.endpoint("workers?skill=plumber").unwrap().as_str(),
            "http://localhost:8080/api/workers?skill=plumber"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(TranslationError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = BackendClient::new("http://127.0.0.1:9/api/").unwrap();
        let result = client.get_json("services").await;
        assert!(matches!(result, Err(TranslationError::NetworkError(_))));
    }

    #[cfg(feature = "web")]
    mod against_local_backend {
        use std::sync::Arc;

        use async_trait::async_trait;
        use axum::{http::StatusCode, routing::get, Json, Router};
        use serde_json::json;

        use super::*;
        use crate::translation::{
            CompletionProvider, CompletionRequest, TranslationConfig, TranslationService,
        };

        struct Tagging;

        #[async_trait]
        impl CompletionProvider for Tagging {
            fn name(&self) -> &str {
                "tagging"
            }

            async fn complete(&self, request: CompletionRequest) -> TranslationResult<String> {
                Ok(format!("{}:{}", request.language, request.user))
            }
        }

        async fn spawn_backend() -> String {
            let app = Router::new()
                .route(
                    "/api/bookings",
                    get(|| async { Json(json!({ "status": "Pending", "bookingId": "B-7" })) }),
                )
                .route(
                    "/api/broken",
                    get(|| async {
                        (
                            StatusCode::BAD_GATEWAY,
                            "<html><body>upstream down</body></html>",
                        )
                    }),
                );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{}/api/", address)
        }

        fn session(lang: &str) -> TranslationSession {
            let service = TranslationService::with_provider(
                Arc::new(Tagging),
                &TranslationConfig::default(),
            );
            let session = TranslationSession::new(service, None);
            session.change_language(lang).unwrap();
            session
        }

        #[tokio::test]
        async fn test_success_body_translated_into_session_language() {
            let base = spawn_backend().await;
            let client = BackendClient::new(&base).unwrap().with_session(session("hi"));

            let body = client.get_json("/bookings").await.unwrap();
            assert_eq!(
                body,
                json!({ "status": "हिन्दी:Pending", "bookingId": "B-7" })
            );
        }

        #[tokio::test]
        async fn test_without_session_body_is_untouched() {
            let base = spawn_backend().await;
            let client = BackendClient::new(&base).unwrap();

            let body = client.get_json("bookings").await.unwrap();
            assert_eq!(body, json!({ "status": "Pending", "bookingId": "B-7" }));
        }

        #[tokio::test]
        async fn test_non_json_error_page_keeps_status() {
            let base = spawn_backend().await;
            let client = BackendClient::new(&base).unwrap().with_session(session("hi"));

            match client.get_json("broken").await {
                Err(TranslationError::NetworkError(msg)) => {
                    assert!(msg.contains("502"), "{msg}");
                    assert!(msg.contains("upstream down"), "{msg}");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }
}
