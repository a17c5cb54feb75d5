//! OpenAI 兼容的 chat/completions 补全服务
//!
//! 默认指向 Gemini 的 OpenAI 兼容端点，任何实现了同样协议的服务都可以使用。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, CompletionRequest};
use crate::translation::config::TranslationConfig;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// chat/completions 补全服务
#[derive(Debug, Clone)]
pub struct ChatCompletionProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionProvider {
    /// 根据配置创建，超时由 HTTP 客户端负责
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| helpers::config_error(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        }
    }
}

/// 从响应体中取出第一条回复的内容
fn extract_content(body: &str) -> TranslationResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| helpers::parse_error(format!("无法解析补全响应: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| helpers::parse_error("补全响应中没有内容"))
}

#[async_trait]
impl CompletionProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn complete(&self, request: CompletionRequest) -> TranslationResult<String> {
        let body = self.build_body(&request);

        let mut builder = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(
            "请求补全服务: 模型 {}，目标语言 {}，{} 字符",
            self.model,
            request.language,
            request.user.chars().count()
        );

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::TranslationServiceError(format!(
                "补全服务返回 {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        extract_content(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  नमस्ते \n"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "  नमस्ते \n");
    }

    #[test]
    fn test_extract_content_rejects_malformed() {
        assert!(matches!(
            extract_content(r#"{"choices":[]}"#),
            Err(TranslationError::ParseError(_))
        ));
        assert!(matches!(
            extract_content(r#"{"choices":[{"message":{"role":"assistant"}}]}"#),
            Err(TranslationError::ParseError(_))
        ));
        assert!(matches!(
            extract_content("<html>502 Bad Gateway</html>"),
            Err(TranslationError::ParseError(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let config = TranslationConfig::default();
        let provider = ChatCompletionProvider::new(&config).unwrap();
        let request = CompletionRequest::single("ಕನ್ನಡ", "Confirm booking");

        let body = serde_json::to_value(provider.build_body(&request)).unwrap();
        assert_eq!(body["model"], "gemini-2.0-flash");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Confirm booking");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let config = TranslationConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            request_timeout_secs: 2,
            ..TranslationConfig::default()
        };
        let provider = ChatCompletionProvider::new(&config).unwrap();

        let result = provider
            .complete(CompletionRequest::single("हिन्दी", "Hello"))
            .await;
        assert!(matches!(
            result,
            Err(TranslationError::NetworkError(_)) | Err(TranslationError::TimeoutError(_))
        ));
    }
}
