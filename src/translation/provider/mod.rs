//! 补全服务接口
//!
//! 翻译引擎只依赖 [`CompletionProvider`]：给出系统指令和用户消息，
//! 拿回一段文本。真实实现见 [`chat`]，测试中可以注入任意桩实现。

pub mod chat;

use async_trait::async_trait;

use crate::translation::error::TranslationResult;

pub use chat::ChatCompletionProvider;

/// 一次补全请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// 目标语言名称（用于日志）
    pub language: String,
    /// 系统指令
    pub system: String,
    /// 待翻译内容，单条文本或以分隔标记拼接的批次
    pub user: String,
}

impl CompletionRequest {
    /// 单条翻译请求
    pub fn single(language: &str, text: &str) -> Self {
        Self {
            language: language.to_string(),
            system: format!(
                "You are a professional translator. Translate the given text to {language}. \
                 Preserve any formatting, placeholders, or special characters. \
                 Only return the translated text without any explanations or notes."
            ),
            user: text.to_string(),
        }
    }

    /// 批量翻译请求，`joined` 已经用 `separator` 拼接
    pub fn batch(language: &str, separator: &str, joined: &str) -> Self {
        Self {
            language: language.to_string(),
            system: format!(
                "You are a professional translator. Translate each text segment to {language}. \
                 Each segment is separated by {separator}. Translate every segment independently, \
                 preserve the separators exactly as is, and maintain the same number of segments. \
                 Only translate the text, not the separators, and do not add any explanations."
            ),
            user: joined.to_string(),
        }
    }
}

/// 外部补全服务
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 服务名称
    fn name(&self) -> &str;

    /// 执行一次补全，返回模型输出的原始文本
    async fn complete(&self, request: CompletionRequest) -> TranslationResult<String>;
}
