//! # Portal Translate
//!
//! 招聘门户前端使用的翻译层：以 `(语言, 原文)` 缓存译文，把多条文本合并成
//! 一次补全请求，并能翻译任意结构的接口响应。翻译失败时总是返回原文。
//!
//! ## 模块组织
//!
//! - `translation` - 缓存、单条/批量/对象翻译、会话
//! - `network` - 后端客户端和响应翻译拦截器
//! - `env` - 类型安全的环境变量
//! - `logging` - 日志初始化
//! - `web` - HTTP 接口（可选）

pub mod env;
pub mod logging;
pub mod network;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

pub use translation::{
    TranslationCache, TranslationConfig, TranslationError, TranslationResult, TranslationService,
    TranslationSession,
};
