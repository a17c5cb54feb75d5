//! 翻译模块
//!
//! 为接口响应和界面文本提供带缓存的翻译层：
//! - **core**: 翻译服务和引擎
//! - **pipeline**: JSON 文本收集、字段过滤、批次拼接拆分
//! - **provider**: 补全服务接口与 chat/completions 实现
//! - **storage**: 译文缓存
//! - **session**: 当前语言、语言偏好和存活标记
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! 翻译失败永远不会影响调用方：公开接口在任何错误下都返回原文。
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use portal_translate::translation::{load_translation_config, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_translation_config();
//! let service = TranslationService::new(&config)?;
//!
//! let text = service.translate_one("Book a plumber", "hi").await;
//! let shown = service.peek("Book a plumber", "hi");
//! assert_eq!(text, shown);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod languages;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod storage;

pub use config::{constants, ConfigManager, TranslationConfig};
pub use core::{EngineStatsSnapshot, TranslationEngine, TranslationService};
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};
pub use languages::{Language, SUPPORTED_LANGUAGES};
pub use pipeline::{FieldFilter, JsonCollector};
pub use provider::{ChatCompletionProvider, CompletionProvider, CompletionRequest};
pub use session::{LivenessGuard, LivenessToken, PreferenceStore, TranslationSession};
pub use storage::{CacheStats, CacheStore, MemoryStore, TranslationCache};

// ============================================================================
// 便利函数
// ============================================================================

/// 加载配置，失败时使用默认配置
pub fn load_translation_config() -> TranslationConfig {
    config::load_translation_config()
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init() {
    tracing::info!(
        "翻译模块 v{} 已加载，支持 {} 种语言",
        VERSION,
        SUPPORTED_LANGUAGES.len()
    );
}
