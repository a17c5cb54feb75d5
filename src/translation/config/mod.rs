//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 默认补全接口（OpenAI 兼容的 chat/completions）
    pub const DEFAULT_API_URL: &str =
        "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    // 源语言，翻译到该语言恒等返回
    pub const SOURCE_LANG: &str = "en";

    // 批量请求的分隔标记，普通文本中几乎不会出现
    pub const SEGMENT_SEPARATOR: &str = "||TRANSLATION_SEPARATOR||";

    // 永不翻译的字段名（标识符和个人信息）
    pub const DEFAULT_EXCLUDED_FIELDS: &[&str] = &[
        "id", "_id", "email", "phone", "bookingId", "userId", "workerId", "customerId",
        "password", "token", "createdAt", "updatedAt",
    ];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "translation-config.toml",
        "translation-config.json",
        ".translation-config.toml",
        "~/.config/portal-translate/translation.toml",
        "/etc/portal-translate/translation.toml",
    ];

    // .env 文件搜索顺序，命中第一个即停止
    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}

/// 加载翻译配置，失败时退回默认配置
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslationConfig::default()
        }
    }
}
