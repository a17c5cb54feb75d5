//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::env::EnvVar;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 基础配置
    pub enabled: bool,
    pub source_lang: String,

    // 补全接口
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,

    // 批量请求
    pub separator: String,

    // 对象翻译过滤
    pub excluded_fields: Vec<String>,
    pub skip_identifier_values: bool,

    // 语言偏好文件，未设置时使用平台配置目录
    pub preference_path: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_lang: constants::SOURCE_LANG.to_string(),

            api_url: constants::DEFAULT_API_URL.to_string(),
            api_key: None,
            model: constants::DEFAULT_MODEL.to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT.as_secs(),

            separator: constants::SEGMENT_SEPARATOR.to_string(),

            excluded_fields: constants::DEFAULT_EXCLUDED_FIELDS
                .iter()
                .map(|field| field.to_string())
                .collect(),
            skip_identifier_values: true,

            preference_path: None,
        }
    }
}

impl TranslationConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(TranslationError::ConfigError(format!(
                "接口地址必须以 http:// 或 https:// 开头: {}",
                self.api_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(TranslationError::ConfigError("模型名称不能为空".to_string()));
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(TranslationError::ConfigError(format!(
                "请求超时必须在 1-300 秒之间: {}",
                self.request_timeout_secs
            )));
        }

        if self.separator.trim().is_empty() {
            return Err(TranslationError::ConfigError("分隔标记不能为空白".to_string()));
        }

        let lang = self.source_lang.as_str();
        if !(2..=3).contains(&lang.len()) || !lang.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(TranslationError::ConfigError(format!(
                "源语言代码无效: {}",
                self.source_lang
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖，只处理显式设置的变量
    pub fn apply_env_overrides(&mut self) {
        use crate::env::translation;

        if let Some(enabled) = explicit::<bool, translation::Enabled>() {
            self.enabled = enabled;
        }

        if let Some(source_lang) = explicit::<String, translation::SourceLang>() {
            self.source_lang = source_lang;
        }

        if let Some(api_url) = explicit::<String, translation::ApiUrl>() {
            self.api_url = api_url;
            tracing::info!("环境变量覆盖 API URL: {}", self.api_url);
        }

        if let Some(api_key) = explicit::<String, translation::ApiKey>() {
            self.api_key = Some(api_key);
        }

        if let Some(model) = explicit::<String, translation::Model>() {
            self.model = model;
        }

        if let Some(timeout) = explicit::<Duration, translation::Timeout>() {
            self.request_timeout_secs = timeout.as_secs();
        }
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// 非法的环境变量值只记录警告，不覆盖配置
fn explicit<T, V: EnvVar<T>>() -> Option<T> {
    match V::get_explicit()? {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("忽略无效的环境变量: {}", e);
            None
        }
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        Self::load_dotenv();
        let config = Self::load_config()?;
        Self::finish(config)
    }

    /// 从指定文件创建配置管理器
    pub fn from_path(path: &str) -> TranslationResult<Self> {
        Self::load_dotenv();
        let expanded = shellexpand::tilde(path);
        tracing::info!("加载配置文件: {}", expanded);
        let config = Self::load_from_file(&expanded)?;
        Self::finish(config)
    }

    /// 直接使用给定配置，不读取文件和环境变量
    pub fn with_config(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn finish(mut config: TranslationConfig) -> TranslationResult<Self> {
        config.apply_env_overrides();
        config.validate()?;

        if config.api_key.is_none() {
            tracing::warn!("未配置翻译接口密钥，请求很可能被拒绝，界面将显示原文");
        }

        Ok(Self { config })
    }

    /// 取出配置
    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 从搜索路径加载配置
    fn load_config() -> TranslationResult<TranslationConfig> {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(&*expanded_path).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| helpers::config_error(format!("读取配置文件失败: {}", e)))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析JSON配置失败: {}", e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析TOML配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| helpers::config_error(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| helpers::config_error(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
