//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，翻译配置、Web 服务和后端客户端共用

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }

    /// 仅在变量被显式设置时返回，用于覆盖配置文件中的值
    fn get_explicit() -> Option<EnvResult<T>> {
        env::var(Self::NAME).ok().map(|value| Self::parse(&value))
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "PORTAL_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 翻译功能启用状态
    pub struct Enabled;
    impl EnvVar<bool> for Enabled {
        const NAME: &'static str = "PORTAL_TRANSLATION_ENABLED";
        const DEFAULT: Option<bool> = Some(true);
        const DESCRIPTION: &'static str = "Enable translation functionality";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 源语言（界面原文所用语言）
    pub struct SourceLang;
    impl EnvVar<String> for SourceLang {
        const NAME: &'static str = "PORTAL_TRANSLATION_SOURCE_LANG";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("en".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Source language of UI text and backend data";

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang_code(value, Self::NAME)
        }
    }

    /// 补全接口地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "PORTAL_TRANSLATION_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::constants::DEFAULT_API_URL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Chat completions endpoint used for translation";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 补全接口密钥，未设置时回退到 GEMINI_API_KEY
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "PORTAL_TRANSLATION_API_KEY";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME).or_else(|_| env::var(FALLBACK_API_KEY)) {
                Ok(value) => Self::parse(&value),
                Err(_) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Neither {} nor {} is set", Self::NAME, FALLBACK_API_KEY),
                }),
            }
        }
        const DESCRIPTION: &'static str = "Bearer token for the completion provider";

        fn get_explicit() -> Option<EnvResult<String>> {
            env::var(Self::NAME)
                .or_else(|_| env::var(FALLBACK_API_KEY))
                .ok()
                .map(|value| Self::parse(&value))
        }

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    const FALLBACK_API_KEY: &str = "GEMINI_API_KEY";

    /// 模型名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "PORTAL_TRANSLATION_MODEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::constants::DEFAULT_MODEL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Model name sent with every completion request";

        fn parse(value: &str) -> EnvResult<String> {
            let model = value.trim();
            if model.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Model name cannot be empty".to_string(),
                });
            }
            Ok(model.to_string())
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "PORTAL_TRANSLATION_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Completion request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "PORTAL_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "PORTAL_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port 0 is not allowed".to_string(),
                });
            }

            Ok(port)
        }
    }
}

/// 后端 REST 服务相关环境变量
pub mod backend {
    use super::*;

    /// 后端基础地址
    pub struct BaseUrl;
    impl EnvVar<String> for BaseUrl {
        const NAME: &'static str = "PORTAL_BACKEND_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("http://localhost:8080/api/".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Base URL of the job portal REST backend";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must start with http:// or https://".to_string(),
        })
    }
}

// 语言代码为 2-3 个 ASCII 字母（doi、kok、mai 等是三个字母）
fn parse_lang_code(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    if (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_lowercase()) {
        Ok(lang)
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: "Language code must be 2 or 3 ASCII letters".to_string(),
        })
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub log_level: String,

    // 翻译配置
    pub translation_enabled: bool,
    pub translation_source_lang: String,
    pub translation_api_url: String,
    pub translation_model: String,
    pub translation_timeout: Duration,
    pub translation_api_key: Option<String>,

    // Web配置
    pub web_bind_address: String,
    pub web_port: u16,

    // 后端配置
    pub backend_url: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,

            translation_enabled: translation::Enabled::get()?,
            translation_source_lang: translation::SourceLang::get()?,
            translation_api_url: translation::ApiUrl::get()?,
            translation_model: translation::Model::get()?,
            translation_timeout: translation::Timeout::get()?,
            translation_api_key: translation::ApiKey::get().ok(),

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,

            backend_url: backend::BaseUrl::get()?,
        })
    }

    /// 打印配置摘要（隐藏敏感信息）
    pub fn print_summary(&self) {
        println!("Environment Configuration Summary:");
        println!("  Log Level: {}", self.log_level);
        println!(
            "  Translation: {}",
            if self.translation_enabled { "enabled" } else { "disabled" }
        );
        println!("  Source Language: {}", self.translation_source_lang);
        println!("  Provider: {} ({})", self.translation_api_url, self.translation_model);
        if self.translation_api_key.is_some() {
            println!("  API Key: [configured]");
        } else {
            println!("  API Key: [missing]");
        }
        println!("  Web Server: {}:{}", self.web_bind_address, self.web_port);
        println!("  Backend: {}", self.backend_url);
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    push_doc::<String, core::LogLevel>(&mut docs, "info");

    docs.push_str("\n## Translation Configuration\n\n");
    push_doc::<bool, translation::Enabled>(&mut docs, "true");
    push_doc::<String, translation::SourceLang>(&mut docs, "en");
    push_doc::<String, translation::ApiUrl>(
        &mut docs,
        crate::translation::constants::DEFAULT_API_URL,
    );
    push_doc::<String, translation::ApiKey>(&mut docs, "$GEMINI_API_KEY");
    push_doc::<String, translation::Model>(&mut docs, crate::translation::constants::DEFAULT_MODEL);
    push_doc::<Duration, translation::Timeout>(&mut docs, "30");

    docs.push_str("\n## Web Server Configuration\n\n");
    push_doc::<String, web::BindAddress>(&mut docs, "127.0.0.1");
    push_doc::<u16, web::Port>(&mut docs, "7080");

    docs.push_str("\n## Backend Configuration\n\n");
    push_doc::<String, backend::BaseUrl>(&mut docs, "http://localhost:8080/api/");

    docs
}

fn push_doc<T, V: EnvVar<T>>(docs: &mut String, default: &str) {
    docs.push_str(&format!(
        "- `{}`: {} (default: {})\n",
        V::NAME,
        V::DESCRIPTION,
        default
    ));
}
