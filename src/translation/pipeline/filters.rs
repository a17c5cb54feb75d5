//! 字段过滤器模块
//!
//! 判断 JSON 对象中的某个字符串是否应该翻译。被排除的字段名（标识符、
//! 联系方式、时间戳）以及形似标识符的值会原样保留。

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::translation::config::TranslationConfig;

/// 字段过滤器
#[derive(Debug, Clone)]
pub struct FieldFilter {
    /// 排除的字段名（小写）
    excluded_fields: HashSet<String>,
    /// 是否跳过形似标识符的值
    skip_identifier_values: bool,
}

/// 标识符形态的正则表达式，只编译一次
struct IdentifierPatterns {
    object_id: Regex,
    uuid: Regex,
    email: Regex,
    url: Regex,
    numeric: Regex,
    date: Regex,
}

fn patterns() -> Option<&'static IdentifierPatterns> {
    static PATTERNS: OnceLock<Option<IdentifierPatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            let compiled = (|| -> Result<IdentifierPatterns, regex::Error> {
                Ok(IdentifierPatterns {
                    object_id: Regex::new(r"^[0-9a-fA-F]{24}$")?,
                    uuid: Regex::new(
                        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
                    )?,
                    email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
                    url: Regex::new(r"^(https?|ftp)://\S+$")?,
                    numeric: Regex::new(r"^[+\-]?[\d\s.,:%()+\-]+$")?,
                    date: Regex::new(r"^\d{4}-\d{2}-\d{2}([T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+\-]\d{2}:?\d{2})?)?$")?,
                })
            })();

            match compiled {
                Ok(patterns) => Some(patterns),
                Err(e) => {
                    tracing::error!("标识符正则表达式编译失败: {}", e);
                    None
                }
            }
        })
        .as_ref()
}

impl FieldFilter {
    pub fn new<I, S>(excluded_fields: I, skip_identifier_values: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_fields: excluded_fields
                .into_iter()
                .map(|field| field.as_ref().to_lowercase())
                .collect(),
            skip_identifier_values,
        }
    }

    /// 根据翻译配置创建
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(&config.excluded_fields, config.skip_identifier_values)
    }

    /// 不排除任何内容的过滤器
    pub fn permissive() -> Self {
        Self::new(Vec::<String>::new(), false)
    }

    /// 字段名是否被排除（不区分大小写）
    pub fn is_excluded_field(&self, key: &str) -> bool {
        self.excluded_fields.contains(&key.to_lowercase())
    }

    /// 判断字符串是否需要翻译
    ///
    /// `key` 是直接包含该字符串的对象字段名，数组元素和根值为 `None`。
    pub fn should_translate(&self, key: Option<&str>, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        if key.is_some_and(|k| self.is_excluded_field(k)) {
            return false;
        }

        !(self.skip_identifier_values && looks_like_identifier(trimmed))
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// 值是否形似标识符：对象 ID、UUID、邮箱、URL、纯数字或日期
pub fn looks_like_identifier(text: &str) -> bool {
    let Some(p) = patterns() else {
        return false;
    };

    p.object_id.is_match(text)
        || p.uuid.is_match(text)
        || p.email.is_match(text)
        || p.url.is_match(text)
        || p.date.is_match(text)
        || (p.numeric.is_match(text) && text.chars().any(|c| c.is_ascii_digit()))
}
