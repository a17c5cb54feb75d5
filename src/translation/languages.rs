//! 支持的语言表
//!
//! 语言选择界面只应提供这里列出的代码。提示词中使用语言的本地名称，
//! 模型对它的理解比两三个字母的代码更可靠。

use serde::Serialize;

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "hi", name: "हिन्दी" },
    Language { code: "bn", name: "বাংলা" },
    Language { code: "te", name: "తెలుగు" },
    Language { code: "mr", name: "मराठी" },
    Language { code: "ta", name: "தமிழ்" },
    Language { code: "ur", name: "اردو" },
    Language { code: "gu", name: "ગુજરાતી" },
    Language { code: "kn", name: "ಕನ್ನಡ" },
    Language { code: "ml", name: "മലയാളം" },
    Language { code: "pa", name: "ਪੰਜਾਬੀ" },
    Language { code: "as", name: "অসমীয়া" },
    Language { code: "or", name: "ଓଡ଼ିଆ" },
    Language { code: "sa", name: "संस्कृतम्" },
    Language { code: "si", name: "සිංහල" },
    Language { code: "ne", name: "नेपाली" },
    Language { code: "sd", name: "سنڌي" },
    Language { code: "ks", name: "कॉशुर" },
    Language { code: "doi", name: "डोगरी" },
    Language { code: "kok", name: "कोंकणी" },
    Language { code: "mai", name: "मैथिली" },
    Language { code: "mni", name: "মৈতৈলোন্" },
    Language { code: "sat", name: "संताली" },
    Language { code: "bho", name: "भोजपुरी" },
    Language { code: "raj", name: "राजस्थानी" },
];

/// 按代码查找语言
pub fn find(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// 语言的本地名称，未知代码原样返回
pub fn display_name(code: &str) -> &str {
    find(code).map(|lang| lang.name).unwrap_or(code)
}

pub fn supported_languages() -> &'static [Language] {
    SUPPORTED_LANGUAGES
}
