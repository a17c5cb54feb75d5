//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::translation::{
    languages::Language, CacheStats, EngineStatsSnapshot, TranslationService,
};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub service: TranslationService,
}

/// 单条翻译请求
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
}

/// 单条翻译响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated: String,
    pub target_lang: String,
}

/// 批量翻译请求
#[derive(Debug, Deserialize)]
pub struct BatchTranslateRequest {
    pub texts: Vec<String>,
    pub target_lang: String,
}

/// 批量翻译响应，顺序与请求一致
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchTranslateResponse {
    pub translated: Vec<String>,
    pub target_lang: String,
}

/// 对象翻译请求
#[derive(Debug, Deserialize)]
pub struct ObjectTranslateRequest {
    pub data: Value,
    pub target_lang: String,
}

/// 对象翻译响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectTranslateResponse {
    pub data: Value,
    pub target_lang: String,
}

/// 支持的语言列表
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub source_lang: String,
    pub languages: &'static [Language],
}

/// 缓存统计响应
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub cache: CacheStats,
    pub hit_rate: f64,
    pub engine: EngineStatsSnapshot,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub translation_enabled: bool,
}
