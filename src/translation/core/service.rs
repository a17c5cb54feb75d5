//! 统一翻译服务
//!
//! 对外提供单条、批量、对象翻译和同步的缓存查询。公开接口永远不会
//! 返回错误：任何失败都退回原文，并记录一条警告。需要区分成功与失败的
//! 调用方使用 `try_` 前缀的版本。

use std::sync::Arc;

use serde_json::Value;

use super::engine::{EngineStatsSnapshot, TranslationEngine};
use crate::translation::{
    config::TranslationConfig,
    error::{helpers, TranslationResult},
    languages,
    pipeline::{FieldFilter, JsonCollector, SegmentBatch},
    provider::{ChatCompletionProvider, CompletionProvider},
    storage::{CacheStats, TranslationCache},
};

/// 翻译服务
///
/// 克隆得到的句柄共享同一份缓存、补全服务和统计信息。
#[derive(Debug, Clone)]
pub struct TranslationService {
    engine: TranslationEngine,
    cache: TranslationCache,
    collector: JsonCollector,
    source_lang: String,
    enabled: bool,
}

impl TranslationService {
    /// 使用 chat/completions 补全服务创建
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        let provider = ChatCompletionProvider::new(config)?;
        tracing::info!(
            "翻译服务已创建: 模型 {}，接口 {}",
            provider.model(),
            provider.api_url()
        );
        Ok(Self::with_provider(Arc::new(provider), config))
    }

    /// 使用指定补全服务和新的内存缓存创建
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &TranslationConfig) -> Self {
        let cache = TranslationCache::new(&config.source_lang);
        Self::with_parts(provider, cache, config)
    }

    /// 使用指定补全服务和缓存创建，多个服务可以共享同一份缓存
    pub fn with_parts(
        provider: Arc<dyn CompletionProvider>,
        cache: TranslationCache,
        config: &TranslationConfig,
    ) -> Self {
        Self {
            engine: TranslationEngine::new(provider, &config.separator),
            cache,
            collector: JsonCollector::new(FieldFilter::from_config(config)),
            source_lang: config.source_lang.clone(),
            enabled: config.enabled,
        }
    }

    /// 翻译到该语言是否恒等返回
    ///
    /// 功能关闭、目标为源语言或目标语言不在支持列表中时都不发请求。
    pub fn is_passthrough(&self, lang: &str) -> bool {
        if !self.enabled || lang == self.source_lang {
            return true;
        }
        if !languages::is_supported(lang) {
            tracing::debug!("不支持的目标语言 {}，返回原文", lang);
            return true;
        }
        false
    }

    // ------------------------------------------------------------------
    // 单条翻译
    // ------------------------------------------------------------------

    /// 翻译单条文本，失败时返回原文
    pub async fn translate_one(&self, text: &str, lang: &str) -> String {
        match self.try_translate_one(text, lang).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("翻译失败，返回原文 ({}): {}", lang, e);
                text.to_string()
            }
        }
    }

    pub async fn try_translate_one(&self, text: &str, lang: &str) -> TranslationResult<String> {
        if self.is_passthrough(lang) || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if let Some(hit) = self.cache.get(lang, text) {
            tracing::debug!("缓存命中: {}", lang);
            return Ok(hit);
        }

        self.translate_uncached(text, lang).await
    }

    async fn translate_uncached(&self, text: &str, lang: &str) -> TranslationResult<String> {
        let translated = self
            .engine
            .translate_text(text, languages::display_name(lang))
            .await?;
        self.cache.put(lang, text, &translated);
        Ok(translated)
    }

    // ------------------------------------------------------------------
    // 批量翻译
    // ------------------------------------------------------------------

    /// 批量翻译，结果与输入顺序和数量一致
    ///
    /// 失败时未缓存的条目返回原文，已缓存的条目仍返回译文。
    pub async fn translate_batch(&self, texts: &[String], lang: &str) -> Vec<String> {
        match self.try_translate_batch(texts, lang).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(
                    "批量翻译失败，{} 条文本退回原文或缓存 ({}): {}",
                    texts.len(),
                    lang,
                    e
                );
                texts.iter().map(|text| self.peek(text, lang)).collect()
            }
        }
    }

    pub async fn try_translate_batch(
        &self,
        texts: &[String],
        lang: &str,
    ) -> TranslationResult<Vec<String>> {
        if self.is_passthrough(lang) {
            return Ok(texts.to_vec());
        }

        let mut output = texts.to_vec();
        let mut joinable = Vec::new();
        let mut standalone = Vec::new();

        for (position, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            if let Some(hit) = self.cache.get(lang, text) {
                output[position] = hit;
            } else if text.contains(self.engine.separator()) {
                standalone.push((position, text.as_str()));
            } else {
                joinable.push((position, text.as_str()));
            }
        }

        if joinable.is_empty() && standalone.is_empty() {
            tracing::debug!("批量翻译全部命中缓存: {} 条", texts.len());
            return Ok(output);
        }

        // 含分隔标记的文本无法拼接，逐条发送；某条失败只退回它自己的原文
        let singles = SegmentBatch::from_pending(standalone);
        for (unique, text) in singles.segments().iter().enumerate() {
            let translated = match self.translate_uncached(text, lang).await {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!("含分隔标记的文本翻译失败，保留原文 ({}): {}", lang, e);
                    text.clone()
                }
            };
            for &(position, _) in singles.slots().iter().filter(|(_, u)| *u == unique) {
                output[position] = translated.clone();
            }
        }

        let batch = SegmentBatch::from_pending(joinable);
        if batch.is_empty() {
            return Ok(output);
        }

        tracing::debug!(
            "批量翻译: {} 条待译，去重后 {} 条，约 {} 字符",
            batch.slots().len(),
            batch.len(),
            batch.estimated_chars()
        );

        let translated = self
            .engine
            .translate_segments(batch.segments(), languages::display_name(lang))
            .await?;

        for (source, target) in batch.segments().iter().zip(&translated) {
            self.cache.put(lang, source, target);
        }
        for &(position, unique) in batch.slots() {
            output[position] = translated[unique].clone();
        }

        Ok(output)
    }

    /// 预热缓存，返回这些文本中已有译文的数量
    pub async fn preload(&self, texts: &[String], lang: &str) -> usize {
        if self.is_passthrough(lang) {
            return 0;
        }
        self.translate_batch(texts, lang).await;
        texts
            .iter()
            .filter(|text| self.cache.contains(lang, text))
            .count()
    }

    // ------------------------------------------------------------------
    // 对象翻译
    // ------------------------------------------------------------------

    /// 翻译 JSON 值中所有需要翻译的字符串，返回深拷贝
    ///
    /// 整个对象只发起一次批量翻译；失败时返回原对象的拷贝。
    pub async fn translate_object(&self, value: &Value, lang: &str) -> Value {
        match self.try_translate_object(value, lang).await {
            Ok(translated) => translated,
            Err(e) => {
                helpers::log_error(&e.with_context("对象翻译失败，返回原对象"));
                value.clone()
            }
        }
    }

    pub async fn try_translate_object(&self, value: &Value, lang: &str) -> TranslationResult<Value> {
        if self.is_passthrough(lang) {
            return Ok(value.clone());
        }

        let leaves = self.collector.collect(value);
        if leaves.is_empty() {
            return Ok(value.clone());
        }

        let texts: Vec<String> = leaves.iter().map(|leaf| leaf.text.clone()).collect();
        let translated = self.try_translate_batch(&texts, lang).await?;
        Ok(self.collector.apply(value, &leaves, &translated))
    }

    // ------------------------------------------------------------------
    // 同步查询
    // ------------------------------------------------------------------

    /// 返回已缓存的译文，没有时返回原文，不会发起请求
    pub fn peek(&self, text: &str, lang: &str) -> String {
        if self.is_passthrough(lang) || text.trim().is_empty() {
            return text.to_string();
        }
        self.cache
            .peek(lang, text)
            .unwrap_or_else(|| text.to_string())
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    pub fn engine_stats(&self) -> EngineStatsSnapshot {
        self.engine.get_stats()
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::error::TranslationError;
    use crate::translation::provider::CompletionRequest;
    use async_trait::async_trait;
    use serde_json::json;

    /// 把每个分段包上语言标记
    struct Tagging;

    #[async_trait]
    impl CompletionProvider for Tagging {
        fn name(&self) -> &str {
            "tagging"
        }

        async fn complete(&self, request: CompletionRequest) -> TranslationResult<String> {
            let separator = crate::translation::constants::SEGMENT_SEPARATOR;
            Ok(request
                .user
                .split(separator)
                .map(|s| format!("[{}]{}", request.language, s))
                .collect::<Vec<_>>()
                .join(separator))
        }
    }

    struct Broken;

    #[async_trait]
    impl CompletionProvider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn complete(&self, _request: CompletionRequest) -> TranslationResult<String> {
            Err(TranslationError::TranslationServiceError("503".into()))
        }
    }

    fn service(provider: Arc<dyn CompletionProvider>) -> TranslationService {
        TranslationService::with_provider(provider, &TranslationConfig::default())
    }

    #[tokio::test]
    async fn test_language_name_in_prompt() {
        let svc = service(Arc::new(Tagging));
        assert_eq!(svc.translate_one("Hello", "ta").await, "[தமிழ்]Hello");
    }

    #[tokio::test]
    async fn test_unsupported_language_is_identity() {
        let svc = service(Arc::new(Tagging));
        let texts = vec!["Hello".to_string()];

        assert_eq!(svc.translate_one("Hello", "xx").await, "Hello");
        assert_eq!(svc.translate_batch(&texts, "xx").await, texts);
        assert_eq!(
            svc.translate_object(&json!({ "status": "Open" }), "xx").await,
            json!({ "status": "Open" })
        );
        assert_eq!(svc.peek("Hello", "xx"), "Hello");
        assert_eq!(svc.engine_stats().provider_calls, 0);
        assert!(svc.cache().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_service_is_identity() {
        let config = TranslationConfig {
            enabled: false,
            ..TranslationConfig::default()
        };
        let svc = TranslationService::with_provider(Arc::new(Tagging), &config);

        assert_eq!(svc.translate_one("Hello", "hi").await, "Hello");
        assert_eq!(svc.engine_stats().provider_calls, 0);
    }

    #[tokio::test]
    async fn test_batch_failure_keeps_cached_entries() {
        let cache = TranslationCache::new("en");
        cache.put("hi", "Cached", "कैश");
        let svc = TranslationService::with_parts(
            Arc::new(Broken),
            cache,
            &TranslationConfig::default(),
        );

        let texts = vec!["Cached".to_string(), "Fresh".to_string()];
        assert_eq!(svc.translate_batch(&texts, "hi").await, vec!["कैश", "Fresh"]);
    }

    #[tokio::test]
    async fn test_object_excludes_identifiers() {
        let svc = service(Arc::new(Tagging));
        let value = json!({ "_id": "65f1c2a9e4b0a1b2c3d4e5f6", "status": "Pending", "amount": 250 });

        let out = svc.translate_object(&value, "hi").await;
        assert_eq!(
            out,
            json!({ "_id": "65f1c2a9e4b0a1b2c3d4e5f6", "status": "[हिन्दी]Pending", "amount": 250 })
        );
    }

    #[tokio::test]
    async fn test_preload_counts_cached() {
        let svc = service(Arc::new(Tagging));
        let texts = vec!["Home".to_string(), "Profile".to_string(), " ".to_string()];

        assert_eq!(svc.preload(&texts, "mr").await, 2);
        assert_eq!(svc.peek("Profile", "mr"), "[मराठी]Profile");
        assert_eq!(svc.preload(&texts, "en").await, 0);
    }
}
