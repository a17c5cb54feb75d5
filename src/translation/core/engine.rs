//! 翻译引擎
//!
//! 引擎只负责与补全服务交互：构造提示词、拼接和拆分批次、整理回复。
//! 它不接触缓存，也不做失败回退，所有错误都以 [`TranslationResult`]
//! 返回给服务层处理。
//!
//! ## 工作流程
//! 1. 单条文本直接发送；多条文本用分隔标记拼接后一次发送
//! 2. 去除回复首尾空白
//! 3. 批次回复按分隔标记拆分，分段数量必须与发送时一致

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::translation::{
    error::{TranslationError, TranslationResult},
    pipeline::batch::{join_segments, split_segments},
    provider::{CompletionProvider, CompletionRequest},
};

/// 翻译引擎
#[derive(Clone)]
pub struct TranslationEngine {
    /// 补全服务，多个服务句柄共享同一实例
    provider: Arc<dyn CompletionProvider>,
    separator: String,
    stats: Arc<EngineStats>,
}

impl TranslationEngine {
    pub fn new(provider: Arc<dyn CompletionProvider>, separator: &str) -> Self {
        Self {
            provider,
            separator: separator.to_string(),
            stats: Arc::new(EngineStats::default()),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 翻译单条文本
    ///
    /// `language` 是目标语言的名称，直接写进提示词。
    pub async fn translate_text(&self, text: &str, language: &str) -> TranslationResult<String> {
        let reply = self
            .call(CompletionRequest::single(language, text), text)
            .await?;

        let translated = reply.trim();
        if translated.is_empty() {
            return Err(TranslationError::ParseError(
                "补全服务返回了空译文".to_string(),
            ));
        }

        Ok(translated.to_string())
    }

    /// 一次请求翻译多条文本，结果与输入一一对应
    ///
    /// 包含分隔标记的文本无法安全拼接，返回 `InvalidInput`。
    pub async fn translate_segments(
        &self,
        segments: &[String],
        language: &str,
    ) -> TranslationResult<Vec<String>> {
        match segments {
            [] => return Ok(Vec::new()),
            [only] => return Ok(vec![self.translate_text(only, language).await?]),
            _ => {}
        }

        if segments.iter().any(|s| s.contains(&self.separator)) {
            return Err(TranslationError::InvalidInput(
                "待翻译文本中包含分隔标记".to_string(),
            ));
        }

        let joined = join_segments(segments, &self.separator);
        self.stats.batches_sent.fetch_add(1, Ordering::Relaxed);
        self.stats
            .segments_sent
            .fetch_add(segments.len(), Ordering::Relaxed);

        tracing::debug!(
            "发送批次: {} 个分段，目标语言 {}",
            segments.len(),
            language
        );

        let reply = self
            .call(
                CompletionRequest::batch(language, &self.separator, &joined),
                &joined,
            )
            .await?;

        split_segments(&reply, &self.separator, segments).inspect_err(|e| {
            if matches!(e, TranslationError::SegmentMismatch { .. }) {
                self.stats.segment_mismatches.fetch_add(1, Ordering::Relaxed);
            }
        })
    }

    async fn call(&self, request: CompletionRequest, payload: &str) -> TranslationResult<String> {
        let start = Instant::now();
        self.stats.provider_calls.fetch_add(1, Ordering::Relaxed);
        self.stats
            .characters_sent
            .fetch_add(payload.chars().count(), Ordering::Relaxed);

        match self.provider.complete(request).await {
            Ok(reply) => {
                self.stats
                    .characters_received
                    .fetch_add(reply.chars().count(), Ordering::Relaxed);
                tracing::debug!("补全完成，耗时 {:?}", start.elapsed());
                Ok(reply)
            }
            Err(e) => {
                self.stats.provider_failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    pub fn get_stats(&self) -> EngineStatsSnapshot {
        self.stats.snapshot()
    }
}

impl std::fmt::Debug for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngine")
            .field("provider", &self.provider.name())
            .field("separator", &self.separator)
            .finish()
    }
}

/// 引擎统计信息
#[derive(Debug, Default)]
pub struct EngineStats {
    pub provider_calls: AtomicUsize,
    pub batches_sent: AtomicUsize,
    pub segments_sent: AtomicUsize,
    pub characters_sent: AtomicUsize,
    pub characters_received: AtomicUsize,
    pub provider_failures: AtomicUsize,
    pub segment_mismatches: AtomicUsize,
}

impl EngineStats {
    pub fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            batches_sent: self.batches_sent.load(Ordering::Relaxed),
            segments_sent: self.segments_sent.load(Ordering::Relaxed),
            characters_sent: self.characters_sent.load(Ordering::Relaxed),
            characters_received: self.characters_received.load(Ordering::Relaxed),
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
            segment_mismatches: self.segment_mismatches.load(Ordering::Relaxed),
        }
    }
}

/// 引擎统计快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStatsSnapshot {
    pub provider_calls: usize,
    pub batches_sent: usize,
    pub segments_sent: usize,
    pub characters_sent: usize,
    pub characters_received: usize,
    pub provider_failures: usize,
    pub segment_mismatches: usize,
}
