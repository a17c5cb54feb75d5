//! 批次处理模块
//!
//! 把多条待翻译文本拼成一个请求，再把回复拆回逐条译文。
//!
//! ## 拆分规则
//!
//! 回复必须恰好包含与请求相同数量的分段。模型合并、丢失或多加一个分隔
//! 标记时，按位置对齐会让后面的译文全部错位，所以数量不一致时整个批次
//! 作废，由调用方退回原文。

use std::collections::HashMap;

use crate::translation::error::{TranslationError, TranslationResult};

/// 一个待发送的批次
///
/// 相同的原文只发送一次，`slots` 记录每个调用方位置对应的唯一文本下标。
#[derive(Debug, Clone, Default)]
pub struct SegmentBatch {
    segments: Vec<String>,
    slots: Vec<(usize, usize)>,
}

impl SegmentBatch {
    /// 由 `(调用方位置, 原文)` 构建批次
    pub fn from_pending<'a, I>(pending: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut segments: Vec<String> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut slots = Vec::new();

        for (position, text) in pending {
            let unique = *index.entry(text).or_insert_with(|| {
                segments.push(text.to_string());
                segments.len() - 1
            });
            slots.push((position, unique));
        }

        Self { segments, slots }
    }

    /// 去重后的原文
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `(调用方位置, 唯一文本下标)`
    pub fn slots(&self) -> &[(usize, usize)] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn estimated_chars(&self) -> usize {
        self.segments.iter().map(|s| s.chars().count()).sum()
    }
}

/// 用分隔标记拼接分段
pub fn join_segments(segments: &[String], separator: &str) -> String {
    segments.join(separator)
}

/// 按分隔标记拆分回复并校验分段数量
///
/// 每个分段去除首尾空白；原文非空而译文为空视为回复格式错误。
pub fn split_segments(
    response: &str,
    separator: &str,
    sources: &[String],
) -> TranslationResult<Vec<String>> {
    let parts: Vec<String> = response
        .trim()
        .split(separator)
        .map(|part| part.trim().to_string())
        .collect();

    if parts.len() != sources.len() {
        return Err(TranslationError::SegmentMismatch {
            expected: sources.len(),
            actual: parts.len(),
        });
    }

    if let Some(position) = parts
        .iter()
        .zip(sources)
        .position(|(part, source)| part.is_empty() && !source.trim().is_empty())
    {
        return Err(TranslationError::ParseError(format!(
            "第 {} 个分段的译文为空",
            position
        )));
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let batch = SegmentBatch::from_pending(vec![
            (0, "Pending"),
            (2, "Completed"),
            (3, "Pending"),
            (5, "Cancelled"),
        ]);

        assert_eq!(batch.segments(), &owned(&["Pending", "Completed", "Cancelled"])[..]);
        assert_eq!(batch.slots(), &[(0, 0), (2, 1), (3, 0), (5, 2)]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.estimated_chars(), 7 + 9 + 9);
    }

    #[test]
    fn test_split_matches_count() {
        let sources = owned(&["Hello", "World"]);
        let joined = join_segments(&sources, "||S||");
        assert_eq!(joined, "Hello||S||World");

        let parts = split_segments(" नमस्ते ||S|| दुनिया\n", "||S||", &sources).unwrap();
        assert_eq!(parts, owned(&["नमस्ते", "दुनिया"]));
    }

    #[test]
    fn test_split_rejects_merged_segments() {
        let sources = owned(&["Hello", "World", "Again"]);
        let result = split_segments("नमस्ते दुनिया||S||फिर से", "||S||", &sources);
        assert_eq!(
            result,
            Err(TranslationError::SegmentMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_split_rejects_extra_segments() {
        let sources = owned(&["Hello"]);
        let result = split_segments("नमस्ते||S||", "||S||", &sources);
        assert!(matches!(
            result,
            Err(TranslationError::SegmentMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_split_rejects_empty_translation() {
        let sources = owned(&["Hello", "World"]);
        let result = split_segments("नमस्ते||S||   ", "||S||", &sources);
        assert!(matches!(result, Err(TranslationError::ParseError(_))));
    }
}
