//! 翻译管道模块
//!
//! 提供 JSON 文本收集、字段过滤和批次拼接拆分

pub mod batch;
pub mod collector;
pub mod filters;

pub use batch::{join_segments, split_segments, SegmentBatch};
pub use collector::{JsonCollector, PathSegment, TextLeaf};
pub use filters::{looks_like_identifier, FieldFilter};
