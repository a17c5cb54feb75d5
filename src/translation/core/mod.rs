//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 缓存查询、失败回退和对象翻译
//! - **引擎层** (`engine.rs`): 与补全服务交互，批次拼接与拆分
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     ├── JsonCollector (pipeline/collector.rs)
//!     │       └── FieldFilter (pipeline/filters.rs)
//!     └── TranslationEngine (engine.rs)
//!             ├── SegmentBatch (pipeline/batch.rs)
//!             └── CompletionProvider (provider/)
//! ```

pub mod engine;
pub mod service;

pub use engine::{EngineStats, EngineStatsSnapshot, TranslationEngine};
pub use service::TranslationService;
