// 集成测试公共模块
//
// 提供桩补全服务、测试环境和示例数据

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use portal_translate::translation::{
    constants, CompletionProvider, CompletionRequest, TranslationCache, TranslationConfig,
    TranslationError, TranslationResult, TranslationService,
};

/// 桩服务的回复方式
#[derive(Debug, Clone)]
pub enum StubMode {
    /// 每个分段加上 `语言名:` 前缀
    Tag,
    /// 原样返回
    Identity,
    /// 总是失败
    Fail,
    /// 丢掉最后一个分段，制造数量不一致
    DropSegment,
    /// 依次返回预设回复，用完后失败
    Scripted(Vec<String>),
    /// 依次返回预设结果，可以混合成功和失败
    Replies(Vec<TranslationResult<String>>),
}

/// 记录调用次数和请求内容的桩补全服务
pub struct StubProvider {
    mode: StubMode,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubProvider {
    pub fn new(mode: StubMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|r| r.user.clone())
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: CompletionRequest) -> TranslationResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let separator = constants::SEGMENT_SEPARATOR;
        match &self.mode {
            StubMode::Tag => Ok(request
                .user
                .split(separator)
                .map(|segment| format!("{}:{}", request.language, segment))
                .collect::<Vec<_>>()
                .join(separator)),
            StubMode::Identity => Ok(request.user),
            StubMode::Fail => Err(TranslationError::NetworkError(
                "connection refused".to_string(),
            )),
            StubMode::DropSegment => {
                let mut segments: Vec<&str> = request.user.split(separator).collect();
                segments.pop();
                Ok(segments.join(separator))
            }
            StubMode::Scripted(replies) => replies.get(call).cloned().ok_or_else(|| {
                TranslationError::TranslationServiceError("no scripted reply".to_string())
            }),
            StubMode::Replies(replies) => replies.get(call).cloned().unwrap_or_else(|| {
                Err(TranslationError::TranslationServiceError(
                    "no scripted reply".to_string(),
                ))
            }),
        }
    }
}

/// 测试环境
pub struct TestEnvironment {
    pub service: TranslationService,
    pub provider: Arc<StubProvider>,
}

impl TestEnvironment {
    pub fn new(mode: StubMode) -> Self {
        Self::with_config(mode, TranslationConfig::default())
    }

    pub fn with_config(mode: StubMode, config: TranslationConfig) -> Self {
        let provider = StubProvider::new(mode);
        let service = TranslationService::with_provider(provider.clone(), &config);
        Self { service, provider }
    }

    /// 使用外部缓存，便于预置条目或在多个服务间共享
    pub fn with_cache(mode: StubMode, cache: TranslationCache) -> Self {
        let provider = StubProvider::new(mode);
        let service =
            TranslationService::with_parts(provider.clone(), cache, &TranslationConfig::default());
        Self { service, provider }
    }

    pub fn calls(&self) -> usize {
        self.provider.calls()
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 模拟后端的预约列表响应
pub fn sample_booking_response() -> Value {
    json!({
        "success": true,
        "message": "Bookings fetched",
        "count": 2,
        "data": [
            {
                "_id": "65f1c2a9e4b0a1b2c3d4e5f6",
                "service": "Plumbing",
                "status": "Pending",
                "price": 499.5,
                "urgent": false,
                "notes": null,
                "worker": {
                    "name": "Ravi Kumar",
                    "email": "ravi@example.com",
                    "skills": ["Pipe repair", "Leak detection"]
                },
                "createdAt": "2024-03-15T10:30:00.000Z"
            },
            {
                "_id": "65f1c2a9e4b0a1b2c3d4e5f7",
                "service": "Electrical",
                "status": "Completed",
                "price": 799,
                "urgent": true,
                "notes": "Bring a ladder",
                "worker": null,
                "createdAt": "2024-03-16T08:00:00.000Z"
            }
        ]
    })
}
