//! 翻译会话
//!
//! 把翻译服务和"当前语言"绑定在一起，供界面层直接使用。语言偏好保存在
//! 一个 JSON 文件中，下次启动时恢复。
//!
//! 翻译请求没有取消机制。发起请求的上下文已经失效时，请求照常完成并写入
//! 缓存，调用方通过 [`LivenessToken`] 决定是否使用结果。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::translation::{
    config::TranslationConfig,
    core::TranslationService,
    error::{TranslationError, TranslationResult},
    languages,
};

// ============================================================================
// 语言偏好
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    language: Option<String>,
}

/// 语言偏好文件
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 平台配置目录下的默认位置
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "portal-translate")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// 优先使用配置中的路径（支持 `~`），否则使用默认位置
    pub fn from_config(config: &TranslationConfig) -> Option<Self> {
        match &config.preference_path {
            Some(path) => Some(Self::new(shellexpand::tilde(path).into_owned())),
            None => Self::default_path().map(Self::new),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取保存的语言代码，文件不存在或无法解析时返回 `None`
    pub fn load_language(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Preferences>(&content) {
            Ok(prefs) => prefs.language,
            Err(e) => {
                tracing::warn!("语言偏好文件无法解析 {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save_language(&self, code: &str) -> TranslationResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let prefs = Preferences {
            language: Some(code.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }
}

// ============================================================================
// 存活标记
// ============================================================================

/// 调用方上下文的存活标记，被丢弃或调用 [`LivenessGuard::invalidate`] 后失效
#[derive(Debug)]
pub struct LivenessGuard {
    alive: Arc<AtomicBool>,
}

/// 可以随异步任务传递的存活检查句柄
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessGuard {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn invalidate(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for LivenessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LivenessGuard {
    fn drop(&mut self) {
        self.invalidate();
    }
}

impl LivenessToken {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// 上下文仍然存活时才应用结果，返回是否已应用
    pub fn apply_if_alive<T, F>(&self, value: T, apply: F) -> bool
    where
        F: FnOnce(T),
    {
        if self.is_alive() {
            apply(value);
            true
        } else {
            tracing::debug!("上下文已失效，丢弃翻译结果");
            false
        }
    }
}

// ============================================================================
// 会话
// ============================================================================

/// 正在进行的翻译计数，离开作用域时自动减一
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 翻译会话
#[derive(Clone)]
pub struct TranslationSession {
    service: TranslationService,
    language: Arc<RwLock<String>>,
    preferences: Option<PreferenceStore>,
    in_flight: Arc<AtomicUsize>,
}

impl TranslationSession {
    /// 创建会话，从偏好文件恢复语言，无效或缺失时使用源语言
    pub fn new(service: TranslationService, preferences: Option<PreferenceStore>) -> Self {
        let language = preferences
            .as_ref()
            .and_then(PreferenceStore::load_language)
            .filter(|code| {
                let supported = languages::is_supported(code);
                if !supported {
                    tracing::warn!("忽略不支持的已保存语言: {}", code);
                }
                supported
            })
            .unwrap_or_else(|| service.source_lang().to_string());

        tracing::debug!("翻译会话语言: {}", language);

        Self {
            service,
            language: Arc::new(RwLock::new(language)),
            preferences,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    pub fn current_language(&self) -> String {
        match self.language.read() {
            Ok(lang) => lang.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 切换语言，不支持的代码会被拒绝且当前语言保持不变
    ///
    /// 偏好文件写入失败只记录警告。
    pub fn change_language(&self, code: &str) -> TranslationResult<()> {
        if !languages::is_supported(code) {
            return Err(TranslationError::UnsupportedLanguage(code.to_string()));
        }

        match self.language.write() {
            Ok(mut lang) => *lang = code.to_string(),
            Err(poisoned) => *poisoned.into_inner() = code.to_string(),
        }

        if let Some(store) = &self.preferences {
            if let Err(e) = store.save_language(code) {
                tracing::warn!("保存语言偏好失败 {}: {}", store.path().display(), e);
            }
        }

        tracing::info!("界面语言已切换为 {} ({})", languages::display_name(code), code);
        Ok(())
    }

    /// 翻译到当前语言
    pub async fn t(&self, text: &str) -> String {
        let _guard = InFlight::enter(&self.in_flight);
        self.service
            .translate_one(text, &self.current_language())
            .await
    }

    /// 翻译到当前语言，上下文失效时返回 `None`
    pub async fn t_guarded(&self, text: &str, token: &LivenessToken) -> Option<String> {
        let translated = self.t(text).await;
        token.is_alive().then_some(translated)
    }

    /// 立即返回缓存的译文或原文；未命中时在后台发起翻译
    ///
    /// 后台任务需要 tokio 运行时，不在运行时内调用时只做查询。
    pub fn t_sync(&self, text: &str) -> String {
        let lang = self.current_language();
        let shown = self.service.peek(text, &lang);

        let needs_fetch = !self.service.is_passthrough(&lang)
            && !text.trim().is_empty()
            && !self.service.cache().contains(&lang, text);

        if needs_fetch {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let service = self.service.clone();
                    let text = text.to_string();
                    let guard = InFlight::enter(&self.in_flight);
                    handle.spawn(async move {
                        let _guard = guard;
                        service.translate_one(&text, &lang).await;
                    });
                }
                Err(_) => tracing::debug!("没有运行时，跳过后台翻译"),
            }
        }

        shown
    }

    /// 翻译接口响应中的字符串
    pub async fn translate_api_response(&self, value: &Value) -> Value {
        let _guard = InFlight::enter(&self.in_flight);
        self.service
            .translate_object(value, &self.current_language())
            .await
    }

    /// 预热当前语言的缓存
    pub async fn preload(&self, texts: &[String]) -> usize {
        let _guard = InFlight::enter(&self.in_flight);
        self.service.preload(texts, &self.current_language()).await
    }

    /// 是否有会话发起的翻译尚未完成
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

impl std::fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSession")
            .field("language", &self.current_language())
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}
