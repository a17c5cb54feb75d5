//! 翻译会话集成测试

use std::time::Duration;

use portal_translate::network::translate_response;
use portal_translate::translation::{
    LivenessGuard, PreferenceStore, TranslationError, TranslationSession,
};
use serde_json::json;
use tempfile::TempDir;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{strings, StubMode, TestEnvironment};

fn session_in(dir: &TempDir, mode: StubMode) -> (TranslationSession, TestEnvironment) {
    let env = TestEnvironment::new(mode);
    let store = PreferenceStore::new(dir.path().join("prefs.json"));
    (TranslationSession::new(env.service.clone(), Some(store)), env)
}

async fn wait_until_idle(session: &TranslationSession) {
    for _ in 0..100 {
        if !session.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session still loading");
}

#[tokio::test]
async fn test_default_language_is_source() {
    let dir = TempDir::new().unwrap();
    let (session, env) = session_in(&dir, StubMode::Tag);

    assert_eq!(session.current_language(), "en");
    assert_eq!(session.t("Sign in").await, "Sign in");
    assert_eq!(env.calls(), 0);
}

#[tokio::test]
async fn test_change_language_persists() {
    let dir = TempDir::new().unwrap();
    let (session, _env) = session_in(&dir, StubMode::Tag);

    session.change_language("hi").unwrap();
    assert_eq!(session.t("Sign in").await, "हिन्दी:Sign in");

    // 新会话从偏好文件恢复语言
    let (restored, _env) = session_in(&dir, StubMode::Tag);
    assert_eq!(restored.current_language(), "hi");
}

#[tokio::test]
async fn test_unsupported_language_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (session, _env) = session_in(&dir, StubMode::Tag);
    session.change_language("ta").unwrap();

    let result = session.change_language("fr");
    assert_eq!(
        result,
        Err(TranslationError::UnsupportedLanguage("fr".to_string()))
    );
    assert_eq!(session.current_language(), "ta");
}

#[tokio::test]
async fn test_invalid_saved_language_falls_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("prefs.json"), r#"{"language":"xx"}"#).unwrap();

    let (session, _env) = session_in(&dir, StubMode::Tag);
    assert_eq!(session.current_language(), "en");
}

#[tokio::test]
async fn test_t_sync_fetches_in_background() {
    let dir = TempDir::new().unwrap();
    let (session, env) = session_in(&dir, StubMode::Tag);
    session.change_language("mr").unwrap();

    assert_eq!(session.t_sync("My bookings"), "My bookings");
    wait_until_idle(&session).await;

    assert_eq!(session.t_sync("My bookings"), "मराठी:My bookings");
    assert_eq!(env.calls(), 1);
}

#[tokio::test]
async fn test_preload_then_sync_lookup() {
    let dir = TempDir::new().unwrap();
    let (session, env) = session_in(&dir, StubMode::Tag);
    session.change_language("te").unwrap();

    let loaded = session.preload(&strings(&["Home", "Services", "Contact"])).await;
    assert_eq!(loaded, 3);
    assert_eq!(env.calls(), 1);
    assert!(!session.is_loading());

    assert_eq!(session.t_sync("Services"), "తెలుగు:Services");
    assert_eq!(env.calls(), 1);
}

#[tokio::test]
async fn test_translate_api_response_uses_current_language() {
    let dir = TempDir::new().unwrap();
    let (session, _env) = session_in(&dir, StubMode::Tag);
    session.change_language("gu").unwrap();

    let out = session
        .translate_api_response(&json!({ "message": "Saved", "id": "x1" }))
        .await;
    assert_eq!(out, json!({ "message": "ગુજરાતી:Saved", "id": "x1" }));
}

#[tokio::test]
async fn test_guarded_result_is_discarded_after_invalidation() {
    let dir = TempDir::new().unwrap();
    let (session, _env) = session_in(&dir, StubMode::Tag);
    session.change_language("hi").unwrap();

    let guard = LivenessGuard::new();
    let token = guard.token();
    assert_eq!(
        session.t_guarded("Open", &token).await,
        Some("हिन्दी:Open".to_string())
    );

    guard.invalidate();
    assert_eq!(session.t_guarded("Close", &token).await, None);
    // 结果虽被丢弃，缓存仍然写入
    assert_eq!(session.service().peek("Close", "hi"), "हिन्दी:Close");
}

#[tokio::test]
async fn test_interceptor_only_translates_success() {
    let env = TestEnvironment::new(StubMode::Tag);
    let body = json!({ "message": "Worker not available" });

    let ok = translate_response(&env.service, 200, body.clone(), "sa").await;
    assert_eq!(ok["message"], "संस्कृतम्:Worker not available");

    let err = translate_response(&env.service, 500, body.clone(), "sa").await;
    assert_eq!(err, body);
}
