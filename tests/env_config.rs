//! 环境变量加载测试
//!
//! 会修改进程环境变量，单独放在一个测试二进制里，且只有一个测试函数，
//! 避免与读取同名变量的其他测试并发。

use portal_translate::env::{translation, EnvConfig, EnvVar};

#[test]
fn test_env_config_loading() {
    std::env::set_var("PORTAL_WEB_PORT", "8088");
    std::env::set_var("PORTAL_LOG_LEVEL", "debug");
    std::env::set_var("PORTAL_TRANSLATION_MODEL", "gemini-1.5-pro");

    let config = EnvConfig::from_env().unwrap();
    assert_eq!(config.web_port, 8088);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.translation_model, "gemini-1.5-pro");
    assert!(matches!(
        translation::Model::get_explicit(),
        Some(Ok(ref model)) if model == "gemini-1.5-pro"
    ));

    std::env::set_var("PORTAL_WEB_PORT", "0");
    assert!(EnvConfig::from_env().is_err());

    std::env::remove_var("PORTAL_WEB_PORT");
    std::env::remove_var("PORTAL_LOG_LEVEL");
    std::env::remove_var("PORTAL_TRANSLATION_MODEL");

    assert_eq!(EnvConfig::from_env().unwrap().web_port, 7080);
    assert!(translation::Model::get_explicit().is_none());
}
