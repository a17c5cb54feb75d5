//! Web 服务器模块
//!
//! 以 HTTP 接口提供翻译服务，供前端和其他服务调用

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::translation::{TranslationError, TranslationResult, TranslationService};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    service: TranslationService,
}

impl WebServer {
    pub fn new(config: WebConfig, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> TranslationResult<()> {
        let app = create_router(AppState {
            service: self.service.clone(),
        });

        let address = self.config.listen_address();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| TranslationError::NetworkError(format!("无法绑定 {}: {}", address, e)))?;

        tracing::info!("Web 服务已启动: http://{}", address);

        axum::serve(listener, app)
            .await
            .map_err(|e| TranslationError::InternalError(format!("Web 服务异常退出: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(state: AppState) -> Router {
    create_routes()
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
}
