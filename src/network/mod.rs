//! # 网络模块
//!
//! - `backend` - 后端 REST 客户端
//! - `interceptor` - 在响应交给调用方之前翻译 JSON 体

pub mod backend;
pub mod interceptor;

pub use backend::BackendClient;
pub use interceptor::translate_response;
