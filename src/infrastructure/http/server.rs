//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{error_logging_middleware, TrustedOrigins};
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限，接口只收 JSON
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// 预检结果缓存时间
const CORS_MAX_AGE_SECS: u64 = 3600;

/// 只放行可信来源的 CORS 配置
///
/// 无法作为头部值解析的来源会被跳过
pub fn cors_layer(origins: &TrustedOrigins) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .as_slice()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparsable trusted origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS))
}

/// HTTP 服务器
pub struct HttpServer {
    addr: String,
    body_limit: usize,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器，addr 形如 "0.0.0.0:3001"
    pub fn new(addr: impl Into<String>, state: AppState) -> Self {
        Self {
            addr: addr.into(),
            body_limit: DEFAULT_BODY_LIMIT,
            state: Arc::new(state),
        }
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// 构建完整 Router（路由 + 中间件）
    pub fn router(&self) -> Router {
        create_routes(&self.state)
            .layer(DefaultBodyLimit::max(self.body_limit))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&self.state.trusted_origins))
            .with_state(self.state.clone())
    }

    /// 启动服务器，shutdown_signal 完成后优雅退出
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.router();

        let listener = TcpListener::bind(&self.addr).await?;
        info!(addr = %listener.local_addr()?, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
    }
}
