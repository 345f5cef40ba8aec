//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI document, fallbacks and middleware
//! - Health endpoint
//! - Plain and TLS listeners with graceful shutdown
//! - Certificate reload for the TLS listener
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &CorsConfig::permissive())?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_app(app, &ServerConfig::from_env()?).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;
pub mod tls;

pub use app::{BODY_LIMIT_BYTES, OPENAPI_PATH, create_app, create_router, create_tls_app};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
#[cfg(unix)]
pub use tls::reload_on_sighup;
pub use tls::TlsHandle;
