use super::shutdown::shutdown_signal;
use super::tls::TlsHandle;
use crate::errors::handlers::{handle_panic, method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router, middleware};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Where the OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Starts the Axum server on a plain TCP listener with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on http://{}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Starts the Axum server behind rustls with graceful shutdown.
///
/// The certificate comes from `tls`, which was loaded once at startup;
/// [`TlsHandle::reload`] swaps it without restarting the listener.
/// On shutdown, in-flight connections get `shutdown_timeout` to finish.
///
/// # Errors
/// Returns an error if the address does not resolve, the listener fails to
/// bind, or the server encounters an error during operation.
pub async fn create_tls_app(
    router: Router,
    server_config: &ServerConfig,
    tls: TlsHandle,
    shutdown_timeout: Duration,
) -> io::Result<()> {
    let addr = resolve(&server_config.address()).await?;

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(shutdown_timeout));
    });

    info!("Server starting on https://{}", addr);
    axum_server::bind_rustls(addr, tls.rustls_config())
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })
}

async fn resolve(address: &str) -> io::Result<SocketAddr> {
    tokio::net::lookup_host(address).await?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("{} did not resolve to any address", address),
        )
    })
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - The OpenAPI document at [`OPENAPI_PATH`]
/// - `apis`, merged at the root (state already applied)
/// - JSON 404 fallback and JSON 405 for known paths with the wrong method
/// - Middleware, outermost first: CORS, security headers, panic catcher,
///   request tracing, body size limit
///
/// # Errors
/// Returns an error if a configured CORS origin is not a valid header value.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum_helpers::server::create_router;
/// use core_config::cors::CorsConfig;
///
/// let api_routes = Router::new().nest("/items", items_router);
/// let router = create_router::<ApiDoc>(api_routes, &CorsConfig::permissive())?;
/// ```
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(cors)?;
    match &cors.allowed_origins {
        Some(origins) => info!("CORS configured with allowed origins: {}", origins.join(",")),
        None => info!("CORS configured to allow any origin"),
    }

    let openapi = T::openapi();

    let router = Router::new()
        .route(
            OPENAPI_PATH,
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer);

    Ok(router)
}
