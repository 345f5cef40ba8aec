use axum_helpers::server::{TlsHandle, create_app, create_router, create_tls_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

/// How long in-flight TLS connections get to finish on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // Build router with API routes and the health endpoint
    let api_routes = api::routes().merge(health_router(config.app));

    // Wrap them with OpenAPI docs and the shared middleware stack
    let app = create_router::<openapi::ApiDoc>(api_routes, &config.cors)?;

    match &config.tls {
        None => {
            info!("Starting {} v{} over http", config.app.name, config.app.version);
            create_app(app, &config.server)
                .await
                .map_err(|e| eyre::eyre!("Server error: {}", e))?;
        }
        Some(tls_config) => {
            // Certificates are read once here; a failure stops startup.
            let material = tls_config.load()?;
            let tls = TlsHandle::from_material(material, tls_config.clone()).await?;

            #[cfg(unix)]
            axum_helpers::server::reload_on_sighup(tls.clone())?;

            info!("Starting {} v{} over https", config.app.name, config.app.version);
            create_tls_app(app, &config.server, tls, SHUTDOWN_GRACE)
                .await
                .map_err(|e| eyre::eyre!("Server error: {}", e))?;
        }
    }

    info!("Items API shutdown complete");
    Ok(())
}
