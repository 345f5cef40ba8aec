use core_config::{
    AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig, tls::TlsConfig,
};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    /// Certificate locations, only present when serving https
    pub tls: Option<TlsConfig>,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let tls = if server.protocol.is_tls() {
            Some(TlsConfig::from_env()?)
        } else {
            None
        };
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            tls,
            cors,
            environment,
        })
    }
}
