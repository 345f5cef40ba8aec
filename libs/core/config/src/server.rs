use crate::{env_first, env_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use strum::{Display, EnumString};

/// Transport the server listens with, selected by `PROTOCOL`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// Port variables consulted for this protocol, in priority order.
    pub fn port_keys(&self) -> &'static [&'static str] {
        match self {
            Protocol::Http => &["PORT", "HTTP_PORT", "DEFAULT_PORT"],
            Protocol::Https => &["HTTPS_PORT", "DEFAULT_PORT"],
        }
    }

    pub fn is_tls(&self) -> bool {
        *self == Protocol::Https
    }

    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("PROTOCOL") {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::ParseError {
                key: "PROTOCOL".to_string(),
                details: format!("expected 'http' or 'https', got '{}'", value),
            }),
            Err(_) => Ok(Protocol::default()),
        }
    }
}

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
}

impl ServerConfig {
    pub fn new(host: String, port: u16, protocol: Protocol) -> Self {
        Self {
            host,
            port,
            protocol,
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables:
    /// - PROTOCOL: `http` (default) or `https`
    /// - HOST: defaults to Ipv4Addr::UNSPECIFIED (0.0.0.0 - all interfaces)
    /// - port, required: `PORT`, `HTTP_PORT` or `DEFAULT_PORT` for http,
    ///   `HTTPS_PORT` or `DEFAULT_PORT` for https
    fn from_env() -> Result<Self, ConfigError> {
        let protocol = Protocol::from_env()?;
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let (key, raw_port) = env_first(protocol.port_keys())?;
        let port = raw_port.trim().parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })?;

        Ok(Self {
            host,
            port,
            protocol,
        })
    }
}
