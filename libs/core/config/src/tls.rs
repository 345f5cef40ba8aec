use crate::{env_or_default, ConfigError, FromEnv};
use std::path::{Path, PathBuf};

pub const DEFAULT_CERT_PATH: &str = "certs/cert.pem";
pub const DEFAULT_KEY_PATH: &str = "certs/key.pem";

/// Location of the PEM-encoded certificate chain and private key.
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Certificate and key bytes read at startup.
#[derive(Clone)]
pub struct TlsMaterial {
    pub cert: Vec<u8>,
    pub key: Vec<u8>,
}

impl std::fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("cert_len", &self.cert.len())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl TlsConfig {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    /// Reads both files. Either one missing or unreadable is an error.
    pub fn load(&self) -> Result<TlsMaterial, ConfigError> {
        Ok(TlsMaterial {
            cert: read_file(&self.cert_path)?,
            key: read_file(&self.key_path)?,
        })
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::UnreadableFile {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

impl FromEnv for TlsConfig {
    /// - TLS_CERT_PATH: defaults to `certs/cert.pem`
    /// - TLS_KEY_PATH: defaults to `certs/key.pem`
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_or_default("TLS_CERT_PATH", DEFAULT_CERT_PATH),
            env_or_default("TLS_KEY_PATH", DEFAULT_KEY_PATH),
        ))
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CERT_PATH, DEFAULT_KEY_PATH)
    }
}
