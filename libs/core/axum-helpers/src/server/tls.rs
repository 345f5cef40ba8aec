//! TLS certificate handling for the rustls listener.

use axum_server::tls_rustls::RustlsConfig;
use core_config::tls::{TlsConfig, TlsMaterial};
use std::io;
use tracing::info;

/// Live rustls configuration plus the paths it was loaded from.
///
/// Cloning is cheap and every clone shares the same configuration, so a
/// reload through any clone is seen by the listener.
#[derive(Clone)]
pub struct TlsHandle {
    config: RustlsConfig,
    source: TlsConfig,
}

impl TlsHandle {
    /// Builds the rustls configuration from PEM bytes read at startup.
    ///
    /// # Errors
    /// Returns `InvalidData`-style errors if the certificate chain or the
    /// private key cannot be parsed.
    pub async fn from_material(material: TlsMaterial, source: TlsConfig) -> io::Result<Self> {
        let config = RustlsConfig::from_pem(material.cert, material.key).await?;
        info!(
            cert = %source.cert_path.display(),
            key = %source.key_path.display(),
            "TLS certificate loaded"
        );
        Ok(Self { config, source })
    }

    /// Re-reads the certificate and key files and swaps them in.
    ///
    /// New handshakes use the new certificate; established connections are
    /// untouched. On error the previous certificate stays active.
    pub async fn reload(&self) -> io::Result<()> {
        let material = self.source.load().map_err(io::Error::other)?;
        self.config
            .reload_from_pem(material.cert, material.key)
            .await?;
        info!(cert = %self.source.cert_path.display(), "TLS certificate reloaded");
        Ok(())
    }

    pub fn rustls_config(&self) -> RustlsConfig {
        self.config.clone()
    }
}

impl std::fmt::Debug for TlsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsHandle")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Reloads the certificate every time the process receives `SIGHUP`.
///
/// # Errors
/// Returns an error if the signal handler cannot be installed.
#[cfg(unix)]
pub fn reload_on_sighup(tls: TlsHandle) -> io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())?;
    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            info!("Received SIGHUP, reloading TLS certificate");
            if let Err(e) = tls.reload().await {
                tracing::warn!("TLS reload failed, keeping current certificate: {}", e);
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writes a fresh self-signed pair into `dir` and returns its paths.
    fn write_self_signed(dir: &Path) -> TlsConfig {
        let generated =
            rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let config = TlsConfig::new(dir.join("cert.pem"), dir.join("key.pem"));
        std::fs::write(&config.cert_path, generated.cert.pem()).unwrap();
        std::fs::write(&config.key_path, generated.key_pair.serialize_pem()).unwrap();
        config
    }

    #[tokio::test]
    async fn test_garbage_pem_is_rejected() {
        let material = TlsMaterial {
            cert: b"not a certificate".to_vec(),
            key: b"not a key".to_vec(),
        };

        let result = TlsHandle::from_material(material, TlsConfig::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_self_signed_pair_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let source = write_self_signed(tmp.path());

        let material = source.load().unwrap();
        let result = TlsHandle::from_material(material, source).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reload_swaps_in_new_certificate() {
        let tmp = TempDir::new().unwrap();
        let source = write_self_signed(tmp.path());
        let tls = TlsHandle::from_material(source.load().unwrap(), source)
            .await
            .unwrap();
        let before = tls.rustls_config().get_inner();

        write_self_signed(tmp.path());
        tls.reload().await.unwrap();

        let after = tls.rustls_config().get_inner();
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_certificate() {
        let tmp = TempDir::new().unwrap();
        let source = write_self_signed(tmp.path());
        let tls = TlsHandle::from_material(source.load().unwrap(), source.clone())
            .await
            .unwrap();
        let before = tls.rustls_config().get_inner();

        std::fs::remove_file(&source.key_path).unwrap();
        assert!(tls.reload().await.is_err());

        std::fs::write(&source.key_path, b"not a key").unwrap();
        assert!(tls.reload().await.is_err());

        let after = tls.rustls_config().get_inner();
        assert!(Arc::ptr_eq(&before, &after));
    }
}
