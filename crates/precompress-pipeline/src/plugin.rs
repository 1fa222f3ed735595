//! Host-facing plugin

use crate::orchestrator::{BatchOrchestrator, OrchestratorSettings};
use crate::outcome::RunReport;
use bytes::Bytes;
use precompress_compression::{resolve, BackendKind, CompressionBackend};
use precompress_config::{merge, validate_config, ConfigOverrides, PrecompressConfig};
use precompress_core::{ArtifactSet, Result};
use std::sync::Arc;
use tracing::info;

/// Brotli precompression plugin
///
/// Configuration is fixed and the backend resolved at construction; the
/// host then calls [`BrotliPlugin::process_assets`] once per build at its
/// transfer-optimization stage.
///
/// # Example
///
/// ```no_run
/// use precompress_pipeline::BrotliPlugin;
/// use precompress_core::InMemoryArtifactSet;
///
/// # async fn example() -> precompress_core::Result<()> {
/// let assets = InMemoryArtifactSet::from_entries([("main.js", "console.log(1);".repeat(64))]);
/// let plugin = BrotliPlugin::new()?;
/// let report = plugin.process_assets(&assets).await?;
/// println!("kept {} artifacts", report.counts().kept);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BrotliPlugin {
    config: PrecompressConfig,
    orchestrator: BatchOrchestrator,
}

impl BrotliPlugin {
    /// Plugin name
    pub const NAME: &'static str = "brotli-precompress";

    /// Plugin with default configuration
    pub fn new() -> Result<Self> {
        Self::from_config(PrecompressConfig::default())
    }

    /// Plugin with `overrides` applied over the defaults
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::from_config(merge(PrecompressConfig::default(), overrides))
    }

    /// Plugin from a complete configuration
    ///
    /// # Errors
    ///
    /// Invalid configuration, or no brotli backend available for the
    /// configured preference.
    pub fn from_config(config: PrecompressConfig) -> Result<Self> {
        validate_config(&config)?;
        let backend = resolve(config.backend)?;
        Self::with_backend(config, backend)
    }

    /// Plugin over an explicit backend, ignoring `config.backend`
    pub fn with_backend(config: PrecompressConfig, backend: Arc<dyn CompressionBackend>) -> Result<Self> {
        let settings = OrchestratorSettings::from_config(&config)?;

        info!(
            plugin = Self::NAME,
            backend = %backend.kind(),
            output_format = %config.output_format,
            delete_original_assets = config.delete_original_assets,
            "Plugin initialized"
        );

        Ok(Self {
            config,
            orchestrator: BatchOrchestrator::new(backend, settings),
        })
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        Self::NAME
    }

    /// Plugin version
    pub fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Effective configuration
    pub fn config(&self) -> &PrecompressConfig {
        &self.config
    }

    /// Resolved backend
    pub fn backend(&self) -> BackendKind {
        self.orchestrator.backend().kind()
    }

    /// Compress every eligible artifact in `set`
    pub async fn process_assets<S>(&self, set: &S) -> Result<RunReport>
    where
        S: ArtifactSet + ?Sized,
    {
        self.orchestrator.run(set).await
    }

    /// Decompress output produced by this plugin
    pub async fn decompress(&self, data: Bytes) -> Result<Bytes> {
        self.orchestrator
            .backend()
            .decompress(data, &self.config.brotli)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precompress_config::FilterConfig;
    use precompress_core::{Error, InMemoryArtifactSet};

    #[test]
    #[cfg(feature = "standard-backend")]
    fn test_metadata() {
        let plugin = BrotliPlugin::new().unwrap();
        assert_eq!(plugin.name(), "brotli-precompress");
        assert_eq!(plugin.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(plugin.backend(), BackendKind::Standard);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let overrides = ConfigOverrides {
            filter: Some(FilterConfig::Pattern("[".into())),
            ..Default::default()
        };
        let err = BrotliPlugin::with_overrides(overrides).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    #[cfg(any(feature = "standard-backend", feature = "fallback-backend"))]
    async fn test_process_and_decompress() {
        let source = "export const answer = 42;\n".repeat(100);
        let assets = InMemoryArtifactSet::from_entries([("main.js", source.clone())]);

        let plugin = BrotliPlugin::new().unwrap();
        let report = plugin.process_assets(&assets).await.unwrap();

        assert_eq!(report.counts().kept, 1);
        let compressed = assets.bytes("main.js.br").unwrap();
        let restored = plugin.decompress(compressed).await.unwrap();
        assert_eq!(restored, source.as_bytes());
    }
}
