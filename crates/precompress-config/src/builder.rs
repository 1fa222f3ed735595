//! Configuration builder

use crate::merger::merge;
use crate::types::{CollisionPolicy, ConfigOverrides, FilterConfig, PrecompressConfig};
use precompress_compression::{BackendPreference, BrotliOptions};
use precompress_core::Result;

/// Builder for constructing configuration programmatically
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: PrecompressConfig,
}

impl ConfigBuilder {
    /// Create a builder starting from the defaults
    pub fn new() -> Self {
        Self {
            config: PrecompressConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: PrecompressConfig) -> Self {
        Self { config }
    }

    /// Set the output name template
    pub fn output_format(mut self, template: impl Into<String>) -> Self {
        self.config.output_format = template.into();
        self
    }

    /// Set the minimum artifact size
    pub fn min_size_in_bytes(mut self, min_size: usize) -> Self {
        self.config.min_size_in_bytes = min_size;
        self
    }

    /// Set the maximum kept compression ratio
    pub fn max_compression_ratio(mut self, ratio: f64) -> Self {
        self.config.max_compression_ratio = ratio;
        self
    }

    /// Delete originals after their compressed copy is kept
    pub fn delete_original_assets(mut self, delete: bool) -> Self {
        self.config.delete_original_assets = delete;
        self
    }

    /// Only consider names matching `pattern`
    pub fn include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.filter = FilterConfig::Pattern(pattern.into());
        self
    }

    /// Set the inclusion filter
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.config.filter = filter;
        self
    }

    /// Set the collision policy
    pub fn on_collision(mut self, policy: CollisionPolicy) -> Self {
        self.config.on_collision = policy;
        self
    }

    /// Pin a backend
    pub fn backend(mut self, backend: BackendPreference) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set backend tuning options
    pub fn brotli(mut self, options: BrotliOptions) -> Self {
        self.config.brotli = options;
        self
    }

    /// Apply partial overrides
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.config = merge(self.config, overrides);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<PrecompressConfig> {
        crate::validator::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
