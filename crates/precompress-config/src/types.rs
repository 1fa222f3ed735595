//! Configuration types

use precompress_compression::{BackendPreference, BrotliOptions};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrecompressConfig {
    /// Output name template (`[base]`, `[name]`, `[ext]`)
    ///
    /// Placeholders come from the last path segment of the original name.
    /// The original's directory is always kept in front of the result, so
    /// `js/app.js` with `[base].br` becomes `js/app.js.br`, and a template
    /// without placeholders such as `bundle.br` becomes `js/bundle.br`.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Artifacts smaller than this are never compressed
    #[serde(default)]
    pub min_size_in_bytes: usize,

    /// Largest compressed/original ratio that is kept (inclusive)
    #[serde(default = "default_max_compression_ratio")]
    pub max_compression_ratio: f64,

    /// Remove the original artifact once its compressed copy is kept
    #[serde(default)]
    pub delete_original_assets: bool,

    /// Which artifact names are considered
    #[serde(default)]
    pub filter: FilterConfig,

    /// What to do when the derived name already exists
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Backend selection
    #[serde(default)]
    pub backend: BackendPreference,

    /// Tuning options passed through to the backend
    #[serde(default)]
    pub brotli: BrotliOptions,
}

impl Default for PrecompressConfig {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            min_size_in_bytes: 0,
            max_compression_ratio: default_max_compression_ratio(),
            delete_original_assets: false,
            filter: FilterConfig::default(),
            on_collision: CollisionPolicy::default(),
            backend: BackendPreference::default(),
            brotli: BrotliOptions::default(),
        }
    }
}

fn default_output_format() -> String {
    "[base].br".to_string()
}

fn default_max_compression_ratio() -> f64 {
    0.8
}

/// Inclusion filter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterConfig {
    /// Every artifact is considered
    None,

    /// Only names matching this regular expression are considered
    Pattern(String),

    /// Names ending in any of these suffixes are skipped
    ExcludeSuffixes(Vec<String>),
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::ExcludeSuffixes(default_excluded_suffixes())
    }
}

/// Suffixes of formats that are already compressed
pub fn default_excluded_suffixes() -> Vec<String> {
    vec!["gz".to_string(), "br".to_string(), "woff2".to_string()]
}

/// Behavior when a derived name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Record the artifact as failed and leave the set untouched
    #[default]
    Fail,

    /// Replace the existing entry
    Overwrite,
}

/// Partial configuration; unset fields keep the value underneath
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigOverrides {
    /// Output name template
    pub output_format: Option<String>,

    /// Minimum size in bytes
    pub min_size_in_bytes: Option<usize>,

    /// Maximum compression ratio
    pub max_compression_ratio: Option<f64>,

    /// Delete originals
    pub delete_original_assets: Option<bool>,

    /// Inclusion filter
    pub filter: Option<FilterConfig>,

    /// Collision policy
    pub on_collision: Option<CollisionPolicy>,

    /// Backend selection
    pub backend: Option<BackendPreference>,

    /// Backend tuning
    pub brotli: BrotliOverrides,
}

/// Partial backend tuning options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrotliOverrides {
    /// Quality/effort level
    pub quality: Option<u32>,

    /// Window size
    pub lgwin: Option<u32>,

    /// Encoder mode
    pub mode: Option<precompress_compression::BrotliMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrecompressConfig::default();
        assert_eq!(config.output_format, "[base].br");
        assert_eq!(config.min_size_in_bytes, 0);
        assert_eq!(config.max_compression_ratio, 0.8);
        assert!(!config.delete_original_assets);
        assert_eq!(
            config.filter,
            FilterConfig::ExcludeSuffixes(vec!["gz".into(), "br".into(), "woff2".into()])
        );
        assert_eq!(config.on_collision, CollisionPolicy::Fail);
        assert_eq!(config.backend, BackendPreference::Auto);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: PrecompressConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PrecompressConfig::default());
    }

    #[test]
    fn test_filter_representations() {
        let pattern: FilterConfig = serde_json::from_str(r#"{"pattern": "\\.js$"}"#).unwrap();
        assert_eq!(pattern, FilterConfig::Pattern("\\.js$".to_string()));

        let none: FilterConfig = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(none, FilterConfig::None);
    }
}
