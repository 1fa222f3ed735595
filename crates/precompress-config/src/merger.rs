//! Configuration layering
//!
//! Defaults are an immutable value; callers supply partial overrides which
//! are folded over it once per plugin instance:
//! - built-in defaults
//! - project file (e.g. precompress.yaml)
//! - environment-specific file
//! - programmatic overrides

use crate::types::{BrotliOverrides, ConfigOverrides, PrecompressConfig};
use precompress_compression::BrotliOptions;

/// Apply `overrides` on top of `base`
pub fn merge(mut base: PrecompressConfig, overrides: ConfigOverrides) -> PrecompressConfig {
    if let Some(output_format) = overrides.output_format {
        base.output_format = output_format;
    }
    if let Some(min_size) = overrides.min_size_in_bytes {
        base.min_size_in_bytes = min_size;
    }
    if let Some(ratio) = overrides.max_compression_ratio {
        base.max_compression_ratio = ratio;
    }
    if let Some(delete) = overrides.delete_original_assets {
        base.delete_original_assets = delete;
    }
    if let Some(filter) = overrides.filter {
        base.filter = filter;
    }
    if let Some(policy) = overrides.on_collision {
        base.on_collision = policy;
    }
    if let Some(backend) = overrides.backend {
        base.backend = backend;
    }
    base.brotli = merge_brotli(base.brotli, overrides.brotli);

    base
}

fn merge_brotli(mut base: BrotliOptions, overrides: BrotliOverrides) -> BrotliOptions {
    if let Some(quality) = overrides.quality {
        base.quality = quality;
    }
    if let Some(lgwin) = overrides.lgwin {
        base.lgwin = lgwin;
    }
    if let Some(mode) = overrides.mode {
        base.mode = mode;
    }
    base
}

/// Fold a sequence of overrides over the defaults, later layers winning
pub fn merge_layers<I>(layers: I) -> PrecompressConfig
where
    I: IntoIterator<Item = ConfigOverrides>,
{
    layers
        .into_iter()
        .fold(PrecompressConfig::default(), merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CollisionPolicy, FilterConfig};
    use precompress_compression::BrotliMode;

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let merged = merge(PrecompressConfig::default(), ConfigOverrides::default());
        assert_eq!(merged, PrecompressConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConfigOverrides {
            output_format: Some("[name].br".to_string()),
            delete_original_assets: Some(true),
            filter: Some(FilterConfig::None),
            on_collision: Some(CollisionPolicy::Overwrite),
            ..Default::default()
        };

        let merged = merge(PrecompressConfig::default(), overrides);

        assert_eq!(merged.output_format, "[name].br");
        assert!(merged.delete_original_assets);
        assert_eq!(merged.filter, FilterConfig::None);
        assert_eq!(merged.on_collision, CollisionPolicy::Overwrite);
        // Untouched fields
        assert_eq!(merged.max_compression_ratio, 0.8);
    }

    #[test]
    fn test_later_layers_win_per_field() {
        let base = ConfigOverrides {
            min_size_in_bytes: Some(1024),
            brotli: BrotliOverrides {
                quality: Some(9),
                lgwin: Some(20),
                mode: None,
            },
            ..Default::default()
        };
        let env = ConfigOverrides {
            max_compression_ratio: Some(0.5),
            brotli: BrotliOverrides {
                quality: Some(4),
                mode: Some(BrotliMode::Text),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_layers(vec![base, env]);

        assert_eq!(merged.min_size_in_bytes, 1024);
        assert_eq!(merged.max_compression_ratio, 0.5);
        assert_eq!(merged.brotli.quality, 4);
        assert_eq!(merged.brotli.lgwin, 20);
        assert_eq!(merged.brotli.mode, BrotliMode::Text);
    }

    #[test]
    fn test_merge_does_not_touch_defaults() {
        let _ = merge_layers(vec![ConfigOverrides {
            min_size_in_bytes: Some(10),
            ..Default::default()
        }]);
        assert_eq!(PrecompressConfig::default().min_size_in_bytes, 0);
    }
}
