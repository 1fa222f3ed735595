//! Configuration validation

use crate::types::{FilterConfig, PrecompressConfig};
use precompress_core::{Error, Result};
use regex::Regex;

/// Validate configuration
///
/// Backend tuning options are not rejected here; out-of-range values only
/// produce a warning and are left for the backend to handle.
pub fn validate_config(config: &PrecompressConfig) -> Result<()> {
    validate_output_format(config)?;
    validate_thresholds(config)?;
    validate_filter(&config.filter)?;
    check_brotli(config);

    Ok(())
}

fn validate_output_format(config: &PrecompressConfig) -> Result<()> {
    if config.output_format.is_empty() {
        return Err(Error::config("output_format cannot be empty"));
    }

    let has_placeholder = ["[base]", "[name]", "[ext]"]
        .iter()
        .any(|p| config.output_format.contains(p));
    if !has_placeholder {
        tracing::warn!(
            output_format = %config.output_format,
            "output_format has no placeholder; every artifact derives the same name"
        );
    }

    Ok(())
}

fn validate_thresholds(config: &PrecompressConfig) -> Result<()> {
    let ratio = config.max_compression_ratio;

    if !ratio.is_finite() {
        return Err(Error::config(format!(
            "max_compression_ratio must be a finite number, got {ratio}"
        )));
    }

    if ratio < 0.0 {
        return Err(Error::config(format!(
            "max_compression_ratio must be >= 0, got {ratio}"
        )));
    }

    if ratio > 1.0 {
        tracing::warn!(
            max_compression_ratio = ratio,
            "max_compression_ratio > 1.0 keeps outputs larger than their input"
        );
    }

    Ok(())
}

fn validate_filter(filter: &FilterConfig) -> Result<()> {
    match filter {
        FilterConfig::None => Ok(()),
        FilterConfig::Pattern(pattern) => Regex::new(pattern)
            .map(|_| ())
            .map_err(|e| Error::config(format!("Invalid filter pattern '{pattern}': {e}"))),
        FilterConfig::ExcludeSuffixes(suffixes) => {
            if suffixes.iter().any(String::is_empty) {
                return Err(Error::config("exclude_suffixes cannot contain empty entries"));
            }
            Ok(())
        }
    }
}

fn check_brotli(config: &PrecompressConfig) {
    if config.brotli.quality > 11 {
        tracing::warn!(quality = config.brotli.quality, "brotli quality above 11");
    }

    if !(10..=24).contains(&config.brotli.lgwin) {
        tracing::warn!(lgwin = config.brotli.lgwin, "brotli lgwin outside 10..=24");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&PrecompressConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_output_format() {
        let config = PrecompressConfig {
            output_format: String::new(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_ratio_bounds() {
        for ratio in [f64::NAN, f64::INFINITY, -0.1] {
            let config = PrecompressConfig {
                max_compression_ratio: ratio,
                ..Default::default()
            };
            assert!(validate_config(&config).is_err(), "ratio {ratio}");
        }

        let lenient = PrecompressConfig {
            max_compression_ratio: 1.5,
            ..Default::default()
        };
        assert!(validate_config(&lenient).is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = PrecompressConfig {
            filter: FilterConfig::Pattern("([a-z".to_string()),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("([a-z"));
    }

    #[test]
    fn test_empty_suffix() {
        let config = PrecompressConfig {
            filter: FilterConfig::ExcludeSuffixes(vec!["gz".to_string(), String::new()]),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_brotli_options_not_rejected() {
        let mut config = PrecompressConfig::default();
        config.brotli.quality = 42;
        config.brotli.lgwin = 99;
        assert!(validate_config(&config).is_ok());
    }
}
