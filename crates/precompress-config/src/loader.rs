//! Configuration loading

use crate::types::{ConfigOverrides, PrecompressConfig};
use crate::ConfigFormat;
use precompress_core::{Error, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::Path;

/// Load configuration from a file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PrecompressConfig> {
    let (content, format) = read_file(path.as_ref())?;
    load_from_str(&content, format)
}

/// Load partial overrides from a file
pub fn load_overrides_from_file<P: AsRef<Path>>(path: P) -> Result<ConfigOverrides> {
    let (content, format) = read_file(path.as_ref())?;
    parse(&content, format)
}

fn read_file(path: &Path) -> Result<(String, ConfigFormat)> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    let format = ConfigFormat::from_path(path)?;

    Ok((content, format))
}

/// Expand environment variables in configuration string
/// Supports syntax: ${VAR} and ${VAR:-default}
fn expand_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}")
        .map_err(|e| Error::config(format!("Invalid regex: {e}")))?;

    let mut result = String::new();
    let mut last_match = 0;

    for cap in re.captures_iter(content) {
        let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let var_name = var_name.as_str();
        let default_value = cap.get(3).map(|m| m.as_str());

        let value = match env::var(var_name) {
            Ok(val) => val,
            Err(_) => match default_value {
                Some(default) => default.to_string(),
                None => {
                    return Err(Error::config(format!(
                        "Environment variable '{var_name}' not set and no default provided"
                    )));
                }
            },
        };

        result.push_str(&content[last_match..full_match.start()]);
        result.push_str(&value);
        last_match = full_match.end();
    }

    result.push_str(&content[last_match..]);

    Ok(result)
}

fn parse<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> Result<T> {
    let expanded_content = expand_env_vars(content)?;

    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&expanded_content)
            .map_err(|e| Error::config(format!("Failed to parse YAML: {e}")))?,
        ConfigFormat::Toml => toml::from_str(&expanded_content)
            .map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))?,
        ConfigFormat::Json => serde_json::from_str(&expanded_content)
            .map_err(|e| Error::config(format!("Failed to parse JSON: {e}")))?,
    };

    Ok(parsed)
}

/// Load configuration from a string
///
/// Fields missing from the document take their default values.
pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<PrecompressConfig> {
    parse(content, format)
}

/// Load and validate configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PrecompressConfig> {
    let config = load_from_file(path)?;
    crate::validator::validate_config(&config)?;
    Ok(config)
}

/// Load and merge multiple configuration files
///
/// Each file is a partial layer over the defaults; a field set in a later
/// file overrides the same field from earlier files, unset fields fall
/// through.
///
/// # Example
///
/// ```no_run
/// use precompress_config::load_and_merge;
///
/// let config = load_and_merge(vec![
///     "precompress.yaml",
///     "precompress.production.yaml",
/// ])?;
/// # Ok::<(), precompress_core::Error>(())
/// ```
pub fn load_and_merge<P: AsRef<Path>>(paths: Vec<P>) -> Result<PrecompressConfig> {
    if paths.is_empty() {
        return Err(Error::config("No configuration files provided"));
    }

    let mut layers = Vec::with_capacity(paths.len());
    for path in paths {
        layers.push(load_overrides_from_file(path)?);
    }

    let merged = crate::merger::merge_layers(layers);
    crate::validator::validate_config(&merged)?;

    Ok(merged)
}
