//! Inclusion filter over artifact names

use precompress_config::FilterConfig;
use precompress_core::{Error, Result};
use regex::Regex;

/// Decides which artifact names are considered at all
#[derive(Debug, Clone)]
pub enum InclusionFilter {
    /// Every name is considered
    All,

    /// Names matching the pattern are considered
    Pattern(Regex),

    /// Names ending in any suffix are skipped
    ExcludeSuffixes(Vec<String>),
}

impl InclusionFilter {
    /// Build from configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        match config {
            FilterConfig::None => Ok(InclusionFilter::All),
            FilterConfig::Pattern(pattern) => Regex::new(pattern)
                .map(InclusionFilter::Pattern)
                .map_err(|e| Error::config(format!("Invalid filter pattern '{pattern}': {e}"))),
            FilterConfig::ExcludeSuffixes(suffixes) => {
                Ok(InclusionFilter::ExcludeSuffixes(suffixes.clone()))
            }
        }
    }

    /// Whether `name` should be processed
    pub fn matches(&self, name: &str) -> bool {
        match self {
            InclusionFilter::All => true,
            InclusionFilter::Pattern(re) => re.is_match(name),
            InclusionFilter::ExcludeSuffixes(suffixes) => {
                !suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
            }
        }
    }
}

impl Default for InclusionFilter {
    fn default() -> Self {
        InclusionFilter::ExcludeSuffixes(precompress_config::types::default_excluded_suffixes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skips_compressed_formats() {
        let filter = InclusionFilter::default();
        assert!(filter.matches("main.js"));
        assert!(filter.matches("styles.css"));
        assert!(!filter.matches("main.js.br"));
        assert!(!filter.matches("main.js.gz"));
        assert!(!filter.matches("fonts/inter.woff2"));
    }

    #[test]
    fn test_default_is_plain_suffix_match() {
        // No dot required, same as the lookbehind rule it replaces
        let filter = InclusionFilter::default();
        assert!(!filter.matches("debug.tgz"));
        assert!(filter.matches("fonts/inter.woff"));
    }

    #[test]
    fn test_pattern() {
        let filter =
            InclusionFilter::from_config(&FilterConfig::Pattern(r"\.(js|css)$".to_string())).unwrap();
        assert!(filter.matches("app.js"));
        assert!(filter.matches("site.css"));
        assert!(!filter.matches("logo.png"));
    }

    #[test]
    fn test_none_matches_everything() {
        let filter = InclusionFilter::from_config(&FilterConfig::None).unwrap();
        assert!(filter.matches("already.br"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = InclusionFilter::from_config(&FilterConfig::Pattern("(".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
