//! Keep/discard decision for compressed output

use serde::{Deserialize, Serialize};

/// Size thresholds applied around compression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceThresholds {
    /// Artifacts smaller than this are skipped before compression
    pub min_size_in_bytes: usize,

    /// Largest compressed/original ratio that is kept (inclusive)
    pub max_compression_ratio: f64,
}

impl Default for AcceptanceThresholds {
    fn default() -> Self {
        Self {
            min_size_in_bytes: 0,
            max_compression_ratio: 0.8,
        }
    }
}

impl AcceptanceThresholds {
    /// Pre-check: is the artifact large enough to be worth compressing
    pub fn qualifies(&self, original_size: usize) -> bool {
        original_size >= self.min_size_in_bytes
    }

    /// Post-check: keep the compressed form
    pub fn accepts(&self, original_size: usize, compressed_size: usize) -> bool {
        accept(original_size, compressed_size, self)
    }
}

/// compressed / original, or `None` for an empty original
pub fn compression_ratio(original_size: usize, compressed_size: usize) -> Option<f64> {
    if original_size == 0 {
        return None;
    }
    Some(compressed_size as f64 / original_size as f64)
}

/// Keep iff the ratio is at most `max_compression_ratio`
///
/// An empty original has no meaningful ratio and is always rejected.
pub fn accept(original_size: usize, compressed_size: usize, thresholds: &AcceptanceThresholds) -> bool {
    compression_ratio(original_size, compressed_size)
        .map(|ratio| ratio <= thresholds.max_compression_ratio)
        .unwrap_or(false)
}
