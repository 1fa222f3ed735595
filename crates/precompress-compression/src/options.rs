//! Brotli tuning options passed through to the backend

use serde::{Deserialize, Serialize};

/// Brotli encoder mode hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrotliMode {
    /// No assumptions about the input
    #[default]
    Generic,
    /// UTF-8 text
    Text,
    /// WOFF 2.0 font data
    Font,
}

impl BrotliMode {
    /// Numeric mode as used by the reference encoder (0, 1, 2)
    pub fn as_u32(&self) -> u32 {
        match self {
            BrotliMode::Generic => 0,
            BrotliMode::Text => 1,
            BrotliMode::Font => 2,
        }
    }
}

/// Backend tuning knobs
///
/// Not validated here; out-of-range values are the backend's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrotliOptions {
    /// Quality/effort level (0-11)
    #[serde(default = "default_quality")]
    pub quality: u32,

    /// Base-2 log of the sliding window size (10-24)
    #[serde(default = "default_lgwin")]
    pub lgwin: u32,

    /// Encoder mode
    #[serde(default)]
    pub mode: BrotliMode,
}

impl Default for BrotliOptions {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            lgwin: default_lgwin(),
            mode: BrotliMode::Generic,
        }
    }
}

fn default_quality() -> u32 {
    11
}

fn default_lgwin() -> u32 {
    22
}

impl BrotliOptions {
    /// Set quality
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Set window size
    pub fn with_lgwin(mut self, lgwin: u32) -> Self {
        self.lgwin = lgwin;
        self
    }

    /// Set mode
    pub fn with_mode(mut self, mode: BrotliMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(any(feature = "standard-backend", feature = "fallback-backend"))]
mod encoder {
    use super::{BrotliMode, BrotliOptions};
    use brotli::enc::backward_references::BrotliEncoderMode;

    impl BrotliMode {
        pub(crate) fn encoder_mode(&self) -> BrotliEncoderMode {
            match self {
                BrotliMode::Generic => BrotliEncoderMode::BROTLI_MODE_GENERIC,
                BrotliMode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
                BrotliMode::Font => BrotliEncoderMode::BROTLI_MODE_FONT,
            }
        }
    }

    // Encoders take i32; values past i32::MAX saturate instead of wrapping.
    impl BrotliOptions {
        pub(crate) fn encoder_quality(&self) -> i32 {
            i32::try_from(self.quality).unwrap_or(i32::MAX)
        }

        pub(crate) fn encoder_lgwin(&self) -> i32 {
            i32::try_from(self.lgwin).unwrap_or(i32::MAX)
        }
    }
}
