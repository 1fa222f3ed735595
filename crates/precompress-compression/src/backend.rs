//! The uniform compression capability

use crate::options::BrotliOptions;
use async_trait::async_trait;
use bytes::Bytes;
use precompress_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which implementation backs a [`CompressionBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The `brotli` crate (synchronous, run on the blocking pool)
    Standard,
    /// `async-compression`'s tokio brotli codec
    Fallback,
}

impl BackendKind {
    /// Short backend name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Standard => "standard",
            BackendKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Asynchronous whole-buffer brotli codec
///
/// Every backend, whatever its native calling convention, is exposed
/// through this trait so callers never branch on it.
#[async_trait]
pub trait CompressionBackend: Send + Sync + fmt::Debug {
    /// Backend identity
    fn kind(&self) -> BackendKind;

    /// Compress a whole buffer
    async fn compress(&self, data: Bytes, options: &BrotliOptions) -> Result<Bytes>;

    /// Decompress a whole buffer
    async fn decompress(&self, data: Bytes, options: &BrotliOptions) -> Result<Bytes>;
}
