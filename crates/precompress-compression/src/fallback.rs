//! Backend over `async-compression`

use crate::backend::{BackendKind, CompressionBackend};
use crate::options::BrotliOptions;
use async_compression::brotli::EncoderParams;
use async_compression::tokio::bufread::{BrotliDecoder, BrotliEncoder};
use async_compression::Level;
use async_trait::async_trait;
use bytes::Bytes;
use precompress_core::{Error, Result};
use tokio::io::AsyncReadExt;

/// Brotli backend over `async-compression`'s tokio codec
///
/// Natively asynchronous. The codec clamps `quality` to 0-11 and `lgwin`
/// to at most 24.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackBackend;

impl FallbackBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompressionBackend for FallbackBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Fallback
    }

    async fn compress(&self, data: Bytes, options: &BrotliOptions) -> Result<Bytes> {
        let params = EncoderParams::default()
            .quality(Level::Precise(options.encoder_quality()))
            .window_size(options.encoder_lgwin())
            .mode(options.mode.encoder_mode());
        let mut encoder = BrotliEncoder::with_params(data.as_ref(), params);

        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .await
            .map_err(|e| Error::compression(self.kind().name(), e))?;

        Ok(Bytes::from(compressed))
    }

    async fn decompress(&self, data: Bytes, _options: &BrotliOptions) -> Result<Bytes> {
        let mut decoder = BrotliDecoder::new(data.as_ref());

        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .await
            .map_err(|e| Error::compression(self.kind().name(), e))?;

        Ok(Bytes::from(decompressed))
    }
}
