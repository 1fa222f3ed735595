//! Backend over the `brotli` crate

use crate::backend::{BackendKind, CompressionBackend};
use crate::options::BrotliOptions;
use async_trait::async_trait;
use brotli::enc::BrotliEncoderParams;
use bytes::Bytes;
use precompress_core::{Error, Result};
use std::io::Cursor;

/// Brotli backend over the `brotli` crate
///
/// The crate only offers a blocking API, so every call is moved to the
/// tokio blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBackend;

impl StandardBackend {
    /// Create a new backend
    pub fn new() -> Self {
        Self
    }

    /// Compress synchronously on the current thread
    pub fn compress_blocking(data: &[u8], options: &BrotliOptions) -> std::io::Result<Vec<u8>> {
        let mut compressed = Vec::new();
        let params = encoder_params(options);

        brotli::BrotliCompress(&mut Cursor::new(data), &mut compressed, &params)?;

        Ok(compressed)
    }

    /// Decompress synchronously on the current thread
    pub fn decompress_blocking(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(data), &mut decompressed)?;
        Ok(decompressed)
    }
}

fn encoder_params(options: &BrotliOptions) -> BrotliEncoderParams {
    BrotliEncoderParams {
        quality: options.encoder_quality(),
        lgwin: options.encoder_lgwin(),
        mode: options.mode.encoder_mode(),
        ..Default::default()
    }
}

#[async_trait]
impl CompressionBackend for StandardBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Standard
    }

    async fn compress(&self, data: Bytes, options: &BrotliOptions) -> Result<Bytes> {
        let options = *options;
        let compressed =
            tokio::task::spawn_blocking(move || Self::compress_blocking(&data, &options))
                .await
                .map_err(|e| Error::compression(self.kind().name(), e))?
                .map_err(|e| Error::compression(self.kind().name(), e))?;

        Ok(Bytes::from(compressed))
    }

    async fn decompress(&self, data: Bytes, _options: &BrotliOptions) -> Result<Bytes> {
        let decompressed = tokio::task::spawn_blocking(move || Self::decompress_blocking(&data))
            .await
            .map_err(|e| Error::compression(self.kind().name(), e))?
            .map_err(|e| Error::compression(self.kind().name(), e))?;

        Ok(Bytes::from(decompressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BrotliMode;
    use brotli::enc::backward_references::BrotliEncoderMode;

    #[test]
    fn test_compress_blocking_shrinks_text() {
        // Use larger, highly repetitive data that will definitely compress
        let data = "Hello, World! This is a test string that should compress well. ".repeat(100);
        let compressed =
            StandardBackend::compress_blocking(data.as_bytes(), &BrotliOptions::default()).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn test_encoder_params_pass_options_through() {
        let params = encoder_params(&BrotliOptions {
            quality: 4,
            lgwin: 18,
            mode: BrotliMode::Font,
        });
        assert_eq!(params.quality, 4);
        assert_eq!(params.lgwin, 18);
        assert_eq!(params.mode, BrotliEncoderMode::BROTLI_MODE_FONT);

        let params = encoder_params(&BrotliOptions::default().with_quality(u32::MAX));
        assert_eq!(params.quality, i32::MAX);
    }

    #[test]
    fn test_text_mode_round_trip() {
        let data = "body { color: red; }\n".repeat(50);
        let opts = BrotliOptions::default().with_mode(BrotliMode::Text).with_quality(5);
        let compressed = StandardBackend::compress_blocking(data.as_bytes(), &opts).unwrap();
        let restored = StandardBackend::decompress_blocking(&compressed).unwrap();
        assert_eq!(restored, data.as_bytes());
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let backend = StandardBackend::new();
        let opts = BrotliOptions::default();
        let data = Bytes::from("console.log('Succesful result');".repeat(20));

        let compressed = backend.compress(data.clone(), &opts).await.unwrap();
        let restored = backend.decompress(compressed, &opts).await.unwrap();
        assert_eq!(restored, data);
    }
}
