//! Brotli backends for Precompress
//!
//! Provides one asynchronous compression capability over whichever brotli
//! implementation is compiled in:
//! - standard: the `brotli` crate (blocking API, run on the blocking pool)
//! - fallback: `async-compression`'s tokio codec
//!
//! Features:
//! - Probe-order backend resolution with an optional pinned preference
//! - Fails fast when no backend is available
//! - Pass-through tuning options (quality, window, mode)

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod backend;
pub mod options;
pub mod resolver;

#[cfg(feature = "fallback-backend")]
pub mod fallback;
#[cfg(feature = "standard-backend")]
pub mod standard;

pub use backend::{BackendKind, CompressionBackend};
pub use options::{BrotliMode, BrotliOptions};
pub use resolver::{builtin_candidates, resolve, BackendCandidate, BackendPreference, BackendResolver};

#[cfg(feature = "fallback-backend")]
pub use fallback::FallbackBackend;
#[cfg(feature = "standard-backend")]
pub use standard::StandardBackend;
