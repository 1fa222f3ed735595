//! # Precompress Pipeline
//!
//! Brotli precompression of build artifacts:
//! - Inclusion filter over artifact names
//! - Output name derivation from a `[base]`/`[name]`/`[ext]` template
//! - Size and ratio acceptance policy
//! - Concurrent batch orchestration with per-artifact outcomes
//! - A plugin facade for build hosts

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod filter;
pub mod naming;
pub mod orchestrator;
pub mod outcome;
pub mod plugin;
pub mod policy;

pub use filter::InclusionFilter;
pub use naming::{derive_name, NameParts};
pub use orchestrator::{BatchOrchestrator, OrchestratorSettings};
pub use outcome::{ArtifactOutcome, Outcome, OutcomeCounts, RunReport};
pub use plugin::BrotliPlugin;
pub use policy::{accept, compression_ratio, AcceptanceThresholds};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::outcome::{Outcome, RunReport};
    pub use crate::plugin::BrotliPlugin;
    pub use precompress_config::{ConfigBuilder, ConfigOverrides, PrecompressConfig};
    pub use precompress_core::prelude::*;
}
