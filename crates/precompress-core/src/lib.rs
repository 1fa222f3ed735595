//! # Precompress Core
//!
//! Core types, traits, and error handling for Precompress.
//!
//! This crate provides the foundational abstractions shared by the backends
//! and the pipeline:
//! - Artifact types
//! - The artifact set trait the host build system implements
//! - An in-memory artifact set
//! - Error types

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod artifact;
pub mod error;
pub mod memory;

pub use artifact::{Artifact, ArtifactContent, ArtifactSet};
pub use error::{Error, Result};
pub use memory::InMemoryArtifactSet;

pub use bytes::Bytes;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::artifact::{Artifact, ArtifactContent, ArtifactSet};
    pub use crate::error::{Error, Result};
    pub use crate::memory::InMemoryArtifactSet;
}
