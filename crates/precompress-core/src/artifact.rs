//! Artifact types and the artifact set port

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Content held by an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// Raw bytes
    Buffer(Bytes),

    /// Entry the host cannot hand out as a byte buffer (e.g. a lazily
    /// generated or concatenated source)
    Opaque {
        /// Host-specific description of the source kind
        kind: String,
    },
}

/// A named build output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Unique name within the artifact set
    pub name: String,

    /// Artifact content
    pub content: ArtifactContent,
}

impl Artifact {
    /// Create a buffer-backed artifact
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: ArtifactContent::Buffer(data.into()),
        }
    }

    /// Create an artifact that is not backed by a buffer
    pub fn opaque(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: ArtifactContent::Opaque { kind: kind.into() },
        }
    }

    /// The byte buffer, if this artifact has one
    pub fn buffer(&self) -> Option<&Bytes> {
        match &self.content {
            ArtifactContent::Buffer(data) => Some(data),
            ArtifactContent::Opaque { .. } => None,
        }
    }

    /// Size in bytes (0 for opaque entries)
    pub fn size(&self) -> usize {
        self.buffer().map(Bytes::len).unwrap_or(0)
    }
}

/// Artifact set trait
///
/// The host build system's collection of emitted outputs. Operations on
/// distinct keys may run concurrently.
#[async_trait]
pub trait ArtifactSet: Send + Sync {
    /// Names currently in the set
    async fn list(&self) -> Result<Vec<String>>;

    /// Look up an artifact by name
    async fn get(&self, name: &str) -> Result<Option<Artifact>>;

    /// Insert or replace an artifact
    async fn insert(&self, name: &str, data: Bytes) -> Result<()>;

    /// Remove an artifact
    ///
    /// Returns Ok(()) whether the name existed or not.
    async fn delete(&self, name: &str) -> Result<()>;

    /// Check if a name exists
    async fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.get(name).await?.is_some())
    }

    /// Whether insert/delete on disjoint keys may run concurrently
    ///
    /// Sets returning `false` get their mutations serialized by the caller.
    fn supports_concurrent_mutation(&self) -> bool {
        true
    }
}
