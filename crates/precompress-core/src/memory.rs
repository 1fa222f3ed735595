//! In-memory artifact set implementation

use crate::{Artifact, ArtifactContent, ArtifactSet, Result};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// In-memory artifact set
///
/// Sharded map, so mutations on distinct names never contend.
/// Used by hosts that keep emitted assets in memory and by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSet {
    store: Arc<DashMap<String, ArtifactContent>>,
}

impl InMemoryArtifactSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from `(name, bytes)` pairs
    pub fn from_entries<I, N, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<Bytes>,
    {
        let set = Self::new();
        for (name, data) in entries {
            set.store
                .insert(name.into(), ArtifactContent::Buffer(data.into()));
        }
        set
    }

    /// Add an entry that is not buffer-backed
    pub fn insert_opaque(&self, name: impl Into<String>, kind: impl Into<String>) {
        self.store
            .insert(name.into(), ArtifactContent::Opaque { kind: kind.into() });
    }

    /// Synchronous lookup of a buffer, for inspection after a run
    pub fn bytes(&self, name: &str) -> Option<Bytes> {
        self.store.get(name).and_then(|entry| match entry.value() {
            ArtifactContent::Buffer(data) => Some(data.clone()),
            ArtifactContent::Opaque { .. } => None,
        })
    }

    /// Sorted names, for inspection after a run
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Get the number of entries in the set
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl ArtifactSet for InMemoryArtifactSet {
    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.store.iter().map(|e| e.key().clone()).collect())
    }

    async fn get(&self, name: &str) -> Result<Option<Artifact>> {
        trace!(name, "InMemory GET");

        Ok(self.store.get(name).map(|entry| Artifact {
            name: name.to_string(),
            content: entry.value().clone(),
        }))
    }

    async fn insert(&self, name: &str, data: Bytes) -> Result<()> {
        trace!(name, size = data.len(), "InMemory INSERT");

        self.store
            .insert(name.to_string(), ArtifactContent::Buffer(data));
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        trace!(name, "InMemory DELETE");

        self.store.remove(name);
        Ok(())
    }

    async fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.store.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_delete() {
        let set = InMemoryArtifactSet::new();
        set.insert("app.js", Bytes::from_static(b"let a = 1;"))
            .await
            .unwrap();

        let artifact = set.get("app.js").await.unwrap().unwrap();
        assert_eq!(artifact.size(), 10);
        assert!(set.contains("app.js").await.unwrap());

        set.delete("app.js").await.unwrap();
        assert!(set.get("app.js").await.unwrap().is_none());
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let set = InMemoryArtifactSet::new();
        assert!(set.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_from_entries_and_opaque() {
        let set = InMemoryArtifactSet::from_entries([("a.css", "body{}"), ("b.js", "x()")]);
        set.insert_opaque("c.map", "lazy");

        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), vec!["a.css", "b.js", "c.map"]);
        assert!(set.bytes("c.map").is_none());

        let opaque = set.get("c.map").await.unwrap().unwrap();
        assert!(opaque.buffer().is_none());
    }

    #[tokio::test]
    async fn test_list_is_snapshot() {
        let set = InMemoryArtifactSet::from_entries([("a.js", "1")]);
        let names = set.list().await.unwrap();
        set.insert("b.js", Bytes::from_static(b"2")).await.unwrap();

        assert_eq!(names, vec!["a.js".to_string()]);
        assert_eq!(set.len(), 2);
    }
}
