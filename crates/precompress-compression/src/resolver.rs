//! Start-up selection of the compression backend

use crate::backend::{BackendKind, CompressionBackend};
use precompress_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Which backend the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// First available backend in probe order
    #[default]
    Auto,
    /// Only the standard backend
    Standard,
    /// Only the fallback backend
    Fallback,
}

impl BackendPreference {
    fn admits(&self, kind: BackendKind) -> bool {
        match self {
            BackendPreference::Auto => true,
            BackendPreference::Standard => kind == BackendKind::Standard,
            BackendPreference::Fallback => kind == BackendKind::Fallback,
        }
    }
}

type BackendFactory = Box<dyn Fn() -> Arc<dyn CompressionBackend> + Send + Sync>;

/// A backend that may be selected, with its constructor
pub struct BackendCandidate {
    kind: BackendKind,
    factory: BackendFactory,
}

impl BackendCandidate {
    /// Create a candidate
    pub fn new<F>(kind: BackendKind, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn CompressionBackend> + Send + Sync + 'static,
    {
        Self {
            kind,
            factory: Box::new(factory),
        }
    }

    /// Candidate kind
    pub fn kind(&self) -> BackendKind {
        self.kind
    }
}

impl fmt::Debug for BackendCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendCandidate")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Backends compiled into this build, in probe order
pub fn builtin_candidates() -> Vec<BackendCandidate> {
    #[allow(unused_mut)]
    let mut candidates = Vec::new();

    #[cfg(feature = "standard-backend")]
    candidates.push(BackendCandidate::new(BackendKind::Standard, || {
        Arc::new(crate::standard::StandardBackend::new())
    }));

    #[cfg(feature = "fallback-backend")]
    candidates.push(BackendCandidate::new(BackendKind::Fallback, || {
        Arc::new(crate::fallback::FallbackBackend::new())
    }));

    candidates
}

/// Picks one backend from an ordered candidate list
#[derive(Debug)]
pub struct BackendResolver {
    candidates: Vec<BackendCandidate>,
    preference: BackendPreference,
}

impl BackendResolver {
    /// Resolver over the backends compiled into this build
    pub fn new() -> Self {
        Self::with_candidates(builtin_candidates())
    }

    /// Resolver over an explicit candidate list
    pub fn with_candidates(candidates: Vec<BackendCandidate>) -> Self {
        Self {
            candidates,
            preference: BackendPreference::Auto,
        }
    }

    /// Restrict resolution to one backend
    pub fn prefer(mut self, preference: BackendPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Kinds available to this resolver, in probe order
    pub fn available(&self) -> Vec<BackendKind> {
        self.candidates.iter().map(BackendCandidate::kind).collect()
    }

    /// Select the first available backend admitted by the preference
    ///
    /// # Errors
    ///
    /// [`Error::NoBackendAvailable`] when nothing matches. This is a
    /// configuration error; the pipeline cannot run without a backend.
    pub fn resolve(&self) -> Result<Arc<dyn CompressionBackend>> {
        for candidate in &self.candidates {
            if !self.preference.admits(candidate.kind) {
                debug!(backend = %candidate.kind, preference = ?self.preference, "Skipping backend");
                continue;
            }

            let backend = (candidate.factory)();
            info!(backend = %candidate.kind, "Resolved brotli backend");
            return Ok(backend);
        }

        let tried = if self.candidates.is_empty() {
            "none compiled in".to_string()
        } else {
            self.candidates
                .iter()
                .map(|c| c.kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Err(Error::NoBackendAvailable { tried })
    }
}

impl Default for BackendResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the compiled-in backend for a preference
pub fn resolve(preference: BackendPreference) -> Result<Arc<dyn CompressionBackend>> {
    BackendResolver::new().prefer(preference).resolve()
}
