//! Error types for Precompress

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for Precompress
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No compression backend was compiled in or the pinned one is missing
    #[error(
        "No brotli backend available (tried: {tried}). Enable the `standard-backend` \
         (brotli crate) or `fallback-backend` (async-compression) feature of precompress-compression"
    )]
    NoBackendAvailable {
        /// Backends that were probed, in probe order
        tried: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend failed on a specific buffer
    #[error("Compression failed in '{backend}': {message}")]
    Compression {
        /// Backend name
        backend: String,
        /// Error message
        message: String,
    },

    /// The derived name already exists in the artifact set
    #[error("Artifact '{0}' already exists")]
    NameCollision(String),

    /// The host artifact set rejected a mutation or lookup
    #[error("Artifact set error on '{name}': {message}")]
    ArtifactSet {
        /// Artifact name the operation targeted
        name: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create a backend compression error
    pub fn compression(backend: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Compression {
            backend: backend.into(),
            message: message.to_string(),
        }
    }

    /// Create an artifact set error
    pub fn artifact_set(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::ArtifactSet {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error must abort the whole run rather than a single artifact
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NoBackendAvailable { .. } | Error::Config(_) | Error::ArtifactSet { .. }
        )
    }
}
