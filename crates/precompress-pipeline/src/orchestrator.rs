//! Batch orchestrator
//!
//! One pass over the artifact set: filter, compress, decide, mutate. Every
//! artifact is an independent unit of work; units run concurrently and the
//! pass completes once all of them reached a terminal [`Outcome`].

use crate::filter::InclusionFilter;
use crate::naming::derive_name;
use crate::outcome::{ArtifactOutcome, Outcome, RunReport};
use crate::policy::{compression_ratio, AcceptanceThresholds};
use bytes::Bytes;
use dashmap::DashSet;
use futures::future::join_all;
use precompress_compression::{BrotliOptions, CompressionBackend};
use precompress_config::{CollisionPolicy, PrecompressConfig};
use precompress_core::{ArtifactSet, Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn, Instrument};

/// Immutable settings for one orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Output name template
    pub output_format: String,
    /// Size thresholds
    pub thresholds: AcceptanceThresholds,
    /// Which names are considered
    pub filter: InclusionFilter,
    /// Remove originals whose compressed copy was kept
    pub delete_original_assets: bool,
    /// What to do when the derived name is taken
    pub on_collision: CollisionPolicy,
    /// Backend tuning options
    pub brotli: BrotliOptions,
}

impl OrchestratorSettings {
    /// Build from validated configuration
    pub fn from_config(config: &PrecompressConfig) -> Result<Self> {
        Ok(Self {
            output_format: config.output_format.clone(),
            thresholds: AcceptanceThresholds {
                min_size_in_bytes: config.min_size_in_bytes,
                max_compression_ratio: config.max_compression_ratio,
            },
            filter: InclusionFilter::from_config(&config.filter)?,
            delete_original_assets: config.delete_original_assets,
            on_collision: config.on_collision,
            brotli: config.brotli,
        })
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            output_format: "[base].br".to_string(),
            thresholds: AcceptanceThresholds::default(),
            filter: InclusionFilter::default(),
            delete_original_assets: false,
            on_collision: CollisionPolicy::default(),
            brotli: BrotliOptions::default(),
        }
    }
}

/// State shared by the units of one pass
struct Pass<'a, S: ?Sized> {
    set: &'a S,
    /// Held around mutations when the set cannot take them concurrently
    mutation_lock: Option<Mutex<()>>,
    /// Derived names claimed by units of this pass
    claimed: DashSet<String>,
}

/// Runs compression passes over an artifact set
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    backend: Arc<dyn CompressionBackend>,
    settings: Arc<OrchestratorSettings>,
}

impl BatchOrchestrator {
    /// Create an orchestrator over an already-resolved backend
    pub fn new(backend: Arc<dyn CompressionBackend>, settings: OrchestratorSettings) -> Self {
        Self {
            backend,
            settings: Arc::new(settings),
        }
    }

    /// Settings in use
    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Backend in use
    pub fn backend(&self) -> &Arc<dyn CompressionBackend> {
        &self.backend
    }

    /// Run one pass over `set`
    ///
    /// Names are snapshotted up front, so artifacts inserted by this pass are
    /// never visited. Backend failures are recorded per artifact.
    ///
    /// # Errors
    ///
    /// Only when the artifact set itself fails (listing, lookup or
    /// mutation). All units still run to completion before the first such
    /// error is returned.
    pub async fn run<S>(&self, set: &S) -> Result<RunReport>
    where
        S: ArtifactSet + ?Sized,
    {
        let mut seen = HashSet::new();
        let names: Vec<String> = set
            .list()
            .await?
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let pass = Pass {
            set,
            mutation_lock: (!set.supports_concurrent_mutation()).then(|| Mutex::new(())),
            claimed: DashSet::new(),
        };

        debug!(
            artifacts = names.len(),
            backend = %self.backend.kind(),
            serialized = pass.mutation_lock.is_some(),
            "Starting compression pass"
        );

        let units = names.iter().map(|name| {
            self.process(&pass, name)
                .instrument(tracing::debug_span!("artifact", name = %name))
        });
        let results = join_all(units).await;

        let mut outcomes = Vec::with_capacity(names.len());
        let mut first_error = None;

        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(outcome) => outcomes.push(ArtifactOutcome { name, outcome }),
                Err(e) => {
                    error!(artifact = %name, error = %e, "Artifact set operation failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let report = RunReport {
            backend: self.backend.kind(),
            outcomes,
        };

        let counts = report.counts();
        let (before, after) = report.kept_bytes();
        info!(
            kept = counts.kept,
            rejected = counts.rejected,
            failed = counts.failed,
            skipped = counts.skipped_by_filter + counts.skipped_by_size + counts.skipped_unresolved,
            bytes_before = before,
            bytes_after = after,
            "Compression pass finished"
        );

        Ok(report)
    }

    async fn process<S>(&self, pass: &Pass<'_, S>, name: &str) -> Result<Outcome>
    where
        S: ArtifactSet + ?Sized,
    {
        let settings = &self.settings;

        if !settings.filter.matches(name) {
            debug!("Skipped by filter");
            return Ok(Outcome::SkippedByFilter);
        }

        let Some(artifact) = pass.set.get(name).await? else {
            debug!("Artifact no longer present");
            return Ok(Outcome::SkippedUnresolved);
        };

        let Some(data) = artifact.buffer().cloned() else {
            debug!("Artifact is not buffer-backed");
            return Ok(Outcome::SkippedUnresolved);
        };

        let original_size = data.len();
        if !settings.thresholds.qualifies(original_size) {
            debug!(size = original_size, "Below minimum size");
            return Ok(Outcome::SkippedBySize {
                size: original_size,
            });
        }

        let compressed = match self.backend.compress(data, &settings.brotli).await {
            Ok(compressed) => compressed,
            Err(e) => {
                warn!(error = %e, "Compression failed, leaving artifact untouched");
                return Ok(Outcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        let compressed_size = compressed.len();
        if !settings.thresholds.accepts(original_size, compressed_size) {
            debug!(original_size, compressed_size, "Compression ratio rejected");
            return Ok(Outcome::Rejected {
                original_size,
                compressed_size,
                ratio: compression_ratio(original_size, compressed_size),
            });
        }

        let compressed_name = derive_name(name, &settings.output_format);

        let _guard = match &pass.mutation_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        self.commit(pass, name, compressed_name, compressed, original_size)
            .await
    }

    async fn commit<S>(
        &self,
        pass: &Pass<'_, S>,
        name: &str,
        compressed_name: String,
        compressed: Bytes,
        original_size: usize,
    ) -> Result<Outcome>
    where
        S: ArtifactSet + ?Sized,
    {
        let settings = &self.settings;
        let compressed_size = compressed.len();
        let replaces_self = compressed_name == name;

        if !pass.claimed.insert(compressed_name.clone()) {
            return Ok(collision(compressed_name));
        }

        if settings.on_collision == CollisionPolicy::Fail
            && pass.set.contains(&compressed_name).await?
        {
            return Ok(collision(compressed_name));
        }

        pass.set.insert(&compressed_name, compressed).await?;

        let original_deleted = settings.delete_original_assets && !replaces_self;
        if original_deleted {
            pass.set.delete(name).await?;
        }

        debug!(
            compressed_name = %compressed_name,
            original_size,
            compressed_size,
            original_deleted,
            "Kept compressed artifact"
        );

        Ok(Outcome::Kept {
            compressed_name,
            original_size,
            compressed_size,
            original_deleted,
        })
    }
}

fn collision(compressed_name: String) -> Outcome {
    let reason = Error::NameCollision(compressed_name).to_string();
    warn!(reason = %reason, "Derived name collides, leaving artifact untouched");
    Outcome::Failed { reason }
}
