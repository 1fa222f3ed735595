//! Per-artifact outcomes and the run report

use precompress_compression::BackendKind;
use serde::Serialize;

/// Terminal state of one artifact's unit of work
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Name did not pass the inclusion filter
    SkippedByFilter,

    /// Entry disappeared or is not backed by a byte buffer
    SkippedUnresolved,

    /// Smaller than `min_size_in_bytes`
    SkippedBySize {
        /// Artifact size
        size: usize,
    },

    /// Compressed copy inserted
    Kept {
        /// Name of the inserted artifact
        compressed_name: String,
        /// Size before compression
        original_size: usize,
        /// Size after compression
        compressed_size: usize,
        /// Whether the original was removed
        original_deleted: bool,
    },

    /// Compressed form did not meet the ratio bar
    Rejected {
        /// Size before compression
        original_size: usize,
        /// Size after compression
        compressed_size: usize,
        /// compressed / original, `None` for an empty original
        ratio: Option<f64>,
    },

    /// Backend error or name collision; the artifact set was not touched
    Failed {
        /// Error message
        reason: String,
    },
}

impl Outcome {
    /// Whether this outcome mutated the artifact set
    pub fn is_kept(&self) -> bool {
        matches!(self, Outcome::Kept { .. })
    }

    /// Whether this unit failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Whether the artifact never reached the backend
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Outcome::SkippedByFilter | Outcome::SkippedUnresolved | Outcome::SkippedBySize { .. }
        )
    }
}

/// Outcome for one artifact name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactOutcome {
    /// Original artifact name
    pub name: String,

    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Outcome tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    /// Skipped by filter
    pub skipped_by_filter: usize,
    /// Skipped as unresolved
    pub skipped_unresolved: usize,
    /// Skipped by size
    pub skipped_by_size: usize,
    /// Compressed and kept
    pub kept: usize,
    /// Compressed and rejected
    pub rejected: usize,
    /// Failed
    pub failed: usize,
}

/// Result of one orchestrator pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Backend that produced the compressed output
    pub backend: BackendKind,

    /// One entry per artifact name in the starting snapshot
    pub outcomes: Vec<ArtifactOutcome>,
}

impl RunReport {
    /// Outcome for an artifact name
    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.outcome)
    }

    /// Tally outcomes
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for entry in &self.outcomes {
            match entry.outcome {
                Outcome::SkippedByFilter => counts.skipped_by_filter += 1,
                Outcome::SkippedUnresolved => counts.skipped_unresolved += 1,
                Outcome::SkippedBySize { .. } => counts.skipped_by_size += 1,
                Outcome::Kept { .. } => counts.kept += 1,
                Outcome::Rejected { .. } => counts.rejected += 1,
                Outcome::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }

    /// Names whose compressed copy was kept
    pub fn kept(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_kept())
    }

    /// Names whose unit failed
    pub fn failed(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_failed())
    }

    /// Total (original, compressed) bytes over kept artifacts
    pub fn kept_bytes(&self) -> (usize, usize) {
        self.outcomes
            .iter()
            .filter_map(|o| match o.outcome {
                Outcome::Kept {
                    original_size,
                    compressed_size,
                    ..
                } => Some((original_size, compressed_size)),
                _ => None,
            })
            .fold((0, 0), |(a, b), (o, c)| (a + o, b + c))
    }
}
