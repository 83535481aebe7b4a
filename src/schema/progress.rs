//! Progress and result types reported by the evolution driver.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Index of the generation that just completed (starts at 0).
    pub generation: u64,
    /// Lowest score this generation.
    pub best_score: f64,
    /// Population slot holding the best specimen before replication.
    pub best_index: usize,
    /// Mean score of the population.
    pub mean_score: f64,
    /// Checkpoint written this generation, if one was due.
    pub checkpoint: Option<CheckpointReport>,
    /// Wall time spent on this generation.
    pub elapsed_seconds: f64,
}

/// Files produced by one checkpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointReport {
    /// Checkpoint counter (`generation / interval`).
    pub counter: u64,
    /// Paths written successfully, in survivor rank order.
    pub written: Vec<PathBuf>,
    /// Number of survivors whose write failed.
    pub failed: usize,
}

/// Summary returned when a run stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Generations completed.
    pub generations: u64,
    /// Best score of the last completed generation.
    pub last_best_score: Option<f64>,
    /// Checkpoint images written.
    pub checkpoint_files: usize,
    /// Checkpoint images that failed to write.
    pub checkpoint_failures: usize,
    /// Total wall time.
    pub elapsed_seconds: f64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
///
/// The loop has no convergence criterion, so cancellation is the only exit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// External cancellation signal.
    Cancelled,
}
