//! Truncation selection over a per-generation ranking.

use serde::{Deserialize, Serialize};

/// One ranked specimen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedSpecimen {
    /// Fitness score (lower is better).
    pub score: f64,
    /// Slot in the population.
    pub index: usize,
}

/// Every specimen index paired with its score, sorted ascending.
///
/// Equal scores keep their original index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    entries: Vec<RankedSpecimen>,
}

impl Ranking {
    /// Rank `scores`, where `scores[i]` belongs to specimen `i`.
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut entries: Vec<RankedSpecimen> = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| RankedSpecimen { score, index })
            .collect();
        entries.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedSpecimen> {
        self.entries.iter()
    }

    /// Entry at `rank` (0 is best). Panics when out of range.
    pub fn entry(&self, rank: usize) -> &RankedSpecimen {
        &self.entries[rank]
    }

    /// Lowest-scoring entry.
    pub fn best(&self) -> Option<&RankedSpecimen> {
        self.entries.first()
    }

    /// Mean score across all entries.
    pub fn mean_score(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|e| e.score).sum::<f64>() / self.entries.len() as f64
    }

    /// Indices of the `count` best specimens, best first.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds the ranking length.
    pub fn survivors(&self, count: usize) -> Vec<usize> {
        assert!(
            count <= self.entries.len(),
            "cannot select {count} survivors from {} specimens",
            self.entries.len()
        );
        self.entries[..count].iter().map(|e| e.index).collect()
    }
}
