//! Fitness evaluation against the reference image.
//!
//! The score is the sum of squared differences on channel 0 only. Other
//! channels are never read. Lower is better.

use crate::compute::PixelBuffer;

use super::population::Population;
use super::selection::Ranking;

/// Channel compared between candidate and reference.
pub const FITNESS_CHANNEL: usize = 0;

/// Scores candidates against an owned reference image.
pub struct FitnessEvaluator {
    reference: PixelBuffer,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(reference: PixelBuffer) -> Self {
        Self { reference }
    }

    /// The optimization target.
    pub fn reference(&self) -> &PixelBuffer {
        &self.reference
    }

    /// Sum of squared channel-0 differences.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` is not shaped like the reference.
    pub fn score(&self, candidate: &PixelBuffer) -> f64 {
        assert!(
            candidate.same_shape(&self.reference),
            "candidate {}x{}x{} does not match reference {}x{}x{}",
            candidate.width(),
            candidate.height(),
            candidate.channels(),
            self.reference.width(),
            self.reference.height(),
            self.reference.channels()
        );

        let stride = self.reference.channels();
        self.reference.samples()[FITNESS_CHANNEL..]
            .iter()
            .step_by(stride)
            .zip(candidate.samples()[FITNESS_CHANNEL..].iter().step_by(stride))
            .map(|(&r, &c)| {
                let diff = r as f64 - c as f64;
                diff * diff
            })
            .sum()
    }

    /// Score every specimen and rank them.
    pub fn evaluate_all(&self, population: &Population) -> Ranking {
        let scores: Vec<f64> = population.iter().map(|s| self.score(s)).collect();
        Ranking::from_scores(&scores)
    }
}
