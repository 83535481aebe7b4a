//! Generation loop: mutate, evaluate, checkpoint, replicate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::checkpoint::CheckpointWriter;
use crate::compute::PixelBuffer;
use crate::schema::{
    CheckpointReport, ConfigError, EvolutionProgress, PainterConfig, RunSummary, StopReason,
};

use super::fitness::FitnessEvaluator;
use super::population::Population;
use super::rng::PainterRng;
use super::selection::Ranking;

/// Evolution driver that runs the search.
///
/// Runs until its cancel handle is set; there is no other stop condition.
pub struct EvolutionDriver {
    config: PainterConfig,
    rng: PainterRng,
    evaluator: FitnessEvaluator,
    population: Population,
    checkpoints: CheckpointWriter,
    generation: u64,
    checkpoint_files: usize,
    checkpoint_failures: usize,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionDriver {
    /// Create a driver for `reference`.
    ///
    /// The configuration is validated before any specimen is allocated.
    pub fn new(reference: PixelBuffer, config: PainterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let rng = PainterRng::new(seed);
        let population = Population::shaped_like(config.population.specimens, &reference);
        let checkpoints = CheckpointWriter::from_config(&config.checkpoint);

        log::info!(
            "Population: {} specimens, {} survivors, {}x{}x{}",
            config.population.specimens,
            config.population.survivors,
            reference.width(),
            reference.height(),
            reference.channels()
        );
        log::info!("Random seed: {}", seed);
        log::info!(
            "Checkpoints every {} generation(s) into {}",
            checkpoints.interval(),
            checkpoints.output_dir().display()
        );

        Ok(Self {
            config,
            rng,
            evaluator: FitnessEvaluator::new(reference),
            population,
            checkpoints,
            generation: 0,
            checkpoint_files: 0,
            checkpoint_failures: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Index of the next generation to run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn reference(&self) -> &PixelBuffer {
        self.evaluator.reference()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Paint one random circle on every specimen.
    pub fn mutate_all(&mut self) {
        self.population.mutate_all(&mut self.rng);
    }

    /// Score and rank the current population. Does not modify anything.
    pub fn evaluate_all(&self) -> Ranking {
        self.evaluator.evaluate_all(&self.population)
    }

    /// Indices of the K best specimens under `ranking`.
    pub fn survivors(&self, ranking: &Ranking) -> Vec<usize> {
        ranking.survivors(self.config.population.survivors)
    }

    /// Dump the survivors if the current generation is due.
    pub fn checkpoint(&mut self, ranking: &Ranking) -> Option<CheckpointReport> {
        if !self.checkpoints.is_due(self.generation) {
            return None;
        }

        let survivors = self.survivors(ranking);
        let report = self.checkpoints.write(
            self.generation,
            survivors.iter().map(|&idx| self.population.specimen(idx)),
        );

        self.checkpoint_files += report.written.len();
        self.checkpoint_failures += report.failed;
        Some(report)
    }

    /// Re-seed the whole population from the survivors under `ranking`.
    pub fn replicate(&mut self, ranking: &Ranking) {
        let survivors = self.survivors(ranking);
        self.population.replicate(&survivors);
    }

    /// Run one full generation.
    pub fn step_generation(&mut self) -> EvolutionProgress {
        let start = Instant::now();

        self.mutate_all();
        let ranking = self.evaluate_all();
        let best = *ranking.entry(0);
        let mean_score = ranking.mean_score();
        let checkpoint = self.checkpoint(&ranking);
        self.replicate(&ranking);

        let elapsed = start.elapsed().as_secs_f64();
        log::debug!("Generation {} took {:.4}s", self.generation, elapsed);

        let progress = EvolutionProgress {
            generation: self.generation,
            best_score: best.score,
            best_index: best.index,
            mean_score,
            checkpoint,
            elapsed_seconds: elapsed,
        };

        self.generation += 1;
        progress
    }

    /// Run generations until cancelled, calling `callback` after each one.
    ///
    /// The cancel flag is checked between generations only.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> RunSummary
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();
        let first_generation = self.generation;
        let mut last_best_score = None;

        let stop_reason = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }

            let progress = self.step_generation();
            last_best_score = Some(progress.best_score);
            callback(&progress);
        };

        RunSummary {
            generations: self.generation - first_generation,
            last_best_score,
            checkpoint_files: self.checkpoint_files,
            checkpoint_failures: self.checkpoint_failures,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            stop_reason,
        }
    }

    /// Run until cancelled.
    pub fn run(&mut self) -> RunSummary {
        self.run_with_callback(|_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CheckpointConfig, PopulationConfig};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn test_config(specimens: usize, survivors: usize, interval: u64, out: &Path) -> PainterConfig {
        PainterConfig {
            population: PopulationConfig {
                specimens,
                survivors,
            },
            checkpoint: CheckpointConfig {
                interval,
                output_dir: out.to_path_buf(),
            },
            random_seed: Some(42),
            ..Default::default()
        }
    }

    fn flat_reference(width: usize, height: usize, channels: usize, value: u8) -> PixelBuffer {
        PixelBuffer::from_raw(
            width,
            height,
            channels,
            vec![value; width * height * channels],
        )
        .unwrap()
    }

    fn png_count(dir: &Path) -> usize {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "png"))
                .count(),
            Err(_) => 0,
        }
    }

    #[test]
    fn test_driver_creation() {
        let dir = tempdir().unwrap();
        let driver =
            EvolutionDriver::new(flat_reference(8, 6, 3, 0), test_config(10, 3, 1, dir.path()))
                .unwrap();

        assert_eq!(driver.population().len(), 10);
        assert_eq!(driver.generation(), 0);
        assert_eq!(driver.seed(), 42);
        for specimen in driver.population().iter() {
            assert!(specimen.same_shape(driver.reference()));
            assert!(specimen.samples().iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempdir().unwrap();
        let result =
            EvolutionDriver::new(flat_reference(4, 4, 3, 0), test_config(2, 3, 1, dir.path()));
        assert!(matches!(
            result,
            Err(ConfigError::TooManySurvivors {
                survivors: 3,
                specimens: 2
            })
        ));
    }

    #[test]
    fn test_two_by_two_scenario() {
        let dir = tempdir().unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(2, 2, 1, 10), test_config(4, 2, 1, dir.path()))
                .unwrap();

        driver.mutate_all();
        let ranking = driver.evaluate_all();
        assert_eq!(ranking.len(), 4);

        // the top-ranked specimen is the one closest to the flat reference
        let scores: Vec<f64> = driver
            .population()
            .iter()
            .map(|s| {
                s.samples()
                    .iter()
                    .map(|&v| (10.0 - v as f64).powi(2))
                    .sum::<f64>()
            })
            .collect();
        let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(ranking.entry(0).score, min);
        assert_eq!(scores[ranking.entry(0).index], min);

        let survivors = driver.survivors(&ranking);
        assert_eq!(survivors.len(), 2);
        let parents: Vec<PixelBuffer> = survivors
            .iter()
            .map(|&i| driver.population().specimen(i).clone())
            .collect();

        driver.replicate(&ranking);

        let population = driver.population();
        for i in 0..4 {
            assert_eq!(population.specimen(i), &parents[i % 2]);
        }
        assert_eq!(population.specimen(0), population.specimen(2));
        assert_eq!(population.specimen(1), population.specimen(3));
    }

    #[test]
    fn test_evaluate_all_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(16, 16, 3, 128), test_config(8, 2, 1, dir.path()))
                .unwrap();
        driver.mutate_all();
        assert_eq!(driver.evaluate_all(), driver.evaluate_all());
    }

    #[test]
    fn test_checkpoint_every_fifth_generation() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("new-images");
        let mut driver =
            EvolutionDriver::new(flat_reference(8, 8, 3, 200), test_config(6, 2, 5, &out)).unwrap();

        let mut dumped = Vec::new();
        for _ in 0..10 {
            let progress = driver.step_generation();
            if let Some(report) = &progress.checkpoint {
                assert_eq!(report.failed, 0);
                assert_eq!(report.written.len(), 2);
                dumped.push(progress.generation);
            }
        }

        assert_eq!(dumped, vec![0, 5]);
        assert_eq!(png_count(&out), 4);
        assert!(out.join("000000_000.png").exists());
        assert!(out.join("000001_001.png").exists());
    }

    #[test]
    fn test_write_failures_do_not_stop_the_loop() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"x").unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(4, 4, 3, 0), test_config(4, 2, 1, &blocker))
                .unwrap();

        let cancel = driver.cancel_handle();
        let summary = driver.run_with_callback(|progress| {
            if progress.generation == 2 {
                cancel.store(true, Ordering::Relaxed);
            }
        });

        assert_eq!(summary.generations, 3);
        assert_eq!(summary.checkpoint_files, 0);
        assert_eq!(summary.checkpoint_failures, 6);
    }

    #[test]
    fn test_cancellation_before_start() {
        let dir = tempdir().unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(4, 4, 3, 0), test_config(4, 2, 1, dir.path()))
                .unwrap();

        driver.cancel_handle().store(true, Ordering::Relaxed);
        let summary = driver.run();

        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.generations, 0);
        assert_eq!(summary.last_best_score, None);
        assert_eq!(png_count(dir.path()), 0);
    }

    #[test]
    fn test_cancellation_from_callback() {
        let dir = tempdir().unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(12, 12, 3, 90), test_config(10, 3, 4, dir.path()))
                .unwrap();

        let cancel = driver.cancel_handle();
        let mut seen = Vec::new();
        let summary = driver.run_with_callback(|progress| {
            seen.push(progress.generation);
            if seen.len() == 5 {
                cancel.store(true, Ordering::Relaxed);
            }
        });

        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(summary.generations, 5);
        assert_eq!(driver.generation(), 5);
        // generations 0 and 4 are due, 3 survivors each
        assert_eq!(summary.checkpoint_files, 6);
        assert!(summary.last_best_score.is_some());
    }

    #[test]
    fn test_same_seed_same_run() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();
        let mut a = EvolutionDriver::new(
            flat_reference(10, 10, 3, 60),
            test_config(6, 2, 100, dir_a.path()),
        )
        .unwrap();
        let mut b = EvolutionDriver::new(
            flat_reference(10, 10, 3, 60),
            test_config(6, 2, 100, dir_b.path()),
        )
        .unwrap();

        for _ in 0..6 {
            let pa = a.step_generation();
            let pb = b.step_generation();
            assert_eq!(pa.best_score, pb.best_score);
            assert_eq!(pa.best_index, pb.best_index);
        }
        for (x, y) in a.population().iter().zip(b.population().iter()) {
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_replication_leaves_at_most_k_contents() {
        let dir = tempdir().unwrap();
        let mut driver =
            EvolutionDriver::new(flat_reference(6, 6, 3, 30), test_config(9, 3, 50, dir.path()))
                .unwrap();
        driver.step_generation();

        let population = driver.population();
        for i in 0..population.len() {
            assert_eq!(population.specimen(i), population.specimen(i % 3));
        }
    }
}
