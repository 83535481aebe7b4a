//! Periodic survivor dumps.

use std::fs;
use std::path::{Path, PathBuf};

use super::codec::save_png;
use crate::compute::PixelBuffer;
use crate::schema::{CheckpointConfig, CheckpointReport};

/// Writes survivor images every `interval` generations.
///
/// Files are named `<counter:06>_<rank:03>.png`, where
/// `counter = generation / interval`.
#[derive(Debug, Clone)]
pub struct CheckpointWriter {
    output_dir: PathBuf,
    interval: u64,
}

impl CheckpointWriter {
    /// Create a writer. An interval of 0 is treated as 1.
    pub fn new<P: Into<PathBuf>>(output_dir: P, interval: u64) -> Self {
        Self {
            output_dir: output_dir.into(),
            interval: interval.max(1),
        }
    }

    pub fn from_config(config: &CheckpointConfig) -> Self {
        Self::new(config.output_dir.clone(), config.interval)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether `generation` should be dumped.
    #[inline]
    pub fn is_due(&self, generation: u64) -> bool {
        generation % self.interval == 0
    }

    /// Checkpoint counter for `generation`.
    #[inline]
    pub fn counter(&self, generation: u64) -> u64 {
        generation / self.interval
    }

    /// Output path for the survivor at `rank` in `generation`.
    pub fn file_path(&self, generation: u64, rank: usize) -> PathBuf {
        self.output_dir
            .join(format!("{:06}_{:03}.png", self.counter(generation), rank))
    }

    /// Write every survivor, best first.
    ///
    /// Failures are logged and counted; they never abort the remaining writes.
    pub fn write<'a, I>(&self, generation: u64, survivors: I) -> CheckpointReport
    where
        I: IntoIterator<Item = &'a PixelBuffer>,
    {
        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            log::warn!(
                "Couldn't create checkpoint directory {}: {}",
                self.output_dir.display(),
                e
            );
        }

        let mut report = CheckpointReport {
            counter: self.counter(generation),
            ..Default::default()
        };

        for (rank, specimen) in survivors.into_iter().enumerate() {
            let path = self.file_path(generation, rank);
            match save_png(specimen, &path) {
                Ok(()) => {
                    log::debug!("Wrote {}", path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    log::warn!("Checkpoint write failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::load_reference;
    use tempfile::tempdir;

    fn solid(value: u8) -> PixelBuffer {
        PixelBuffer::from_raw(2, 2, 3, vec![value; 12]).unwrap()
    }

    #[test]
    fn test_schedule_every_fifth() {
        let writer = CheckpointWriter::new("unused", 5);
        let due: Vec<u64> = (0..10).filter(|&g| writer.is_due(g)).collect();
        assert_eq!(due, vec![0, 5]);
        assert_eq!(writer.counter(5), 1);
        assert_eq!(writer.counter(9), 1);
    }

    #[test]
    fn test_zero_interval_treated_as_one() {
        let writer = CheckpointWriter::new("unused", 0);
        assert_eq!(writer.interval(), 1);
        assert!((0..4).all(|g| writer.is_due(g)));
    }

    #[test]
    fn test_file_names() {
        let writer = CheckpointWriter::new("out", 10);
        assert_eq!(
            writer.file_path(30, 2),
            PathBuf::from("out").join("000003_002.png")
        );
        assert_ne!(writer.file_path(30, 0), writer.file_path(40, 0));
        assert_ne!(writer.file_path(30, 0), writer.file_path(30, 1));
    }

    #[test]
    fn test_write_survivors() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("new-images");
        let writer = CheckpointWriter::new(&out, 1);
        let survivors = [solid(10), solid(20)];

        let report = writer.write(7, survivors.iter());

        assert_eq!(report.counter, 7);
        assert_eq!(report.failed, 0);
        assert_eq!(report.written.len(), 2);
        for (rank, path) in report.written.iter().enumerate() {
            assert_eq!(path, &writer.file_path(7, rank));
            assert_eq!(load_reference(path).unwrap(), survivors[rank]);
        }
    }

    #[test]
    fn test_write_failure_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        // a regular file where the directory should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"x").unwrap();
        let writer = CheckpointWriter::new(&blocker, 1);

        let survivors = [solid(1), solid(2), solid(3)];
        let report = writer.write(0, survivors.iter());

        assert_eq!(report.failed, 3);
        assert!(report.written.is_empty());
    }
}
