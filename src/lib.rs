//! Machine Painter - approximate an image with translucent gray circles.
//!
//! A population of candidate images is evolved without gradients: every
//! generation each candidate gets one randomly placed gray circle, all
//! candidates are scored against the target, and the best few are copied
//! back over the whole population.
//!
//! # Architecture
//!
//! - `schema`: Run configuration and progress types
//! - `compute`: Pixel buffers and the evolutionary loop
//! - `checkpoint`: Reference decoding and survivor dumps
//!
//! # Example
//!
//! ```rust,no_run
//! use machine_painter::{EvolutionDriver, PainterConfig, load_reference};
//!
//! let config = PainterConfig::default();
//! let reference = load_reference(&config.reference).unwrap();
//! let mut driver = EvolutionDriver::new(reference, config).unwrap();
//!
//! for _ in 0..100 {
//!     let progress = driver.step_generation();
//!     println!("{}: {:.0}", progress.generation, progress.best_score);
//! }
//! ```

pub mod checkpoint;
pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use checkpoint::{CheckpointWriter, CodecError, load_reference, save_png};
pub use compute::PixelBuffer;
pub use compute::evolution::{EvolutionDriver, PainterRng, Population, Ranking};
pub use schema::{ConfigError, EvolutionProgress, PainterConfig, RunSummary};
