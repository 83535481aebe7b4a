//! Evolutionary search over pixel buffers.
//!
//! # Overview
//!
//! One generation runs four phases:
//!
//! - **Mutation** (`mutation`): every specimen receives one random gray circle
//! - **Fitness** (`fitness`): every specimen is scored against the reference
//! - **Checkpoint**: every `interval` generations the survivors are written to disk
//! - **Replication** (`selection`, `population`): the K best are copied cyclically
//!   into all N slots
//!
//! The loop has no stopping criterion. It runs until the driver's cancel
//! handle is set.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::atomic::Ordering;
//!
//! use machine_painter::checkpoint::load_reference;
//! use machine_painter::compute::evolution::EvolutionDriver;
//! use machine_painter::schema::PainterConfig;
//!
//! let config = PainterConfig::default();
//! let reference = load_reference(&config.reference).unwrap();
//! let mut driver = EvolutionDriver::new(reference, config).unwrap();
//! let cancel = driver.cancel_handle();
//!
//! let summary = driver.run_with_callback(|progress| {
//!     println!("Generation {}: best score = {:.0}", progress.generation, progress.best_score);
//!     if progress.generation == 1000 {
//!         cancel.store(true, Ordering::Relaxed);
//!     }
//! });
//! println!("Ran {} generations", summary.generations);
//! ```

mod driver;
mod fitness;
mod mutation;
mod population;
mod rng;
mod selection;

pub use driver::EvolutionDriver;
pub use fitness::{FITNESS_CHANNEL, FitnessEvaluator};
pub use mutation::{Circle, MAX_RADIUS, MIN_RADIUS, OPAQUE, paint_random_circle};
pub use population::Population;
pub use rng::PainterRng;
pub use selection::{RankedSpecimen, Ranking};
