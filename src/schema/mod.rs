//! Schema module - Configuration and progress types for painter runs.

mod config;
mod progress;

pub use config::*;
pub use progress::*;
