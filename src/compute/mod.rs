//! Compute module - Pixel storage and the evolutionary search.

mod pixel_buffer;

pub mod evolution;

pub use pixel_buffer::*;
