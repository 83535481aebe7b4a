//! Image I/O: reference loading and checkpoint dumps.
//!
//! Checkpoints are plain PNG files, one per survivor:
//!
//! ```text
//! <output_dir>/<counter:06>_<rank:03>.png
//!   counter = generation / interval
//!   rank    = 0 (best) .. K-1
//! ```
//!
//! Each file is written to `<name>.tmp` and renamed, so completed files are
//! never left half-written.

mod codec;
mod writer;

pub use codec::{CodecError, REFERENCE_CHANNELS, load_reference, save_png};
pub use writer::CheckpointWriter;
