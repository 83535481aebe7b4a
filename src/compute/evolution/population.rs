//! Fixed-size population of specimen images.

use crate::compute::{PixelBuffer, PixelBufferError};

use super::mutation::paint_random_circle;
use super::rng::PainterRng;

/// Ordered, fixed-size collection of same-shaped specimens.
#[derive(Debug, Clone)]
pub struct Population {
    specimens: Vec<PixelBuffer>,
}

impl Population {
    /// Allocate `size` zero-filled specimens.
    pub fn new(
        size: usize,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, PixelBufferError> {
        let blank = PixelBuffer::new(width, height, channels)?;
        Ok(Self {
            specimens: vec![blank; size],
        })
    }

    /// Allocate `size` zero-filled specimens shaped like `template`.
    pub fn shaped_like(size: usize, template: &PixelBuffer) -> Self {
        Self {
            specimens: vec![template.blank_like(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    pub fn specimen(&self, index: usize) -> &PixelBuffer {
        &self.specimens[index]
    }

    pub fn specimen_mut(&mut self, index: usize) -> &mut PixelBuffer {
        &mut self.specimens[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PixelBuffer> {
        self.specimens.iter()
    }

    /// Paint one random circle on every specimen.
    pub fn mutate_all(&mut self, rng: &mut PainterRng) {
        for specimen in &mut self.specimens {
            paint_random_circle(specimen, rng);
        }
    }

    /// Re-seed every slot from the survivors, cycling through them in order.
    ///
    /// Slot `i` receives the pre-replication content of `survivors[i % K]`.
    ///
    /// # Panics
    ///
    /// Panics if `survivors` is empty or holds an index out of range.
    pub fn replicate(&mut self, survivors: &[usize]) {
        assert!(!survivors.is_empty(), "replication needs at least one survivor");

        // Snapshot first: a survivor's own slot may be overwritten before it is read.
        let parents: Vec<PixelBuffer> = survivors
            .iter()
            .map(|&idx| self.specimens[idx].clone())
            .collect();

        for (i, slot) in self.specimens.iter_mut().enumerate() {
            slot.copy_from(&parents[i % parents.len()]);
        }
    }
}
