//! Owned, size-tagged pixel storage.
//!
//! Samples are interleaved per pixel and stored row-major:
//! `[(y * width + x) * channels + c]`.

/// Maximum number of interleaved channels per pixel.
pub const MAX_CHANNELS: usize = 4;

/// Interleaved 8-bit pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self, PixelBufferError> {
        check_shape(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            samples: vec![0; width * height * channels],
        })
    }

    /// Wrap existing interleaved samples.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, PixelBufferError> {
        check_shape(width, height, channels)?;
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(PixelBufferError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// All samples in storage order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Zero-filled buffer with the same shape.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            samples: vec![0; self.samples.len()],
        }
    }

    /// Consume the buffer, returning its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// True when width, height and channel count all match.
    #[inline]
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// True if the signed coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Flat sample index of channel `c` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range. Callers are expected to
    /// bounds-check first; the buffer never clamps.
    #[inline]
    pub fn address(&self, x: usize, y: usize, c: usize) -> usize {
        assert!(
            x < self.width && y < self.height && c < self.channels,
            "pixel ({x}, {y}, {c}) out of range for {}x{}x{} buffer",
            self.width,
            self.height,
            self.channels
        );
        (y * self.width + x) * self.channels + c
    }

    /// Read one sample. Panics when out of range.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.samples[self.address(x, y, c)]
    }

    /// Write one sample. Panics when out of range.
    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8) {
        let idx = self.address(x, y, c);
        self.samples[idx] = value;
    }

    /// Checked read.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<u8> {
        if x < self.width && y < self.height && c < self.channels {
            Some(self.samples[(y * self.width + x) * self.channels + c])
        } else {
            None
        }
    }

    /// All channels of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.address(x, y, 0);
        &self.samples[start..start + self.channels]
    }

    /// All channels of one pixel, mutably.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.address(x, y, 0);
        &mut self.samples[start..start + self.channels]
    }

    /// Overwrite this buffer with the contents of `other` without reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        assert!(
            self.same_shape(other),
            "cannot copy {}x{}x{} buffer into {}x{}x{}",
            other.width,
            other.height,
            other.channels,
            self.width,
            self.height,
            self.channels
        );
        self.samples.copy_from_slice(&other.samples);
    }
}

fn check_shape(width: usize, height: usize, channels: usize) -> Result<(), PixelBufferError> {
    if width == 0 || height == 0 {
        return Err(PixelBufferError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(PixelBufferError::InvalidChannels(channels));
    }
    Ok(())
}

/// Pixel buffer construction errors.
#[derive(Debug, thiserror::Error)]
pub enum PixelBufferError {
    #[error("Buffer dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Channel count must be between 1 and 4 (got {0})")]
    InvalidChannels(usize),
    #[error("Expected {expected} samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}
