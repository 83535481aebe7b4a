//! The single mutation operator: paint one gray circle.
//!
//! Covered pixels are blended 50/50 with the circle's gray value. In
//! four-channel buffers the last channel is alpha and is forced opaque.

use crate::compute::PixelBuffer;

use super::rng::PainterRng;

/// Smallest radius drawn.
pub const MIN_RADIUS: u32 = 1;
/// Largest radius drawn (inclusive).
pub const MAX_RADIUS: u32 = 100;
/// Value written to the alpha channel of touched pixels.
pub const OPAQUE: u8 = u8::MAX;

/// A filled circle with a single gray value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center_x: usize,
    pub center_y: usize,
    pub radius: u32,
    pub value: u8,
}

impl Circle {
    /// Draw a circle for a `width` x `height` canvas.
    ///
    /// Draw order is center x, center y, radius, value.
    pub fn random(rng: &mut PainterRng, width: usize, height: usize) -> Self {
        let center_x = rng.below(width);
        let center_y = rng.below(height);
        let radius = rng.inclusive(MIN_RADIUS, MAX_RADIUS);
        let value = rng.inclusive(0, u8::MAX as u32) as u8;
        Self {
            center_x,
            center_y,
            radius,
            value,
        }
    }

    /// Whether `(x, y)` lies inside the circle (boundary included).
    #[inline]
    pub fn covers(&self, x: i64, y: i64) -> bool {
        let dx = x - self.center_x as i64;
        let dy = y - self.center_y as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }

    /// Blend the circle into `buffer` in place.
    pub fn paint(&self, buffer: &mut PixelBuffer) {
        let r = self.radius as i64;
        let cx = self.center_x as i64;
        let cy = self.center_y as i64;

        // Bounding box intersected with the buffer; pixels outside are skipped.
        let x0 = (cx - r).max(0);
        let x1 = (cx + r).min(buffer.width() as i64 - 1);
        let y0 = (cy - r).max(0);
        let y1 = (cy + r).min(buffer.height() as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let value = self.value as u16;
        let has_alpha = buffer.channels() == 4;

        for y in y0..=y1 {
            for x in x0..=x1 {
                if !self.covers(x, y) {
                    continue;
                }
                let pixel = buffer.pixel_mut(x as usize, y as usize);
                for sample in pixel.iter_mut() {
                    *sample = ((*sample as u16 + value) / 2) as u8;
                }
                if has_alpha {
                    pixel[3] = OPAQUE;
                }
            }
        }
    }
}

/// Paint one randomly drawn circle onto `buffer`.
pub fn paint_random_circle(buffer: &mut PixelBuffer, rng: &mut PainterRng) {
    let circle = Circle::random(rng, buffer.width(), buffer.height());
    circle.paint(buffer);
}
