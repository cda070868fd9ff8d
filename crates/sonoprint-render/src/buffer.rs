//! The RGBA raster every layer draws into.

use crate::color::{BlendMode, Color};

/// A `width × height` RGBA raster, row-major, straight alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major).
    pub data: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create a new fully transparent buffer, like a freshly created canvas.
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, Color::transparent())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }

    /// Replace the alpha of a pixel, keeping its color channels.
    #[inline]
    pub fn set_alpha(&mut self, x: u32, y: u32, alpha: f64) {
        let idx = self.index(x, y);
        self.data[idx].a = alpha.clamp(0.0, 1.0);
    }

    /// Composite a color onto one pixel.
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, src: &Color, mode: BlendMode, opacity: f64) {
        let idx = self.index(x, y);
        self.data[idx] = mode.composite(&self.data[idx], src, opacity);
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Number of pixels whose 8-bit value differs from `other`.
    ///
    /// Buffers of different dimensions differ everywhere.
    pub fn count_differences(&self, other: &PixelBuffer) -> usize {
        if self.width != other.width || self.height != other.height {
            return self.data.len().max(other.data.len());
        }
        self.data
            .iter()
            .zip(&other.data)
            .filter(|(a, b)| a.to_rgba8() != b.to_rgba8())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_get_set() {
        let mut buf = PixelBuffer::new_transparent(2, 2);
        buf.set(1, 0, Color::rgb(0.0, 1.0, 0.0));
        buf.set(0, 1, Color::rgb(0.0, 0.0, 1.0));

        assert_eq!(buf.get(0, 0), Color::transparent());
        assert_eq!(buf.get(1, 0), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(buf.get(0, 1), Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn set_alpha_keeps_color() {
        let mut buf = PixelBuffer::new(1, 1, Color::rgb(0.2, 0.4, 0.6));
        buf.set_alpha(0, 0, 0.5);
        assert_eq!(buf.get(0, 0), Color::rgba(0.2, 0.4, 0.6, 0.5));

        buf.set_alpha(0, 0, 7.0);
        assert_eq!(buf.get(0, 0).a, 1.0);
    }

    #[test]
    fn rgba8_layout_is_row_major() {
        let mut buf = PixelBuffer::new_transparent(2, 1);
        buf.set(1, 0, Color::white());
        assert_eq!(buf.to_rgba8(), vec![0, 0, 0, 0, 255, 255, 255, 255]);
    }

    #[test]
    fn count_differences_on_8bit_values() {
        let a = PixelBuffer::new(4, 4, Color::gray(0.5));
        let mut b = a.clone();
        assert_eq!(a.count_differences(&b), 0);

        // Below 8-bit resolution.
        b.set(0, 0, Color::gray(0.5 + 1e-6));
        assert_eq!(a.count_differences(&b), 0);

        b.set(3, 3, Color::black());
        assert_eq!(a.count_differences(&b), 1);
    }
}
