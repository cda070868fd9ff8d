//! Paint sources for compositing.
//!
//! A paint answers, for any pixel center, which color it lays down there.
//! Paints are immutable and know nothing about blend modes; the compositor
//! decides how their output combines with what is already in the buffer.

mod gradient;
mod signature;

pub use gradient::{ColorStop, LinearGradient, RadialGradient};
pub use signature::SignaturePattern;

use std::fmt;

use crate::color::Color;

/// Axis-aligned pixel rectangle, `x0..x1` by `y0..y1` (exclusive ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// The pixels touched by a circle, clipped to a `width × height` canvas.
    pub fn around_circle(cx: f64, cy: f64, radius: f64, width: u32, height: u32) -> Self {
        let clip = |v: f64, max: u32| v.clamp(0.0, max as f64) as u32;
        Self {
            x0: clip((cx - radius).floor(), width),
            y0: clip((cy - radius).floor(), height),
            x1: clip((cx + radius).ceil() + 1.0, width),
            y1: clip((cy + radius).ceil() + 1.0, height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Trait for paint sources.
pub trait Paint: fmt::Debug + Send + Sync {
    /// Color laid down at the pixel center `(x, y)`, or `None` where the
    /// paint does not reach.
    fn shade(&self, x: f64, y: f64) -> Option<Color>;

    /// Pixels outside this rectangle are never touched. `None` means the
    /// whole canvas.
    fn bounds(&self, _width: u32, _height: u32) -> Option<PixelRect> {
        None
    }
}

/// Coverage of an antialiased stroke `half_width` wide at `distance` from
/// its center line, one pixel of falloff.
#[inline]
pub(crate) fn stroke_coverage(distance: f64, half_width: f64) -> f64 {
    (half_width + 0.5 - distance).clamp(0.0, 1.0)
}
