//! Linear and radial gradient paints.
//!
//! Both follow canvas gradient rules: stops are interpolated in premultiplied
//! space and positions before the first or after the last stop take the
//! nearest stop's color.

use super::{Paint, PixelRect};
use crate::color::Color;

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Color at `t` along sorted stops.
fn color_at(stops: &[ColorStop], t: f64) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Color::transparent(),
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp_premultiplied(&b.color, local);
        }
    }
    last.color
}

fn sorted(mut stops: Vec<ColorStop>) -> Vec<ColorStop> {
    // Stable, so equal offsets keep insertion order like addColorStop.
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    stops
}

/// Linear gradient between two points.
#[derive(Debug, Clone)]
pub struct LinearGradient {
    start: [f64; 2],
    end: [f64; 2],
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: [f64; 2], end: [f64; 2], stops: Vec<ColorStop>) -> Self {
        Self {
            start,
            end,
            stops: sorted(stops),
        }
    }

    /// Top-left to bottom-right across a `size × size` canvas with evenly
    /// spread stops at 0, 0.33, 0.66 and 1.
    pub fn diagonal(size: u32, colors: [Color; 4]) -> Self {
        let size = size as f64;
        let offsets = [0.0, 0.33, 0.66, 1.0];
        let stops = offsets
            .iter()
            .zip(colors)
            .map(|(&offset, color)| ColorStop::new(offset, color))
            .collect();
        Self::new([0.0, 0.0], [size, size], stops)
    }

    /// Position of a point along the gradient axis.
    pub fn project(&self, x: f64, y: f64) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        let len2 = dx * dx + dy * dy;
        if len2 <= 0.0 {
            return 0.0;
        }
        ((x - self.start[0]) * dx + (y - self.start[1]) * dy) / len2
    }
}

impl Paint for LinearGradient {
    fn shade(&self, x: f64, y: f64) -> Option<Color> {
        Some(color_at(&self.stops, self.project(x, y)))
    }
}

/// Radial gradient between two concentric circles.
#[derive(Debug, Clone)]
pub struct RadialGradient {
    center: [f64; 2],
    inner: f64,
    outer: f64,
    stops: Vec<ColorStop>,
    /// When set, only the disc of this radius is painted (an arc fill).
    clip_radius: Option<f64>,
}

impl RadialGradient {
    pub fn new(center: [f64; 2], inner: f64, outer: f64, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            inner,
            outer,
            stops: sorted(stops),
            clip_radius: None,
        }
    }

    /// A color fading to transparent from the center out to `radius`,
    /// painted only inside that disc.
    pub fn spot(center: [f64; 2], radius: f64, color: Color) -> Self {
        Self::new(
            center,
            0.0,
            radius,
            vec![
                ColorStop::new(0.0, color),
                ColorStop::new(1.0, Color::transparent()),
            ],
        )
        .clipped(radius)
    }

    /// Restrict painting to a disc around the center.
    pub fn clipped(mut self, radius: f64) -> Self {
        self.clip_radius = Some(radius);
        self
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer
    }
}

impl Paint for RadialGradient {
    fn shade(&self, x: f64, y: f64) -> Option<Color> {
        let dx = x - self.center[0];
        let dy = y - self.center[1];
        let dist = (dx * dx + dy * dy).sqrt();

        if let Some(clip) = self.clip_radius {
            if dist > clip {
                return None;
            }
        }

        let span = self.outer - self.inner;
        let t = if span.abs() > f64::EPSILON {
            (dist - self.inner) / span
        } else if dist < self.inner {
            0.0
        } else {
            1.0
        };
        Some(color_at(&self.stops, t))
    }

    fn bounds(&self, width: u32, height: u32) -> Option<PixelRect> {
        self.clip_radius
            .map(|r| PixelRect::around_circle(self.center[0], self.center[1], r, width, height))
    }
}
