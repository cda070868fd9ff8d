//! Layer compositing.
//!
//! A fingerprint is an ordered list of draw commands applied to one owned
//! pixel buffer. Each command carries its own blend mode and opacity, so no
//! drawing state leaks from one layer into the next.

mod layers;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::BlendMode;
use crate::noise::{FractalNoise, GradientNoise, NoiseCache};
use crate::paint::Paint;

pub use layers::{plan, signature_pattern, LayerInputs};

/// Identifies which layer a draw command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    NoiseMask,
    EnergyBursts,
    MoodVignette,
    DanceBubbles,
    Signature,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::NoiseMask => "noise_mask",
            LayerKind::EnergyBursts => "energy_bursts",
            LayerKind::MoodVignette => "mood_vignette",
            LayerKind::DanceBubbles => "dance_bubbles",
            LayerKind::Signature => "signature",
        }
    }
}

/// What a draw command does to the buffer.
#[derive(Debug)]
pub enum DrawOp {
    /// Composite a paint over the buffer.
    Fill {
        paint: Box<dyn Paint>,
        blend: BlendMode,
        opacity: f64,
    },
    /// Replace every pixel's alpha with the fractal noise mask, keeping RGB.
    ///
    /// `alpha = clamp(noise^1.5 · 200 · gain, 0, 255)` on the 8-bit scale.
    NoiseAlpha { gain: f64 },
}

/// One step of the layer plan.
#[derive(Debug)]
pub struct DrawCommand {
    pub layer: LayerKind,
    pub op: DrawOp,
}

impl DrawCommand {
    pub fn fill(layer: LayerKind, paint: impl Paint + 'static, blend: BlendMode, opacity: f64) -> Self {
        Self {
            layer,
            op: DrawOp::Fill {
                paint: Box::new(paint),
                blend,
                opacity,
            },
        }
    }

    pub fn blend_mode(&self) -> Option<BlendMode> {
        match &self.op {
            DrawOp::Fill { blend, .. } => Some(*blend),
            DrawOp::NoiseAlpha { .. } => None,
        }
    }
}

/// Alpha for a noise value in [0, 1], on the [0, 1] scale.
#[inline]
pub fn noise_alpha(noise: f64, gain: f64) -> f64 {
    (noise.max(0.0).powf(1.5) * 200.0 * gain).clamp(0.0, 255.0) / 255.0
}

/// Distinct layers of a command list, in order.
pub fn layer_kinds(commands: &[DrawCommand]) -> Vec<LayerKind> {
    let mut layers: Vec<LayerKind> = Vec::new();
    for command in commands {
        if layers.last() != Some(&command.layer) {
            layers.push(command.layer);
        }
    }
    layers
}

/// Executes a layer plan against a fresh buffer.
#[derive(Debug)]
pub struct Compositor {
    size: u32,
    noise: FractalNoise<GradientNoise>,
    commands: Vec<DrawCommand>,
    cache_capacity: usize,
}

impl Compositor {
    pub fn new(
        size: u32,
        noise: FractalNoise<GradientNoise>,
        commands: Vec<DrawCommand>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            size,
            noise,
            commands,
            cache_capacity,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn noise(&self) -> &FractalNoise<GradientNoise> {
        &self.noise
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Distinct layers in drawing order.
    pub fn layers(&self) -> Vec<LayerKind> {
        layer_kinds(&self.commands)
    }

    /// Draw every layer.
    pub fn draw(&self) -> PixelBuffer {
        self.draw_filtered(|_| true)
    }

    /// Draw only the layers `keep` accepts, in the usual order.
    pub fn draw_filtered<F>(&self, keep: F) -> PixelBuffer
    where
        F: Fn(LayerKind) -> bool,
    {
        let mut buffer = PixelBuffer::new_transparent(self.size, self.size);
        // Per pass, so repeated draws never observe each other.
        let mut cache = NoiseCache::new(self.cache_capacity);

        for command in self.commands.iter().filter(|c| keep(c.layer)) {
            self.execute(command, &mut buffer, &mut cache);
        }

        let (hits, misses) = cache.stats();
        debug!(hits, misses, "noise cache");
        buffer
    }

    fn execute(&self, command: &DrawCommand, buffer: &mut PixelBuffer, cache: &mut NoiseCache) {
        match &command.op {
            DrawOp::Fill {
                paint,
                blend,
                opacity,
            } => {
                debug!(layer = command.layer.name(), blend = blend.css_name(), "fill");
                fill(buffer, paint.as_ref(), *blend, *opacity);
            }
            DrawOp::NoiseAlpha { gain } => {
                debug!(layer = command.layer.name(), gain, "noise alpha");
                for y in 0..buffer.height {
                    for x in 0..buffer.width {
                        let value = self.noise.sample_cached(cache, x as f64, y as f64);
                        buffer.set_alpha(x, y, noise_alpha(value, *gain));
                    }
                }
            }
        }
    }
}

/// Composite a paint over a buffer, sampling at pixel centers.
pub fn fill(buffer: &mut PixelBuffer, paint: &dyn Paint, blend: BlendMode, opacity: f64) {
    let (width, height) = (buffer.width, buffer.height);
    let (x0, y0, x1, y1) = match paint.bounds(width, height) {
        Some(rect) if rect.is_empty() => return,
        Some(rect) => (rect.x0, rect.y0, rect.x1, rect.y1),
        None => (0, 0, width, height),
    };

    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(color) = paint.shade(x as f64 + 0.5, y as f64 + 0.5) {
                buffer.blend(x, y, &color, blend, opacity);
            }
        }
    }
}
