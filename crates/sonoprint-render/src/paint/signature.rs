//! Signature micro-patterns.
//!
//! Each listener gets one of four faint white patterns chosen by their top
//! genre. Every parameter (count, spacing, amplitude, placement) comes from a
//! seeded RNG stream, so a seed reproduces its pattern exactly.

use std::f64::consts::{PI, TAU};

use super::{stroke_coverage, Paint};
use crate::color::Color;
use crate::mapper::PatternType;
use crate::rng::DeterministicRng;

/// A filled dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// One horizontal sine stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub baseline: f64,
    pub amplitude: f64,
    pub wavelength: f64,
    pub phase: f64,
}

impl Wave {
    #[inline]
    fn distance(&self, x: f64, y: f64) -> f64 {
        let k = TAU / self.wavelength;
        let arg = k * x + self.phase;
        let curve = self.baseline + self.amplitude * arg.sin();
        let slope = self.amplitude * k * arg.cos();
        // First-order distance to the curve rather than the vertical gap.
        (y - curve).abs() / (1.0 + slope * slope).sqrt()
    }
}

/// A generated signature pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum SignaturePattern {
    /// Parallel strokes across the whole canvas.
    Lines {
        angle: f64,
        spacing: f64,
        offset: f64,
        half_width: f64,
    },
    /// Scattered dots.
    Dots { dots: Vec<Dot> },
    /// Stacked sine waves.
    Waves { waves: Vec<Wave>, half_width: f64 },
    /// A grid with some of its rows and columns left out.
    Grid {
        spacing: f64,
        columns: Vec<bool>,
        rows: Vec<bool>,
        half_width: f64,
    },
}

impl SignaturePattern {
    /// Generate the pattern of the given type for a `size × size` canvas.
    pub fn generate(pattern: PatternType, rng: &mut DeterministicRng, size: u32) -> Self {
        let s = size.max(1) as f64;
        match pattern {
            PatternType::Lines => {
                let count = rng.gen_range(8..=20u32);
                let spacing = s / count as f64;
                SignaturePattern::Lines {
                    angle: rng.gen_f64() * PI,
                    spacing,
                    offset: rng.gen_f64() * spacing,
                    half_width: 0.5 + rng.gen_f64(),
                }
            }
            PatternType::Dots => {
                let count = rng.gen_range(40..=90u32);
                let dots = (0..count)
                    .map(|_| Dot {
                        x: rng.gen_f64() * s,
                        y: rng.gen_f64() * s,
                        radius: s * (0.004 + rng.gen_f64() * 0.008),
                    })
                    .collect();
                SignaturePattern::Dots { dots }
            }
            PatternType::Waves => {
                let count = rng.gen_range(3..=7u32);
                let gap = s / (count + 1) as f64;
                let waves = (0..count)
                    .map(|i| Wave {
                        baseline: gap * (i + 1) as f64,
                        amplitude: s * (0.01 + rng.gen_f64() * 0.04),
                        wavelength: s * (0.1 + rng.gen_f64() * 0.3),
                        phase: rng.gen_f64() * TAU,
                    })
                    .collect();
                SignaturePattern::Waves {
                    waves,
                    half_width: 1.0,
                }
            }
            PatternType::Grid => {
                let cells = rng.gen_range(6..=14u32);
                let spacing = s / cells as f64;
                let columns = (0..=cells).map(|_| rng.gen_bool(0.6)).collect();
                let rows = (0..=cells).map(|_| rng.gen_bool(0.6)).collect();
                SignaturePattern::Grid {
                    spacing,
                    columns,
                    rows,
                    half_width: 0.75,
                }
            }
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        match self {
            SignaturePattern::Lines { .. } => PatternType::Lines,
            SignaturePattern::Dots { .. } => PatternType::Dots,
            SignaturePattern::Waves { .. } => PatternType::Waves,
            SignaturePattern::Grid { .. } => PatternType::Grid,
        }
    }

    /// Stroke coverage in [0, 1] at a pixel center.
    pub fn coverage(&self, x: f64, y: f64) -> f64 {
        match self {
            SignaturePattern::Lines {
                angle,
                spacing,
                offset,
                half_width,
            } => {
                let along = x * angle.cos() + y * angle.sin() - offset;
                let distance = (along - spacing * (along / spacing).round()).abs();
                stroke_coverage(distance, *half_width)
            }
            SignaturePattern::Dots { dots } => dots
                .iter()
                .map(|dot| {
                    let distance = ((x - dot.x).powi(2) + (y - dot.y).powi(2)).sqrt();
                    (dot.radius + 0.5 - distance).clamp(0.0, 1.0)
                })
                .fold(0.0, f64::max),
            SignaturePattern::Waves { waves, half_width } => waves
                .iter()
                .map(|wave| stroke_coverage(wave.distance(x, y), *half_width))
                .fold(0.0, f64::max),
            SignaturePattern::Grid {
                spacing,
                columns,
                rows,
                half_width,
            } => {
                let line = |v: f64, enabled: &[bool]| {
                    let k = (v / spacing).round();
                    if k < 0.0 || !enabled.get(k as usize).copied().unwrap_or(false) {
                        return 0.0;
                    }
                    stroke_coverage((v - k * spacing).abs(), *half_width)
                };
                line(x, columns).max(line(y, rows))
            }
        }
    }
}

impl Paint for SignaturePattern {
    fn shade(&self, x: f64, y: f64) -> Option<Color> {
        let coverage = self.coverage(x, y);
        (coverage > 0.0).then(|| Color::white().with_alpha(coverage))
    }
}
