//! The fixed layer plan of a fingerprint.

use crate::color::{BlendMode, Color};
use crate::mapper::{PatternType, RenderParameters};
use crate::paint::{ColorStop, LinearGradient, RadialGradient, SignaturePattern};
use crate::rng::DeterministicRng;

use super::{DrawCommand, DrawOp, LayerKind};

pub const BURST_COUNT: usize = 5;
pub const BURST_ALPHA: f64 = 0.8;
pub const BUBBLE_COUNT: usize = 8;
pub const BUBBLE_ALPHA: f64 = 0.6;
pub const VIGNETTE_ALPHA: f64 = 0.7;
pub const SIGNATURE_OPACITY: f64 = 0.2;

/// Everything a layer plan is built from.
#[derive(Debug, Clone, Copy)]
pub struct LayerInputs<'a> {
    pub size: u32,
    pub seed: f64,
    /// At least four colors.
    pub palette: &'a [Color],
    pub params: &'a RenderParameters,
}

/// Build the ordered draw commands for one fingerprint.
///
/// Order: background, noise mask, bursts, vignette, bubbles, signature.
/// Optional layers are left out when their feature does not cross its
/// threshold.
pub fn plan(inputs: &LayerInputs<'_>) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(4 + BURST_COUNT + BUBBLE_COUNT);

    commands.push(background(inputs));
    commands.push(DrawCommand {
        layer: LayerKind::NoiseMask,
        op: DrawOp::NoiseAlpha {
            gain: inputs.params.color_multiplier,
        },
    });

    if inputs.params.bursts {
        commands.extend(bursts(inputs));
    }
    if inputs.params.vignette {
        commands.push(vignette(inputs.size));
    }
    if inputs.params.bubbles {
        commands.extend(bubbles(inputs));
    }
    if let Some(pattern) = inputs.params.pattern {
        commands.push(DrawCommand::fill(
            LayerKind::Signature,
            signature_pattern(inputs.seed, pattern, inputs.size),
            BlendMode::Overlay,
            SIGNATURE_OPACITY,
        ));
    }

    commands
}

/// The signature pattern a seed produces for a pattern type.
pub fn signature_pattern(seed: f64, pattern: PatternType, size: u32) -> SignaturePattern {
    let mut rng = DeterministicRng::for_stream(seed, "signature");
    SignaturePattern::generate(pattern, &mut rng, size)
}

fn background(inputs: &LayerInputs<'_>) -> DrawCommand {
    let p = inputs.palette;
    let stops = [p[0], p[1], p[2], p[3]];
    DrawCommand::fill(
        LayerKind::Background,
        LinearGradient::diagonal(inputs.size, stops),
        BlendMode::Normal,
        1.0,
    )
}

fn bursts(inputs: &LayerInputs<'_>) -> Vec<DrawCommand> {
    let s = inputs.size as f64;
    let mut rng = DeterministicRng::for_stream(inputs.seed, "bursts");

    (0..BURST_COUNT)
        .map(|i| {
            let x = s * (0.3 + rng.gen_f64() * 0.4);
            let y = s * (0.3 + rng.gen_f64() * 0.4);
            let radius = s * inputs.params.burst_radius;
            let color = inputs.palette[i % inputs.palette.len()].with_alpha(BURST_ALPHA);
            DrawCommand::fill(
                LayerKind::EnergyBursts,
                RadialGradient::spot([x, y], radius, color),
                BlendMode::Screen,
                1.0,
            )
        })
        .collect()
}

fn vignette(size: u32) -> DrawCommand {
    let s = size as f64;
    let gradient = RadialGradient::new(
        [s / 2.0, s / 2.0],
        s * 0.25,
        s * 0.7,
        vec![
            ColorStop::new(0.0, Color::transparent()),
            ColorStop::new(1.0, Color::black().with_alpha(VIGNETTE_ALPHA)),
        ],
    );
    DrawCommand::fill(LayerKind::MoodVignette, gradient, BlendMode::Multiply, 1.0)
}

fn bubbles(inputs: &LayerInputs<'_>) -> Vec<DrawCommand> {
    let s = inputs.size as f64;
    let mut rng = DeterministicRng::for_stream(inputs.seed, "bubbles");

    (0..BUBBLE_COUNT)
        .map(|_| {
            let x = s * (0.1 + rng.gen_f64() * 0.8);
            let y = s * (0.1 + rng.gen_f64() * 0.8);
            let radius = s * (0.02 + rng.gen_f64() * 0.04);
            DrawCommand::fill(
                LayerKind::DanceBubbles,
                RadialGradient::spot([x, y], radius, Color::white().with_alpha(BUBBLE_ALPHA)),
                BlendMode::Overlay,
                1.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityTier;
    use crate::test_support::sample_profile;

    fn commands_for(params: &RenderParameters) -> Vec<DrawCommand> {
        let palette = sample_profile().palette().unwrap();
        plan(&LayerInputs {
            size: 200,
            seed: 42.0,
            palette: &palette,
            params,
        })
    }

    fn count(commands: &[DrawCommand], layer: LayerKind) -> usize {
        commands.iter().filter(|c| c.layer == layer).count()
    }

    #[test]
    fn full_plan_has_every_layer_in_order() {
        let mut params = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);
        params.vignette = true;
        let commands = commands_for(&params);

        assert_eq!(count(&commands, LayerKind::Background), 1);
        assert_eq!(count(&commands, LayerKind::NoiseMask), 1);
        assert_eq!(count(&commands, LayerKind::EnergyBursts), BURST_COUNT);
        assert_eq!(count(&commands, LayerKind::MoodVignette), 1);
        assert_eq!(count(&commands, LayerKind::DanceBubbles), BUBBLE_COUNT);
        assert_eq!(count(&commands, LayerKind::Signature), 1);

        let order: Vec<LayerKind> = commands.iter().map(|c| c.layer).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|layer| *layer as u8);
        assert_eq!(order, sorted);
    }

    #[test]
    fn optional_layers_follow_switches() {
        let mut params = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);
        params.bursts = false;
        params.bubbles = false;
        params.vignette = false;
        params.pattern = None;
        let commands = commands_for(&params);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[1].op, DrawOp::NoiseAlpha { gain } if gain == 0.8));
    }

    #[test]
    fn blend_modes_per_layer() {
        let mut params = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);
        params.vignette = true;
        for command in commands_for(&params) {
            let expected = match command.layer {
                LayerKind::Background => Some(BlendMode::Normal),
                LayerKind::NoiseMask => None,
                LayerKind::EnergyBursts => Some(BlendMode::Screen),
                LayerKind::MoodVignette => Some(BlendMode::Multiply),
                LayerKind::DanceBubbles | LayerKind::Signature => Some(BlendMode::Overlay),
            };
            assert_eq!(command.blend_mode(), expected, "{:?}", command.layer);
        }
    }

    #[test]
    fn signature_depends_on_seed() {
        assert_eq!(
            signature_pattern(1.0, PatternType::Dots, 100),
            signature_pattern(1.0, PatternType::Dots, 100)
        );
        assert_ne!(
            signature_pattern(1.0, PatternType::Dots, 100),
            signature_pattern(2.0, PatternType::Dots, 100)
        );
    }
}
