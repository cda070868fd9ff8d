//! Fingerprint synthesis.
//!
//! [`ImageSynthesizer::synthesize`] validates a profile, maps it to render
//! parameters, plans the layers and draws them once to produce the still
//! image. The returned [`Fingerprint`] can draw itself again onto any
//! [`Surface`] of the right size.

use tracing::{info, info_span, warn};

use crate::buffer::PixelBuffer;
use crate::compose::{self, Compositor, LayerInputs, LayerKind};
use crate::config::{QualityTier, SynthesisOptions};
use crate::error::SynthesisError;
use crate::mapper::RenderParameters;
use crate::noise::{FractalNoise, GradientNoise};
use crate::png::{self, EncodedImage};
use crate::profile::{MusicProfile, SeedSource};
use crate::rng::DeterministicRng;
use crate::telemetry::{SynthesisReport, TelemetrySink};
use crate::MAX_IMAGE_SIZE;

/// Period of the seed-derived noise phase, in noise units.
const PHASE_RANGE: f64 = 256.0;

/// Something a fingerprint can be drawn onto.
pub trait Surface {
    /// Drawable size, or `None` when the surface cannot be drawn on.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Replace the surface contents with `pixels`, which match `dimensions`.
    fn present(&mut self, pixels: &PixelBuffer);
}

impl Surface for PixelBuffer {
    fn dimensions(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }

    fn present(&mut self, pixels: &PixelBuffer) {
        self.data.clone_from(&pixels.data);
    }
}

/// Turns music profiles into fingerprints.
#[derive(Debug, Clone, Default)]
pub struct ImageSynthesizer {
    options: SynthesisOptions,
}

impl ImageSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Synthesize the fingerprint of `profile` at `size × size` pixels.
    pub fn synthesize(
        &self,
        profile: &MusicProfile,
        size: u32,
    ) -> Result<Fingerprint, SynthesisError> {
        if size == 0 || size > MAX_IMAGE_SIZE {
            return Err(SynthesisError::InvalidSize(size));
        }
        profile.validate()?;
        let palette = profile.palette()?;

        let (seed, seed_source) = profile.resolve_seed();
        let span = info_span!("synthesize", seed, size);
        let _enter = span.enter();

        let tier = self.options.tier;
        let params = RenderParameters::from_profile(profile, tier);
        let noise = noise_field(seed, &params, tier);
        let commands = compose::plan(&LayerInputs {
            size,
            seed,
            palette: &palette,
            params: &params,
        });
        let compositor = Compositor::new(size, noise, commands, self.options.cache_capacity);

        let pixels = compositor.draw();
        let image = png::encode(&pixels, &self.options.png.config())?;

        info!(
            source = ?seed_source,
            layers = compositor.layers().len(),
            hash = %image.hash,
            "fingerprint synthesized"
        );

        Ok(Fingerprint {
            seed,
            seed_source,
            tier,
            params,
            compositor,
            pixels,
            image,
        })
    }

    /// Like [`synthesize`](Self::synthesize), then hand a report to `sink`.
    ///
    /// A sink that fails to record only logs a warning.
    pub fn synthesize_with_sink(
        &self,
        profile: &MusicProfile,
        size: u32,
        sink: &mut dyn TelemetrySink,
    ) -> Result<Fingerprint, SynthesisError> {
        let fingerprint = self.synthesize(profile, size)?;
        if let Err(err) = sink.record(&fingerprint.report()) {
            warn!(error = %err, "telemetry sink failed");
        }
        Ok(fingerprint)
    }
}

/// Synthesize with default options.
pub fn synthesize(profile: &MusicProfile, size: u32) -> Result<Fingerprint, SynthesisError> {
    ImageSynthesizer::default().synthesize(profile, size)
}

/// The noise field a seed produces.
pub fn noise_field(
    seed: f64,
    params: &RenderParameters,
    tier: QualityTier,
) -> FractalNoise<GradientNoise> {
    let lattice = DeterministicRng::for_stream(seed, "lattice").gen_u32() as i32;
    let phase = DeterministicRng::for_stream(seed, "phase").gen_f64() * PHASE_RANGE;

    FractalNoise::new(GradientNoise::new(lattice, tier.gradient_table_size()))
        .with_scale(params.scale)
        .with_octaves(params.octaves)
        .with_persistence(params.persistence)
        .with_phase(phase)
}

/// A synthesized fingerprint.
#[derive(Debug)]
pub struct Fingerprint {
    seed: f64,
    seed_source: SeedSource,
    tier: QualityTier,
    params: RenderParameters,
    compositor: Compositor,
    pixels: PixelBuffer,
    image: EncodedImage,
}

impl Fingerprint {
    /// Draw onto `surface`.
    ///
    /// Each call draws from scratch with a fresh noise cache, so repeated
    /// calls produce identical pixels. Nothing is drawn when the surface is
    /// unavailable or the wrong size.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), SynthesisError> {
        let (width, height) = surface
            .dimensions()
            .ok_or(SynthesisError::RenderTargetUnavailable)?;
        let size = self.size();
        if width != size || height != size {
            return Err(SynthesisError::SurfaceSizeMismatch {
                expected: size,
                width,
                height,
            });
        }
        surface.present(&self.compositor.draw());
        Ok(())
    }

    /// Draw only the layers `keep` accepts.
    pub fn render_layers<F>(&self, keep: F) -> PixelBuffer
    where
        F: Fn(LayerKind) -> bool,
    {
        self.compositor.draw_filtered(keep)
    }

    /// Pixels from the synthesis pass.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    pub fn image(&self) -> &EncodedImage {
        &self.image
    }

    pub fn seed(&self) -> f64 {
        self.seed
    }

    pub fn seed_source(&self) -> SeedSource {
        self.seed_source
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    pub fn size(&self) -> u32 {
        self.compositor.size()
    }

    /// Drawn layers in order.
    pub fn layers(&self) -> Vec<LayerKind> {
        self.compositor.layers()
    }

    pub fn report(&self) -> SynthesisReport {
        SynthesisReport {
            seed: self.seed,
            seed_source: self.seed_source,
            size: self.size(),
            tier: self.tier,
            parameters: self.params.clone(),
            layers: self
                .layers()
                .iter()
                .map(|layer| layer.name().to_string())
                .collect(),
            png_hash: self.image.hash.clone(),
            png_len: self.image.bytes.len(),
        }
    }
}
