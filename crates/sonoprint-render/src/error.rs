//! Errors raised while synthesizing a fingerprint.

use thiserror::Error;

use crate::color::ColorParseError;
use crate::png::PngError;

/// Errors from fingerprint synthesis and rendering.
///
/// All errors are local to one synthesis call. Synthesis is deterministic, so
/// retrying with the same input reproduces the same error.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("render target unavailable: surface has no drawable area")]
    RenderTargetUnavailable,

    #[error("surface is {width}x{height}, fingerprint is {expected}x{expected}")]
    SurfaceSizeMismatch {
        expected: u32,
        width: u32,
        height: u32,
    },

    #[error("incomplete music profile: `{field}` is not a finite number")]
    IncompleteMusicProfile { field: &'static str },

    #[error("palette needs at least 4 colors, found {found}")]
    InsufficientPalette { found: usize },

    #[error("palette color {index} is invalid: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ColorParseError,
    },

    #[error("invalid image size {0}: must be between 1 and {max}", max = crate::MAX_IMAGE_SIZE)]
    InvalidSize(u32),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),
}

impl SynthesisError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisError::RenderTargetUnavailable => "SYNTH_001",
            SynthesisError::SurfaceSizeMismatch { .. } => "SYNTH_002",
            SynthesisError::IncompleteMusicProfile { .. } => "SYNTH_003",
            SynthesisError::InsufficientPalette { .. } => "SYNTH_004",
            SynthesisError::InvalidColor { .. } => "SYNTH_005",
            SynthesisError::InvalidSize(_) => "SYNTH_006",
            SynthesisError::Png(_) => "SYNTH_007",
        }
    }

    /// Error category for grouping in reports.
    pub fn category(&self) -> &'static str {
        match self {
            SynthesisError::RenderTargetUnavailable | SynthesisError::SurfaceSizeMismatch { .. } => {
                "surface"
            }
            SynthesisError::IncompleteMusicProfile { .. }
            | SynthesisError::InsufficientPalette { .. }
            | SynthesisError::InvalidColor { .. } => "profile",
            SynthesisError::InvalidSize(_) | SynthesisError::Png(_) => "output",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let errors = [
            SynthesisError::RenderTargetUnavailable,
            SynthesisError::SurfaceSizeMismatch {
                expected: 4,
                width: 3,
                height: 4,
            },
            SynthesisError::IncompleteMusicProfile { field: "energy" },
            SynthesisError::InsufficientPalette { found: 2 },
            SynthesisError::InvalidColor {
                index: 1,
                source: ColorParseError::UnsupportedSyntax("x".into()),
            },
            SynthesisError::InvalidSize(0),
            SynthesisError::Png(PngError::InvalidDimensions("0x0".into())),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = SynthesisError::IncompleteMusicProfile { field: "valence" };
        assert!(err.to_string().contains("valence"));
        assert_eq!(err.category(), "profile");

        let err = SynthesisError::InsufficientPalette { found: 3 };
        assert!(err.to_string().contains("found 3"));
    }
}
