//! Deterministic PNG encoding.
//!
//! Uses fixed compression settings so the same pixels always encode to the
//! same bytes.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// A finalized still image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// PNG file bytes.
    pub bytes: Vec<u8>,
    /// BLAKE3 hash of `bytes`, hex encoded.
    pub hash: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl EncodedImage {
    /// MIME type of `bytes`.
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

/// Write an RGBA pixel buffer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{}",
            buffer.width, buffer.height
        )));
    }

    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate writes no timestamps or other variable metadata.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.to_rgba8())?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode a pixel buffer into a hashed PNG.
pub fn encode(buffer: &PixelBuffer, config: &PngConfig) -> Result<EncodedImage, PngError> {
    let mut bytes = Vec::new();
    write_rgba_to_writer(buffer, &mut bytes, config)?;
    let hash = hash_png(&bytes);
    Ok(EncodedImage {
        bytes,
        hash,
        width: buffer.width,
        height: buffer.height,
    })
}
