//! Color utilities and blend modes for fingerprint compositing.
//!
//! Colors are stored with straight (non-premultiplied) alpha. Blending follows
//! the separable blend modes of W3C Compositing and Blending Level 1, composed
//! with source-over.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Fully transparent black, the CSS `transparent` keyword.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create a color from HSL values.
    /// - h: hue in degrees (any value, wrapped into 0-360)
    /// - s: saturation (0-1)
    /// - l: lightness (0-1)
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let h = h.rem_euclid(360.0) / 360.0;

        if s <= 0.0 {
            return Self::gray(l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        Self::rgb(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Return this color with its alpha replaced.
    pub fn with_alpha(&self, a: f64) -> Color {
        Color { a, ..*self }
    }

    /// Interpolate in premultiplied space, the way canvas gradients do.
    ///
    /// Fading a color towards `transparent` keeps its hue instead of
    /// darkening through black.
    pub fn lerp_premultiplied(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= 0.0 {
            return Color::transparent();
        }
        let channel = |c0: f64, c1: f64| (c0 * self.a + (c1 * other.a - c0 * self.a) * t) / a;
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}

/// Errors from parsing CSS color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("unsupported color syntax: {0:?}")]
    UnsupportedSyntax(String),

    #[error("expected {expected} components in {input:?}, found {found}")]
    ComponentCount {
        input: String,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid color component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `hsl()`, `hsla()`, `rgb()`, `rgba()`, `#rgb`, `#rrggbb`,
    /// `#rrggbbaa` and the keywords `transparent`, `black` and `white`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let lower = input.to_ascii_lowercase();

        match lower.as_str() {
            "transparent" => return Ok(Color::transparent()),
            "black" => return Ok(Color::black()),
            "white" => return Ok(Color::white()),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(input, hex);
        }

        let (name, args) = lower
            .split_once('(')
            .and_then(|(name, rest)| rest.strip_suffix(')').map(|args| (name.trim(), args)))
            .ok_or_else(|| ColorParseError::UnsupportedSyntax(input.to_string()))?;

        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        match name {
            "hsl" | "hsla" => {
                let (h, s, l, a) = components(input, &parts)?;
                let hue = parse_number(input, h.trim_end_matches("deg"))?;
                let sat = parse_percent(input, s)?;
                let light = parse_percent(input, l)?;
                let alpha = a.map(|a| parse_alpha(input, a)).transpose()?.unwrap_or(1.0);
                Ok(Color::from_hsl(hue, sat, light).with_alpha(alpha))
            }
            "rgb" | "rgba" => {
                let (r, g, b, a) = components(input, &parts)?;
                let alpha = a.map(|a| parse_alpha(input, a)).transpose()?.unwrap_or(1.0);
                Ok(Color::rgba(
                    parse_channel(input, r)?,
                    parse_channel(input, g)?,
                    parse_channel(input, b)?,
                    alpha,
                ))
            }
            _ => Err(ColorParseError::UnsupportedSyntax(input.to_string())),
        }
    }
}

fn components<'a>(
    input: &str,
    parts: &[&'a str],
) -> Result<(&'a str, &'a str, &'a str, Option<&'a str>), ColorParseError> {
    match parts {
        [a, b, c] => Ok((*a, *b, *c, None)),
        [a, b, c, d] => Ok((*a, *b, *c, Some(*d))),
        _ => Err(ColorParseError::ComponentCount {
            input: input.to_string(),
            expected: "3 or 4",
            found: parts.len(),
        }),
    }
}

fn invalid(input: &str, component: &str) -> ColorParseError {
    ColorParseError::InvalidComponent {
        input: input.to_string(),
        component: component.to_string(),
    }
}

fn parse_number(input: &str, text: &str) -> Result<f64, ColorParseError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(input, text))
}

fn parse_percent(input: &str, text: &str) -> Result<f64, ColorParseError> {
    let value = text.strip_suffix('%').ok_or_else(|| invalid(input, text))?;
    Ok(parse_number(input, value)? / 100.0)
}

fn parse_alpha(input: &str, text: &str) -> Result<f64, ColorParseError> {
    let alpha = if text.ends_with('%') {
        parse_percent(input, text)?
    } else {
        parse_number(input, text)?
    };
    Ok(alpha.clamp(0.0, 1.0))
}

fn parse_channel(input: &str, text: &str) -> Result<f64, ColorParseError> {
    let value = if text.ends_with('%') {
        parse_percent(input, text)?
    } else {
        parse_number(input, text)? / 255.0
    };
    Ok(value.clamp(0.0, 1.0))
}

fn parse_hex(input: &str, hex: &str) -> Result<Color, ColorParseError> {
    let digit = |c: u8| -> Result<u8, ColorParseError> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| invalid(input, hex))
    };
    let bytes = hex.as_bytes();
    let rgba = match bytes.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (i, &c) in bytes.iter().enumerate() {
                let d = digit(c)?;
                out[i] = d * 16 + d;
            }
            out
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (i, pair) in bytes.chunks(2).enumerate() {
                out[i] = digit(pair[0])? * 16 + digit(pair[1])?;
            }
            out
        }
        _ => return Err(ColorParseError::UnsupportedSyntax(input.to_string())),
    };
    Ok(Color::from_rgba8(rgba))
}

/// Blend mode for combining layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Plain source-over.
    Normal,
    Multiply,
    Screen,
    Overlay,
}

impl BlendMode {
    /// The separable blend function `B(Cb, Cs)` for one channel.
    #[inline]
    fn channel(&self, backdrop: f64, source: f64) -> f64 {
        match self {
            BlendMode::Normal => source,
            BlendMode::Multiply => backdrop * source,
            BlendMode::Screen => backdrop + source - backdrop * source,
            BlendMode::Overlay => {
                // HardLight with the operands swapped.
                if backdrop <= 0.5 {
                    2.0 * backdrop * source
                } else {
                    let s = 2.0 * backdrop - 1.0;
                    s + source - s * source
                }
            }
        }
    }

    /// Composite `src` over `dst` with this blend mode.
    ///
    /// `opacity` scales the source alpha, like `globalAlpha` on a canvas.
    pub fn composite(&self, dst: &Color, src: &Color, opacity: f64) -> Color {
        let alpha_s = (src.a * opacity).clamp(0.0, 1.0);
        if alpha_s <= 0.0 {
            return *dst;
        }
        let alpha_b = dst.a.clamp(0.0, 1.0);
        let alpha_o = alpha_s + alpha_b * (1.0 - alpha_s);

        let mix = |cb: f64, cs: f64| {
            let blended = (1.0 - alpha_b) * cs + alpha_b * self.channel(cb, cs);
            let premultiplied = alpha_s * blended + alpha_b * cb * (1.0 - alpha_s);
            premultiplied / alpha_o
        };

        Color {
            r: mix(dst.r, src.r),
            g: mix(dst.g, src.g),
            b: mix(dst.b, src.b),
            a: alpha_o,
        }
    }

    /// CSS `mix-blend-mode` / canvas `globalCompositeOperation` name.
    pub fn css_name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "source-over",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!(approx(red.r, 1.0) && approx(red.g, 0.0) && approx(red.b, 0.0));

        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert!(approx(green.r, 0.0) && approx(green.g, 1.0) && approx(green.b, 0.0));

        let blue = Color::from_hsl(240.0, 1.0, 0.5);
        assert!(approx(blue.r, 0.0) && approx(blue.g, 0.0) && approx(blue.b, 1.0));

        // Hue wraps.
        assert_eq!(Color::from_hsl(360.0, 1.0, 0.5), red);
    }

    #[test]
    fn test_parse_hsl() {
        let c: Color = "hsl(200,80%,50%)".parse().unwrap();
        assert_eq!(c, Color::from_hsl(200.0, 0.8, 0.5));

        let spaced: Color = "hsl(200, 80%, 50%)".parse().unwrap();
        assert_eq!(spaced, c);

        let with_alpha: Color = "hsla(200, 80%, 50%, 0.25)".parse().unwrap();
        assert!(approx(with_alpha.a, 0.25));
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        let c: Color = "rgba(0,0,0,0.7)".parse().unwrap();
        assert_eq!(c, Color::rgba(0.0, 0.0, 0.0, 0.7));

        let hex: Color = "#ff8000".parse().unwrap();
        assert_eq!(hex.to_rgba8(), [255, 128, 0, 255]);

        let short: Color = "#fff".parse().unwrap();
        assert_eq!(short, Color::white());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "chartreuse".parse::<Color>(),
            Err(ColorParseError::UnsupportedSyntax(_))
        ));
        assert!(matches!(
            "hsl(200, 80, 50%)".parse::<Color>(),
            Err(ColorParseError::InvalidComponent { .. })
        ));
        assert!(matches!(
            "hsl(200, 80%)".parse::<Color>(),
            Err(ColorParseError::ComponentCount { found: 2, .. })
        ));
    }

    #[test]
    fn test_premultiplied_fade_keeps_hue() {
        let red = Color::rgba(1.0, 0.0, 0.0, 0.8);
        let mid = red.lerp_premultiplied(&Color::transparent(), 0.5);
        assert!(approx(mid.r, 1.0));
        assert!(approx(mid.a, 0.4));
    }

    #[test]
    fn test_blend_opaque_backdrop() {
        let dst = Color::gray(0.5);
        let src = Color::gray(0.5);

        let m = BlendMode::Multiply.composite(&dst, &src, 1.0);
        assert!(approx(m.r, 0.25));

        let s = BlendMode::Screen.composite(&dst, &src, 1.0);
        assert!(approx(s.r, 0.75));

        let o = BlendMode::Overlay.composite(&Color::gray(0.25), &Color::gray(0.5), 1.0);
        assert!(approx(o.r, 0.25));
    }

    #[test]
    fn test_blend_transparent_backdrop_shows_source() {
        let src = Color::rgb(0.2, 0.4, 0.6);
        for mode in [BlendMode::Multiply, BlendMode::Screen, BlendMode::Overlay] {
            let out = mode.composite(&Color::transparent(), &src, 1.0);
            assert!(approx(out.r, 0.2) && approx(out.g, 0.4) && approx(out.b, 0.6));
            assert!(approx(out.a, 1.0));
        }
    }

    #[test]
    fn test_zero_opacity_is_noop() {
        let dst = Color::rgba(0.1, 0.2, 0.3, 0.4);
        let out = BlendMode::Screen.composite(&dst, &Color::white(), 0.0);
        assert_eq!(out, dst);
    }
}
