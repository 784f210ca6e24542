#![forbid(unsafe_code)]

//! The canonical color value and free-form input parsing.
//!
//! Every accepted input format (hex, `rgba()`, `hsl()`) is normalized into a
//! single canonical representation: hue in [0, 360), saturation, lightness,
//! and alpha in [0, 100], stored at full `f64` precision. Rounding happens
//! only when a color is serialized, so a parsed hex color reproduces its
//! exact byte values on the way back out.
//!
//! Two different notions of "hex normalization" live here on purpose and
//! must not be conflated:
//!
//! - [`Color::parse`] / [`Color::to_hex`] preserve alpha end to end
//!   (`#f00a` stays a transparent red).
//! - [`normalize_hex`] is display normalization for text inputs: it expands
//!   short forms and **discards** alpha digits, always producing a 6-digit
//!   hex for UI fields that cannot represent transparency.

use std::fmt;
use std::str::FromStr;

use crate::convert;

/// A color in canonical HSL+alpha form.
///
/// Components are kept at full precision; equality and hashing quantize to
/// the serialized form (8-bit RGB channels plus the alpha byte), so colors
/// that render identically compare equal regardless of the input format
/// they were parsed from.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub(crate) hue: f64,
    pub(crate) saturation: f64,
    pub(crate) lightness: f64,
    pub(crate) alpha: f64,
}

impl Color {
    /// Create a color from HSL components and alpha.
    ///
    /// Hue wraps modulo 360; saturation, lightness, and alpha are clamped
    /// to [0, 100].
    #[must_use]
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
            alpha: alpha.clamp(0.0, 100.0),
        }
    }

    /// Create an opaque color from 8-bit RGB channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb_f64((f64::from(r), f64::from(g), f64::from(b)), 100.0)
    }

    /// Create a color from 8-bit RGB channels and an alpha percentage.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::from_rgb_f64((f64::from(r), f64::from(g), f64::from(b)), alpha)
    }

    /// Internal constructor from unquantized RGB channels in [0, 255].
    pub(crate) fn from_rgb_f64(rgb: (f64, f64, f64), alpha: f64) -> Self {
        let (hue, saturation, lightness) = convert::rgb_to_hsl(rgb);
        Self::from_hsla(hue, saturation, lightness, alpha)
    }

    /// Hue in degrees, [0, 360).
    #[must_use]
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Saturation percentage, [0, 100].
    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Lightness percentage, [0, 100].
    #[must_use]
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Alpha percentage, [0, 100]. 100 is fully opaque.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The same color with a replaced alpha percentage (clamped to [0, 100]).
    #[must_use]
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 100.0),
            ..*self
        }
    }

    /// Whether the color is fully opaque.
    ///
    /// Any alpha below 100, however slight, keeps the color on the
    /// alpha-bearing serialization path — alpha is never silently dropped.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 100.0
    }

    /// Rounded 8-bit RGB channels.
    #[must_use]
    pub fn rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b) = convert::hsl_to_rgb((self.hue, self.saturation, self.lightness));
        (r.round() as u8, g.round() as u8, b.round() as u8)
    }

    /// Quantized form used for equality and hashing: 8-bit channels plus
    /// the alpha byte, i.e. exactly the precision of the hex serialization.
    pub(crate) fn quantized(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.rgb8();
        (r, g, b, (self.alpha / 100.0 * 255.0).round() as u8)
    }

    /// Hex serialization: `#rrggbb` at full opacity, `#rrggbbaa` below.
    ///
    /// Alpha is never silently dropped; a transparent color always carries
    /// its alpha byte.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.rgb8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = (self.alpha / 100.0 * 255.0).round() as u8;
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Canonical CSS serialization: hex6 at full opacity, `rgba(...)` below.
    ///
    /// This string is the canonical form of the color: it doubles as the
    /// palette cache key, and equal colors always produce identical output.
    #[must_use]
    pub fn css(&self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            self.to_rgba_string()
        }
    }

    /// Parse a free-form color string.
    ///
    /// Accepted grammars:
    /// - hex with 3, 4, 6, or 8 digits, with or without a leading `#`
    /// - `rgba(r, g, b, a)` with integer r/g/b in [0, 255] and a in [0, 1]
    /// - `hsl(h, s%, l%)` with h in [0, 360] and s/l in [0, 100]
    ///
    /// Anything else, including out-of-range components, yields an error
    /// with a format-specific diagnostic. Never panics: user keystrokes
    /// routinely pass through invalid intermediate states.
    pub fn parse(input: &str) -> Result<Self, ParseColorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseColorError::Empty);
        }

        if let Some(digits) = trimmed.strip_prefix('#') {
            return parse_hex(digits).ok_or_else(|| ParseColorError::Hex {
                value: trimmed.to_string(),
            });
        }

        if let Some(inner) = trimmed.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            return parse_rgba(inner).ok_or_else(|| ParseColorError::Rgba {
                value: trimmed.to_string(),
            });
        }

        if let Some(inner) = trimmed.strip_prefix("hsl(").and_then(|s| s.strip_suffix(')')) {
            return parse_hsl(inner).ok_or_else(|| ParseColorError::Hsl {
                value: trimmed.to_string(),
            });
        }

        // Bare hex digits without the leading `#`.
        if let Some(color) = parse_hex(trimmed) {
            return Ok(color);
        }

        Err(ParseColorError::Unrecognized {
            value: trimmed.to_string(),
        })
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.quantized() == other.quantized()
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.quantized().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CssVisitor;

        impl serde::de::Visitor<'_> for CssVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a hex, rgba(), or hsl() color string")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Color, E> {
                Color::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CssVisitor)
    }
}

/// Errors produced by [`Color::parse`].
///
/// Each variant carries the offending input and renders a diagnostic for
/// the format it failed, suitable for inline validity indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The input was empty or whitespace.
    Empty,
    /// A `#`-prefixed value that is not valid 3/4/6/8-digit hex.
    Hex {
        /// The rejected input.
        value: String,
    },
    /// An `rgba(...)` value with bad syntax or out-of-range components.
    Rgba {
        /// The rejected input.
        value: String,
    },
    /// An `hsl(...)` value with bad syntax or out-of-range components.
    Hsl {
        /// The rejected input.
        value: String,
    },
    /// Input matching none of the accepted grammars.
    Unrecognized {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "color input is empty"),
            Self::Hex { value } => write!(
                f,
                "invalid hex color {value:?}, expected #F00, #F00A, #FF0000, or #FF0000AA"
            ),
            Self::Rgba { value } => write!(
                f,
                "invalid rgba color {value:?}, expected rgba(255, 0, 0, 1) with channels in 0-255 and alpha in 0-1"
            ),
            Self::Hsl { value } => write!(
                f,
                "invalid hsl color {value:?}, expected hsl(0, 100%, 50%) with hue in 0-360 and s/l in 0-100"
            ),
            Self::Unrecognized { value } => write!(f, "unrecognized color format {value:?}"),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Parse 3/4/6/8 hex digits (no `#`). Returns `None` on any malformation.
fn parse_hex(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| {
        digits
            .chars()
            .nth(i)
            .and_then(|c| c.to_digit(16))
            .map(|d| (d * 17) as u8)
    };

    match digits.len() {
        3 => {
            let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
            Some(Color::from_rgb8(r, g, b))
        }
        4 => {
            let (r, g, b, a) = (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?);
            Some(Color::from_rgba8(r, g, b, alpha_pct(a)))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(Color::from_rgb8(r, g, b))
        }
        8 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            let a = u8::from_str_radix(&digits[6..8], 16).ok()?;
            Some(Color::from_rgba8(r, g, b, alpha_pct(a)))
        }
        _ => None,
    }
}

/// Alpha byte to percentage.
fn alpha_pct(byte: u8) -> f64 {
    f64::from(byte) / 255.0 * 100.0
}

/// Parse the inside of `rgba(...)`: three integer channels and an alpha.
fn parse_rgba(inner: &str) -> Option<Color> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let value: u32 = s.parse().ok()?;
        u8::try_from(value).ok()
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a: f64 = parts[3].parse().ok()?;
    if !(0.0..=1.0).contains(&a) {
        return None;
    }
    Some(Color::from_rgba8(r, g, b, a * 100.0))
}

/// Parse the inside of `hsl(...)`: hue plus `%`-suffixed saturation and
/// lightness.
fn parse_hsl(inner: &str) -> Option<Color> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let h: f64 = parts[0].parse().ok()?;
    let s: f64 = parts[1].strip_suffix('%')?.trim().parse().ok()?;
    let l: f64 = parts[2].strip_suffix('%')?.trim().parse().ok()?;

    if !(0.0..=360.0).contains(&h) || !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
        return None;
    }
    Some(Color::from_hsla(h, s, l, 100.0))
}

/// Display normalization of hex strings to the 6-digit form.
///
/// Expands 3-digit hex by digit doubling, expands 4-digit hex and drops its
/// alpha digit, truncates 8-digit hex to the leading 6 digits. Inputs
/// without a leading `#`, or with other lengths, pass through unchanged.
/// Idempotent.
///
/// This is intentionally lossy: alpha is discarded for display fields that
/// only understand opaque hex. Use [`Color::parse`] + [`Color::to_hex`] for
/// the alpha-preserving canonical path.
#[must_use]
pub fn normalize_hex(hex: &str) -> String {
    let Some(digits) = hex.strip_prefix('#') else {
        return hex.to_string();
    };

    let doubled = |chars: &[char]| {
        let mut out = String::with_capacity(7);
        out.push('#');
        for &c in chars {
            out.push(c);
            out.push(c);
        }
        out
    };

    let chars: Vec<char> = digits.chars().collect();
    match chars.len() {
        3 => doubled(&chars),
        4 => doubled(&chars[..3]),
        8 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            out.extend(&chars[..6]);
            out
        }
        _ => hex.to_string(),
    }
}

/// Mix two colors, weighting the first by `weight_a` in [0, 1].
///
/// Interpolation happens in linear-light sRGB (gamma-expanded channels),
/// not on raw 8-bit values, so midpoints preserve perceived brightness.
/// Alpha interpolates linearly. Weight 1.0 returns `a` unchanged, 0.0
/// returns `b` unchanged; the mix is symmetric at 0.5.
#[must_use]
pub fn mix(a: &Color, b: &Color, weight_a: f64) -> Color {
    let w = weight_a.clamp(0.0, 1.0);
    if w >= 1.0 {
        return *a;
    }
    if w <= 0.0 {
        return *b;
    }

    let (ra, ga, ba) = convert::hsl_to_rgb((a.hue, a.saturation, a.lightness));
    let (rb, gb, bb) = convert::hsl_to_rgb((b.hue, b.saturation, b.lightness));

    let lerp = |ca: f64, cb: f64| {
        let la = convert::srgb_to_linear(ca / 255.0);
        let lb = convert::srgb_to_linear(cb / 255.0);
        convert::linear_to_srgb(la * w + lb * (1.0 - w)) * 255.0
    };

    Color::from_rgb_f64(
        (lerp(ra, rb), lerp(ga, gb), lerp(ba, bb)),
        a.alpha * w + b.alpha * (1.0 - w),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse tests ---

    #[test]
    fn parse_hex6() {
        let color = Color::parse("#3498db").unwrap();
        assert_eq!(color.rgb8(), (0x34, 0x98, 0xdb));
        assert!(color.is_opaque());
    }

    #[test]
    fn parse_short_hex_equals_long_hex() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::parse("#ff0000").unwrap());
    }

    #[test]
    fn parse_hex_without_hash() {
        assert_eq!(Color::parse("3498db").unwrap(), Color::parse("#3498db").unwrap());
    }

    #[test]
    fn parse_hex_is_case_insensitive() {
        assert_eq!(Color::parse("#3498DB").unwrap(), Color::parse("#3498db").unwrap());
    }

    #[test]
    fn parse_hex4_keeps_alpha() {
        let color = Color::parse("#f00a").unwrap();
        assert_eq!(color.rgb8(), (255, 0, 0));
        assert!(!color.is_opaque());
        assert!((color.alpha() - 2.0 / 3.0 * 100.0).abs() < 0.01);
    }

    #[test]
    fn parse_hex8_round_trips_alpha_byte() {
        assert_eq!(Color::parse("#3498dbaa").unwrap().to_hex(), "#3498dbaa");
    }

    #[test]
    fn parse_rgba_string() {
        let color = Color::parse("rgba(52, 152, 219, 0.8)").unwrap();
        assert_eq!(color.rgb8(), (52, 152, 219));
        assert!((color.alpha() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn parse_hsl_string() {
        let color = Color::parse("hsl(204, 70%, 53%)").unwrap();
        assert_eq!(color.to_hex(), "#3398db");
    }

    #[test]
    fn parse_hsl_hue_360_wraps_to_zero() {
        let color = Color::parse("hsl(360, 100%, 50%)").unwrap();
        assert_eq!(color, Color::parse("#ff0000").unwrap());
        assert_eq!(color.hue(), 0.0);
    }

    #[test]
    fn parse_rejects_out_of_range_rgba() {
        assert!(matches!(
            Color::parse("rgba(300, 0, 0, 1)"),
            Err(ParseColorError::Rgba { .. })
        ));
        assert!(matches!(
            Color::parse("rgba(0, 0, 0, 1.5)"),
            Err(ParseColorError::Rgba { .. })
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_hsl() {
        assert!(matches!(
            Color::parse("hsl(400, 50%, 50%)"),
            Err(ParseColorError::Hsl { .. })
        ));
        assert!(matches!(
            Color::parse("hsl(20, 150%, 50%)"),
            Err(ParseColorError::Hsl { .. })
        ));
    }

    #[test]
    fn parse_rejects_hsl_without_percent_signs() {
        assert!(Color::parse("hsl(204, 70, 53)").is_err());
    }

    #[test]
    fn parse_rejects_bad_hex() {
        assert!(matches!(
            Color::parse("#12345"),
            Err(ParseColorError::Hex { .. })
        ));
        assert!(matches!(
            Color::parse("#ggg"),
            Err(ParseColorError::Hex { .. })
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(ParseColorError::Unrecognized { .. })
        ));
        assert!(matches!(Color::parse("   "), Err(ParseColorError::Empty)));
    }

    #[test]
    fn parse_error_messages_name_the_format() {
        let err = Color::parse("rgba(1,2)").unwrap_err();
        assert!(err.to_string().contains("rgba"));
        let err = Color::parse("hsl(bad)").unwrap_err();
        assert!(err.to_string().contains("hsl"));
    }

    // --- serialization tests ---

    #[test]
    fn hex_round_trip_is_lossless() {
        for hex in ["#3498db", "#000000", "#ffffff", "#db7734", "#010203"] {
            assert_eq!(Color::parse(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn css_uses_hex_when_opaque_and_rgba_when_not() {
        assert_eq!(Color::parse("#3498db").unwrap().css(), "#3498db");
        assert_eq!(
            Color::parse("rgba(52, 152, 219, 0.8)").unwrap().css(),
            "rgba(52, 152, 219, 0.80)"
        );
    }

    #[test]
    fn display_matches_css() {
        let color = Color::parse("#3498db").unwrap();
        assert_eq!(color.to_string(), color.css());
    }

    #[test]
    fn with_alpha_switches_serialized_form() {
        let color = Color::parse("#3498db").unwrap().with_alpha(50.0);
        assert_eq!(color.css(), "rgba(52, 152, 219, 0.50)");
        assert_eq!(color.with_alpha(100.0).css(), "#3498db");
    }

    // --- normalize_hex tests ---

    #[test]
    fn normalize_expands_three_digits() {
        assert_eq!(normalize_hex("#f0a"), "#ff00aa");
    }

    #[test]
    fn normalize_drops_alpha_from_four_digits() {
        assert_eq!(normalize_hex("#f0a8"), "#ff00aa");
    }

    #[test]
    fn normalize_keeps_six_digits() {
        assert_eq!(normalize_hex("#3498db"), "#3498db");
    }

    #[test]
    fn normalize_truncates_eight_digits() {
        assert_eq!(normalize_hex("#3498dbaa"), "#3498db");
    }

    #[test]
    fn normalize_passes_through_other_inputs() {
        assert_eq!(normalize_hex("3498db"), "3498db");
        assert_eq!(normalize_hex("#12345"), "#12345");
        assert_eq!(normalize_hex(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["#f0a", "#f0a8", "#3498db", "#3498dbaa", "nonsense"] {
            let once = normalize_hex(input);
            assert_eq!(normalize_hex(&once), once, "not idempotent for {input:?}");
        }
    }

    // --- mix tests ---

    #[test]
    fn mix_endpoints_return_inputs() {
        let a = Color::parse("#3498db").unwrap();
        let b = Color::parse("#db7734").unwrap();
        assert_eq!(mix(&a, &b, 1.0), a);
        assert_eq!(mix(&a, &b, 0.0), b);
    }

    #[test]
    fn mix_midpoint_is_symmetric() {
        let a = Color::parse("#3498db").unwrap();
        let b = Color::parse("#db7734").unwrap();
        let ab = mix(&a, &b, 0.5);
        let ba = mix(&b, &a, 0.5);
        assert_eq!(ab, ba);
        // Linear-light midpoint, noticeably brighter than the 8-bit average
        // (#87) of the raw channel values.
        assert_eq!(ab.to_hex(), "#a489a4");
    }

    #[test]
    fn mix_weight_is_clamped() {
        let a = Color::parse("#3498db").unwrap();
        let b = Color::parse("#db7734").unwrap();
        assert_eq!(mix(&a, &b, 2.0), a);
        assert_eq!(mix(&a, &b, -1.0), b);
    }

    #[test]
    fn mix_interpolates_alpha() {
        let a = Color::parse("#3498db").unwrap(); // alpha 100
        let b = a.with_alpha(0.0);
        let mid = mix(&a, &b, 0.5);
        assert!((mid.alpha() - 50.0).abs() < 1e-9);
    }

    // --- equality and hashing ---

    #[test]
    fn equivalent_representations_are_equal() {
        let from_hex = Color::parse("#3498db").unwrap();
        let from_rgba = Color::parse("rgba(52, 152, 219, 1)").unwrap();
        assert_eq!(from_hex, from_rgba);

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let hash_of = |c: &Color| {
            let mut h = DefaultHasher::new();
            c.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash_of(&from_hex), hash_of(&from_rgba));
    }

    #[test]
    fn alpha_participates_in_equality() {
        let opaque = Color::parse("#3498db").unwrap();
        assert_ne!(opaque, opaque.with_alpha(50.0));
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let color: Color = "#db7734".parse().unwrap();
        assert_eq!(color.to_hex(), "#db7734");
        assert!("nope".parse::<Color>().is_err());
    }
}
