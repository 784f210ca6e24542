#![forbid(unsafe_code)]

//! Colorspace math and fixed-format string conversions.
//!
//! The internal pipeline is sRGB-centric: HSL components convert to sRGB
//! channels, sRGB linearizes through the standard transfer function, and
//! CIELAB goes through XYZ with the D65 illuminant. All string formatters
//! apply the fixed rounding contracts documented on each method; the
//! unrounded values never leave this module.

use crate::color::Color;

/// A color's CIELAB coordinates (D65 illuminant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (white).
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

// D65 reference white.
const D65_XN: f64 = 0.95047;
const D65_YN: f64 = 1.00000;
const D65_ZN: f64 = 1.08883;

/// sRGB gamma expansion: display value in [0, 1] to linear light.
pub(crate) fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma compression: linear light to display value in [0, 1].
pub(crate) fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// RGB channels in [0, 255] to HSL (hue degrees, saturation/lightness
/// percentages).
pub(crate) fn rgb_to_hsl((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        // Achromatic: hue is defined as 0 rather than left indeterminate.
        return (0.0, 0.0, lightness * 100.0);
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (hue * 60.0 % 360.0, saturation * 100.0, lightness * 100.0)
}

/// HSL (hue degrees, saturation/lightness percentages) to RGB channels in
/// [0, 255].
pub(crate) fn hsl_to_rgb((h, s, l): (f64, f64, f64)) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        v * 255.0
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Lab transfer function.
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Inverse Lab transfer function.
fn lab_f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// RGB channels in [0, 255] to CIELAB via XYZ (sRGB D65 matrix).
pub(crate) fn rgb_to_lab((r, g, b): (f64, f64, f64)) -> Lab {
    let r = srgb_to_linear(r / 255.0);
    let g = srgb_to_linear(g / 255.0);
    let b = srgb_to_linear(b / 255.0);

    let x = r * 0.412_456_4 + g * 0.357_576_1 + b * 0.180_437_5;
    let y = r * 0.212_672_9 + g * 0.715_152_2 + b * 0.072_175_0;
    let z = r * 0.019_333_9 + g * 0.119_192_0 + b * 0.950_304_1;

    let fx = lab_f(x / D65_XN);
    let fy = lab_f(y / D65_YN);
    let fz = lab_f(z / D65_ZN);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// CIELAB back to RGB channels, clamped to [0, 255].
///
/// Out-of-gamut Lab coordinates (possible after lightness edits) clip to
/// the sRGB cube rather than wrapping.
pub(crate) fn lab_to_rgb(lab: Lab) -> (f64, f64, f64) {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = D65_XN * lab_f_inv(fx);
    let y = D65_YN * lab_f_inv(fy);
    let z = D65_ZN * lab_f_inv(fz);

    let r = x * 3.240_454_2 + y * -1.537_138_5 + z * -0.498_531_4;
    let g = x * -0.969_266_0 + y * 1.876_010_8 + z * 0.041_556_0;
    let b = x * 0.055_643_4 + y * -0.204_025_9 + z * 1.057_225_2;

    let clamp = |c: f64| (linear_to_srgb(c) * 255.0).clamp(0.0, 255.0);
    (clamp(r), clamp(g), clamp(b))
}

/// RGB channels in [0, 255] to CMYK fractions in [0, 1].
pub(crate) fn rgb_to_cmyk((r, g, b): (f64, f64, f64)) -> (f64, f64, f64, f64) {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return (0.0, 0.0, 0.0, 1.0);
    }
    (
        (1.0 - r - k) / (1.0 - k),
        (1.0 - g - k) / (1.0 - k),
        (1.0 - b - k) / (1.0 - k),
        k,
    )
}

impl Color {
    /// Unrounded RGB channels in [0, 255].
    pub(crate) fn rgb(&self) -> (f64, f64, f64) {
        hsl_to_rgb((self.hue, self.saturation, self.lightness))
    }

    /// CIELAB coordinates of this color.
    #[must_use]
    pub fn to_lab(&self) -> Lab {
        rgb_to_lab(self.rgb())
    }

    /// `rgba(r, g, b, a)` with channels rounded to integers and alpha to
    /// two decimals.
    #[must_use]
    pub fn to_rgba_string(&self) -> String {
        let (r, g, b) = self.rgb8();
        format!("rgba({r}, {g}, {b}, {:.2})", self.alpha / 100.0)
    }

    /// `hsl(h, s%, l%)` with all three components rounded to integers.
    ///
    /// Alpha is not part of this form; use [`Color::css`] for an
    /// alpha-bearing serialization.
    #[must_use]
    pub fn to_hsl_string(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round() as u16,
            self.saturation.round() as u16,
            self.lightness.round() as u16
        )
    }

    /// `cmyk(c%, m%, y%, k%)` with integer percentages.
    #[must_use]
    pub fn to_cmyk_string(&self) -> String {
        let (c, m, y, k) = rgb_to_cmyk(self.rgb());
        format!(
            "cmyk({}%, {}%, {}%, {}%)",
            (c * 100.0).round() as u16,
            (m * 100.0).round() as u16,
            (y * 100.0).round() as u16,
            (k * 100.0).round() as u16
        )
    }

    /// `lab(L, a, b)` with integer components.
    #[must_use]
    pub fn to_cielab_string(&self) -> String {
        let lab = self.to_lab();
        format!(
            "lab({}, {}, {})",
            lab.l.round() as i32,
            lab.a.round() as i32,
            lab.b.round() as i32
        )
    }
}
