#![forbid(unsafe_code)]

//! Derived color metrics: luminance, contrast, saturation, Delta E.
//!
//! All public functions apply a two-decimal rounding contract so that every
//! consumer displays identical numbers; classification ([`is_light`])
//! happens on the unrounded value.
//!
//! Delta E is CIEDE2000 (CIE 142-2001), computed on the colors' CIELAB
//! coordinates. As a rule of thumb a difference below 1 is imperceptible
//! and above 5 clearly distinguishable; the function reports the metric and
//! leaves thresholding to callers.

use std::f64::consts::PI;

use crate::color::Color;
use crate::convert::Lab;

/// Round to the two-decimal display contract.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// WCAG relative luminance, unrounded, in [0, 1].
fn relative_luminance(color: &Color) -> f64 {
    let (r, g, b) = color.rgb();
    let lin = |c: f64| crate::convert::srgb_to_linear(c / 255.0);
    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// Relative luminance in [0, 1], fixed to two decimals.
#[must_use]
pub fn luminance(color: &Color) -> f64 {
    round2(relative_luminance(color))
}

/// Whether a color reads as "light" (relative luminance above 0.5).
///
/// Useful for choosing overlay text or icon colors.
#[must_use]
pub fn is_light(color: &Color) -> bool {
    relative_luminance(color) > 0.5
}

/// WCAG contrast ratio between two colors, in [1, 21], two decimals.
///
/// Symmetric in its arguments; 4.5 is the WCAG minimum for body text.
#[must_use]
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    round2((hi + 0.05) / (lo + 0.05))
}

/// HSL saturation on the 0-100 percentage scale, two decimals.
///
/// The percentage scale (not a 0-1 fraction) is a compatibility contract
/// with existing consumers; do not rescale.
#[must_use]
pub fn saturation(color: &Color) -> f64 {
    round2(color.saturation())
}

/// Perceptual difference between two colors (CIEDE2000), two decimals.
///
/// Always non-negative and symmetric; zero for identical colors.
#[must_use]
pub fn delta_e(a: &Color, b: &Color) -> f64 {
    round2(ciede2000(a.to_lab(), b.to_lab()))
}

// 25^7, shared by the G factor and the rotation term.
const POW7_25: f64 = 6_103_515_625.0;

/// Hue angle of a Lab chroma pair, degrees in [0, 360).
fn lab_hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

/// CIEDE2000 color difference on raw Lab coordinates.
///
/// Full formula per CIE Technical Report 142-2001, including the lightness,
/// chroma, hue, and blue-region rotation corrections, with the parametric
/// factors kL = kC = kH = 1.
fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let chroma1 = lab1.a.hypot(lab1.b);
    let chroma2 = lab2.a.hypot(lab2.b);
    let chroma_mean = (chroma1 + chroma2) / 2.0;

    let chroma_mean7 = chroma_mean.powi(7);
    let g = 0.5 * (1.0 - (chroma_mean7 / (chroma_mean7 + POW7_25)).sqrt());

    let a1 = lab1.a * (1.0 + g);
    let a2 = lab2.a * (1.0 + g);

    let c1 = a1.hypot(lab1.b);
    let c2 = a2.hypot(lab2.b);

    let h1 = lab_hue_degrees(a1, lab1.b);
    let h2 = lab_hue_degrees(a2, lab2.b);

    let delta_l = lab2.l - lab1.l;
    let delta_c = c2 - c1;

    let delta_h_angle = if c1 * c2 == 0.0 {
        0.0
    } else {
        let dh = h2 - h1;
        if dh.abs() <= 180.0 {
            dh
        } else if dh > 180.0 {
            dh - 360.0
        } else {
            dh + 360.0
        }
    };
    let delta_h = 2.0 * (c1 * c2).sqrt() * (delta_h_angle.to_radians() / 2.0).sin();

    let l_mean = (lab1.l + lab2.l) / 2.0;
    let c_mean = (c1 + c2) / 2.0;

    let h_mean = if c1 * c2 == 0.0 {
        h1 + h2
    } else {
        let gap = (h1 - h2).abs();
        if gap <= 180.0 {
            (h1 + h2) / 2.0
        } else if h1 + h2 < 360.0 {
            (h1 + h2 + 360.0) / 2.0
        } else {
            (h1 + h2 - 360.0) / 2.0
        }
    };

    let h_mean_rad = h_mean.to_radians();
    let t = 1.0 - 0.17 * (h_mean_rad - PI / 6.0).cos()
        + 0.24 * (2.0 * h_mean_rad).cos()
        + 0.32 * (3.0 * h_mean_rad + PI / 30.0).cos()
        - 0.20 * (4.0 * h_mean_rad - 63.0 * PI / 180.0).cos();

    let l_term = (l_mean - 50.0) * (l_mean - 50.0);
    let sl = 1.0 + (0.015 * l_term) / (20.0 + l_term).sqrt();
    let sc = 1.0 + 0.045 * c_mean;
    let sh = 1.0 + 0.015 * c_mean * t;

    let delta_theta = 30.0 * (-((h_mean - 275.0) / 25.0) * ((h_mean - 275.0) / 25.0)).exp();
    let c_mean7 = c_mean.powi(7);
    let rc = 2.0 * (c_mean7 / (c_mean7 + POW7_25)).sqrt();
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let term_l = delta_l / sl;
    let term_c = delta_c / sc;
    let term_h = delta_h / sh;

    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h).sqrt()
}
