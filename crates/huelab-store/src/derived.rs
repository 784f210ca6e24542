#![forbid(unsafe_code)]

//! The memoized derived-value snapshot read by every numeric consumer.
//!
//! Computing all conversions and analysis metrics for a color is cheap
//! individually but is requested by many consumers per frame; this layer
//! computes the full set once per committed color and hands out the shared
//! snapshot. Invalidation keys off equality of the committed color only —
//! preview churn during a drag must never trigger recomputation.

use huelab_color::{Color, analysis};

/// Every conversion and analysis value derived from one committed color.
///
/// String fields follow the fixed formatting contracts of the conversion
/// layer; numeric fields carry the two-decimal display contract of the
/// analysis layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedValues {
    /// Hex serialization (`#rrggbb`, or `#rrggbbaa` when transparent).
    pub hex: String,
    /// `rgba(r, g, b, a)` form.
    pub rgba: String,
    /// `hsl(h, s%, l%)` form.
    pub hsl: String,
    /// `cmyk(c%, m%, y%, k%)` form.
    pub cmyk: String,
    /// `lab(L, a, b)` form.
    pub cielab: String,
    /// WCAG relative luminance in [0, 1].
    pub luminance: f64,
    /// HSL saturation on the 0-100 scale.
    pub saturation: f64,
    /// Contrast ratio against white, in [1, 21].
    pub contrast_vs_white: f64,
    /// Contrast ratio against black, in [1, 21].
    pub contrast_vs_black: f64,
}

impl DerivedValues {
    /// Compute the full snapshot for `color`.
    #[must_use]
    pub fn compute(color: &Color) -> Self {
        let white = Color::from_rgb8(255, 255, 255);
        let black = Color::from_rgb8(0, 0, 0);
        Self {
            hex: color.to_hex(),
            rgba: color.to_rgba_string(),
            hsl: color.to_hsl_string(),
            cmyk: color.to_cmyk_string(),
            cielab: color.to_cielab_string(),
            luminance: analysis::luminance(color),
            saturation: analysis::saturation(color),
            contrast_vs_white: analysis::contrast_ratio(color, &white),
            contrast_vs_black: analysis::contrast_ratio(color, &black),
        }
    }
}

/// Single-slot memoization of [`DerivedValues`] keyed by the committed
/// color.
#[derive(Debug, Default)]
pub struct DerivedCache {
    entry: Option<(Color, DerivedValues)>,
    recomputes: u64,
}

impl DerivedCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the snapshot for `committed`, recomputing only when it differs
    /// from the cached color.
    pub fn get(&mut self, committed: &Color) -> &DerivedValues {
        let stale = match &self.entry {
            Some((cached, _)) => cached != committed,
            None => true,
        };
        if stale {
            self.recomputes += 1;
            self.entry = Some((*committed, DerivedValues::compute(committed)));
        }
        let (_, values) = self
            .entry
            .as_ref()
            .expect("entry populated by the stale branch above");
        values
    }

    /// Number of recomputations performed; a consumer reading a stable
    /// committed color any number of times costs exactly one.
    #[must_use]
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}
