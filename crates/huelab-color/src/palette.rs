#![forbid(unsafe_code)]

//! Palette generation and its memoization cache.
//!
//! All generators are pure, deterministic functions of one base color: hue
//! rotations wrap on the color wheel and preserve saturation, lightness,
//! and alpha; scales interpolate in the same linear-light space as
//! [`mix`]. [`PaletteCache`] memoizes full [`PaletteSet`]s keyed by the
//! base color's canonical string so equivalent representations share one
//! entry, and repeated requests return the identical shared instance.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::color::{Color, mix};
use crate::convert;

/// Rotate a color's hue by `degrees` (wrapping modulo 360), preserving
/// saturation, lightness, and alpha.
#[must_use]
pub fn hue_rotate(base: &Color, degrees: f64) -> Color {
    Color::from_hsla(
        base.hue() + degrees,
        base.saturation(),
        base.lightness(),
        base.alpha(),
    )
}

/// Darken a color by reducing CIELAB lightness 18 units per `amount`,
/// keeping alpha. Out-of-gamut results clip to sRGB.
#[must_use]
pub fn darken(base: &Color, amount: f64) -> Color {
    let mut lab = base.to_lab();
    lab.l = (lab.l - 18.0 * amount).max(0.0);
    Color::from_rgb_f64(convert::lab_to_rgb(lab), base.alpha())
}

/// A gradient of `n` colors from `base` to `end` inclusive.
///
/// When `end` is omitted it is derived by darkening `base` two steps, which
/// produces a usable monochrome ramp for any base. `n = 0` yields an empty
/// vector and `n = 1` just the base.
#[must_use]
pub fn scale(base: &Color, end: Option<&Color>, n: usize) -> Vec<Color> {
    let derived_end;
    let end = match end {
        Some(end) => end,
        None => {
            derived_end = darken(base, 2.0);
            &derived_end
        }
    };

    match n {
        0 => Vec::new(),
        1 => vec![*base],
        _ => (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                mix(base, end, 1.0 - t)
            })
            .collect(),
    }
}

/// The base color and its opposite on the color wheel.
#[must_use]
pub fn complementary(base: &Color) -> [Color; 2] {
    [*base, hue_rotate(base, 180.0)]
}

/// The base color and its two 30-degree neighbors.
#[must_use]
pub fn analogous(base: &Color) -> [Color; 3] {
    [*base, hue_rotate(base, 30.0), hue_rotate(base, -30.0)]
}

/// The base color and the two colors 120 degrees apart from it.
#[must_use]
pub fn triadic(base: &Color) -> [Color; 3] {
    [*base, hue_rotate(base, 120.0), hue_rotate(base, 240.0)]
}

/// The full set of palettes derived from one base color.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSet {
    /// Five-color gradient from the base toward its darkened form.
    pub scale: Vec<Color>,
    /// Base plus its complement.
    pub complementary: [Color; 2],
    /// Base plus its 30-degree neighbors.
    pub analogous: [Color; 3],
    /// Base plus the two 120-degree rotations.
    pub triadic: [Color; 3],
}

impl PaletteSet {
    /// Generate every palette for `base`.
    #[must_use]
    pub fn generate(base: &Color) -> Self {
        Self {
            scale: scale(base, None, 5),
            complementary: complementary(base),
            analogous: analogous(base),
            triadic: triadic(base),
        }
    }
}

/// Statistics for a [`PaletteCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum number of entries before the cache clears.
    pub capacity: usize,
}

/// Memoization cache for palette sets (bounded; clears on overflow).
///
/// Keys are canonical color strings, so `#f00` and `rgba(255, 0, 0, 1)`
/// share an entry. Values are `Rc`-shared: a second request for the same
/// base returns the identical instance, not a recomputed copy.
#[derive(Debug)]
pub struct PaletteCache {
    map: FxHashMap<String, Rc<PaletteSet>>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteCache {
    /// Create a cache with the default capacity (4096 entries).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create a cache with the given maximum entry count (minimum 1).
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Fetch or compute the palette set for `base`.
    pub fn get(&mut self, base: &Color) -> Rc<PaletteSet> {
        let key = base.css();
        if let Some(cached) = self.map.get(&key) {
            self.hits += 1;
            return Rc::clone(cached);
        }
        self.misses += 1;
        let set = Rc::new(PaletteSet::generate(base));
        if self.map.len() >= self.max_entries {
            self.map.clear();
        }
        self.map.insert(key, Rc::clone(&set));
        set
    }

    /// Return current cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.map.len(),
            capacity: self.max_entries,
        }
    }
}
