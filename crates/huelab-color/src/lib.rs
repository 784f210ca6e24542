#![forbid(unsafe_code)]

//! Color model, conversions, analysis metrics, and palette generation.
//!
//! Everything in this crate is a pure function of its inputs: a [`Color`] is
//! a canonical HSL+alpha value, the conversion and analysis layers derive
//! strings and metrics from it, and the palette layer derives color sets.
//! Session state (the committed/preview store, derived-value memoization)
//! lives in `huelab-store`.
//!
//! ```
//! use huelab_color::Color;
//!
//! let color = Color::parse("#3498db").unwrap();
//! assert_eq!(color.to_hex(), "#3498db");
//! assert_eq!(color.to_hsl_string(), "hsl(204, 70%, 53%)");
//! ```

pub mod analysis;
pub mod color;
pub mod convert;
pub mod palette;

pub use color::{Color, ParseColorError, mix, normalize_hex};
pub use convert::Lab;
pub use palette::{CacheStats, PaletteCache, PaletteSet};
