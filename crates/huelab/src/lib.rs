#![forbid(unsafe_code)]

//! huelab: a color-state propagation and derivation core.
//!
//! One authoritative committed color fans out to many consumers with
//! different latency needs: display consumers read the low-latency visual
//! value, numeric consumers read a memoized derivation snapshot, and the
//! palette layer derives color sets from the committed value only. Input
//! surfaces write back through a single store with immediate or debounced
//! policies.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use huelab::prelude::*;
//!
//! let mut store = ColorStore::default();
//! let start = Instant::now();
//!
//! // A slider drag previews instantly but defers the expensive recompute.
//! store.write("#db7734", UpdatePolicy::delayed_ms(300), start);
//! assert_eq!(store.visual_color().to_hex(), "#db7734");
//! assert_eq!(store.derived_values().hex, "#3498db");
//!
//! // After a quiet window the preview is promoted.
//! store.tick(start + Duration::from_millis(300));
//! assert_eq!(store.derived_values().hex, "#db7734");
//! ```

pub use huelab_color::{
    CacheStats, Color, Lab, PaletteCache, PaletteSet, ParseColorError, mix, normalize_hex,
};
pub use huelab_store::{
    ColorStore, DebounceTimer, DerivedCache, DerivedValues, StoreConfig, UpdatePolicy, WriteOutcome,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    //! Everything a typical consumer needs in one import.
    pub use crate::{
        Color, ColorStore, DerivedValues, PaletteSet, ParseColorError, StoreConfig, UpdatePolicy,
        WriteOutcome,
    };

    pub use crate::{color, store};
}

pub use huelab_color as color;
pub use huelab_store as store;
