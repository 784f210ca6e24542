#![forbid(unsafe_code)]

//! Session state for the color pipeline: the committed/preview store,
//! its debounce scheduler, and the derived-value memoization layer.
//!
//! One [`ColorStore`] exists per session. Input surfaces write into it
//! (immediately or debounced), display consumers read the low-latency
//! visual value, and numeric consumers read the memoized
//! [`DerivedValues`] snapshot that recomputes only when the committed
//! color actually changes.
//!
//! Execution is single-threaded and cooperative: nothing here spawns
//! threads or timers. Time enters exclusively through `Instant` arguments,
//! and the host event loop drives pending commits via
//! [`ColorStore::tick`].
//!
//! [`DerivedValues`]: crate::derived::DerivedValues

pub mod debounce;
pub mod derived;
pub mod store;

pub use debounce::DebounceTimer;
pub use derived::{DerivedCache, DerivedValues};
pub use store::{ColorStore, StoreConfig, UpdatePolicy, WriteOutcome};
