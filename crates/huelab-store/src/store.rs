#![forbid(unsafe_code)]

//! The authoritative color state store.
//!
//! A [`ColorStore`] owns exactly one "current color" concept split into two
//! values: `committed`, the settled color every derivation layer keys off,
//! and `preview`, a low-latency shadow updated synchronously on every write
//! so swatches and sliders track the pointer without waiting for expensive
//! recomputation. A trailing-debounce policy decides when preview is
//! promoted to committed.
//!
//! # State machine
//!
//! - `write` with [`UpdatePolicy::Immediate`], or with a color equal to the
//!   committed one, commits synchronously and cancels any pending promote.
//! - `write` with [`UpdatePolicy::Delayed`] sets preview, marks the store
//!   updating, and (re)schedules the promote — only the last write inside a
//!   quiet window ever reaches `committed`.
//! - [`ColorStore::tick`] fires the promote once the window has elapsed;
//!   [`ColorStore::flush`] fires it early; [`ColorStore::cancel`] discards
//!   it and resets preview to committed.
//!
//! # Invariant
//!
//! Whenever no delayed commit is in flight, `preview == committed`.
//!
//! Invalid input strings are rejected writes, not errors: user keystrokes
//! routinely pass through invalid intermediate states, so the store logs a
//! warning and leaves every piece of state untouched.

use std::rc::Rc;
use std::time::{Duration, Instant};

use huelab_color::{Color, ParseColorError, PaletteCache, PaletteSet};
use tracing::{debug, trace, warn};

use crate::debounce::DebounceTimer;
use crate::derived::{DerivedCache, DerivedValues};

/// How a write promotes preview to committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Commit synchronously, cancelling any pending delayed commit.
    Immediate,
    /// Commit after `window` of write inactivity (trailing debounce).
    Delayed {
        /// Quiet period required before the commit fires.
        window: Duration,
    },
}

impl UpdatePolicy {
    /// Delayed policy with a window in milliseconds.
    #[must_use]
    pub const fn delayed_ms(window_ms: u64) -> Self {
        Self::Delayed {
            window: Duration::from_millis(window_ms),
        }
    }
}

/// Result of a write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The color was committed synchronously.
    Committed,
    /// The color is previewing; a delayed commit is scheduled.
    Scheduled,
    /// The input failed to parse; state is unchanged.
    Rejected(ParseColorError),
}

/// Construction parameters for a [`ColorStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Color the session starts on (supplied by the persistence
    /// collaborator, if any).
    pub initial_color: Color,

    /// Debounce window used by [`ColorStore::debounce_policy`].
    /// Default: 300ms.
    pub default_window: Duration,

    /// Maximum palette cache entries before it clears.
    /// Default: 4096.
    pub palette_cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_color: Color::from_rgb8(0x34, 0x98, 0xdb),
            default_window: Duration::from_millis(300),
            palette_cache_capacity: 4096,
        }
    }
}

/// The single owner of committed/preview color state for a session.
///
/// Create one per session and pass it by reference to every consumer; all
/// other components are read-only projections keyed off the committed
/// value. Not thread-safe by design — execution is single-threaded and
/// event-loop driven.
#[derive(Debug)]
pub struct ColorStore {
    committed: Color,
    preview: Color,
    updating: bool,
    timer: DebounceTimer<Color>,
    default_window: Duration,
    derived: DerivedCache,
    palettes: PaletteCache,
}

impl ColorStore {
    /// Create a store from configuration.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            committed: config.initial_color,
            preview: config.initial_color,
            updating: false,
            timer: DebounceTimer::new(),
            default_window: config.default_window,
            derived: DerivedCache::new(),
            palettes: PaletteCache::with_capacity(config.palette_cache_capacity),
        }
    }

    /// Parse and write a free-form color string.
    ///
    /// Invalid input is a local, non-fatal rejection: the store state is
    /// untouched and the outcome carries the diagnostic for inline
    /// validity indicators. Nothing is thrown across this boundary.
    pub fn write(&mut self, input: &str, policy: UpdatePolicy, now: Instant) -> WriteOutcome {
        match Color::parse(input) {
            Ok(color) => self.write_color(color, policy, now),
            Err(error) => {
                warn!(input, %error, "rejected color write");
                WriteOutcome::Rejected(error)
            }
        }
    }

    /// Write an already-validated color.
    ///
    /// Preview always updates synchronously, in the same call, for visual
    /// feedback. The committed value follows per policy; writing the
    /// already-committed color commits immediately regardless of policy
    /// (there is nothing to debounce).
    pub fn write_color(&mut self, color: Color, policy: UpdatePolicy, now: Instant) -> WriteOutcome {
        self.preview = color;

        let window = match policy {
            UpdatePolicy::Immediate => None,
            UpdatePolicy::Delayed { window } => Some(window),
        };

        match window {
            Some(window) if color != self.committed => {
                self.updating = true;
                // Replaces any earlier pending commit: trailing debounce,
                // last write in the quiet window wins.
                self.timer.schedule(color, now + window);
                let window_ms = window.as_millis() as u64;
                trace!(color = %color, window_ms, "scheduled delayed commit");
                WriteOutcome::Scheduled
            }
            _ => {
                self.timer.cancel();
                self.commit(color);
                WriteOutcome::Committed
            }
        }
    }

    /// Fire a pending delayed commit whose window has elapsed.
    ///
    /// The host event loop calls this from its timer callback (or once per
    /// frame). Returns whether a commit happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.fire_due(now) {
            Some(color) => {
                self.commit(color);
                true
            }
            None => false,
        }
    }

    /// Abort any pending delayed commit and discard unconfirmed visual
    /// changes: preview resets to the committed color.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.updating = false;
        self.preview = self.committed;
    }

    /// Run any pending delayed commit immediately, without waiting out its
    /// window. Returns whether a commit happened.
    pub fn flush(&mut self) -> bool {
        match self.timer.take_pending() {
            Some(color) => {
                self.commit(color);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, color: Color) {
        self.committed = color;
        self.preview = color;
        self.updating = false;
        debug!(color = %color, "committed color");
    }

    /// The settled color all derivation layers key off.
    #[must_use]
    pub fn committed(&self) -> Color {
        self.committed
    }

    /// The low-latency shadow value (equals committed when not updating).
    #[must_use]
    pub fn preview(&self) -> Color {
        self.preview
    }

    /// The value display consumers should render: preview while a delayed
    /// commit is in flight, committed otherwise.
    #[must_use]
    pub fn visual_color(&self) -> Color {
        if self.updating { self.preview } else { self.committed }
    }

    /// Whether a delayed commit is in flight.
    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Deadline of the pending delayed commit, if any, for event-loop
    /// scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The delayed policy configured for this store.
    #[must_use]
    pub fn debounce_policy(&self) -> UpdatePolicy {
        UpdatePolicy::Delayed {
            window: self.default_window,
        }
    }

    /// Memoized conversion/analysis snapshot of the committed color.
    ///
    /// Recomputes only when the committed color changed; preview churn
    /// never invalidates it.
    pub fn derived_values(&mut self) -> &DerivedValues {
        self.derived.get(&self.committed)
    }

    /// Memoized palette set of the committed color. Repeated calls for the
    /// same committed color return the identical shared instance.
    pub fn palettes(&mut self) -> Rc<PaletteSet> {
        self.palettes.get(&self.committed)
    }
}

impl Default for ColorStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
