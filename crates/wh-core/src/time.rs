//! Simulation time model.
//!
//! # Design
//!
//! The visualization layer drives the core with real frame deltas.
//! `SimClock` keeps two timelines side by side:
//!
//! ```text
//!   real_elapsed += real_dt
//!   sim_time     += real_dt * speed_factor
//! ```
//!
//! Package timestamps and dwell thresholds live on the **simulated**
//! timeline.  Waits (retry backoff, unload hold) are [`Deadline`]s on the
//! **real** timeline, scheduled as `base / speed_factor` using the factor in
//! force when they were scheduled.  A later `set_factor` therefore never
//! rescales a wait that is already pending.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Frame counter: one coordination round per visualization frame.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Seconds on the simulated timeline since the run started.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds elapsed from `earlier` to `self` (clamped at zero).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

// ── Deadline ─────────────────────────────────────────────────────────────────

/// A point on the real timeline at which a scheduled wait completes.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deadline(pub f64);

// ── SimClock ─────────────────────────────────────────────────────────────────

/// Speed-factor range used when none (or a malformed one) is given.
pub const DEFAULT_FACTOR_BOUNDS: (f64, f64) = (0.1, 10.0);

/// Converts real frame time into simulated time using a runtime-adjustable
/// speed factor.
///
/// `SimClock` is cheap to clone and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Frames processed so far.
    pub current_tick: Tick,
    real_elapsed: f64,
    sim_time:     SimTime,
    last_sim_dt:  f64,
    factor:       f64,
    min_factor:   f64,
    max_factor:   f64,
}

impl SimClock {
    /// Create a clock at time zero.  `factor` is clamped into
    /// `[min_factor, max_factor]`; bounds that do not satisfy
    /// `0 < min <= max` (NaN included) fall back to
    /// [`DEFAULT_FACTOR_BOUNDS`].
    pub fn new(factor: f64, min_factor: f64, max_factor: f64) -> Self {
        let (min_factor, max_factor) = if min_factor > 0.0 && min_factor <= max_factor {
            (min_factor, max_factor)
        } else {
            DEFAULT_FACTOR_BOUNDS
        };
        let mut clock = Self {
            current_tick: Tick::ZERO,
            real_elapsed: 0.0,
            sim_time:     SimTime::ZERO,
            last_sim_dt:  0.0,
            factor:       1.0f64.clamp(min_factor, max_factor),
            min_factor,
            max_factor,
        };
        clock.set_factor(factor);
        clock
    }

    /// Advance by `real_dt` seconds of real time and return the new
    /// simulated time.  Negative or non-finite deltas are treated as zero so
    /// the clock stays monotonic.
    pub fn advance(&mut self, real_dt: f64) -> SimTime {
        let real_dt = if real_dt.is_finite() { real_dt.max(0.0) } else { 0.0 };
        self.real_elapsed += real_dt;
        self.last_sim_dt = real_dt * self.factor;
        self.sim_time = self.sim_time + self.last_sim_dt;
        self.current_tick = self.current_tick + 1;
        self.sim_time
    }

    /// Convert a nominal duration into real seconds at the current factor:
    /// `base / factor`.  A higher factor gives a shorter perceived wait.
    #[inline]
    pub fn scaled(&self, base_secs: f64) -> f64 {
        base_secs / self.factor
    }

    /// Schedule a wait of nominal length `base_secs`, using the factor in
    /// force right now.
    #[inline]
    pub fn schedule(&self, base_secs: f64) -> Deadline {
        Deadline(self.real_elapsed + self.scaled(base_secs))
    }

    /// `true` once the real timeline has reached `deadline`.
    #[inline]
    pub fn is_due(&self, deadline: Deadline) -> bool {
        self.real_elapsed >= deadline.0
    }

    /// Change the speed factor, clamped to the configured bounds.  Non-finite
    /// values are ignored.  Safe to call between any two ticks.
    pub fn set_factor(&mut self, factor: f64) {
        if factor.is_finite() {
            self.factor = factor.clamp(self.min_factor, self.max_factor);
        }
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn sim_time(&self) -> SimTime {
        self.sim_time
    }

    #[inline]
    pub fn real_elapsed(&self) -> f64 {
        self.real_elapsed
    }

    /// Simulated seconds covered by the most recent `advance`.
    #[inline]
    pub fn last_sim_dt(&self) -> f64 {
        self.last_sim_dt
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_FACTOR_BOUNDS.0, DEFAULT_FACTOR_BOUNDS.1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sim={} x{:.1}", self.current_tick, self.sim_time, self.factor)
    }
}
