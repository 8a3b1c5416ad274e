//! Time-based numeric animation for count-up displays.
//!
//! [`ValueAnimator`] interpolates from the value currently on screen towards a
//! target. Progress is always recomputed from absolute elapsed time, so ticks
//! may arrive at any cadence without accumulating drift.

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};

/// Default duration of a single animation run.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

// =============================================================================
// Easing Functions
// =============================================================================

/// Easing curves available to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Quadratic ease out
    QuadOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out, `1 - (1 - t)^3`
    #[default]
    CubicOut,
    /// Cubic ease in and out
    CubicInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t).powi(2),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// =============================================================================
// ValueAnimator
// =============================================================================

/// A count-up animator for a single numeric value.
///
/// The animator never reads a clock itself; callers pass `now_ms` from
/// whatever monotonic source drives their frames.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    current: f64,
    start_value: f64,
    start_ms: f64,
    target: f64,
    duration_ms: f64,
    easing: Easing,
    running: bool,
}

impl Default for ValueAnimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ValueAnimator {
    /// Create an idle animator resting at `initial`.
    #[must_use]
    pub const fn new(initial: f64) -> Self {
        Self {
            current: initial,
            start_value: initial,
            start_ms: 0.0,
            target: initial,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::CubicOut,
            running: false,
        }
    }

    /// Set the duration used by subsequent runs.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Result<Self, AnimationError> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(AnimationError::InvalidDuration(duration_ms));
        }
        self.duration_ms = duration_ms;
        Ok(self)
    }

    /// Set the easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Value last produced by [`tick`](Self::tick).
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Value the animator is converging to.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Value the current run started from.
    #[must_use]
    pub const fn start_value(&self) -> f64 {
        self.start_value
    }

    /// Duration of a run in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Whether a run is in flight.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Retarget the animation.
    ///
    /// Returns `Ok(true)` when a new run starts from the value currently on
    /// screen, `Ok(false)` when `target` equals the converging target.
    pub fn set_target(&mut self, target: f64, now_ms: f64) -> Result<bool, AnimationError> {
        if !target.is_finite() {
            return Err(AnimationError::NonFinite(target));
        }
        if target == self.target {
            return Ok(false);
        }

        log::trace!(
            "animator retarget {} -> {} from {} at {now_ms}ms",
            self.target,
            target,
            self.current
        );
        self.start_value = self.current;
        self.start_ms = now_ms;
        self.target = target;
        self.running = true;
        Ok(true)
    }

    /// Place the animator at `value` immediately, without a run.
    pub fn jump_to(&mut self, value: f64) -> Result<(), AnimationError> {
        if !value.is_finite() {
            return Err(AnimationError::NonFinite(value));
        }
        self.current = value;
        self.start_value = value;
        self.target = value;
        self.running = false;
        Ok(())
    }

    /// Progress of the current run at `now_ms`, from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance to `now_ms` and return the value to display.
    ///
    /// Calling twice with the same `now_ms` yields the same value. Once the
    /// run completes, the exact target is returned until the next retarget.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !self.running {
            return self.current;
        }

        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            self.current = self.target;
            self.running = false;
            log::trace!("animator settled at {}", self.target);
            return self.current;
        }

        let eased = self.easing.apply(progress);
        let raw = (self.target - self.start_value).mul_add(eased, self.start_value);
        let (lo, hi) = if self.start_value <= self.target {
            (self.start_value, self.target)
        } else {
            (self.target, self.start_value)
        };
        self.current = raw.clamp(lo, hi);
        self.current
    }

    /// Stop the current run, freezing the displayed value.
    ///
    /// Safe to call repeatedly; returns whether a run was stopped.
    pub fn cancel(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        log::trace!("animator cancelled at {}", self.current);
        true
    }
}
