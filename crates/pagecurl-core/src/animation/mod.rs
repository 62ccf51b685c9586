#![forbid(unsafe_code)]

//! Animation primitives: the [`Animation`] trait, easing curves, and a frame
//! clock for hosts that only have timestamps.
//!
//! Animations here are explicit records advanced by the host's frame loop via
//! [`Animation::tick`]. Nothing runs in the background; cancelling an
//! animation means dropping its record.
//!
//! # Invariants
//!
//! 1. `value()` is always in `[0.0, 1.0]`.
//! 2. Every easing curve maps `0 → 0` and `1 → 1` and is monotonic on `[0, 1]`.
//! 3. Once `is_complete()` returns true it stays true until `reset()`.

mod curl;

pub use curl::CurlAnimation;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

/// A time-driven animation producing a normalized value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased value in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Rewind to the start.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// An easing curve over `[0, 1]`.
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out: `1 - (1 - t)³`. The default page-turn curve.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Serializable choice of easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// The curve as a plain function.
    pub const fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }

    /// Apply the curve to `t`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

// ---------------------------------------------------------------------------
// Frame clock
// ---------------------------------------------------------------------------

/// Turns frame timestamps into the `dt` values [`Animation::tick`] expects.
///
/// The first frame yields [`Duration::ZERO`]. Deltas are capped at
/// `max_step` so a stalled host does not jump an animation to its end.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl FrameClock {
    /// Create a clock with the given per-frame cap.
    #[must_use]
    pub fn new(max_step: Duration) -> Self {
        Self {
            last: None,
            max_step,
        }
    }

    /// Record a frame at `now`, returning the time since the previous frame.
    pub fn frame(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt.min(self.max_step)
    }

    /// Forget the previous frame (e.g. after the host was suspended).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutCubic,
    ];

    #[test]
    fn easing_endpoints() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at t=0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at t=1");
        }
    }

    #[test]
    fn easing_out_of_range_is_clamped() {
        for easing in CURVES {
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn ease_out_cubic_front_loads_motion() {
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn easing_serde_names() {
        let json = serde_json::to_string(&Easing::EaseOutCubic).unwrap();
        assert_eq!(json, "\"ease_out_cubic\"");
        let parsed: Easing = serde_json::from_str("\"ease_in_out\"").unwrap();
        assert_eq!(parsed, Easing::EaseInOut);
    }

    #[test]
    fn frame_clock_first_frame_is_zero() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        assert_eq!(clock.frame(t0), Duration::ZERO);
        assert_eq!(
            clock.frame(t0 + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn frame_clock_caps_long_stalls() {
        let mut clock = FrameClock::new(Duration::from_millis(50));
        let t0 = Instant::now();
        clock.frame(t0);
        assert_eq!(clock.frame(t0 + Duration::from_secs(3)), Duration::from_millis(50));
        clock.reset();
        assert_eq!(clock.frame(t0 + Duration::from_secs(4)), Duration::ZERO);
    }
}
