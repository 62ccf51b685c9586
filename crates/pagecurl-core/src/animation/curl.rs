#![forbid(unsafe_code)]

//! The animation record behind a settling page curl.
//!
//! A [`CurlAnimation`] interpolates an [`Edge`] from where the gesture left
//! it to where the turn should end. Progress is the linear fraction of
//! elapsed time; the easing curve only shapes the interpolated edge.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns, so the first non-zero tick completes it.

use std::time::Duration;

use super::{Animation, EasingFn};
use crate::geometry::Edge;

/// Interpolates a fold edge between two positions over a fixed duration.
#[derive(Debug, Clone)]
pub struct CurlAnimation {
    from: Edge,
    to: Edge,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl CurlAnimation {
    /// Animate from `from` to `to` over `duration`.
    #[must_use]
    pub fn new(from: Edge, to: Edge, duration: Duration, easing: EasingFn) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Linear time progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// The edge at the current progress.
    pub fn edge(&self) -> Edge {
        if self.is_complete() {
            return self.to;
        }
        self.from.lerp(self.to, self.value())
    }

    /// Where the animation started.
    #[inline]
    pub fn start(&self) -> Edge {
        self.from
    }

    /// Where the animation ends.
    #[inline]
    pub fn target(&self) -> Edge {
        self.to
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for CurlAnimation {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
