#![forbid(unsafe_code)]

//! Edge and animation state: the single source of truth for both fold edges.
//!
//! [`EdgeState`] keeps one slot per [`Direction`]. A slot holds the current
//! [`Edge`], the origin of a live drag (if any), and the in-flight
//! [`CurlAnimation`] (if any).
//!
//! # Invariants
//!
//! 1. At most one direction is live (being dragged) at a time.
//! 2. A slot is never live and animating at once.
//! 3. Every stored edge lies inside the surface bounds.
//! 4. A finished animation leaves its edge at the idle position for its
//!    direction and reports the exact target it reached.
//!
//! # Cancellation
//!
//! Animations are records, not tasks. Beginning a drag drops the *other*
//! direction's animation without running its remaining steps; starting a
//! full turn replaces the same direction's animation.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{Animation, CurlAnimation, EasingFn, ease_out_cubic};
use crate::error::{ConflictCause, CurlError};
use crate::geometry::{
    Edge, InteractionZone, Point, Size, Vector, edge_from_drag, progress_to_commit,
};

/// Which way a page turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the next page.
    Forward,
    /// Toward the previous page.
    Backward,
}

impl Direction {
    /// Both directions, forward first.
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Backward];

    /// The other direction.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Where this direction's edge rests when nothing is happening.
    #[must_use]
    pub fn idle_edge(self, size: Size) -> Edge {
        match self {
            Self::Forward => Edge::right_side(size),
            Self::Backward => Edge::left_side(size),
        }
    }

    /// Where this direction's edge lands when a turn commits: the opposite
    /// side of the surface.
    #[must_use]
    pub fn turned_edge(self, size: Size) -> Edge {
        self.opposite().idle_edge(size)
    }

    const fn index(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Backward => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

/// Where a settling edge is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationTarget {
    /// Nothing in flight.
    #[default]
    None,
    /// Finish turning to the next page.
    CommitForward,
    /// Finish turning to the previous page.
    CommitBackward,
    /// Snap back to the un-turned state.
    Revert,
}

impl AnimationTarget {
    /// The commit target for `direction`.
    pub const fn commit(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::CommitForward,
            Direction::Backward => Self::CommitBackward,
        }
    }

    /// Whether reaching this target changes the current page.
    #[inline]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::CommitForward | Self::CommitBackward)
    }
}

/// Timing and decision parameters for settling animations.
#[derive(Debug, Clone, Copy)]
pub struct CurlMotion {
    /// Fraction of the zone span a drag must cover to commit.
    pub commit_threshold: f32,
    pub duration: Duration,
    pub easing: EasingFn,
}

impl Default for CurlMotion {
    fn default() -> Self {
        Self {
            commit_threshold: 0.5,
            duration: Duration::from_millis(250),
            easing: ease_out_cubic,
        }
    }
}

/// A settling animation that reached its end during a [`EdgeState::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub direction: Direction,
    pub target: AnimationTarget,
    /// The edge the animation landed on, before the reset to idle.
    pub final_edge: Edge,
}

/// Read-only view of an in-flight animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InFlight {
    pub target: AnimationTarget,
    /// Linear progress in `[0.0, 1.0]`.
    pub progress: f32,
}

#[derive(Debug, Clone)]
struct Settling {
    target: AnimationTarget,
    animation: CurlAnimation,
}

#[derive(Debug, Clone)]
struct Slot {
    edge: Edge,
    drag_origin: Option<Point>,
    settling: Option<Settling>,
}

impl Slot {
    fn idle(direction: Direction, size: Size) -> Self {
        Self {
            edge: direction.idle_edge(size),
            drag_origin: None,
            settling: None,
        }
    }
}

/// Forward and backward edges plus their drags and animations.
#[derive(Debug, Clone)]
pub struct EdgeState {
    size: Size,
    motion: CurlMotion,
    slots: [Slot; 2],
}

impl EdgeState {
    /// Idle state for a surface of `size` (sanitized to at least 1×1).
    #[must_use]
    pub fn new(size: Size) -> Self {
        let size = size.sanitized();
        Self {
            size,
            motion: CurlMotion::default(),
            slots: [
                Slot::idle(Direction::Forward, size),
                Slot::idle(Direction::Backward, size),
            ],
        }
    }

    /// The bounds edges are clamped to.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Motion used when a drag is superseded by the other direction.
    pub fn set_motion(&mut self, motion: CurlMotion) {
        self.motion = motion;
    }

    /// Current edge for `direction`.
    #[inline]
    pub fn edge(&self, direction: Direction) -> Edge {
        self.slot(direction).edge
    }

    #[inline]
    pub fn forward(&self) -> Edge {
        self.edge(Direction::Forward)
    }

    #[inline]
    pub fn backward(&self) -> Edge {
        self.edge(Direction::Backward)
    }

    /// The direction currently being dragged.
    pub fn live(&self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.slot(*d).drag_origin.is_some())
    }

    /// The in-flight animation for `direction`.
    pub fn animation(&self, direction: Direction) -> Option<InFlight> {
        self.slot(direction).settling.as_ref().map(|s| InFlight {
            target: s.target,
            progress: s.animation.progress(),
        })
    }

    /// Whether `direction` has an animation in flight.
    #[inline]
    pub fn is_animating(&self, direction: Direction) -> bool {
        self.slot(direction).settling.is_some()
    }

    /// Whether nothing is being dragged or animated.
    pub fn is_idle(&self) -> bool {
        self.slots
            .iter()
            .all(|s| s.drag_origin.is_none() && s.settling.is_none())
    }

    /// Start dragging `direction` from `origin`.
    ///
    /// # Errors
    ///
    /// [`CurlError::ConflictingGesture`] if `direction` is already live or
    /// still animating.
    pub fn begin_drag(&mut self, direction: Direction, origin: Point) -> Result<(), CurlError> {
        let slot = self.slot(direction);
        if slot.drag_origin.is_some() {
            return Err(CurlError::ConflictingGesture {
                direction,
                cause: ConflictCause::AlreadyDragging,
            });
        }
        if slot.settling.is_some() {
            return Err(CurlError::ConflictingGesture {
                direction,
                cause: ConflictCause::StillAnimating,
            });
        }

        let other = direction.opposite();
        let size = self.size;
        let motion = self.motion;
        let other_slot = self.slot_mut(other);
        if other_slot.drag_origin.take().is_some() {
            // Superseded drag settles back from where it was.
            other_slot.settling = Some(Settling {
                target: AnimationTarget::Revert,
                animation: CurlAnimation::new(
                    other_slot.edge,
                    other.idle_edge(size),
                    motion.duration,
                    motion.easing,
                ),
            });
            debug!(superseded = %other, by = %direction, "live drag superseded");
        } else if other_slot.settling.take().is_some() {
            other_slot.edge = other.idle_edge(size);
            debug!(dropped = %other, by = %direction, "stale animation dropped");
        }

        let origin = origin.clamped(size);
        let slot = self.slot_mut(direction);
        slot.drag_origin = Some(origin);
        slot.edge = edge_from_drag(origin, Vector::ZERO, size);
        debug!(%direction, x = origin.x, y = origin.y, "drag begin");
        Ok(())
    }

    /// Move the live edge for a drag that has travelled `drag` from its
    /// origin. No-op unless `direction` is live.
    pub fn update_drag(&mut self, direction: Direction, drag: Vector) {
        let size = self.size;
        let slot = self.slot_mut(direction);
        let Some(origin) = slot.drag_origin else {
            return;
        };
        slot.edge = edge_from_drag(origin, drag, size);
        trace!(
            %direction,
            top_x = slot.edge.top.x,
            bottom_x = slot.edge.bottom.x,
            "drag update"
        );
    }

    /// Release the live drag and start settling toward the far side of the
    /// surface (commit) or back to the idle side (revert). The zone only
    /// decides which of the two.
    ///
    /// Returns `None` if `direction` was not live.
    pub fn end_drag(
        &mut self,
        direction: Direction,
        zone: &InteractionZone,
        motion: &CurlMotion,
    ) -> Option<AnimationTarget> {
        let size = self.size;
        let slot = self.slot_mut(direction);
        slot.drag_origin.take()?;

        let (target, to) = if progress_to_commit(&slot.edge, zone, motion.commit_threshold) {
            (AnimationTarget::commit(direction), direction.turned_edge(size))
        } else {
            (AnimationTarget::Revert, direction.idle_edge(size))
        };
        slot.settling = Some(Settling {
            target,
            animation: CurlAnimation::new(slot.edge, to, motion.duration, motion.easing),
        });
        debug!(%direction, ?target, "drag end");
        Some(target)
    }

    /// Abandon the live drag and settle back to idle.
    ///
    /// Returns false if `direction` was not live.
    pub fn cancel_drag(&mut self, direction: Direction, motion: &CurlMotion) -> bool {
        let size = self.size;
        let slot = self.slot_mut(direction);
        if slot.drag_origin.take().is_none() {
            return false;
        }
        slot.settling = Some(Settling {
            target: AnimationTarget::Revert,
            animation: CurlAnimation::new(
                slot.edge,
                direction.idle_edge(size),
                motion.duration,
                motion.easing,
            ),
        });
        debug!(%direction, "drag cancelled");
        true
    }

    /// Run a complete turn of `direction` without a drag phase (taps and
    /// programmatic navigation).
    ///
    /// The animation starts from the idle side, or from wherever the edge is
    /// if it is already moving. A previous animation of the same direction is
    /// dropped, and a live drag of either direction ends without its own
    /// settle.
    pub fn animate_commit(&mut self, direction: Direction, motion: &CurlMotion) {
        let size = self.size;
        let other = direction.opposite();
        let other_slot = self.slot_mut(other);
        if other_slot.drag_origin.take().is_some() || other_slot.settling.take().is_some() {
            other_slot.edge = other.idle_edge(size);
        }

        let slot = self.slot_mut(direction);
        let was_dragging = slot.drag_origin.take().is_some();
        let was_settling = slot.settling.take().is_some();
        let from = if was_dragging || was_settling {
            slot.edge
        } else {
            direction.idle_edge(size)
        };
        slot.settling = Some(Settling {
            target: AnimationTarget::commit(direction),
            animation: CurlAnimation::new(
                from,
                direction.turned_edge(size),
                motion.duration,
                motion.easing,
            ),
        });
        slot.edge = from;
        debug!(%direction, "full turn");
    }

    /// Advance every in-flight animation by `dt` and report those that
    /// finished.
    pub fn tick(&mut self, dt: Duration) -> Vec<Completion> {
        let size = self.size;
        let mut done = Vec::new();
        for direction in Direction::ALL {
            let slot = self.slot_mut(direction);
            let Some(settling) = slot.settling.as_mut() else {
                continue;
            };
            settling.animation.tick(dt);
            if !settling.animation.is_complete() {
                slot.edge = settling.animation.edge();
                trace!(%direction, progress = settling.animation.progress(), "settle");
                continue;
            }
            let completion = Completion {
                direction,
                target: settling.target,
                final_edge: settling.animation.target(),
            };
            slot.settling = None;
            slot.edge = direction.idle_edge(size);
            debug!(%direction, target = ?completion.target, "settle complete");
            done.push(completion);
        }
        done
    }

    /// Return both edges to idle, dropping drags and animations.
    pub fn reset(&mut self) {
        let motion = self.motion;
        *self = Self::new(self.size);
        self.motion = motion;
    }

    #[inline]
    fn slot(&self, direction: Direction) -> &Slot {
        &self.slots[direction.index()]
    }

    #[inline]
    fn slot_mut(&mut self, direction: Direction) -> &mut Slot {
        &mut self.slots[direction.index()]
    }
}
