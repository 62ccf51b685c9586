#![forbid(unsafe_code)]

//! Gesture recognition: turns host pointer events into curl operations.
//!
//! [`CurlGestureRecognizer`] dispatches each [`PointerEvent`] through an
//! ordered list of handlers ([`HANDLER_ORDER`]): drag-forward, drag-backward,
//! then tap. Every handler has an `enabled` predicate that is re-evaluated
//! against the current [`GestureGate`] on each event; the first handler that
//! accepts a gesture owns it until the gesture ends.
//!
//! # State Machine
//!
//! The observable phase ([`GesturePhase`]) is derived from the edge state:
//!
//! - `Idle` → `Dragging(dir)` on drag start, if that direction's drag is
//!   enabled, the page is not at the boundary it would cross, the start point
//!   lies in the direction's start zone, and the direction is not settling.
//! - `Dragging(dir)` → `Dragging(dir)` on drag move.
//! - `Dragging(dir)` → `Animating(dir, target)` on release.
//! - `Animating` → `Idle` once `tick` reports completion.
//!
//! Taps skip `Dragging` and start a full turn directly.
//!
//! # Invariants
//!
//! 1. A gesture claimed by no handler is ignored until it ends.
//! 2. A drag start while a claimed drag is still open is a sequencing error.
//! 3. A drag start for a direction that is still settling is not claimed and
//!    returns `Ignored`. The recognizer never hands such a start to
//!    [`EdgeState::begin_drag`], so `ConflictingGesture` only surfaces for
//!    out-of-order host events (invariant 2).
//! 4. After `reset()`, no gesture is claimed.

use tracing::debug;

use crate::config::CurlConfig;
use crate::edge_state::{AnimationTarget, Direction, EdgeState};
use crate::error::{ConflictCause, CurlError};
use crate::geometry::{Point, Size, Vector};

// ---------------------------------------------------------------------------
// Events and phases
// ---------------------------------------------------------------------------

/// Pointer input, already mapped into the surface's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    DragStart(Point),
    DragMove { position: Point, delta: Vector },
    DragEnd(Point),
    /// The host lost the pointer mid-drag (focus loss, capture stolen).
    Cancel,
    Tap(Point),
}

/// Where the curl surface is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging(Direction),
    Animating(Direction, AnimationTarget),
}

impl GesturePhase {
    /// Read the phase off the edge state. A live drag wins over a settling
    /// animation of the other direction.
    pub fn of(edges: &EdgeState) -> Self {
        if let Some(direction) = edges.live() {
            return Self::Dragging(direction);
        }
        Direction::ALL
            .into_iter()
            .find_map(|d| edges.animation(d).map(|a| Self::Animating(d, a.target)))
            .unwrap_or(Self::Idle)
    }
}

/// What a processed event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    DragStarted(Direction),
    DragMoved(Direction),
    Released(Direction, AnimationTarget),
    Cancelled(Direction),
    /// A full turn was started by a tap.
    Tapped(Direction),
    Ignored,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Everything a handler's `enabled` predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct GestureGate<'a> {
    pub config: &'a CurlConfig,
    pub size: Size,
    pub current: usize,
    pub max: usize,
}

impl GestureGate<'_> {
    /// Whether a turn in `direction` stays inside `0..max`.
    pub fn can_turn(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.current + 1 < self.max,
            Direction::Backward => self.current > 0 && self.max > 0,
        }
    }
}

/// A gesture handler, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureHandler {
    DragForward,
    DragBackward,
    Tap,
}

/// Dispatch order: first match wins.
pub const HANDLER_ORDER: [GestureHandler; 3] = [
    GestureHandler::DragForward,
    GestureHandler::DragBackward,
    GestureHandler::Tap,
];

impl GestureHandler {
    /// The direction a drag handler turns, `None` for taps.
    pub const fn drag_direction(self) -> Option<Direction> {
        match self {
            Self::DragForward => Some(Direction::Forward),
            Self::DragBackward => Some(Direction::Backward),
            Self::Tap => None,
        }
    }

    /// Whether this handler may act at all right now.
    pub fn enabled(self, gate: &GestureGate<'_>) -> bool {
        match self.drag_direction() {
            Some(direction) => gate.config.drag_enabled(direction) && gate.can_turn(direction),
            None => gate.config.tap_forward_enabled || gate.config.tap_backward_enabled,
        }
    }
}

/// Route a tap to a direction using the configured tap regions.
///
/// Forward is checked first; a region whose tap switch is off is skipped.
pub fn classify_tap(point: Point, config: &CurlConfig, size: Size) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&direction| {
        config.tap_enabled(direction) && config.tap_region(direction).scaled(size).contains(point)
    })
}

// ---------------------------------------------------------------------------
// Recognizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Claim {
    Drag { direction: Direction, origin: Point },
    /// A drag nobody accepted; swallowed until it ends.
    Unclaimed,
}

/// Stateful dispatcher from pointer events to edge-state operations.
#[derive(Debug, Clone, Default)]
pub struct CurlGestureRecognizer {
    claim: Option<Claim>,
}

impl CurlGestureRecognizer {
    /// Create an idle recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The direction of the drag this recognizer currently owns.
    pub fn claimed(&self) -> Option<Direction> {
        match self.claim {
            Some(Claim::Drag { direction, .. }) => Some(direction),
            _ => None,
        }
    }

    /// Forget any open gesture.
    pub fn reset(&mut self) {
        self.claim = None;
    }

    /// Process one event against `edges`.
    ///
    /// # Errors
    ///
    /// [`CurlError::ConflictingGesture`] when a drag starts while a claimed
    /// drag is still open, i.e. the host skipped a drag end.
    pub fn process(
        &mut self,
        event: &PointerEvent,
        edges: &mut EdgeState,
        gate: &GestureGate<'_>,
    ) -> Result<GestureOutcome, CurlError> {
        match *event {
            PointerEvent::DragStart(point) => self.on_drag_start(point, edges, gate),
            PointerEvent::DragMove { position, .. } => Ok(self.on_drag_move(position, edges)),
            PointerEvent::DragEnd(point) => Ok(self.on_drag_end(point, edges, gate)),
            PointerEvent::Cancel => Ok(self.on_cancel(edges, gate)),
            PointerEvent::Tap(point) => Ok(self.on_tap(point, edges, gate)),
        }
    }

    fn on_drag_start(
        &mut self,
        point: Point,
        edges: &mut EdgeState,
        gate: &GestureGate<'_>,
    ) -> Result<GestureOutcome, CurlError> {
        if let Some(direction) = self.open_drag(edges) {
            return Err(CurlError::ConflictingGesture {
                direction,
                cause: ConflictCause::GestureInProgress,
            });
        }

        for handler in HANDLER_ORDER {
            let Some(direction) = handler.drag_direction() else {
                continue;
            };
            if !handler.enabled(gate) || edges.is_animating(direction) {
                continue;
            }
            if !gate.config.zone(direction, gate.size).start.contains(point) {
                continue;
            }
            edges.begin_drag(direction, point)?;
            self.claim = Some(Claim::Drag {
                direction,
                origin: point,
            });
            return Ok(GestureOutcome::DragStarted(direction));
        }

        debug!(x = point.x, y = point.y, "drag start not claimed");
        self.claim = Some(Claim::Unclaimed);
        Ok(GestureOutcome::Ignored)
    }

    fn on_drag_move(&mut self, position: Point, edges: &mut EdgeState) -> GestureOutcome {
        let Some((direction, origin)) = self.drag_claim(edges) else {
            return GestureOutcome::Ignored;
        };
        edges.update_drag(direction, position - origin);
        GestureOutcome::DragMoved(direction)
    }

    fn on_drag_end(
        &mut self,
        point: Point,
        edges: &mut EdgeState,
        gate: &GestureGate<'_>,
    ) -> GestureOutcome {
        let claim = self.drag_claim(edges);
        self.claim = None;
        let Some((direction, origin)) = claim else {
            return GestureOutcome::Ignored;
        };
        edges.update_drag(direction, point - origin);
        let zone = gate.config.zone(direction, gate.size);
        match edges.end_drag(direction, &zone, &gate.config.motion()) {
            Some(target) => GestureOutcome::Released(direction, target),
            None => GestureOutcome::Ignored,
        }
    }

    fn on_cancel(&mut self, edges: &mut EdgeState, gate: &GestureGate<'_>) -> GestureOutcome {
        let claim = self.drag_claim(edges);
        self.claim = None;
        match claim {
            Some((direction, _)) if edges.cancel_drag(direction, &gate.config.motion()) => {
                GestureOutcome::Cancelled(direction)
            }
            _ => GestureOutcome::Ignored,
        }
    }

    fn on_tap(&mut self, point: Point, edges: &mut EdgeState, gate: &GestureGate<'_>) -> GestureOutcome {
        if self.open_drag(edges).is_some() {
            return GestureOutcome::Ignored;
        }
        let Some(direction) = classify_tap(point, gate.config, gate.size) else {
            return GestureOutcome::Ignored;
        };
        if !gate.can_turn(direction) {
            debug!(%direction, current = gate.current, max = gate.max, "tap at boundary");
            return GestureOutcome::Ignored;
        }
        edges.animate_commit(direction, &gate.config.motion());
        GestureOutcome::Tapped(direction)
    }

    /// The claimed drag, provided the edge state still considers it live.
    /// A drag superseded elsewhere (navigation, setup) downgrades the claim.
    fn drag_claim(&mut self, edges: &EdgeState) -> Option<(Direction, Point)> {
        let Some(Claim::Drag { direction, origin }) = self.claim else {
            return None;
        };
        if edges.live() == Some(direction) {
            Some((direction, origin))
        } else {
            self.claim = Some(Claim::Unclaimed);
            None
        }
    }

    fn open_drag(&mut self, edges: &EdgeState) -> Option<Direction> {
        self.drag_claim(edges).map(|(direction, _)| direction)
    }
}
