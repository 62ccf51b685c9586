#![forbid(unsafe_code)]

//! Page state: the host-facing entry point of a curl surface.
//!
//! [`PageCurlState`] owns the page index, the [`EdgeState`], and the gesture
//! recognizer. The host drives it with three calls:
//!
//! - [`setup`](PageCurlState::setup) whenever layout changes,
//! - [`handle`](PageCurlState::handle) for each pointer event,
//! - [`tick`](PageCurlState::tick) once per frame.
//!
//! and reads it back through [`view`](PageCurlState::view) or a
//! [`subscribe`](PageCurlState::subscribe) callback.
//!
//! # Invariants
//!
//! 1. `current < max`, or `current == 0 == max`.
//! 2. The page index only changes when a commit completes, on `snap_to`, or
//!    (before the first `setup`) immediately on `next` / `prev`.
//! 3. `version` increments by exactly 1 each time the view changes.
//!
//! # Failure Modes
//!
//! - **Invalid constraints**: non-positive or non-finite sizes clamp to 1.0
//!   with a `warn` event.
//! - **Re-entrant callbacks**: subscribers receive `&CurlView` only, so they
//!   cannot reach back into the state while it is mutably borrowed.

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ConfigStore;
use crate::edge_state::{Completion, Direction, EdgeState, InFlight};
use crate::error::CurlError;
use crate::geometry::{Edge, Size};
use crate::gesture::{CurlGestureRecognizer, GestureGate, GestureOutcome, GesturePhase, PointerEvent};

type CallbackRc = Rc<dyn Fn(&CurlView)>;
type CallbackWeak = Weak<dyn Fn(&CurlView)>;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurlView {
    pub current: usize,
    pub max: usize,
    /// `None` until the first `setup`.
    pub size: Option<Size>,
    pub forward: Edge,
    pub backward: Edge,
    pub phase: GesturePhase,
    pub forward_animation: Option<InFlight>,
    pub backward_animation: Option<InFlight>,
}

impl CurlView {
    /// The edge for `direction`.
    pub fn edge(&self, direction: Direction) -> Edge {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
        }
    }
}

/// Keeps a [`PageCurlState::subscribe`] callback alive. Dropping it
/// unsubscribes.
pub struct Subscription {
    _guard: CallbackRc,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// A book of `max` pages with curl gestures and turn animations.
pub struct PageCurlState {
    current: usize,
    max: usize,
    config: ConfigStore,
    /// `None` until the first `setup`.
    edges: Option<EdgeState>,
    recognizer: CurlGestureRecognizer,
    subscribers: Vec<CallbackWeak>,
    version: u64,
}

impl fmt::Debug for PageCurlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCurlState")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("edges", &self.edges)
            .field("recognizer", &self.recognizer)
            .field("version", &self.version)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl PageCurlState {
    /// A book of `max` pages opened at `initial_current` (clamped).
    #[must_use]
    pub fn new(max: usize, initial_current: usize, config: ConfigStore) -> Self {
        let current = initial_current.min(max.saturating_sub(1));
        if current != initial_current {
            debug!(initial_current, max, "initial page clamped");
        }
        Self {
            current,
            max,
            config,
            edges: None,
            recognizer: CurlGestureRecognizer::new(),
            subscribers: Vec::new(),
            version: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Surface size from the last `setup`.
    pub fn size(&self) -> Option<Size> {
        self.edges.as_ref().map(EdgeState::size)
    }

    /// The configuration handle this state reads from.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Edge state, once `setup` has run.
    pub fn edges(&self) -> Option<&EdgeState> {
        self.edges.as_ref()
    }

    pub fn phase(&self) -> GesturePhase {
        self.edges.as_ref().map_or(GesturePhase::Idle, GesturePhase::of)
    }

    /// Increments each time the view changes.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply layout constraints.
    ///
    /// A changed size discards drags and animations; the same size is a
    /// no-op.
    pub fn setup(&mut self, width: f32, height: f32) {
        let requested = Size::new(width, height);
        let size = requested.sanitized();
        if size != requested {
            warn!(width, height, "invalid surface constraints clamped");
        }
        if self.size() == Some(size) {
            return;
        }

        let before = self.view();
        let mut edges = EdgeState::new(size);
        edges.set_motion(self.config.load().motion());
        self.edges = Some(edges);
        self.recognizer.reset();
        debug!(width = size.width, height = size.height, "surface setup");
        self.publish(&before);
    }

    /// Turn to the next page.
    pub fn next(&mut self) {
        self.turn(Direction::Forward);
    }

    /// Turn to the previous page.
    pub fn prev(&mut self) {
        self.turn(Direction::Backward);
    }

    /// Jump straight to `page` (clamped), dropping every drag and animation.
    pub fn snap_to(&mut self, page: usize) {
        let before = self.view();
        self.current = page.min(self.max.saturating_sub(1));
        if let Some(edges) = self.edges.as_mut() {
            edges.reset();
        }
        self.recognizer.reset();
        debug!(page, current = self.current, "snap");
        self.publish(&before);
    }

    /// Feed one pointer event. Ignored before the first `setup`.
    ///
    /// # Errors
    ///
    /// [`CurlError::ConflictingGesture`] when the host starts a drag before
    /// ending the previous one.
    pub fn handle(&mut self, event: PointerEvent) -> Result<GestureOutcome, CurlError> {
        let before = self.view();
        let Some(edges) = self.edges.as_mut() else {
            return Ok(GestureOutcome::Ignored);
        };
        let outcome = {
            let config = self.config.load();
            edges.set_motion(config.motion());
            let gate = GestureGate {
                config: &config,
                size: edges.size(),
                current: self.current,
                max: self.max,
            };
            self.recognizer.process(&event, edges, &gate)?
        };
        self.publish(&before);
        Ok(outcome)
    }

    /// Advance animations by `dt`. Completed commits move the page index.
    pub fn tick(&mut self, dt: Duration) -> Vec<Completion> {
        let before = self.view();
        let Some(edges) = self.edges.as_mut() else {
            return Vec::new();
        };
        edges.set_motion(self.config.load().motion());
        let done = edges.tick(dt);
        for completion in &done {
            if completion.target.is_commit() {
                self.step(completion.direction);
            }
        }
        self.publish(&before);
        done
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CurlView {
        match self.edges.as_ref() {
            Some(edges) => CurlView {
                current: self.current,
                max: self.max,
                size: Some(edges.size()),
                forward: edges.forward(),
                backward: edges.backward(),
                phase: GesturePhase::of(edges),
                forward_animation: edges.animation(Direction::Forward),
                backward_animation: edges.animation(Direction::Backward),
            },
            None => {
                let size = Size::new(1.0, 1.0);
                CurlView {
                    current: self.current,
                    max: self.max,
                    size: None,
                    forward: Direction::Forward.idle_edge(size),
                    backward: Direction::Backward.idle_edge(size),
                    phase: GesturePhase::Idle,
                    forward_animation: None,
                    backward_animation: None,
                }
            }
        }
    }

    /// Call `callback` with the new view whenever it changes.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes.
    pub fn subscribe(&mut self, callback: impl Fn(&CurlView) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    fn turn(&mut self, direction: Direction) {
        if !self.can_turn(direction) {
            debug!(%direction, current = self.current, max = self.max, "turn at boundary ignored");
            return;
        }
        let before = self.view();
        match self.edges.as_mut() {
            Some(edges) => {
                let config = self.config.load();
                let motion = config.motion();
                edges.set_motion(motion);
                edges.animate_commit(direction, &motion);
            }
            None => self.step(direction),
        }
        self.publish(&before);
    }

    fn can_turn(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.current + 1 < self.max,
            Direction::Backward => self.current > 0,
        }
    }

    /// Move the index one page, if still in bounds.
    fn step(&mut self, direction: Direction) {
        if !self.can_turn(direction) {
            debug!(%direction, current = self.current, "commit past boundary dropped");
            return;
        }
        match direction {
            Direction::Forward => self.current += 1,
            Direction::Backward => self.current -= 1,
        }
        debug!(%direction, current = self.current, "page turned");
    }

    fn publish(&mut self, before: &CurlView) {
        let view = self.view();
        if view == *before {
            return;
        }
        self.version += 1;
        self.subscribers.retain(|w| w.strong_count() > 0);
        let callbacks: Vec<CallbackRc> = self.subscribers.iter().filter_map(Weak::upgrade).collect();
        for callback in callbacks {
            callback(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::config::CurlConfig;
    use crate::edge_state::AnimationTarget;
    use crate::geometry::{Point, Vector};

    const FRAME: Duration = Duration::from_millis(16);

    fn book(max: usize, current: usize) -> PageCurlState {
        let mut state = PageCurlState::new(max, current, ConfigStore::default());
        state.setup(400.0, 800.0);
        state
    }

    fn run_out(state: &mut PageCurlState) {
        for _ in 0..100 {
            state.tick(FRAME);
            if state.edges().is_some_and(EdgeState::is_idle) {
                return;
            }
        }
        panic!("animation never settled");
    }

    #[test]
    fn new_clamps_initial_page() {
        assert_eq!(PageCurlState::new(3, 7, ConfigStore::default()).current(), 2);
        assert_eq!(PageCurlState::new(0, 7, ConfigStore::default()).current(), 0);
    }

    #[test]
    fn navigation_before_setup_is_immediate() {
        let mut state = PageCurlState::new(3, 0, ConfigStore::default());
        state.next();
        assert_eq!(state.current(), 1);
        state.prev();
        assert_eq!(state.current(), 0);
        assert_eq!(
            state.handle(PointerEvent::Tap(Point::new(1.0, 1.0))),
            Ok(GestureOutcome::Ignored)
        );
        assert!(state.tick(FRAME).is_empty());
    }

    #[test]
    fn next_animates_then_advances() {
        let mut state = book(3, 0);
        state.next();
        assert_eq!(state.current(), 0);
        assert_eq!(
            state.phase(),
            GesturePhase::Animating(Direction::Forward, AnimationTarget::CommitForward)
        );
        run_out(&mut state);
        assert_eq!(state.current(), 1);
        assert_eq!(state.view().forward, Edge::right_side(Size::new(400.0, 800.0)));
    }

    #[test]
    fn navigation_at_boundaries_is_noop() {
        let mut state = book(3, 2);
        state.next();
        assert_eq!(state.phase(), GesturePhase::Idle);
        assert_eq!(state.current(), 2);

        let mut state = book(3, 0);
        let version = state.version();
        state.prev();
        assert_eq!(state.phase(), GesturePhase::Idle);
        assert_eq!(state.version(), version);
    }

    #[test]
    fn empty_book_stays_at_zero() {
        let mut state = book(0, 0);
        state.next();
        state.prev();
        assert_eq!(state.current(), 0);
        assert_eq!(state.phase(), GesturePhase::Idle);
    }

    #[test]
    fn double_next_turns_once() {
        let mut state = book(3, 0);
        state.next();
        state.tick(Duration::from_millis(100));
        state.next();
        run_out(&mut state);
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn setup_clamps_invalid_constraints() {
        let mut state = PageCurlState::new(3, 0, ConfigStore::default());
        state.setup(-5.0, f32::NAN);
        assert_eq!(state.size(), Some(Size::new(1.0, 1.0)));
    }

    #[test]
    fn setup_same_size_keeps_drag() {
        let mut state = book(3, 0);
        state.handle(PointerEvent::DragStart(Point::new(400.0, 400.0))).unwrap();
        state.setup(400.0, 800.0);
        assert_eq!(state.phase(), GesturePhase::Dragging(Direction::Forward));
    }

    #[test]
    fn setup_new_size_discards_drag() {
        let mut state = book(3, 0);
        state.handle(PointerEvent::DragStart(Point::new(400.0, 400.0))).unwrap();
        state.setup(800.0, 800.0);
        assert_eq!(state.phase(), GesturePhase::Idle);
        let out = state.handle(PointerEvent::DragMove {
            position: Point::new(100.0, 400.0),
            delta: Vector::new(-300.0, 0.0),
        });
        assert_eq!(out, Ok(GestureOutcome::Ignored));
    }

    #[test]
    fn setup_new_size_discards_turn_in_flight() {
        let mut state = book(3, 0);
        state.next();
        assert!(state.tick(Duration::from_millis(100)).is_empty());

        state.setup(800.0, 800.0);
        let size = Size::new(800.0, 800.0);
        let view = state.view();
        assert_eq!(view.phase, GesturePhase::Idle);
        assert_eq!(view.forward, Edge::right_side(size));
        assert_eq!(view.backward, Edge::left_side(size));
        assert!(view.forward_animation.is_none());

        for _ in 0..30 {
            assert!(state.tick(FRAME).is_empty());
        }
        assert_eq!(state.current(), 0);
        assert_eq!(state.view().forward, Edge::right_side(size));
    }

    #[test]
    fn snap_to_clamps_and_drops_animations() {
        let mut state = book(5, 0);
        state.next();
        state.snap_to(9);
        assert_eq!(state.current(), 4);
        assert_eq!(state.phase(), GesturePhase::Idle);
        assert!(state.tick(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn config_swap_applies_to_next_event() {
        let mut state = book(3, 0);
        state.config().update(|c| c.drag_forward_enabled = false);
        let out = state.handle(PointerEvent::DragStart(Point::new(400.0, 400.0)));
        assert_eq!(out, Ok(GestureOutcome::Ignored));
    }

    #[test]
    fn config_duration_is_read_per_turn() {
        let store = ConfigStore::new(CurlConfig {
            animation_duration_ms: 32,
            ..CurlConfig::default()
        });
        let mut state = PageCurlState::new(3, 0, store);
        state.setup(400.0, 800.0);
        state.next();
        state.tick(FRAME);
        let done = state.tick(FRAME);
        assert_eq!(done.len(), 1);
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn subscribers_see_changes_until_dropped() {
        let mut state = book(3, 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = state.subscribe(move |view| sink.borrow_mut().push(view.current));

        state.next();
        run_out(&mut state);
        assert_eq!(seen.borrow().last(), Some(&1));

        let count = seen.borrow().len();
        drop(sub);
        state.next();
        assert_eq!(seen.borrow().len(), count);
    }

    #[test]
    fn unchanged_view_does_not_notify() {
        let mut state = book(3, 0);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));
        state.tick(FRAME);
        state.setup(400.0, 800.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(state.version(), 1);
    }
}
