//! Property-based invariant tests for curl geometry and page state.
//!
//! These hold for **any** input sequence:
//!
//! 1. `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b` exactly.
//! 2. Edges derived from any drag stay inside the surface.
//! 3. Settle progress never decreases and stays in `[0, 1]`.
//! 4. The page index stays in bounds under arbitrary events, frames, and
//!    resizes, and edges stay inside the current surface.
//! 5. A dragged direction is never settling at the same time.
//! 6. A commit moves the page index by exactly one.

use std::time::Duration;

use pagecurl_core::geometry::{edge_from_drag, lerp};
use pagecurl_core::{
    AnimationTarget, ConfigStore, Edge, GesturePhase, PageCurlState, Point,
    PointerEvent, Size, Vector,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn surface() -> impl Strategy<Value = Size> {
    (1.0f32..2000.0, 1.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn point_in(size: Size) -> impl Strategy<Value = Point> {
    (0.0f32..=size.width, 0.0f32..=size.height).prop_map(|(x, y)| Point::new(x, y))
}

fn any_edge() -> impl Strategy<Value = Edge> {
    (
        -1000.0f32..1000.0,
        -1000.0f32..1000.0,
        -1000.0f32..1000.0,
        -1000.0f32..1000.0,
    )
        .prop_map(|(a, b, c, d)| Edge::new(Point::new(a, b), Point::new(c, d)))
}

#[derive(Debug, Clone)]
enum Op {
    Event(PointerEvent),
    Tick(u64),
    Next,
    Prev,
    Setup(f32, f32),
}

fn op() -> impl Strategy<Value = Op> {
    let point = (0.0f32..=400.0, 0.0f32..=800.0).prop_map(|(x, y)| Point::new(x, y));
    prop_oneof![
        point.clone().prop_map(|p| Op::Event(PointerEvent::DragStart(p))),
        point.clone().prop_map(|p| Op::Event(PointerEvent::DragMove {
            position: p,
            delta: Vector::ZERO,
        })),
        point.clone().prop_map(|p| Op::Event(PointerEvent::DragEnd(p))),
        point.prop_map(|p| Op::Event(PointerEvent::Tap(p))),
        Just(Op::Event(PointerEvent::Cancel)),
        (0u64..400).prop_map(Op::Tick),
        Just(Op::Next),
        Just(Op::Prev),
        (200.0f32..800.0, 400.0f32..1200.0).prop_map(|(w, h)| Op::Setup(w, h)),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// 1. Interpolation endpoints are exact
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lerp_endpoints_are_exact(a in any_edge(), b in any_edge()) {
        prop_assert_eq!(lerp(a, b, 0.0), a);
        prop_assert_eq!(lerp(a, b, 1.0), b);
    }

    #[test]
    fn lerp_clamps_t(a in any_edge(), b in any_edge(), t in 1.0f32..100.0) {
        prop_assert_eq!(lerp(a, b, t), b);
        prop_assert_eq!(lerp(a, b, -t), a);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 2. Derived edges stay on the surface
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_edge_is_bounded(
        (size, origin) in surface().prop_flat_map(|s| (Just(s), point_in(s))),
        dx in -5000.0f32..5000.0,
        dy in -5000.0f32..5000.0,
    ) {
        let edge = edge_from_drag(origin, Vector::new(dx, dy), size);
        prop_assert!(edge.is_within(size), "edge {:?} outside {:?}", edge, size);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 3. Settle progress is monotonic
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn settle_progress_is_monotonic(frames in prop::collection::vec(0u64..60, 1..60)) {
        let mut state = PageCurlState::new(3, 0, ConfigStore::default());
        state.setup(400.0, 800.0);
        state.next();
        let mut last = 0.0f32;
        for ms in frames {
            state.tick(Duration::from_millis(ms));
            match state.view().forward_animation {
                Some(anim) => {
                    prop_assert!((0.0..=1.0).contains(&anim.progress));
                    prop_assert!(anim.progress >= last);
                    last = anim.progress;
                }
                None => break,
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 4–6. Page state under arbitrary input
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn page_index_stays_in_bounds(
        max in 0usize..6,
        start in 0usize..6,
        ops in prop::collection::vec(op(), 0..80),
    ) {
        let mut state = PageCurlState::new(max, start, ConfigStore::default());
        state.setup(400.0, 800.0);
        for op in ops {
            let before = state.current();
            match op {
                Op::Event(event) => {
                    // Out-of-order drag starts are reported, never fatal.
                    let _ = state.handle(event);
                }
                Op::Tick(ms) => {
                    let size = state.size().unwrap_or(Size::new(400.0, 800.0));
                    for completion in state.tick(Duration::from_millis(ms)) {
                        prop_assert!(completion.final_edge.is_within(size));
                    }
                }
                Op::Next => state.next(),
                Op::Prev => state.prev(),
                Op::Setup(width, height) => state.setup(width, height),
            }
            let after = state.current();
            prop_assert!(after == 0 || after < max, "current {} max {}", after, max);
            prop_assert!(after.abs_diff(before) <= 1);

            let size = state.size().unwrap_or(Size::new(400.0, 800.0));
            let view = state.view();
            prop_assert!(view.forward.is_within(size), "{:?} outside {:?}", view.forward, size);
            prop_assert!(view.backward.is_within(size), "{:?} outside {:?}", view.backward, size);
            if let Some(edges) = state.edges() {
                match view.phase {
                    GesturePhase::Dragging(direction) => {
                        prop_assert_eq!(edges.live(), Some(direction));
                        prop_assert!(!edges.is_animating(direction));
                    }
                    GesturePhase::Animating(direction, target) => {
                        prop_assert_eq!(edges.live(), None);
                        prop_assert!(target != AnimationTarget::None);
                        prop_assert!(edges.is_animating(direction));
                    }
                    GesturePhase::Idle => prop_assert!(edges.is_idle()),
                }
            }
        }
    }
}
