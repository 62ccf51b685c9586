#![forbid(unsafe_code)]

//! Curl geometry: surface primitives, fold edges, and commit decisions.
//!
//! All coordinates live in the surface's local space: origin at the top-left
//! corner, `y` growing downward, in whatever units the host lays out in.
//!
//! # Invariants
//!
//! 1. Every [`Edge`] returned by [`edge_from_drag`] lies inside `[0, W] × [0, H]`.
//! 2. [`lerp`] returns its endpoints exactly at `t = 0` and `t = 1`.
//! 3. Every function here is total. Non-finite input is sanitized or clamped,
//!    never rejected.
//!
//! # Failure Modes
//!
//! - Zero or negative surface size: clamped to [`MIN_DIMENSION`] per axis.
//! - Zero-length drag: produces the idle edge of the nearest side (no curl).
//! - Degenerate interaction zone (origin and target lines coincide): never
//!   commits.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Smallest surface dimension accepted by the geometry functions.
pub const MIN_DIMENSION: f32 = 1.0;

/// Zone spans at or below this length are treated as degenerate.
const SPAN_EPSILON: f32 = 1e-3;

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// A position on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The top-left corner of the surface.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    #[inline]
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Clamp into `[0, width] × [0, height]`. Infinities clamp to the nearer
    /// bound; NaN maps to 0.
    #[must_use]
    pub fn clamped(self, size: Size) -> Point {
        let size = size.sanitized();
        Point::new(
            clamp_axis(self.x, size.width),
            clamp_axis(self.y, size.height),
        )
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vector) -> f32 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Whether the vector has no usable direction.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.length() <= f32::EPSILON
    }

    /// Replace non-finite components with 0.
    #[must_use]
    pub fn sanitized(self) -> Vector {
        Vector::new(finite_or_zero(self.dx), finite_or_zero(self.dy))
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f32) -> Vector {
        Vector::new(self.dx * rhs, self.dy * rhs)
    }
}

/// Surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size. Use [`sanitized`](Size::sanitized) before dividing by it.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp each dimension to at least [`MIN_DIMENSION`]. Non-finite values
    /// are replaced by the minimum.
    #[must_use]
    pub fn sanitized(self) -> Size {
        let fix = |v: f32| {
            if v.is_finite() {
                v.max(MIN_DIMENSION)
            } else {
                MIN_DIMENSION
            }
        };
        Size::new(fix(self.width), fix(self.height))
    }

    /// Whether sanitizing would change this size.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.sanitized() != self
    }
}

/// An axis-aligned rectangle.
///
/// Unlike cell grids, containment is inclusive on all four sides, so a
/// zero-width rect describes a vertical line that still hit-tests its points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Check if a point is inside the rectangle (boundary included).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Map a rectangle expressed in surface fractions (`0.0..=1.0`) to
    /// surface units.
    #[must_use]
    pub fn scaled(&self, size: Size) -> Rect {
        Rect::new(
            self.x * size.width,
            self.y * size.height,
            self.width * size.width,
            self.height * size.height,
        )
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// The fold line of a curling page: where it meets the top and the bottom of
/// the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    pub top: Point,
    pub bottom: Point,
}

impl Edge {
    /// Create a new edge.
    #[inline]
    pub const fn new(top: Point, bottom: Point) -> Self {
        Self { top, bottom }
    }

    /// A vertical fold at `x`, spanning the full surface height.
    #[must_use]
    pub fn vertical(x: f32, size: Size) -> Edge {
        let size = size.sanitized();
        let x = clamp_axis(x, size.width);
        Edge::new(Point::new(x, 0.0), Point::new(x, size.height))
    }

    /// The right side of the surface: a forward curl at rest.
    #[must_use]
    pub fn right_side(size: Size) -> Edge {
        let size = size.sanitized();
        Edge::vertical(size.width, size)
    }

    /// The left side of the surface: a backward curl at rest.
    #[must_use]
    pub fn left_side(size: Size) -> Edge {
        Edge::vertical(0.0, size)
    }

    /// Midpoint of the fold line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.top.midpoint(self.bottom)
    }

    /// Clamp both endpoints into the surface.
    #[must_use]
    pub fn clamped(self, size: Size) -> Edge {
        Edge::new(self.top.clamped(size), self.bottom.clamped(size))
    }

    /// Whether both endpoints lie inside `[0, W] × [0, H]`.
    pub fn is_within(&self, size: Size) -> bool {
        let bounds = Rect::from_size(size.sanitized());
        bounds.contains(self.top) && bounds.contains(self.bottom)
    }

    /// See [`lerp`].
    #[inline]
    #[must_use]
    pub fn lerp(self, target: Edge, t: f32) -> Edge {
        lerp(self, target, t)
    }
}

/// Component-wise linear interpolation between two edges.
///
/// `t` is clamped to `[0, 1]` (NaN counts as 0). The endpoints are returned
/// exactly, so an animation that reaches `t = 1` lands on its target bit for
/// bit.
#[must_use]
pub fn lerp(a: Edge, b: Edge, t: f32) -> Edge {
    let t = finite_or_zero(t).clamp(0.0, 1.0);
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    let mix = |p: f32, q: f32| p * (1.0 - t) + q * t;
    Edge::new(
        Point::new(mix(a.top.x, b.top.x), mix(a.top.y, b.top.y)),
        Point::new(mix(a.bottom.x, b.bottom.x), mix(a.bottom.y, b.bottom.y)),
    )
}

/// Compute the fold edge for a drag that started at `origin` and has moved by
/// `drag`.
///
/// The fold passes through the pointer (`origin + drag`) perpendicular to the
/// drag direction, and is cut by the top (`y = 0`) and bottom (`y = H`) of the
/// surface. A drag with no horizontal component folds vertically through the
/// pointer. A zero-length drag has no curl yet: the result is the side of the
/// surface nearest to `origin`.
#[must_use]
pub fn edge_from_drag(origin: Point, drag: Vector, size: Size) -> Edge {
    let size = size.sanitized();
    let origin = origin.clamped(size);
    let drag = drag.sanitized();

    if drag.is_zero() {
        return if origin.x * 2.0 >= size.width {
            Edge::right_side(size)
        } else {
            Edge::left_side(size)
        };
    }

    let pointer = (origin + drag).clamped(size);
    if drag.dx.abs() <= f32::EPSILON {
        return Edge::vertical(pointer.x, size);
    }

    // dx * (x - px) + dy * (y - py) = 0, solved for x.
    let x_at = |y: f32| pointer.x - drag.dy * (y - pointer.y) / drag.dx;
    Edge::new(
        Point::new(x_at(0.0), 0.0),
        Point::new(x_at(size.height), size.height),
    )
    .clamped(size)
}

/// Mirror `point` across the line through `a` and `b`.
///
/// Returns `point` unchanged when `a` and `b` coincide.
#[must_use]
pub fn reflect_across(point: Point, a: Point, b: Point) -> Point {
    let line = b - a;
    let len_sq = line.dot(line);
    if len_sq <= f32::EPSILON {
        return point;
    }
    let k = (point - a).dot(line) / len_sq;
    let foot = a + line * k;
    Point::new(2.0 * foot.x - point.x, 2.0 * foot.y - point.y)
}

// ---------------------------------------------------------------------------
// Interaction zones
// ---------------------------------------------------------------------------

/// Where a drag must begin (`start`) and the region its edge heads for
/// (`end`), in surface units. Zones only decide hit-testing and the commit
/// fraction; settle animations always run between the surface sides.
///
/// Turns run horizontally. The *origin line* is the side of `start` farthest
/// from `end`; the *target line* is the side of `end` farthest from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionZone {
    pub start: Rect,
    pub end: Rect,
}

impl InteractionZone {
    /// Create a new zone.
    #[inline]
    pub const fn new(start: Rect, end: Rect) -> Self {
        Self { start, end }
    }

    fn travels_right(&self) -> bool {
        self.end.center().x >= self.start.center().x
    }

    /// `x` of the line a turn starts from.
    pub fn origin_x(&self) -> f32 {
        if self.travels_right() {
            self.start.left()
        } else {
            self.start.right()
        }
    }

    /// `x` of the line a committed turn ends on.
    pub fn target_x(&self) -> f32 {
        if self.travels_right() {
            self.end.right()
        } else {
            self.end.left()
        }
    }

    /// Distance between the origin and target lines.
    #[inline]
    pub fn span(&self) -> f32 {
        (self.target_x() - self.origin_x()).abs()
    }
}

/// Fraction of the zone's span the edge has travelled, measured at the edge
/// midpoint. Not clamped: overshoot reads above 1, backtracking below 0.
pub fn commit_fraction(edge: &Edge, zone: &InteractionZone) -> f32 {
    if zone.span() <= SPAN_EPSILON {
        return 0.0;
    }
    let origin = zone.origin_x();
    (edge.midpoint().x - origin) / (zone.target_x() - origin)
}

/// Whether a released drag should complete the turn.
///
/// Commits when the edge has travelled at least `threshold` of the zone span.
pub fn progress_to_commit(edge: &Edge, zone: &InteractionZone, threshold: f32) -> bool {
    if zone.span() <= SPAN_EPSILON {
        return false;
    }
    commit_fraction(edge, zone) >= threshold
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

/// `v` clamped into `[0, max]`, keeping the sign of an infinity.
#[inline]
fn clamp_axis(v: f32, max: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, max) }
}
