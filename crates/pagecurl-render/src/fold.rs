#![forbid(unsafe_code)]

//! Clip geometry for a curled page.
//!
//! A fold [`Edge`] splits the page in two. The part on the spine side (left
//! of the fold) stays flat; the part beyond the fold is flipped over and
//! shows up mirrored across the fold line. [`fold_regions`] returns both as
//! quadrilaterals in surface coordinates.
//!
//! # Invariants
//!
//! 1. The page polygon is `(0,0)`, `top`, `bottom`, `(0,H)` in that order.
//! 2. `flap` is `None` exactly when nothing of the page lies beyond the fold.
//! 3. Flap vertices are the beyond-fold corners reflected across the fold,
//!    so the fold endpoints map to themselves.

use pagecurl_core::geometry::reflect_across;
use pagecurl_core::{Edge, Point, Size};

/// Distance under which a fold counts as lying on the page's right side.
const FOLD_EPSILON: f32 = 1e-3;

/// The two clip polygons of a curled page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldRegions {
    /// The flat part of the page, spine side of the fold.
    pub page: [Point; 4],
    /// The flipped-over part, mirrored across the fold.
    pub flap: Option<[Point; 4]>,
}

impl FoldRegions {
    /// Area of the flat part.
    pub fn page_area(&self) -> f32 {
        polygon_area(&self.page)
    }

    /// Whether the flat part has no visible area.
    pub fn is_folded_away(&self) -> bool {
        self.page_area() <= FOLD_EPSILON
    }
}

/// Split a `size` page along `edge`.
#[must_use]
pub fn fold_regions(edge: Edge, size: Size) -> FoldRegions {
    let size = size.sanitized();
    let edge = edge.clamped(size);
    let (w, h) = (size.width, size.height);

    let page = [Point::new(0.0, 0.0), edge.top, edge.bottom, Point::new(0.0, h)];

    let beyond = w - edge.top.x.min(edge.bottom.x);
    let flap = (beyond > FOLD_EPSILON).then(|| {
        [edge.top, Point::new(w, 0.0), Point::new(w, h), edge.bottom]
            .map(|p| reflect_across(p, edge.top, edge.bottom))
    });

    FoldRegions { page, flap }
}

/// Unsigned shoelace area.
fn polygon_area(points: &[Point]) -> f32 {
    let n = points.len();
    let twice: f32 = (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Size = Size::new(400.0, 800.0);

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn resting_forward_edge_keeps_whole_page() {
        let regions = fold_regions(Edge::right_side(SURFACE), SURFACE);
        assert_eq!(regions.flap, None);
        assert_eq!(regions.page_area(), 400.0 * 800.0);
        assert!(!regions.is_folded_away());
    }

    #[test]
    fn resting_backward_edge_folds_page_away() {
        let regions = fold_regions(Edge::left_side(SURFACE), SURFACE);
        assert!(regions.is_folded_away());
        assert!(regions.flap.is_some());
    }

    #[test]
    fn vertical_fold_mirrors_right_part() {
        let regions = fold_regions(Edge::vertical(300.0, SURFACE), SURFACE);
        assert_eq!(regions.page_area(), 300.0 * 800.0);
        let flap = regions.flap.unwrap();
        assert!(close(flap[0], Point::new(300.0, 0.0)));
        assert!(close(flap[1], Point::new(200.0, 0.0)));
        assert!(close(flap[2], Point::new(200.0, 800.0)));
        assert!(close(flap[3], Point::new(300.0, 800.0)));
    }

    #[test]
    fn slanted_fold_keeps_endpoints_fixed() {
        let edge = Edge::new(Point::new(350.0, 0.0), Point::new(250.0, 800.0));
        let regions = fold_regions(edge, SURFACE);
        let flap = regions.flap.unwrap();
        assert!(close(flap[0], edge.top));
        assert!(close(flap[3], edge.bottom));
        // Trapezoid with parallel sides 350 and 250.
        assert!((regions.page_area() - 240_000.0).abs() < 1.0);
    }

    #[test]
    fn out_of_bounds_edge_is_clamped() {
        let edge = Edge::new(Point::new(900.0, -10.0), Point::new(900.0, 900.0));
        let regions = fold_regions(edge, SURFACE);
        assert_eq!(regions.page[1], Point::new(400.0, 0.0));
        assert_eq!(regions.flap, None);
    }

    #[test]
    fn shoelace_area_of_unit_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_eq!(polygon_area(&square), 1.0);
    }
}
