//! Axis-aligned bounding boxes and the overlap predicate used for matching.

use serde::{Deserialize, Serialize};

/// A one-dimensional segment `[min, max]`.
///
/// Note: This type does NOT enforce that min <= max in the constructor.
/// Every producer in this crate normalizes the endpoints before building an
/// interval, see [`BoundingBox::from_ltwh`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates a new interval from explicit endpoints.
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Creates an interval spanning two endpoints given in any order.
    #[inline]
    pub fn spanning(a: f64, b: f64) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if the two intervals overlap.
    ///
    /// The pair is ordered so that the interval with the smaller `min` is
    /// the left one; they overlap iff the right one starts strictly before
    /// the left one ends. Intervals that only touch at an endpoint do not
    /// overlap.
    ///
    /// On equal `min` the longer interval is the left one, otherwise a
    /// zero-length interval would give a different answer per argument
    /// order.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        let self_is_left =
            self.min < other.min || (self.min == other.min && self.max >= other.max);
        let (left, right) = if self_is_left {
            (self, other)
        } else {
            (other, self)
        };
        right.min < left.max
    }
}

/// An axis-aligned rectangle stored as its projections on both axes.
///
/// Coordinates are usually normalized fractions (0..1) of the image
/// dimensions, as returned by the detection provider, but nothing here
/// depends on that: pixel coordinates work the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: Interval,
    pub y: Interval,
}

impl BoundingBox {
    /// Creates a new box from its two projections.
    #[inline]
    pub fn new(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// Builds a normalized box from a top-left corner and a size.
    ///
    /// Negative widths or heights from malformed input are folded back so
    /// that `min <= max` holds on both axes.
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self {
            x: Interval::spanning(left, right),
            y: Interval::spanning(top, bottom),
        }
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn left(&self) -> f64 {
        self.x.min
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn top(&self) -> f64 {
        self.y.min
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x.max
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y.max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x.length()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y.length()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns true if both projections overlap (separating-axis test).
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y)
    }
}

/// Makes a normalized bounding box from a provider record.
///
/// Argument order follows the provider payload (`Width`, `Height`, `Left`,
/// `Top`).
#[inline]
pub fn make_bounding_box(width: f64, height: f64, left: f64, top: f64) -> BoundingBox {
    BoundingBox::from_ltwh(left, top, width, height)
}

/// Checks if two intervals intersect. No assumption on their relative order.
#[inline]
pub fn intervals_intersect(a: &Interval, b: &Interval) -> bool {
    a.intersects(b)
}

/// Checks if two boxes intersect. No assumption on their relative position.
#[inline]
pub fn boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_bounding_box() {
        let bbox = make_bounding_box(0.5, 0.25, 0.125, 0.25);
        assert_eq!(bbox.left(), 0.125);
        assert_eq!(bbox.top(), 0.25);
        assert_eq!(bbox.right(), 0.625);
        assert_eq!(bbox.bottom(), 0.5);
        assert_eq!(bbox.area(), 0.125);
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let bbox = make_bounding_box(-0.25, -0.5, 0.5, 0.75);
        assert_eq!(bbox.x, Interval::new(0.25, 0.5));
        assert_eq!(bbox.y, Interval::new(0.25, 0.75));
        assert!(bbox.width() >= 0.0);
        assert!(bbox.height() >= 0.0);
    }

    #[test]
    fn test_intervals_intersect_any_order() {
        let a = Interval::new(0.0, 2.0);
        let b = Interval::new(1.0, 3.0);
        assert!(intervals_intersect(&a, &b));
        assert!(intervals_intersect(&b, &a));
    }

    #[test]
    fn test_touching_intervals_do_not_intersect() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(1.0, 2.0);
        assert!(!intervals_intersect(&a, &b));
        assert!(!intervals_intersect(&b, &a));
    }

    #[test]
    fn test_shared_start_is_order_independent() {
        let point = Interval::new(0.5, 0.5);
        let span = Interval::new(0.5, 0.75);
        assert!(intervals_intersect(&point, &span));
        assert!(intervals_intersect(&span, &point));
        assert!(!intervals_intersect(&point, &point));
    }

    #[test]
    fn test_contained_interval_intersects() {
        let outer = Interval::new(0.0, 10.0);
        let inner = Interval::new(4.0, 5.0);
        assert!(intervals_intersect(&outer, &inner));
        assert!(intervals_intersect(&inner, &outer));
    }

    #[test]
    fn test_boxes_touching_edge_or_corner() {
        let a = BoundingBox::new(Interval::new(0.0, 1.0), Interval::new(0.0, 1.0));
        let edge = BoundingBox::new(Interval::new(1.0, 2.0), Interval::new(0.0, 1.0));
        let corner = BoundingBox::new(Interval::new(1.0, 2.0), Interval::new(1.0, 2.0));
        assert!(!boxes_intersect(&a, &edge));
        assert!(!boxes_intersect(&a, &corner));
    }

    #[test]
    fn test_boxes_need_overlap_on_both_axes() {
        let a = make_bounding_box(0.5, 0.5, 0.0, 0.0);
        // Overlaps on x only.
        let b = make_bounding_box(0.5, 0.2, 0.25, 0.6);
        assert!(!boxes_intersect(&a, &b));

        let c = make_bounding_box(0.1, 0.1, 0.1, 0.1);
        assert!(boxes_intersect(&a, &c));
    }

    #[test]
    fn test_box_intersects_itself() {
        let bbox = make_bounding_box(0.3, 0.3, 0.2, 0.2);
        assert!(boxes_intersect(&bbox, &bbox));
    }

    #[test]
    fn test_degenerate_box_does_not_intersect_itself() {
        let flat = make_bounding_box(0.3, 0.0, 0.2, 0.2);
        assert!(!boxes_intersect(&flat, &flat));
    }
}
