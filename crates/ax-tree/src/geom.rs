//! Rectangles in accessibility screen space (top-left origin, y grows downward).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    #[inline]
    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }
    #[inline]
    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
    #[inline]
    /// Horizontal centre.
    pub fn cx(&self) -> f64 {
        self.x + self.w / 2.0
    }
    #[inline]
    /// Vertical centre.
    pub fn cy(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// True when the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// True when the two rectangles share a region of positive area.
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        overlap_1d(self.left(), self.right(), other.left(), other.right()) > 0.0
            && overlap_1d(self.top(), self.bottom(), other.top(), other.bottom()) > 0.0
    }

    /// The shared region, or `None` if the rectangles do not intersect.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        Some(Self {
            x,
            y,
            w: self.right().min(other.right()) - x,
            h: self.bottom().min(other.bottom()) - y,
        })
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// True when the point lies inside or on the edge of the rectangle.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.left() && px <= self.right() && py >= self.top() && py <= self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

#[inline]
/// Length of the overlap between intervals `[a1, a2]` and `[b1, b2]`.
pub fn overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    let l = a1.max(b1);
    let r = a2.min(b2);
    (r - l).max(0.0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn edge_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_is_the_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(80.0, 40.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(80.0, 40.0, 20.0, 10.0)));
    }

    #[test]
    fn empty_rects_never_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let zero = Rect::new(10.0, 10.0, 0.0, 5.0);
        assert!(zero.is_empty());
        assert!(!a.intersects(&zero));
    }

    #[test]
    fn contains_and_points() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains(&Rect::new(90.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains_point(100.0, 0.0));
        assert!(!outer.contains_point(100.1, 0.0));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 0i32..400, 0i32..400)
            .prop_map(|(x, y, w, h)| Rect::new(x.into(), y.into(), w.into(), h.into()))
    }

    proptest! {
        #[test]
        fn intersection_is_contained_in_both(a in rect(), b in rect()) {
            if let Some(i) = a.intersection(&b) {
                prop_assert!(a.contains(&i));
                prop_assert!(b.contains(&i));
                prop_assert!(!i.is_empty());
            } else {
                prop_assert!(!a.intersects(&b));
            }
        }
    }
}
