//! Minimal f64 geometry for the panel canvas.
//!
//! Positions are top-left corners in canvas coordinates, X growing right and
//! Y growing down. Everything is `f64`; rounding to device pixels is the
//! rendering layer's job.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point (or translation) in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A width/height pair in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub loc: Point,
    pub size: Size,
}

impl Point {
    pub const ZERO: Self = Self { x: 0., y: 0. };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn downscale(self, factor: f64) -> Self {
        Self::new(self.x / factor, self.y / factor)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(self) -> f64 {
        self.w * self.h
    }

    /// The size reinterpreted as a translation from the top-left corner.
    pub fn to_point(self) -> Point {
        Point::new(self.w, self.h)
    }
}

impl Mul<f64> for Size {
    type Output = Size;
    fn mul(self, rhs: f64) -> Size {
        Size::new(self.w * rhs, self.h * rhs)
    }
}

impl Rect {
    pub fn new(loc: Point, size: Size) -> Self {
        Self { loc, size }
    }

    pub fn from_extents(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Size::new(x1 - x0, y1 - y0))
    }

    pub fn left(&self) -> f64 {
        self.loc.x
    }

    pub fn top(&self) -> f64 {
        self.loc.y
    }

    pub fn right(&self) -> f64 {
        self.loc.x + self.size.w
    }

    pub fn bottom(&self) -> f64 {
        self.loc.y + self.size.h
    }

    pub fn center(&self) -> Point {
        self.loc + self.size.to_point().downscale(2.)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.left() <= point.x
            && point.x <= self.right()
            && self.top() <= point.y
            && point.y <= self.bottom()
    }

    /// Grows the rectangle by `amount` on every side.
    ///
    /// A negative amount shrinks it; the size is not allowed to go negative.
    pub fn expanded(&self, amount: f64) -> Rect {
        let size = Size::new(
            f64::max(0., self.size.w + amount * 2.),
            f64::max(0., self.size.h + amount * 2.),
        );
        Rect::new(self.loc - Point::new(amount, amount), size)
    }

    pub fn intersection(&self, other: Rect) -> Option<Rect> {
        let x0 = f64::max(self.left(), other.left());
        let y0 = f64::max(self.top(), other.top());
        let x1 = f64::min(self.right(), other.right());
        let y1 = f64::min(self.bottom(), other.bottom());
        if x0 < x1 && y0 < y1 {
            Some(Rect::from_extents(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: Rect) -> Rect {
        Rect::from_extents(
            f64::min(self.left(), other.left()),
            f64::min(self.top(), other.top()),
            f64::max(self.right(), other.right()),
            f64::max(self.bottom(), other.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_touching_rects_is_empty() {
        let a = Rect::new(Point::ZERO, Size::new(100., 100.));
        let b = Rect::new(Point::new(100., 0.), Size::new(100., 100.));
        assert_eq!(a.intersection(b), None);
    }

    #[test]
    fn union_envelops_both() {
        let a = Rect::new(Point::new(10., 20.), Size::new(30., 40.));
        let b = Rect::new(Point::new(100., 5.), Size::new(20., 10.));
        let u = a.union(b);
        assert_eq!(u, Rect::from_extents(10., 5., 120., 60.));
    }

    #[test]
    fn expanded_clamps_negative_sizes() {
        let r = Rect::new(Point::ZERO, Size::new(10., 10.));
        let shrunk = r.expanded(-20.);
        assert_eq!(shrunk.size, Size::new(0., 0.));
    }
}
