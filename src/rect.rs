//! Rectangles.

use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use std::ops;

/// A rectangle.
///
/// Coordinates are parent-relative; the y axis points down unless a view says otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

/// One of the four sides of a rectangle, named by coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns true if the rectangle encloses no finite area.
    ///
    /// Negative, NaN and infinite sizes count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.size.x.is_finite()
            && self.size.y.is_finite()
            && self.size.x > 0.
            && self.size.y > 0.)
    }

    /// Returns the area, or zero for empty rectangles.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            self.size.x * self.size.y
        }
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }

    /// Returns true if the two rectangles intersect.
    pub fn intersects(&self, rect: Rect) -> bool {
        let own_opposite = self.origin + self.size;
        let rect_opposite = rect.origin + rect.size;

        self.origin.x < rect_opposite.x
            && self.origin.y < rect_opposite.y
            && rect.origin.x < own_opposite.x
            && rect.origin.y < own_opposite.y
    }

    /// Returns the intersection rectangle.
    pub fn intersect(&self, rect: Rect) -> Option<Rect> {
        if !self.intersects(rect) {
            return None;
        }

        let min_x = self.min_x().max(rect.min_x());
        let min_y = self.min_y().max(rect.min_y());
        let max_x = self.max_x().min(rect.max_x());
        let max_y = self.max_y().min(rect.max_y());

        Some(Rect {
            origin: (min_x, min_y).into(),
            size: (max_x - min_x, max_y - min_y).into(),
        })
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Point2<f64>) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }

    /// Cuts a strip of `amount` off the given side.
    ///
    /// Returns `(slice, remainder)`. The amount is clamped to the extent of the rectangle along
    /// that axis, so the two parts always tile the original exactly.
    pub fn divide(&self, amount: f64, side: Side) -> (Rect, Rect) {
        let extent = match side {
            Side::MinX | Side::MaxX => self.size.x.max(0.),
            Side::MinY | Side::MaxY => self.size.y.max(0.),
        };
        let amount = amount.max(0.).min(extent);
        let rest = extent - amount;
        let (x, y) = (self.origin.x, self.origin.y);
        let (w, h) = (self.size.x, self.size.y);

        match side {
            Side::MinX => (
                Rect::new((x, y).into(), (amount, h).into()),
                Rect::new((x + amount, y).into(), (rest, h).into()),
            ),
            Side::MaxX => (
                Rect::new((x + rest, y).into(), (amount, h).into()),
                Rect::new((x, y).into(), (rest, h).into()),
            ),
            Side::MinY => (
                Rect::new((x, y).into(), (w, amount).into()),
                Rect::new((x, y + amount).into(), (w, rest).into()),
            ),
            Side::MaxY => (
                Rect::new((x, y + rest).into(), (w, amount).into()),
                Rect::new((x, y).into(), (w, rest).into()),
            ),
        }
    }
}

impl Default for Rect {
    fn default() -> Rect {
        Rect::zero()
    }
}

impl ops::Add<Point2<f64>> for Rect {
    type Output = Rect;
    fn add(self, point: Point2<f64>) -> Rect {
        Rect {
            origin: self.origin + point.to_vec(),
            size: self.size,
        }
    }
}
