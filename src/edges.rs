//! Per-edge values.

/// A rectangle edge, as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges, clockwise from the top.
    ///
    /// This order is used by the multi-edge setters and for border insetting.
    pub const CLOCKWISE: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// One value for each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Edges<T> {
    pub fn new(top: T, right: T, bottom: T, left: T) -> Edges<T> {
        Edges {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn get(&self, edge: Edge) -> &T {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Edges<U> {
        Edges {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl<T: Clone> Edges<T> {
    /// The same value on all four edges.
    pub fn all(value: T) -> Edges<T> {
        Edges {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }
}
