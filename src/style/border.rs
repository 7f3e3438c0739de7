//! Borders.

use crate::color::Color;
use crate::edges::{Edge, Edges};
use crate::rect::{Rect, Side};

/// The border on one edge.
///
/// A width of zero draws nothing, whatever the color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSide {
    pub width: f64,
    pub color: Color,
}

impl Default for BorderSide {
    fn default() -> Self {
        BorderSide {
            width: 0.,
            color: Color::BLACK,
        }
    }
}

fn side_for(edge: Edge, flipped: bool) -> Side {
    match (edge, flipped) {
        (Edge::Left, _) => Side::MinX,
        (Edge::Right, _) => Side::MaxX,
        (Edge::Top, true) | (Edge::Bottom, false) => Side::MinY,
        (Edge::Top, false) | (Edge::Bottom, true) => Side::MaxY,
    }
}

/// Computes the rectangle covered by each border edge.
///
/// Edges are cut off `frame` one after another in [`Edge::CLOCKWISE`] order, each from what the
/// previous ones left over. Corners therefore belong to the earlier edge, and the strips never
/// overlap. Edges with no width, or with nothing left to cover, are `None`.
pub fn border_rects(frame: Rect, widths: &Edges<f64>, flipped: bool) -> Edges<Option<Rect>> {
    let mut rects = Edges::all(None);
    let mut remaining = frame;

    for &edge in Edge::CLOCKWISE.iter() {
        let width = *widths.get(edge);
        if !(width > 0.) {
            continue;
        }
        let (strip, rest) = remaining.divide(width, side_for(edge, flipped));
        remaining = rest;
        if !strip.is_empty() {
            *rects.get_mut(edge) = Some(strip);
        }
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new((x, y).into(), (w, h).into())
    }

    fn strips(rects: &Edges<Option<Rect>>) -> Vec<Rect> {
        Edge::CLOCKWISE
            .iter()
            .filter_map(|edge| *rects.get(*edge))
            .collect()
    }

    #[test]
    fn corners_tile_the_ring() {
        let frame = rect(0., 0., 100., 100.);
        let rects = border_rects(frame, &Edges::new(10., 5., 10., 5.), true);

        assert_eq!(rects.top, Some(rect(0., 0., 100., 10.)));
        assert_eq!(rects.right, Some(rect(95., 10., 5., 90.)));
        assert_eq!(rects.bottom, Some(rect(0., 90., 95., 10.)));
        assert_eq!(rects.left, Some(rect(0., 10., 5., 80.)));

        let strips = strips(&rects);
        for (i, a) in strips.iter().enumerate() {
            for b in &strips[i + 1..] {
                assert!(!a.intersects(*b), "{:?} overlaps {:?}", a, b);
            }
        }

        // disjoint strips whose area equals the ring area cover the ring exactly
        let inner = rect(5., 10., 90., 80.);
        let ring_area = frame.area() - inner.area();
        let total: f64 = strips.iter().map(Rect::area).sum();
        assert_eq!(total, ring_area);
        for strip in &strips {
            assert!(!strip.intersects(inner), "{:?} reaches into the content", strip);
            assert_eq!(strip.intersect(frame), Some(*strip), "{:?} leaves the frame", strip);
        }
    }

    #[test]
    fn zero_width_edges_are_skipped() {
        let rects = border_rects(rect(0., 0., 50., 50.), &Edges::new(0., 4., 0., -2.), true);
        assert_eq!(rects.top, None);
        assert_eq!(rects.bottom, None);
        assert_eq!(rects.left, None);
        assert_eq!(rects.right, Some(rect(46., 0., 4., 50.)));
    }

    #[test]
    fn unflipped_top_is_max_y() {
        let rects = border_rects(rect(0., 0., 20., 20.), &Edges::new(2., 0., 3., 0.), false);
        assert_eq!(rects.top, Some(rect(0., 18., 20., 2.)));
        assert_eq!(rects.bottom, Some(rect(0., 0., 20., 3.)));
    }

    #[test]
    fn oversized_borders_use_up_the_frame() {
        let rects = border_rects(rect(0., 0., 10., 10.), &Edges::all(8.), true);
        assert_eq!(rects.top, Some(rect(0., 0., 10., 8.)));
        assert_eq!(rects.right, Some(rect(2., 8., 8., 2.)));
        assert_eq!(rects.bottom, Some(rect(0., 8., 2., 2.)));
        assert_eq!(rects.left, None, "nothing is left for the last edge");
    }
}
