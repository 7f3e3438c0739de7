//! Background sources.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::rect::Rect;
use cgmath::{Deg, Point2, Rad, Vector2};
use core::fmt;
use std::sync::Arc;

/// The active background of a style manager.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Nothing is painted.
    None,
    Color(Color),
    /// A linear gradient; `angle` is in degrees, turning from the view's +x axis toward +y.
    Gradient { gradient: Gradient, angle: f64 },
    /// An image, repeated across the frame if `tile` is set and stretched otherwise.
    Image { image: Image, tile: bool },
}

impl Default for Background {
    fn default() -> Self {
        Background::None
    }
}

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient axis in `0..=1`.
    pub offset: f64,
    pub color: Color,
}

/// A linear color gradient.
///
/// Stops are always sorted by offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// A gradient between two colors.
    pub fn new(start: Color, end: Color) -> Gradient {
        Gradient {
            stops: vec![
                ColorStop {
                    offset: 0.,
                    color: start,
                },
                ColorStop {
                    offset: 1.,
                    color: end,
                },
            ],
        }
    }

    /// Creates a gradient from `(offset, color)` pairs.
    ///
    /// Offsets are clamped to `0..=1`; at least two stops are required.
    pub fn with_stops(stops: Vec<(f64, Color)>) -> Result<Gradient> {
        if stops.len() < 2 {
            return Err(Error::TooFewStops(stops.len()));
        }
        let mut stops: Vec<_> = stops
            .into_iter()
            .map(|(offset, color)| ColorStop {
                offset: if offset.is_nan() { 0. } else { offset.max(0.).min(1.) },
                color,
            })
            .collect();
        // stable, so equal offsets keep their given order
        stops.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(core::cmp::Ordering::Equal));
        Ok(Gradient { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Samples the gradient at `t`; values outside `0..=1` extend the end colors.
    pub fn color_at(&self, t: f64) -> Color {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0. {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }
}

/// Computes the start and end point of a gradient drawn into `frame` at `angle` degrees.
///
/// The angle is taken in the view's own coordinates: 0° points along +x and 90° along +y, so a
/// 90° gradient runs toward max y whichever way the view's y axis points. The axis goes through
/// the frame center and is just long enough for the end colors to reach the far corners.
pub fn gradient_axis(frame: Rect, angle: f64) -> (Point2<f64>, Point2<f64>) {
    let Rad(theta) = Rad::from(Deg(angle));
    let (sin, cos) = theta.sin_cos();
    let direction = Vector2::new(cos, sin);
    let half_length = (frame.size.x * cos.abs() + frame.size.y * sin.abs()) / 2.;
    let center = frame.center();
    (
        center - direction * half_length,
        center + direction * half_length,
    )
}

/// The largest tiled image that will be built, in pixels.
pub const MAX_TILED_PIXELS: usize = 1 << 26;

/// A bitmap image.
///
/// Pixels are stored row by row starting at the top and shared between clones.
#[derive(Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Arc<[Color]>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Image> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Image {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// An image filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Image> {
        Image::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, counted from the top left.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns true if both images share the same pixel buffer.
    pub fn shares_pixels(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Repeats this image to cover `width` by `height` pixels.
    ///
    /// The pattern starts at the top left corner, or at the bottom left if `anchor_bottom` is
    /// set. Returns `None` if the requested size is zero or larger than [`MAX_TILED_PIXELS`].
    pub fn tiled(&self, width: u32, height: u32, anchor_bottom: bool) -> Option<Image> {
        if width == 0 || height == 0 {
            return None;
        }
        let (src_w, src_h) = (self.width as usize, self.height as usize);
        let (w, h) = (width as usize, height as usize);
        match w.checked_mul(h) {
            Some(count) if count <= MAX_TILED_PIXELS => (),
            _ => return None,
        }
        // row offset so that the last output row lines up with the last source row
        let row_shift = if anchor_bottom {
            (src_h - h % src_h) % src_h
        } else {
            0
        };

        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            let src_y = (y + row_shift) % src_h;
            let row = &self.pixels[src_y * src_w..(src_y + 1) * src_w];
            pixels.extend((0..w).map(|x| row[x % src_w]));
        }

        Some(Image {
            width,
            height,
            pixels: pixels.into(),
        })
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
