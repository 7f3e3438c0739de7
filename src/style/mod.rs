//! Decoration for views.
//!
//! A [`StyleManager`] holds everything needed to decorate a view (a background, and a border on
//! each edge) and paints it into a [`GraphicsContext`] on request, so views don’t need any drawing
//! code of their own. A view’s draw routine typically just calls
//! `style.draw_styles(self.bounds(), context, self)`.
//!
//! Drawing order is fixed: the background first, clipped to the frame, then the border edges,
//! clockwise from the top, each inset by the edges before it.

pub mod background;
pub mod border;
pub mod context;

use self::background::{gradient_axis, Background, Gradient, Image};
use self::border::{border_rects, BorderSide};
use self::context::GraphicsContext;
use crate::color::Color;
use crate::edges::{Edge, Edges};
use crate::error::{Error, Result};
use crate::rect::Rect;
use core::fmt;
use log::{debug, trace, warn};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Something that can be decorated by a style manager.
pub trait Styled: Send + Sync {
    /// The rectangle to decorate, in the view’s own coordinates.
    fn bounds(&self) -> Rect;

    /// Whether the y axis points down.
    fn is_flipped(&self) -> bool {
        true
    }
}

/// A tiled background image, along with what it was made for.
struct TileCache {
    width: u32,
    height: u32,
    anchor_bottom: bool,
    image: Image,
}

/// Owns the decorative state of one view and draws it.
///
/// The view is referenced weakly; the view is expected to own its style manager.
pub struct StyleManager {
    view: Weak<dyn Styled>,
    background: Background,
    border: Edges<BorderSide>,
    tile_cache: Mutex<Option<TileCache>>,
}

impl StyleManager {
    /// Creates a style manager for a view.
    pub fn new<V: Styled + 'static>(view: &Arc<V>) -> StyleManager {
        let view: Weak<V> = Arc::downgrade(view);
        let view: Weak<dyn Styled> = view;
        StyleManager::bound_to(view)
    }

    /// Creates a style manager from a weak reference.
    ///
    /// Meant for views that own their style manager and are built with `Arc::new_cyclic`.
    pub fn bound_to(view: Weak<dyn Styled>) -> StyleManager {
        StyleManager {
            view,
            background: Background::None,
            border: Edges::all(BorderSide::default()),
            tile_cache: Mutex::new(None),
        }
    }

    /// The bound view, if it still exists.
    pub fn view(&self) -> Option<Arc<dyn Styled>> {
        self.view.upgrade()
    }

    /// Binds this style manager to another view.
    pub fn set_view<V: Styled + 'static>(&mut self, view: &Arc<V>) {
        let view: Weak<V> = Arc::downgrade(view);
        let view: Weak<dyn Styled> = view;
        self.view = view;
        self.invalidate();
    }

    fn is_bound_to(&self, view: &dyn Styled) -> bool {
        self.view.as_ptr() as *const () == view as *const dyn Styled as *const ()
    }

    /// Drops cached rendering resources.
    fn invalidate(&mut self) {
        if self.tile_cache.get_mut().take().is_some() {
            trace!("style manager dropped its tile cache");
        }
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// The background color, if a flat color is the active background.
    pub fn background_color(&self) -> Option<Color> {
        match self.background {
            Background::Color(color) => Some(color),
            _ => None,
        }
    }

    /// The background gradient, if it is the active background.
    pub fn background_gradient(&self) -> Option<&Gradient> {
        match &self.background {
            Background::Gradient { gradient, .. } => Some(gradient),
            _ => None,
        }
    }

    /// The gradient angle in degrees, if a gradient is the active background.
    pub fn gradient_angle(&self) -> Option<f64> {
        match self.background {
            Background::Gradient { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// The background image, if it is the active background.
    pub fn background_image(&self) -> Option<&Image> {
        match &self.background {
            Background::Image { image, .. } => Some(image),
            _ => None,
        }
    }

    /// Whether the background image is tiled.
    pub fn tiles_image(&self) -> bool {
        match self.background {
            Background::Image { tile, .. } => tile,
            _ => false,
        }
    }

    fn set_background(&mut self, background: Background) {
        trace!("background set to {:?}", background);
        self.background = background;
        self.invalidate();
    }

    /// Makes a flat color the background.
    pub fn set_background_color(&mut self, color: Color) {
        self.set_background(Background::Color(color));
    }

    /// Makes a gradient the background.
    ///
    /// The gradient axis is computed from the frame at draw time, so resized views don’t need to
    /// call this again.
    pub fn set_background_gradient(&mut self, gradient: Gradient, angle: f64) {
        self.set_background(Background::Gradient { gradient, angle });
    }

    /// Makes an image the background, either tiled or stretched to fill the frame.
    pub fn set_background_image(&mut self, image: Image, tile: bool) {
        self.set_background(Background::Image { image, tile });
    }

    /// Removes the background.
    pub fn clear_background(&mut self) {
        self.set_background(Background::None);
    }

    pub fn border(&self) -> &Edges<BorderSide> {
        &self.border
    }

    pub fn border_color(&self, edge: Edge) -> Color {
        self.border.get(edge).color
    }

    pub fn border_width(&self, edge: Edge) -> f64 {
        self.border.get(edge).width
    }

    pub fn set_border_side(&mut self, edge: Edge, side: BorderSide) {
        *self.border.get_mut(edge) = side;
        self.invalidate();
    }

    /// Sets the same border color on all edges.
    pub fn set_border_color(&mut self, color: Color) {
        self.set_border_colors(color, color, color, color);
    }

    pub fn set_border_colors(&mut self, top: Color, right: Color, bottom: Color, left: Color) {
        let colors = Edges::new(top, right, bottom, left);
        for &edge in Edge::CLOCKWISE.iter() {
            self.border.get_mut(edge).color = *colors.get(edge);
        }
        trace!("border colors set to {:?}", colors);
        self.invalidate();
    }

    /// Sets the same border width on all edges.
    pub fn set_border_width(&mut self, width: f64) {
        self.set_border_widths(width, width, width, width);
    }

    pub fn set_border_widths(&mut self, top: f64, right: f64, bottom: f64, left: f64) {
        let widths = Edges::new(top, right, bottom, left);
        for &edge in Edge::CLOCKWISE.iter() {
            self.border.get_mut(edge).width = *widths.get(edge);
        }
        trace!("border widths set to {:?}", widths);
        self.invalidate();
    }

    /// Draws the bound view’s decoration into its bounds.
    pub fn draw(&self, context: &mut dyn GraphicsContext) -> Result<()> {
        let view = self.view().ok_or(Error::ViewDropped)?;
        self.draw_styles(view.bounds(), context, &*view);
        Ok(())
    }

    /// Paints the background and border into `frame`.
    ///
    /// `view` is normally the bound view; passing another one draws a preview against it.
    /// Empty frames draw nothing at all.
    pub fn draw_styles(&self, frame: Rect, context: &mut dyn GraphicsContext, view: &dyn Styled) {
        if frame.is_empty() {
            trace!("skipping style draw for empty frame {:?}", frame);
            return;
        }
        if !self.is_bound_to(view) {
            trace!("drawing styles against a view other than the bound one");
        }

        let flipped = view.is_flipped();
        context.save();
        context.clip_to_rect(frame);
        self.draw_background(frame, context, flipped);
        self.draw_border(frame, context, flipped);
        context.restore();
    }

    fn draw_background(&self, frame: Rect, context: &mut dyn GraphicsContext, flipped: bool) {
        match &self.background {
            Background::None => (),
            Background::Color(color) => context.fill_rect(frame, *color),
            Background::Gradient { gradient, angle } => {
                let (start, end) = gradient_axis(frame, *angle);
                context.fill_linear_gradient(frame, gradient, start, end);
            }
            Background::Image { image, tile: false } => context.draw_image(frame, image),
            Background::Image { image, tile: true } => {
                if let Some(tiled) = self.tiled_image(image, frame, flipped) {
                    // drawn at its pixel size; the clip trims the rounded-up edge
                    context.draw_image(Rect::new(frame.origin, tiled.size()), &tiled);
                }
            }
        }
    }

    /// Returns the tiled image for this frame, building it if the cached one doesn’t fit.
    fn tiled_image(&self, image: &Image, frame: Rect, flipped: bool) -> Option<Image> {
        let width = frame.size.x.ceil() as u32;
        let height = frame.size.y.ceil() as u32;
        let anchor_bottom = !flipped;

        let mut cache = self.tile_cache.lock();
        if let Some(cached) = &*cache {
            if cached.width == width
                && cached.height == height
                && cached.anchor_bottom == anchor_bottom
            {
                return Some(cached.image.clone());
            }
        }

        debug!("building {}x{} tiled background", width, height);
        let tiled = match image.tiled(width, height, anchor_bottom) {
            Some(tiled) => tiled,
            None => {
                warn!("not tiling a {}x{} background: too large", width, height);
                return None;
            }
        };
        *cache = Some(TileCache {
            width,
            height,
            anchor_bottom,
            image: tiled.clone(),
        });
        Some(tiled)
    }

    fn draw_border(&self, frame: Rect, context: &mut dyn GraphicsContext, flipped: bool) {
        let widths = self.border.map(|side| side.width);
        let rects = border_rects(frame, &widths, flipped);
        for &edge in Edge::CLOCKWISE.iter() {
            if let Some(rect) = rects.get(edge) {
                context.fill_rect(*rect, self.border.get(edge).color);
            }
        }
    }
}

impl fmt::Debug for StyleManager {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StyleManager")
            .field("background", &self.background)
            .field("border", &self.border)
            .field("tile_cached", &self.tile_cache.lock().is_some())
            .finish()
    }
}
