//! Graphics contexts.

use super::background::{Gradient, Image};
use crate::color::Color;
use crate::rect::Rect;
use cgmath::Point2;

/// A drawing target.
///
/// Coordinates are in the space of the view being drawn.
pub trait GraphicsContext {
    /// Pushes the current clip onto a stack.
    fn save(&mut self);

    /// Pops the clip pushed by the last `save`.
    fn restore(&mut self);

    /// Intersects the current clip with a rectangle.
    fn clip_to_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fills a rectangle with a linear gradient running from `start` to `end`.
    fn fill_linear_gradient(
        &mut self,
        rect: Rect,
        gradient: &Gradient,
        start: Point2<f64>,
        end: Point2<f64>,
    );

    /// Draws an image scaled to fill a rectangle.
    fn draw_image(&mut self, rect: Rect, image: &Image);
}

/// A recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Clip(Rect),
    FillRect {
        rect: Rect,
        color: Color,
    },
    LinearGradient {
        rect: Rect,
        gradient: Gradient,
        start: Point2<f64>,
        end: Point2<f64>,
    },
    Image {
        rect: Rect,
        image: Image,
    },
}

impl DrawCommand {
    /// Returns true if the command puts pixels on the target.
    pub fn is_paint(&self) -> bool {
        match self {
            DrawCommand::FillRect { .. }
            | DrawCommand::LinearGradient { .. }
            | DrawCommand::Image { .. } => true,
            DrawCommand::Save | DrawCommand::Restore | DrawCommand::Clip(_) => false,
        }
    }
}

/// A graphics context that records commands instead of drawing them.
///
/// Useful for previews and for replaying a draw pass onto another context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> DisplayList {
        DisplayList::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands that put pixels on the target, in order.
    pub fn paint_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|command| command.is_paint())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Replays all recorded commands onto another context.
    pub fn replay(&self, context: &mut dyn GraphicsContext) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => context.save(),
                DrawCommand::Restore => context.restore(),
                DrawCommand::Clip(rect) => context.clip_to_rect(*rect),
                DrawCommand::FillRect { rect, color } => context.fill_rect(*rect, *color),
                DrawCommand::LinearGradient {
                    rect,
                    gradient,
                    start,
                    end,
                } => context.fill_linear_gradient(*rect, gradient, *start, *end),
                DrawCommand::Image { rect, image } => context.draw_image(*rect, image),
            }
        }
    }
}

impl GraphicsContext for DisplayList {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_to_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_linear_gradient(
        &mut self,
        rect: Rect,
        gradient: &Gradient,
        start: Point2<f64>,
        end: Point2<f64>,
    ) {
        self.commands.push(DrawCommand::LinearGradient {
            rect,
            gradient: gradient.clone(),
            start,
            end,
        });
    }

    fn draw_image(&mut self, rect: Rect, image: &Image) {
        self.commands.push(DrawCommand::Image {
            rect,
            image: image.clone(),
        });
    }
}
