//! Layout and decoration for native views.
//!
//! # Conceptual overview
//! Trellis adds two things on top of whatever view hierarchy the platform provides: tree-based
//! layout, and decoration that views don’t have to draw themselves.
//!
//! ## Layout
//! Anything can take part in layout by implementing [`LayoutNode`], which exposes a frame, a
//! parent, children, and the [`LayoutCoordinator`] in charge of it. The node itself does nothing
//! with this information; a coordinator walks the tree top-down and writes frames back. One
//! coordinator is usually shared by a whole subtree. [`LayoutManager`] is the coordinator that
//! ships with this crate: it keeps per-node [`Constraints`] (margins, size rules, alignment).
//!
//! Parent references never own the parent. Keeping parents and children consistent is up to
//! whoever edits the tree.
//!
//! ## Styles
//! A [`StyleManager`] belongs to exactly one view and holds its background (a color, a gradient,
//! or a tiled or stretched image; only one at a time) and a border for each edge. When the view
//! draws, it hands its bounds and a [`GraphicsContext`] to the style manager, which paints the
//! background and then the border edges. Border edges are cut from the frame one after another,
//! clockwise from the top, so corners are never painted twice.
//!
//! ## Coordinate System
//! Frames are relative to the parent. The y axis points down by default; views may report
//! themselves as unflipped, in which case the top edge is at the maximum y coordinate.
//!
//! ## Threads
//! Everything here is meant to be used from the UI thread. Locks are only used so views can be
//! shared through `Arc`; drawing the same style manager from two threads at once is not
//! supported.

pub mod color;
pub mod edges;
mod error;
pub mod layout;
mod rect;
pub mod style;
mod view;

pub use color::Color;
pub use edges::{Edge, Edges};
pub use error::{Error, Result};
pub use layout::{
    Alignment, Constraints, LayoutCoordinator, LayoutManager, LayoutNode, NodeRef, SizeRule,
};
pub use rect::{Rect, Side};
pub use style::background::{Background, ColorStop, Gradient, Image};
pub use style::border::BorderSide;
pub use style::context::{DisplayList, DrawCommand, GraphicsContext};
pub use style::{StyleManager, Styled};
pub use view::{View, ViewId};
