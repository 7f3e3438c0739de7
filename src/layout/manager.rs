use super::{LayoutCoordinator, LayoutNode};
use crate::edges::Edges;
use crate::rect::Rect;
use crate::view::ViewId;
use log::{debug, trace};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// How a node’s size along one axis is derived from its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeRule {
    /// Keep whatever size the node currently has.
    Keep,
    /// A fixed size.
    Fixed(f64),
    /// All space between the margins.
    Fill,
    /// A fraction of the space between the margins.
    Fraction(f64),
}

/// Where a node is placed along one axis, between its margins.
///
/// `Start` is the left or top side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Keep the current position.
    Keep,
    Start,
    Center,
    End,
}

/// Layout constraints for a single node.
///
/// The default keeps the node’s frame unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub margins: Edges<f64>,
    pub width: SizeRule,
    pub height: SizeRule,
    pub horizontal: Alignment,
    pub vertical: Alignment,
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            margins: Edges::all(0.),
            width: SizeRule::Keep,
            height: SizeRule::Keep,
            horizontal: Alignment::Keep,
            vertical: Alignment::Keep,
        }
    }
}

impl Constraints {
    /// Fills the parent, leaving the given margins.
    pub fn fill(margins: Edges<f64>) -> Constraints {
        Constraints {
            margins,
            width: SizeRule::Fill,
            height: SizeRule::Fill,
            horizontal: Alignment::Start,
            vertical: Alignment::Start,
        }
    }

    /// Computes a frame inside a parent of the given size.
    pub fn resolve(&self, current: Rect, parent_size: (f64, f64)) -> Rect {
        let (x, width) = resolve_axis(
            current.origin.x,
            current.size.x,
            parent_size.0,
            self.margins.left,
            self.margins.right,
            self.width,
            self.horizontal,
        );
        let (y, height) = resolve_axis(
            current.origin.y,
            current.size.y,
            parent_size.1,
            self.margins.top,
            self.margins.bottom,
            self.height,
            self.vertical,
        );
        Rect::new((x, y).into(), (width, height).into())
    }
}

fn resolve_axis(
    position: f64,
    size: f64,
    parent: f64,
    margin_start: f64,
    margin_end: f64,
    rule: SizeRule,
    alignment: Alignment,
) -> (f64, f64) {
    let available = (parent - margin_start - margin_end).max(0.);
    let size = match rule {
        SizeRule::Keep => size,
        SizeRule::Fixed(size) => size,
        SizeRule::Fill => available,
        SizeRule::Fraction(fraction) => available * fraction,
    }
    .max(0.);

    let position = match (rule, alignment) {
        (SizeRule::Fill, _) => margin_start,
        (_, Alignment::Keep) => position,
        (_, Alignment::Start) => margin_start,
        (_, Alignment::Center) => margin_start + (available - size) / 2.,
        (_, Alignment::End) => parent - margin_end - size,
    };

    (position, size)
}

/// A layout coordinator shared by a subtree.
///
/// Keeps constraints for every node attached to it and applies them top-down.
#[derive(Debug, Default)]
pub struct LayoutManager {
    constraints: RwLock<HashMap<ViewId, Constraints>>,
}

impl LayoutManager {
    pub fn new() -> Arc<LayoutManager> {
        Arc::new(LayoutManager::default())
    }

    /// Starts tracking a node with default constraints. Existing constraints are kept.
    pub fn attach(&self, id: ViewId) {
        self.constraints.write().entry(id).or_default();
    }

    /// Forgets a node and its constraints.
    pub fn detach(&self, id: ViewId) {
        if self.constraints.write().remove(&id).is_some() {
            trace!("layout manager dropped constraints for {:?}", id);
        }
    }

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.constraints.read().contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.read().is_empty()
    }

    pub fn constraints(&self, id: ViewId) -> Option<Constraints> {
        self.constraints.read().get(&id).copied()
    }

    /// Sets a node’s constraints, attaching it if needed.
    pub fn set_constraints(&self, id: ViewId, constraints: Constraints) {
        self.constraints.write().insert(id, constraints);
    }

    fn manages(&self, node: &dyn LayoutNode) -> bool {
        match node.layout_manager() {
            Some(manager) => Arc::as_ptr(&manager) as *const () == self as *const Self as *const (),
            None => false,
        }
    }

    fn layout_children(&self, node: &dyn LayoutNode, visited: &mut usize) {
        let size = node.frame().size;
        for child in node.children() {
            if !self.manages(&*child) {
                // belongs to another coordinator
                continue;
            }
            if let Some(constraints) = self.constraints(child.id()) {
                let frame = constraints.resolve(child.frame(), (size.x, size.y));
                if frame != child.frame() {
                    child.set_frame(frame);
                }
            }
            *visited += 1;
            self.layout_children(&*child, visited);
        }
    }
}

impl LayoutCoordinator for LayoutManager {
    fn node_attached(&self, id: ViewId) {
        self.attach(id);
    }

    fn node_detached(&self, id: ViewId) {
        self.detach(id);
    }

    fn refresh_layout(&self, node: &dyn LayoutNode) {
        let mut visited = 0;
        self.layout_children(node, &mut visited);
        debug!("layout pass from {:?} visited {} nodes", node.id(), visited);
    }
}
