//! Tree-based layout.
//!
//! Any element can take part in layout by implementing [`LayoutNode`]. The node only exposes its
//! geometry and relations; walking the tree and assigning frames is left to a
//! [`LayoutCoordinator`] such as [`LayoutManager`].

mod manager;

pub use manager::{Alignment, Constraints, LayoutManager, SizeRule};

use crate::rect::Rect;
use crate::view::ViewId;
use core::fmt;
use std::sync::Arc;

/// A shared reference to a layout node.
pub type NodeRef = Arc<dyn LayoutNode>;

/// A participant in the layout tree.
///
/// Nodes are shared through `Arc`, so setters take `&self` and implementors are expected to use
/// interior mutability. Parent references must not own the parent.
///
/// Keeping `parent` and `children` consistent with each other is up to whoever edits the tree;
/// this trait does not validate it.
pub trait LayoutNode: Send + Sync {
    /// A stable identifier, used by coordinators to keep per-node bookkeeping.
    fn id(&self) -> ViewId;

    /// The frame in parent coordinates.
    fn frame(&self) -> Rect;

    /// Sets the frame.
    ///
    /// Does not redraw or lay out children; that is the coordinator’s job.
    fn set_frame(&self, frame: Rect);

    /// The enclosing node, if any.
    fn parent(&self) -> Option<NodeRef>;

    /// Child nodes in order.
    ///
    /// This is a copy; modifying it does not change the tree.
    fn children(&self) -> Vec<NodeRef>;

    /// The coordinator responsible for this node.
    fn layout_manager(&self) -> Option<Arc<dyn LayoutCoordinator>>;

    /// Replaces the coordinator.
    ///
    /// The new coordinator must be returned by `layout_manager` as soon as this returns.
    /// Implementors should call [`LayoutCoordinator::node_detached`] on the previous coordinator
    /// and [`LayoutCoordinator::node_attached`] on the new one.
    fn set_layout_manager(&self, manager: Option<Arc<dyn LayoutCoordinator>>);
}

/// Walks layout trees and assigns frames.
pub trait LayoutCoordinator: fmt::Debug + Send + Sync {
    /// Called after a node starts using this coordinator.
    fn node_attached(&self, id: ViewId) {
        let _ = id;
    }

    /// Called after a node stops using this coordinator.
    fn node_detached(&self, id: ViewId) {
        let _ = id;
    }

    /// Lays out the subtree below `node`.
    fn refresh_layout(&self, node: &dyn LayoutNode);
}

/// Returns true if both references point at the same coordinator.
pub fn is_same_coordinator(a: &Arc<dyn LayoutCoordinator>, b: &Arc<dyn LayoutCoordinator>) -> bool {
    // compare data pointers only; vtable pointers may differ across codegen units
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Returns the topmost ancestor of a node (or the node itself).
pub fn root(node: &NodeRef) -> NodeRef {
    let mut current = Arc::clone(node);
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

/// Returns the number of ancestors of a node.
pub fn depth(node: &dyn LayoutNode) -> usize {
    let mut depth = 0;
    let mut parent = node.parent();
    while let Some(node) = parent {
        depth += 1;
        parent = node.parent();
    }
    depth
}

/// Converts a node’s frame to the coordinate space of its root.
pub fn frame_in_root(node: &dyn LayoutNode) -> Rect {
    let mut frame = node.frame();
    let mut parent = node.parent();
    while let Some(node) = parent {
        frame = frame + node.frame().origin;
        parent = node.parent();
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::Edges;
    use parking_lot::RwLock;
    use std::sync::Weak;

    /// A control that only implements the layout capability.
    struct PopUpButton {
        id: ViewId,
        frame: RwLock<Rect>,
        parent: RwLock<Option<Weak<dyn LayoutNode>>>,
        children: RwLock<Vec<NodeRef>>,
        manager: RwLock<Option<Arc<dyn LayoutCoordinator>>>,
    }

    impl PopUpButton {
        fn new(frame: Rect) -> Arc<PopUpButton> {
            Arc::new(PopUpButton {
                id: ViewId::new(),
                frame: RwLock::new(frame),
                parent: RwLock::new(None),
                children: RwLock::new(Vec::new()),
                manager: RwLock::new(None),
            })
        }

        fn push(parent: &Arc<PopUpButton>, child: Arc<PopUpButton>) {
            let weak: Weak<PopUpButton> = Arc::downgrade(parent);
            let weak: Weak<dyn LayoutNode> = weak;
            *child.parent.write() = Some(weak);
            parent.children.write().push(child);
        }
    }

    impl LayoutNode for PopUpButton {
        fn id(&self) -> ViewId {
            self.id
        }
        fn frame(&self) -> Rect {
            *self.frame.read()
        }
        fn set_frame(&self, frame: Rect) {
            *self.frame.write() = frame;
        }
        fn parent(&self) -> Option<NodeRef> {
            self.parent.read().as_ref().and_then(Weak::upgrade)
        }
        fn children(&self) -> Vec<NodeRef> {
            self.children.read().clone()
        }
        fn layout_manager(&self) -> Option<Arc<dyn LayoutCoordinator>> {
            self.manager.read().clone()
        }
        fn set_layout_manager(&self, manager: Option<Arc<dyn LayoutCoordinator>>) {
            let previous = std::mem::replace(&mut *self.manager.write(), manager.clone());
            if let Some(previous) = previous {
                previous.node_detached(self.id);
            }
            if let Some(manager) = manager {
                manager.node_attached(self.id);
            }
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new((x, y).into(), (w, h).into())
    }

    #[test]
    fn foreign_nodes_take_part_in_layout() {
        let manager = LayoutManager::new();
        let shared: Arc<dyn LayoutCoordinator> = manager.clone();
        let root = PopUpButton::new(rect(0., 0., 120., 40.));
        let child = PopUpButton::new(rect(0., 0., 1., 1.));
        PopUpButton::push(&root, Arc::clone(&child));

        root.set_layout_manager(Some(Arc::clone(&shared)));
        child.set_layout_manager(Some(Arc::clone(&shared)));
        manager.set_constraints(
            child.id(),
            Constraints {
                width: SizeRule::Fixed(20.),
                height: SizeRule::Fill,
                horizontal: Alignment::End,
                margins: Edges::new(4., 4., 4., 4.),
                ..Constraints::default()
            },
        );

        shared.refresh_layout(&*root);
        assert_eq!(child.frame(), rect(96., 4., 20., 32.));
        assert_eq!(frame_in_root(&*child), rect(96., 4., 20., 32.));

        let child_ref: NodeRef = child.clone();
        assert_eq!(super::root(&child_ref).id(), root.id());
        assert_eq!(depth(&*child), 1);
    }

    #[test]
    fn other_coordinators_are_left_alone() {
        let outer = LayoutManager::new();
        let inner = LayoutManager::new();
        let root = PopUpButton::new(rect(0., 0., 100., 100.));
        let child = PopUpButton::new(rect(1., 2., 3., 4.));
        PopUpButton::push(&root, Arc::clone(&child));

        root.set_layout_manager(Some(outer.clone()));
        child.set_layout_manager(Some(inner.clone()));
        outer.set_constraints(child.id(), Constraints::fill(Edges::all(0.)));
        inner.set_constraints(child.id(), Constraints::fill(Edges::all(0.)));

        outer.refresh_layout(&*root);
        assert_eq!(child.frame(), rect(1., 2., 3., 4.), "child belongs to another manager");

        inner.refresh_layout(&*root);
        assert_eq!(child.frame(), rect(0., 0., 100., 100.));
    }

    #[test]
    fn coordinator_identity() {
        let a: Arc<dyn LayoutCoordinator> = LayoutManager::new();
        let b: Arc<dyn LayoutCoordinator> = LayoutManager::new();
        assert!(is_same_coordinator(&a, &a.clone()));
        assert!(!is_same_coordinator(&a, &b));
    }
}
