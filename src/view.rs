use crate::layout::{is_same_coordinator, LayoutCoordinator, LayoutNode, NodeRef};
use crate::rect::Rect;
use crate::style::context::GraphicsContext;
use crate::style::{StyleManager, Styled};
use cgmath::Point2;
use core::{fmt, mem, ptr};
use log::{trace, warn};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// A unique identifier for a view.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32, u16, u16, [u8; 8]);

impl ViewId {
    pub fn new() -> ViewId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ViewId(a, b, c, *d)
    }
}

impl Default for ViewId {
    fn default() -> Self {
        ViewId::new()
    }
}

/// A plain rectangular view that takes part in layout and can be decorated.
///
/// Views are always handled through `Arc`. A view owns its subviews and its style manager; the
/// superview and the style manager’s view are weak references.
pub struct View {
    id: ViewId,
    flipped: bool,
    frame: RwLock<Rect>,
    superview: RwLock<Weak<View>>,
    subviews: RwLock<Vec<Arc<View>>>,
    layout_manager: RwLock<Option<Arc<dyn LayoutCoordinator>>>,
    style: RwLock<StyleManager>,
}

impl View {
    /// Creates a view whose y axis points down.
    pub fn new(frame: Rect) -> Arc<View> {
        View::build(frame, true)
    }

    /// Creates a view whose y axis points up.
    pub fn new_unflipped(frame: Rect) -> Arc<View> {
        View::build(frame, false)
    }

    fn build(frame: Rect, flipped: bool) -> Arc<View> {
        Arc::new_cyclic(|this: &Weak<View>| {
            let target: Weak<View> = this.clone();
            let target: Weak<dyn Styled> = target;
            View {
                id: ViewId::new(),
                flipped,
                frame: RwLock::new(frame),
                superview: RwLock::new(Weak::new()),
                subviews: RwLock::new(Vec::new()),
                layout_manager: RwLock::new(None),
                style: RwLock::new(StyleManager::bound_to(target)),
            }
        })
    }

    pub fn superview(&self) -> Option<Arc<View>> {
        self.superview.read().upgrade()
    }

    pub fn subviews(&self) -> Vec<Arc<View>> {
        self.subviews.read().clone()
    }

    /// Returns true if `ancestor` is above this view in the tree.
    pub fn is_descendant_of(&self, ancestor: &Arc<View>) -> bool {
        let mut current = self.superview();
        while let Some(view) = current {
            if Arc::ptr_eq(&view, ancestor) {
                return true;
            }
            current = view.superview();
        }
        false
    }

    /// Appends a subview, taking it out of its previous superview.
    ///
    /// If the subview has no layout manager, it and its descendants start using this view’s.
    /// Adding a view to itself or to one of its descendants is refused.
    pub fn add_subview(self: &Arc<Self>, subview: Arc<View>) {
        if Arc::ptr_eq(self, &subview) || self.is_descendant_of(&subview) {
            warn!(
                "refusing to add {:?} as a subview of {:?}: would create a cycle",
                subview.id, self.id
            );
            return;
        }

        subview.remove_from_superview();
        *subview.superview.write() = Arc::downgrade(self);
        self.subviews.write().push(Arc::clone(&subview));
        trace!("added {:?} to {:?}", subview.id, self.id);

        if let Some(manager) = self.layout_manager() {
            subview.adopt_layout_manager(&manager);
        }
    }

    /// Removes this view from its superview, if it has one.
    pub fn remove_from_superview(&self) {
        let superview = mem::replace(&mut *self.superview.write(), Weak::new());
        if let Some(superview) = superview.upgrade() {
            superview
                .subviews
                .write()
                .retain(|view| !ptr::eq(&**view, self));
            trace!("removed {:?} from {:?}", self.id, superview.id);
        }
    }

    fn adopt_layout_manager(&self, manager: &Arc<dyn LayoutCoordinator>) {
        if self.layout_manager().is_some() {
            return;
        }
        self.set_layout_manager(Some(Arc::clone(manager)));
        for subview in self.subviews() {
            subview.adopt_layout_manager(manager);
        }
    }

    /// Asks this view’s layout manager to lay out its subtree.
    pub fn refresh_layout(&self) {
        if let Some(manager) = self.layout_manager() {
            manager.refresh_layout(self);
        }
    }

    pub fn style(&self) -> RwLockReadGuard<'_, StyleManager> {
        self.style.read()
    }

    pub fn style_mut(&self) -> RwLockWriteGuard<'_, StyleManager> {
        self.style.write()
    }

    /// Draws this view’s decoration into its bounds.
    pub fn draw(&self, context: &mut dyn GraphicsContext) {
        self.style.read().draw_styles(self.bounds(), context, self);
    }
}

impl LayoutNode for View {
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
        self.superview().map(|view| view as NodeRef)
    }

    fn children(&self) -> Vec<NodeRef> {
        self.subviews
            .read()
            .iter()
            .map(|view| Arc::clone(view) as NodeRef)
            .collect()
    }

    fn layout_manager(&self) -> Option<Arc<dyn LayoutCoordinator>> {
        self.layout_manager.read().clone()
    }

    fn set_layout_manager(&self, manager: Option<Arc<dyn LayoutCoordinator>>) {
        let previous = mem::replace(&mut *self.layout_manager.write(), manager.clone());
        if let (Some(previous), Some(manager)) = (&previous, &manager) {
            if is_same_coordinator(previous, manager) {
                return;
            }
        }
        if let Some(previous) = previous {
            previous.node_detached(self.id);
        }
        if let Some(manager) = manager {
            manager.node_attached(self.id);
        }
    }
}

impl Styled for View {
    fn bounds(&self) -> Rect {
        self.frame().with_origin(Point2::new(0., 0.))
    }

    fn is_flipped(&self) -> bool {
        self.flipped
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let subviews: Vec<_> = self.subviews.read().iter().map(|view| view.id).collect();
        f.debug_struct("View")
            .field("id", &self.id)
            .field("frame", &self.frame())
            .field("flipped", &self.flipped)
            .field("subviews", &subviews)
            .field("layout_manager", &self.layout_manager.read().is_some())
            .field("style", &*self.style.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::edges::Edges;
    use crate::layout::{Constraints, LayoutManager};
    use crate::style::context::{DisplayList, DrawCommand};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new((x, y).into(), (w, h).into())
    }

    fn ids(nodes: &[NodeRef]) -> Vec<ViewId> {
        nodes.iter().map(|node| node.id()).collect()
    }

    #[test]
    fn test_tree_relations() {
        let root = View::new(rect(0., 0., 100., 100.));
        let a = View::new(rect(0., 0., 10., 10.));
        let b = View::new(rect(10., 0., 10., 10.));
        root.add_subview(Arc::clone(&a));
        root.add_subview(Arc::clone(&b));

        let parent = a.parent().expect("a should have a parent");
        assert_eq!(parent.id(), root.id(), "a’s parent should be root");
        assert_eq!(b.parent().map(|p| p.id()), Some(root.id()));
        assert_eq!(ids(&root.children()), vec![a.id(), b.id()], "children in insertion order");
        assert!(root.parent().is_none(), "root has no parent");

        // the returned list is a copy
        let mut children = root.children();
        children.clear();
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_reparenting() {
        let first = View::new(rect(0., 0., 50., 50.));
        let second = View::new(rect(0., 0., 50., 50.));
        let child = View::new(rect(0., 0., 5., 5.));

        first.add_subview(Arc::clone(&child));
        second.add_subview(Arc::clone(&child));
        assert!(first.children().is_empty(), "child should have left its old superview");
        assert_eq!(ids(&second.children()), vec![child.id()]);
        assert_eq!(child.parent().map(|p| p.id()), Some(second.id()));

        child.remove_from_superview();
        assert!(child.parent().is_none());
        assert!(second.children().is_empty());
    }

    #[test]
    fn test_cycles_are_refused() {
        let root = View::new(rect(0., 0., 50., 50.));
        let child = View::new(rect(0., 0., 5., 5.));
        root.add_subview(Arc::clone(&child));

        child.add_subview(Arc::clone(&root));
        root.add_subview(Arc::clone(&root));
        assert!(root.parent().is_none());
        assert_eq!(ids(&root.children()), vec![child.id()]);
        assert!(child.children().is_empty());
    }

    #[test]
    fn test_parent_is_weak() {
        let child = View::new(rect(0., 0., 5., 5.));
        {
            let root = View::new(rect(0., 0., 50., 50.));
            root.add_subview(Arc::clone(&child));
            assert!(child.parent().is_some());
        }
        assert!(child.parent().is_none(), "the superview should have been dropped");
    }

    #[test]
    fn test_reassigning_layout_manager() {
        let view = View::new(rect(0., 0., 10., 10.));
        let old = LayoutManager::new();
        let new = LayoutManager::new();

        view.set_layout_manager(Some(old.clone()));
        assert!(old.is_attached(view.id()));

        view.set_layout_manager(Some(new.clone()));
        let current = view.layout_manager().expect("manager should be set");
        let new_dyn: Arc<dyn LayoutCoordinator> = new.clone();
        assert!(is_same_coordinator(&current, &new_dyn));
        assert!(!old.is_attached(view.id()), "old manager should have let go");
        assert!(new.is_attached(view.id()));

        view.set_layout_manager(None);
        assert!(view.layout_manager().is_none());
        assert!(new.is_empty());
    }

    #[test]
    fn test_subtree_shares_layout_manager() {
        let manager = LayoutManager::new();
        let root = View::new(rect(0., 0., 200., 100.));
        root.set_layout_manager(Some(manager.clone()));

        let panel = View::new(rect(0., 0., 1., 1.));
        let inner = View::new(rect(0., 0., 1., 1.));
        panel.add_subview(Arc::clone(&inner));
        root.add_subview(Arc::clone(&panel));
        assert!(manager.is_attached(panel.id()));
        assert!(manager.is_attached(inner.id()));

        manager.set_constraints(panel.id(), Constraints::fill(Edges::all(10.)));
        manager.set_constraints(inner.id(), Constraints::fill(Edges::new(0., 0., 40., 0.)));
        root.refresh_layout();

        assert_eq!(panel.frame(), rect(10., 10., 180., 80.));
        assert_eq!(inner.frame(), rect(0., 0., 180., 40.));
        assert_eq!(crate::layout::frame_in_root(&*inner), rect(10., 10., 180., 40.));
        assert_eq!(crate::layout::depth(&*inner), 2);
    }

    #[test]
    fn test_set_frame_does_not_propagate() {
        let manager = LayoutManager::new();
        let root = View::new(rect(0., 0., 100., 100.));
        root.set_layout_manager(Some(manager.clone()));
        let child = View::new(rect(0., 0., 1., 1.));
        root.add_subview(Arc::clone(&child));
        manager.set_constraints(child.id(), Constraints::fill(Edges::all(0.)));

        root.set_frame(rect(0., 0., 300., 300.));
        assert_eq!(child.frame(), rect(0., 0., 1., 1.));
        root.refresh_layout();
        assert_eq!(child.frame(), rect(0., 0., 300., 300.));
    }

    #[test]
    fn test_view_draws_its_bounds() {
        let view = View::new(rect(40., 30., 20., 10.));
        view.style_mut().set_background_color(Color::WHITE);

        let mut list = DisplayList::new();
        view.draw(&mut list);
        let paints: Vec<_> = list.paint_commands().cloned().collect();
        assert_eq!(
            paints,
            vec![DrawCommand::FillRect {
                rect: rect(0., 0., 20., 10.),
                color: Color::WHITE,
            }]
        );

        let mut bound = DisplayList::new();
        view.style()
            .draw(&mut bound)
            .expect("the bound view is alive");
        assert_eq!(bound, list);
    }

    #[test]
    fn test_unflipped_view_puts_top_border_at_max_y() {
        let view = View::new_unflipped(rect(5., 5., 30., 20.));
        assert!(!view.is_flipped());
        view.style_mut().set_border_widths(3., 0., 0., 0.);

        let mut list = DisplayList::new();
        view.draw(&mut list);
        let paints: Vec<_> = list.paint_commands().cloned().collect();
        assert_eq!(
            paints,
            vec![DrawCommand::FillRect {
                rect: rect(0., 17., 30., 3.),
                color: Color::BLACK,
            }]
        );
    }
}
