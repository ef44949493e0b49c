//! A ready-made [`Host`]: an arena-backed tree of boxes where any node may
//! own a [`Flow`] that lays out its children.
//!
//! Node ids are indices into the arena and are never reused, so a removed
//! node's id can't alias a new node. Resizing a node that owns a flow
//! re-solves that flow immediately, which in turn resizes nested flows on the
//! same call stack.
//!
//! ```
//! use boxflow::Rect;
//! use boxflow::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let root = scene.add_flow(None, Rect::new(0, 0, 200, 100));
//! let button = scene.add_box(Some(root), Rect::new(0, 0, 50, 20));
//! scene.set_padding(root, 0);
//! scene.rule(root, button, "<^");
//!
//! scene.draw(root);
//! assert_eq!(scene.bounds(button), Rect::new(0, 0, 50, 20));
//! ```

use alloc::vec::Vec;

use crate::flow::Flow;
use crate::geometry::Rect;
use crate::host::Host;
use crate::rule::RuleReport;

/// Handle to a node in a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Rect,
    flow: Option<Flow<NodeId>>,
    attached: bool,
    redraws: usize,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node that lays out its children with a [`Flow`].
    pub fn add_flow(&mut self, parent: Option<NodeId>, bounds: Rect) -> NodeId {
        self.push(parent, bounds, Some(Flow::new(bounds)))
    }

    /// Add a plain box.
    pub fn add_box(&mut self, parent: Option<NodeId>, bounds: Rect) -> NodeId {
        self.push(parent, bounds, None)
    }

    fn push(&mut self, parent: Option<NodeId>, bounds: Rect, flow: Option<Flow<NodeId>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            bounds,
            flow,
            attached: true,
            redraws: 0,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Detach `id` and its subtree from the scene. The ids stay dead.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }

        let mut pending = Vec::from([id]);
        while let Some(node) = pending.pop() {
            self.nodes[node.0].attached = false;
            pending.extend(self.nodes[node.0].children.iter().copied());
        }
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes[id.0].attached
    }

    pub fn bounds(&self, id: NodeId) -> Rect {
        self.nodes[id.0].bounds
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The flow owned by `id`, if any.
    pub fn flow(&self, id: NodeId) -> Option<&Flow<NodeId>> {
        self.nodes[id.0].flow.as_ref()
    }

    /// How many times the flow at `id` asked to be repainted.
    pub fn redraw_requests(&self, id: NodeId) -> usize {
        self.nodes[id.0].redraws
    }

    /// Attach `rule` to `child` inside the flow at `flow`.
    ///
    /// Returns an empty report when `flow` has no flow or `child` is not one
    /// of its children.
    pub fn rule(&mut self, flow: NodeId, child: NodeId, rule: &str) -> RuleReport {
        self.with_flow(flow, |f, host| f.rule(&*host, child, rule))
            .unwrap_or_default()
    }

    pub fn set_min_size(&mut self, flow: NodeId, child: NodeId, width: i32, height: i32) -> usize {
        self.nodes[flow.0]
            .flow
            .as_mut()
            .map_or(0, |f| f.set_min_size(child, width, height))
    }

    pub fn set_padding(&mut self, flow: NodeId, padding: i32) {
        if let Some(f) = self.nodes[flow.0].flow.as_mut() {
            f.set_padding(padding);
        }
    }

    /// Install a resize hook on the flow at `flow`.
    pub fn on_resize<F>(&mut self, flow: NodeId, hook: F)
    where
        F: FnMut(&mut Flow<NodeId>, &mut dyn Host<Id = NodeId, Coord = i32>) + 'static,
    {
        if let Some(f) = self.nodes[flow.0].flow.as_mut() {
            f.on_resize(hook);
        }
    }

    /// Mark the flow at `flow` stale and record a redraw request.
    pub fn invalidate(&mut self, flow: NodeId) {
        self.with_flow(flow, |f, host| f.invalidate(host));
    }

    /// Move and resize `id`. A flow at `id` is re-solved right away.
    pub fn resize(&mut self, id: NodeId, bounds: Rect) {
        self.nodes[id.0].bounds = bounds;
        self.with_flow(id, |f, host| f.resize(host, bounds));
    }

    /// Bring every stale flow in the subtree at `id` up to date, parents
    /// before children. Returns the number of flows that re-solved.
    pub fn draw(&mut self, id: NodeId) -> usize {
        let mut solved = usize::from(self.with_flow(id, |f, host| f.draw(host)) == Some(true));
        let children = self.nodes[id.0].children.clone();
        for child in children {
            solved += self.draw(child);
        }
        solved
    }

    /// Run `f` with the flow at `id` lifted out of the arena, so the flow
    /// and a view of its children can be borrowed together.
    pub(crate) fn with_flow<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Flow<NodeId>, &mut Children<'_>) -> R,
    ) -> Option<R> {
        let mut flow = self.nodes[id.0].flow.take()?;
        let result = f(
            &mut flow,
            &mut Children {
                scene: self,
                parent: id,
            },
        );
        self.nodes[id.0].flow = Some(flow);
        Some(result)
    }
}

/// The children of one node, seen as a [`Host`].
pub(crate) struct Children<'a> {
    scene: &'a mut Scene,
    parent: NodeId,
}

impl Host for Children<'_> {
    type Id = NodeId;
    type Coord = i32;

    fn child_count(&self) -> usize {
        self.scene.nodes[self.parent.0].children.len()
    }

    fn child_at(&self, index: usize) -> Option<NodeId> {
        self.scene.nodes[self.parent.0].children.get(index).copied()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.scene.nodes[self.parent.0]
            .children
            .iter()
            .position(|&c| c == id)
    }

    fn bounds(&self, id: NodeId) -> Rect {
        self.scene.nodes[id.0].bounds
    }

    fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.scene.resize(id, bounds);
    }

    fn request_redraw(&mut self) {
        self.scene.nodes[self.parent.0].redraws += 1;
    }
}
