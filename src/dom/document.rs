use crate::dom::node::{Node, NodeId, NodeSpec, Style};
use crate::dom::selector::Selector;
use crate::foundation::core::{Affine, Rect, Vec2, Viewport};
use crate::foundation::error::VitrineResult;

/// Arena-backed document tree plus the window state it is laid out against.
///
/// Layout is explicit: every node carries a `frame` relative to its parent's box
/// (or to the viewport for fixed nodes). Transforms from [`Style`] are applied on
/// top of layout when measuring, never to layout itself, the same split the
/// browser makes between `offsetHeight` and `getBoundingClientRect`.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    dead: Vec<bool>,
    root: NodeId,
    body: NodeId,
    viewport: Viewport,
    scroll_y: f64,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            dead: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            viewport,
            scroll_y: 0.0,
        };
        let full = viewport.rect();
        doc.nodes.push(Node::new(Vec::new(), full));
        doc.dead.push(false);
        doc.body = doc.append(doc.root, NodeSpec::new("", full));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    pub fn style(&self, id: NodeId) -> &Style {
        &self.nodes[id.idx()].style
    }

    pub fn style_mut(&mut self, id: NodeId) -> &mut Style {
        &mut self.nodes[id.idx()].style
    }

    /// Arena slots in use, removed nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len() && !self.dead[id.idx()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.idx()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.idx()].children
    }

    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = Node::new(spec.classes, spec.frame);
        node.fixed = spec.fixed;
        node.text = spec.text;
        node.background_image = spec.background_image;
        node.parent = Some(parent);
        self.nodes.push(node);
        self.dead.push(false);
        self.nodes[parent.idx()].children.push(id);
        id
    }

    /// Detach `id` and drop its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            self.dead[n.idx()] = true;
            stack.extend(std::mem::take(&mut self.nodes[n.idx()].children));
        }
    }

    /// Move `id` (with its subtree) to the end of `new_parent`'s children, laid out at `frame`.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, frame: Rect) {
        self.detach(id);
        self.nodes[id.idx()].parent = Some(new_parent);
        self.nodes[id.idx()].frame = frame;
        self.nodes[new_parent.idx()].children.push(id);
    }

    /// Take `id` (with its subtree) out of the tree without dropping it; [`Self::reparent`]
    /// attaches it again.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(p) = self.nodes[id.idx()].parent.take() {
            self.nodes[p.idx()].children.retain(|&c| c != id);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.idx()].has_class(class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let node = &mut self.nodes[id.idx()];
        if !node.has_class(class) {
            node.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.idx()].classes.retain(|c| c != class);
    }

    /// Inclusive ancestry test.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Descendants of `scope` in document (pre-)order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    pub fn query_all(&self, scope: NodeId, selector: &str) -> VitrineResult<Vec<NodeId>> {
        Ok(self.select_all(scope, &Selector::parse(selector)?))
    }

    pub fn query(&self, scope: NodeId, selector: &str) -> VitrineResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n)))
    }

    /// Whether the node or any ancestor is laid out against the viewport.
    pub fn is_fixed(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.nodes[n.idx()].fixed {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Untransformed box in document coordinates (viewport coordinates inside fixed subtrees).
    pub fn layout_rect(&self, id: NodeId) -> Rect {
        let mut rect = self.nodes[id.idx()].frame;
        let mut cur = id;
        while !self.nodes[cur.idx()].fixed {
            let Some(p) = self.parent(cur) else {
                break;
            };
            let o = self.nodes[p.idx()].frame.origin().to_vec2();
            rect = rect + o;
            cur = p;
        }
        rect
    }

    pub fn offset_height(&self, id: NodeId) -> f64 {
        self.nodes[id.idx()].frame.height()
    }

    /// Transformed box in viewport coordinates.
    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        let mut chain = vec![id];
        let mut cur = id;
        while !self.nodes[cur.idx()].fixed {
            let Some(p) = self.parent(cur) else {
                break;
            };
            chain.push(p);
            cur = p;
        }

        let total = chain.iter().rev().fold(Affine::IDENTITY, |acc, &n| {
            let layout = self.layout_rect(n);
            acc * self.nodes[n.idx()].style.transform(layout).to_affine(layout)
        });
        let visual = total.transform_rect_bbox(self.layout_rect(id));
        if self.is_fixed(id) {
            visual
        } else {
            visual - Vec2::new(0.0, self.scroll_y)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
