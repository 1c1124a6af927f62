//! In-memory document used by the controller tests
//!
//! Selector support is limited to `#id` and compound class selectors such as
//! `.time-slot` or `.session-block.locked`. Later nodes stack above earlier
//! ones, which matches document order for non-positioned siblings.

use std::collections::BTreeSet;

use crate::geometry::{Point, Rect};
use crate::surface::DragSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug)]
struct Node {
    id_attr: Option<String>,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    rect: Rect,
    visible: bool,
    displayed: bool,
    attached: bool,
    hit_testable: bool,
    cloned_from: Option<NodeId>,
}

#[derive(Debug)]
pub struct MockSurface {
    nodes: Vec<Node>,
    body_classes: BTreeSet<String>,
    styles: Vec<(String, String)>,
    pub proxies_created: usize,
    pub fail_proxy: bool,
}

impl MockSurface {
    pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    pub fn new() -> Self {
        let body = Node {
            id_attr: None,
            classes: BTreeSet::new(),
            parent: None,
            rect: Self::VIEWPORT,
            visible: true,
            displayed: true,
            attached: true,
            hit_testable: true,
            cloned_from: None,
        };
        Self {
            nodes: vec![body],
            body_classes: BTreeSet::new(),
            styles: Vec::new(),
            proxies_created: 0,
            fail_proxy: false,
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add(&mut self, parent: NodeId, classes: &[&str], rect: Rect) -> NodeId {
        self.push(Node {
            id_attr: None,
            classes: classes.iter().map(|class| class.to_string()).collect(),
            parent: Some(parent),
            rect,
            visible: true,
            displayed: true,
            attached: true,
            hit_testable: true,
            cloned_from: None,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: &NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: &NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |current| self.node(current).parent)
    }

    fn selector_matches(node: &Node, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return node.id_attr.as_deref() == Some(id);
        }
        let mut classes = selector.split('.').filter(|part| !part.is_empty()).peekable();
        classes.peek().is_some() && classes.all(|class| node.classes.contains(class))
    }

    // ===== ASSERTION HELPERS =====

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.ancestors(id).all(|ancestor| self.node(&ancestor).visible)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(&id).attached
    }

    /// Rect of a displayed indicator, `None` while hidden or removed.
    pub fn indicator_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(&id);
        (node.attached && node.displayed).then_some(node.rect)
    }

    pub fn attached_proxies(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.node(id).attached && self.node(id).cloned_from.is_some())
            .collect()
    }

    pub fn position(&self, id: NodeId) -> Point {
        self.node(&id).rect.origin()
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(style_id, _)| style_id == id)
            .map(|(_, css)| css.as_str())
    }
}

impl DragSurface for MockSurface {
    type Element = NodeId;

    fn query_all(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| id != scope && self.node(id).attached)
            .filter(|id| self.ancestors(*id).any(|ancestor| ancestor == *scope))
            .filter(|id| Self::selector_matches(self.node(id), selector))
            .collect()
    }

    fn matches(&self, element: &NodeId, selector: &str) -> bool {
        Self::selector_matches(self.node(element), selector)
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        self.ancestors(*element)
            .find(|ancestor| Self::selector_matches(self.node(ancestor), selector))
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.node(element).classes.contains(class)
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.node(element).rect
    }

    fn elements_from_point(&self, point: Point) -> Vec<NodeId> {
        (0..self.nodes.len())
            .rev()
            .map(NodeId)
            .filter(|id| {
                let node = self.node(id);
                node.attached
                    && node.displayed
                    && node.hit_testable
                    && node.rect.contains(point)
                    && self.is_visible(*id)
            })
            .collect()
    }

    fn has_element_with_id(&self, id: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| node.attached && node.id_attr.as_deref() == Some(id))
    }

    fn inject_style(&mut self, id: &str, css: &str) {
        self.styles.push((id.to_string(), css.to_string()));
        self.push(Node {
            id_attr: Some(id.to_string()),
            classes: BTreeSet::new(),
            parent: None,
            rect: Rect::default(),
            visible: true,
            displayed: false,
            attached: true,
            hit_testable: false,
            cloned_from: None,
        });
    }

    fn create_indicator(&mut self, class: &str) -> Option<NodeId> {
        let body = self.body();
        let id = self.add(body, &[class], Rect::default());
        let node = self.node_mut(&id);
        node.displayed = false;
        node.hit_testable = false;
        Some(id)
    }

    fn show_indicator(&mut self, indicator: &NodeId, rect: Rect) {
        let node = self.node_mut(indicator);
        node.rect = rect;
        node.displayed = true;
    }

    fn hide_indicator(&mut self, indicator: &NodeId) {
        self.node_mut(indicator).displayed = false;
    }

    fn create_proxy(&mut self, source: &NodeId, class: &str) -> Option<NodeId> {
        if self.fail_proxy {
            return None;
        }
        let mut proxy = self.node(source).clone();
        proxy.classes.insert(class.to_string());
        proxy.parent = Some(self.body());
        proxy.hit_testable = false;
        proxy.cloned_from = Some(*source);
        self.proxies_created += 1;
        Some(self.push(proxy))
    }

    fn move_proxy(&mut self, proxy: &NodeId, top_left: Point) {
        let node = self.node_mut(proxy);
        node.rect.left = top_left.x;
        node.rect.top = top_left.y;
    }

    fn remove_element(&mut self, element: &NodeId) {
        self.node_mut(element).attached = false;
    }

    fn set_visible(&mut self, element: &NodeId, visible: bool) {
        self.node_mut(element).visible = visible;
    }

    fn set_body_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }
}
