//! In-memory rendering surface with explicitly assigned geometry.
//!
//! `HeadlessSurface` does no layout: callers place every element with
//! [`HeadlessSurface::set_box`]. It is used by the test suite and by hosts that
//! compute layout themselves and only want the sticky decisions applied.

use std::collections::BTreeMap;

use crate::surface::{RenderSurface, TablePart};

/// Handle to a node in a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    offset_top: f64,
    outer_height: f64,
    outer_width: f64,
    width: f64,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            children: Vec::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            offset_top: 0.0,
            outer_height: 0.0,
            outer_width: 0.0,
            width: 0.0,
        }
    }
}

/// A flat arena of nodes forming one or more trees.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    nodes: Vec<Option<Node>>,
    scroll_top: f64,
    viewport_height: f64,
    style_writes: usize,
}

impl HeadlessSurface {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached root node.
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.insert(Node::new(tag, None))
    }

    /// Create a node appended to `parent`'s children.
    pub fn create_child(&mut self, parent: &NodeId, tag: &str) -> NodeId {
        let id = self.insert(Node::new(tag, Some(*parent)));
        if let Some(p) = self.node_mut(*parent) {
            p.children.push(id);
        }
        id
    }

    /// Place a node. Content width is set equal to the outer width.
    pub fn set_box(&mut self, id: &NodeId, offset_top: f64, outer_height: f64, outer_width: f64) {
        if let Some(node) = self.node_mut(*id) {
            node.offset_top = offset_top;
            node.outer_height = outer_height;
            node.outer_width = outer_width;
            node.width = outer_width;
        }
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Inline style value, if set.
    pub fn style(&self, id: &NodeId, property: &str) -> Option<&str> {
        self.node(*id)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn has_class(&self, id: &NodeId, class: &str) -> bool {
        self.node(*id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn tag(&self, id: &NodeId) -> Option<&str> {
        self.node(*id).map(|n| n.tag.as_str())
    }

    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        match self.node(*id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(*id).is_some()
    }

    /// Total number of `set_style`/`remove_style` calls that changed a value.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    fn children_tagged(&self, id: NodeId, tag: &str) -> impl Iterator<Item = NodeId> + '_ {
        let tag = tag.to_string();
        self.children(&id)
            .iter()
            .copied()
            .filter(move |c| self.tag(c) == Some(tag.as_str()))
    }

    fn collect_descendants(&self, id: NodeId, tag: &str, out: &mut Vec<NodeId>) {
        for child in self.children(&id) {
            if self.tag(child) == Some(tag) {
                out.push(*child);
            }
            self.collect_descendants(*child, tag, out);
        }
    }

    fn clone_subtree(&mut self, id: NodeId, parent: Option<NodeId>) -> Option<NodeId> {
        let mut copy = self.node(id)?.clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = parent;
        let new_id = self.insert(copy);
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child, Some(new_id)) {
                if let Some(node) = self.node_mut(new_id) {
                    node.children.push(child_copy);
                }
            }
        }
        Some(new_id)
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let children = self.children(&id).to_vec();
        for child in children {
            self.drop_subtree(child);
        }
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = None;
        }
    }
}

impl RenderSurface for HeadlessSurface {
    type Element = NodeId;

    fn find_part(&self, table: &NodeId, part: TablePart) -> Option<NodeId> {
        match part {
            TablePart::Header => self.children_tagged(*table, "thead").next(),
            TablePart::Footer => self.children_tagged(*table, "tfoot").next(),
            TablePart::Body => self.children_tagged(*table, "tbody").next(),
            TablePart::LastBodyRow => self
                .children_tagged(*table, "tbody")
                .flat_map(|body| self.children_tagged(body, "tr").collect::<Vec<_>>())
                .last(),
        }
    }

    fn cells(&self, section: &NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(*section, tag, &mut out);
        out
    }

    fn outer_height(&self, element: &NodeId) -> f64 {
        self.node(*element).map_or(0.0, |n| n.outer_height)
    }

    fn outer_width(&self, element: &NodeId) -> f64 {
        self.node(*element).map_or(0.0, |n| n.outer_width)
    }

    fn width(&self, element: &NodeId) -> f64 {
        self.node(*element).map_or(0.0, |n| n.width)
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.node(*element).map_or(0.0, |n| n.offset_top)
    }

    fn set_outer_width(&mut self, element: &NodeId, width: f64) {
        if let Some(node) = self.node_mut(*element) {
            node.outer_width = width;
            node.width = width;
        }
        self.set_style(element, "box-sizing", "border-box");
        self.set_style(element, "width", &format!("{width}px"));
    }

    fn clone_after(&mut self, element: &NodeId) -> Option<NodeId> {
        let parent = self.node(*element)?.parent?;
        let copy = self.clone_subtree(*element, Some(parent))?;
        let parent_node = self.node_mut(parent)?;
        let at = parent_node
            .children
            .iter()
            .position(|c| c == element)
            .map_or(parent_node.children.len(), |i| i + 1);
        parent_node.children.insert(at, copy);
        Some(copy)
    }

    fn remove(&mut self, element: &NodeId) {
        if let Some(parent) = self.node(*element).and_then(|n| n.parent) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| c != element);
            }
        }
        self.drop_subtree(*element);
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.node_mut(*element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        let Some(node) = self.node_mut(*element) else {
            return;
        };
        if node.styles.get(property).map(String::as_str) == Some(value) {
            return;
        }
        node.styles.insert(property.to_string(), value.to_string());
        self.style_writes += 1;
    }

    fn remove_style(&mut self, element: &NodeId, property: &str) {
        let Some(node) = self.node_mut(*element) else {
            return;
        };
        if node.styles.remove(property).is_some() {
            self.style_writes += 1;
        }
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
