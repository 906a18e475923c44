//! Arena element tree.
//!
//! The behaviors in the page crate never touch a real DOM; they bind to this
//! tree through the same vocabulary the markup uses (ids, class names,
//! data-attributes) and express state by toggling classes and attributes.
//! That attribute vocabulary is the wire format between markup and behavior
//! and is preserved verbatim.

use std::collections::HashMap;

/// Index of an element inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document is an arena of elements rooted at a single body node.
///
/// Queries return `Option`/empty collections rather than errors: a missing
/// target is always a valid outcome, never a failure.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<ElementData>,
}

impl Document {
    /// Create a document holding only the root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![ElementData {
                tag: "body".to_string(),
                ..ElementData::default()
            }],
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new child element under `parent` and return its id.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData {
            tag: tag.to_string(),
            parent: Some(parent),
            ..ElementData::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.nodes[node.0].attrs.remove(name);
    }

    pub fn attr<'a>(&'a self, node: NodeId, name: &str) -> Option<&'a str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.nodes[node.0].attrs.contains_key(name)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let data = &mut self.nodes[node.0];
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    /// Flip a class and report whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    /// Find the element carrying the given id attribute.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|n| self.nodes[n.0].id.as_deref() == Some(id))
    }

    /// All elements, preorder from the root.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Elements matching a predicate, in document order.
    pub fn select<F>(&self, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.walk().into_iter().filter(|n| pred(self, *n)).collect()
    }

    pub fn with_attr(&self, name: &str) -> Vec<NodeId> {
        self.select(|doc, n| doc.has_attr(n, name))
    }

    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.select(|doc, n| doc.has_class(n, class))
    }

    /// First descendant of `root` (excluding `root` itself) with the class.
    pub fn descendant_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    pub fn descendants_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn descendant_with_attr(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|n| self.has_attr(*n, name))
    }

    pub fn descendants_with_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.tag(*n) == tag)
            .collect()
    }

    /// Preorder descendants of `root`, excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Deep-copy the subtree rooted at `node` under `new_parent`.
    pub fn clone_subtree(&mut self, node: NodeId, new_parent: NodeId) -> NodeId {
        let tag = self.nodes[node.0].tag.clone();
        let copy = self.append(new_parent, &tag);
        self.nodes[copy.0].classes = self.nodes[node.0].classes.clone();
        self.nodes[copy.0].attrs = self.nodes[node.0].attrs.clone();
        self.nodes[copy.0].text = self.nodes[node.0].text.clone();
        let children: Vec<NodeId> = self.nodes[node.0].children.clone();
        for child in children {
            self.clone_subtree(child, copy);
        }
        copy
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
