//! Element arena with ordered children and document-order traversal.

use super::node::{ElementData, NodeId};
use crate::error::{DomError, DomResult};

/// A mutable element tree.
///
/// [`Tree::new`] creates the minimal `html > (head, body)` skeleton;
/// ingesting real HTML goes through
/// [`Document::from_html`](super::Document::from_html). Elements are
/// allocated in an arena and never freed, so [`NodeId`]s remain valid for
/// the tree's lifetime. Detaching via the insertion methods only unlinks.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<ElementData>,
    root: NodeId,
}

impl Tree {
    /// Creates a tree containing only `html > (head, body)`.
    pub fn new() -> Self {
        let mut tree = Self::with_root("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(tree.root, head);
        tree.append_child(tree.root, body);
        tree
    }

    /// Creates a tree with a bare root element and nothing else.
    pub(crate) fn with_root(tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![ElementData::new(tag)],
            root: NodeId(0),
        }
    }

    /// Returns the root element id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the first `<head>` element in document order, if any.
    pub fn head(&self) -> Option<NodeId> {
        self.first_by_tag("head")
    }

    /// Returns the first `<body>` element in document order, if any.
    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag("body")
    }

    /// Returns the number of elements in the tree, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a reference to an element's data.
    pub fn element(&self, node: NodeId) -> &ElementData {
        &self.nodes[node.0]
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Allocates a new detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementData::new(tag));
        id
    }

    /// Sets the element id.
    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) {
        self.nodes[node.0].id = Some(id.into());
    }

    /// Adds a class to the element's class list.
    pub fn add_class(&mut self, node: NodeId, class: impl Into<String>) {
        let class = class.into();
        if !self.nodes[node.0].has_class(&class) {
            self.nodes[node.0].classes.push(class);
        }
    }

    /// Sets an attribute on the element.
    pub fn set_attribute(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.nodes[node.0].attributes.insert(name.into(), value.into());
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends `child` as the last child of `parent`, detaching it first
    /// if it is attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `child` as the first child of `parent`, detaching it first
    /// if it is attached elsewhere.
    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.insert(0, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `child` immediately before `reference` under the
    /// reference's parent.
    ///
    /// Fails when `reference` is detached.
    pub fn insert_before(&mut self, child: NodeId, reference: NodeId) -> DomResult<()> {
        let parent = self.nodes[reference.0]
            .parent
            .ok_or_else(|| DomError::DetachedReference {
                tag: self.nodes[reference.0].tag.clone(),
            })?;
        self.detach(child);
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .expect("attached reference must be among its parent's children");
        self.nodes[parent.0].children.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the first element with the given id, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants()
            .find(|&node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    /// Returns the first element with the given tag, in document order.
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants().find(|&node| self.nodes[node.0].tag == tag)
    }

    /// Returns all elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants()
            .filter(|&node| self.nodes[node.0].tag == tag)
            .collect()
    }

    /// Returns all elements with the given id, in document order.
    ///
    /// A well-formed document has at most one, but ingested markup can
    /// carry duplicates; callers that care should check the count.
    pub fn elements_by_id(&self, id: &str) -> Vec<NodeId> {
        self.descendants()
            .filter(|&node| self.nodes[node.0].id.as_deref() == Some(id))
            .collect()
    }

    /// Returns whether any attached element carries at least one of the
    /// given classes. An empty class list never matches.
    pub fn has_any_class(&self, classes: &[&str]) -> bool {
        self.descendants()
            .any(|node| classes.iter().any(|class| self.nodes[node.0].has_class(class)))
    }

    /// Iterates attached elements in document order (preorder), starting
    /// at the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Preorder iterator over attached elements.
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children = &self.tree.nodes[node.0].children;
        self.stack.extend(children.iter().rev());
        Some(node)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classed_div(tree: &mut Tree, class: &str) -> NodeId {
        let div = tree.create_element("div");
        tree.add_class(div, class);
        div
    }

    #[test]
    fn new_tree_has_head_and_body() {
        let tree = Tree::new();
        assert!(tree.head().is_some());
        assert!(tree.body().is_some());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn insert_first_puts_child_ahead_of_existing_content() {
        let mut tree = Tree::new();
        let body = tree.body().unwrap();
        let first = classed_div(&mut tree, "existing");
        tree.append_child(body, first);

        let newcomer = tree.create_element("div");
        tree.set_id(newcomer, "fb-root");
        tree.insert_first(body, newcomer);

        assert_eq!(tree.element(body).children(), &[newcomer, first]);
    }

    #[test]
    fn insert_before_places_child_at_reference_position() {
        let mut tree = Tree::new();
        let head = tree.head().unwrap();
        let existing = tree.create_element("script");
        tree.append_child(head, existing);

        let injected = tree.create_element("script");
        tree.insert_before(injected, existing).unwrap();

        assert_eq!(tree.element(head).children(), &[injected, existing]);
    }

    #[test]
    fn insert_before_detached_reference_fails() {
        let mut tree = Tree::new();
        let detached = tree.create_element("script");
        let child = tree.create_element("script");

        let err = tree.insert_before(child, detached).unwrap_err();
        assert!(matches!(err, DomError::DetachedReference { .. }));
    }

    #[test]
    fn get_element_by_id_finds_first_in_document_order() {
        let mut tree = Tree::new();
        let body = tree.body().unwrap();
        let div = tree.create_element("div");
        tree.set_id(div, "fb-root");
        tree.append_child(body, div);

        assert_eq!(tree.get_element_by_id("fb-root"), Some(div));
        assert_eq!(tree.get_element_by_id("missing"), None);
    }

    #[test]
    fn has_any_class_matches_any_of_the_set() {
        let mut tree = Tree::new();
        let body = tree.body().unwrap();
        let div = classed_div(&mut tree, "twitter-share-button");
        tree.append_child(body, div);

        assert!(tree.has_any_class(&["fb-like", "twitter-share-button"]));
        assert!(!tree.has_any_class(&["fb-like"]));
    }

    #[test]
    fn has_any_class_is_false_for_empty_set() {
        let mut tree = Tree::new();
        let body = tree.body().unwrap();
        let div = classed_div(&mut tree, "fb-like");
        tree.append_child(body, div);

        assert!(!tree.has_any_class(&[]));
    }

    #[test]
    fn detached_elements_are_not_found() {
        let mut tree = Tree::new();
        let floating = tree.create_element("div");
        tree.set_id(floating, "floating");

        assert_eq!(tree.get_element_by_id("floating"), None);
    }
}
