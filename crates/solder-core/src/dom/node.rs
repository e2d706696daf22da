//! Element nodes and identifiers.

use std::collections::HashMap;

/// Opaque handle to an element in a [`Tree`](super::Tree).
///
/// Node ids are arena indices; elements are never removed, so an id stays
/// valid for the lifetime of its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A single element: tag, id, classes, attributes, and tree links.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: HashMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl ElementData {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the element id, if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the class list in document order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns an attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the child ids in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the parent id, if the element is attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
