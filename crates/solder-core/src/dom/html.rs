//! HTML ingestion via `scraper`.
//!
//! Only elements survive ingestion: text, comments, and doctype nodes are
//! irrelevant to markup detection and script placement.

use scraper::{ElementRef, Html};

use super::node::NodeId;
use super::tree::Tree;

/// Parses an HTML document into a [`Tree`].
///
/// `scraper` normalizes fragments into a full `html > (head, body)`
/// document, so the resulting tree always has both structural elements.
pub(crate) fn ingest(html: &str) -> Tree {
    let parsed = Html::parse_document(html);
    let root_element = parsed.root_element();

    let mut tree = Tree::with_root(root_element.value().name());
    let root = tree.root();
    apply_attributes(&mut tree, root, root_element);
    build_children(&mut tree, root, root_element);
    tree
}

fn build_children(tree: &mut Tree, parent: NodeId, element: ElementRef<'_>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let node = tree.create_element(child_element.value().name());
            apply_attributes(tree, node, child_element);
            tree.append_child(parent, node);
            build_children(tree, node, child_element);
        }
    }
}

fn apply_attributes(tree: &mut Tree, node: NodeId, element: ElementRef<'_>) {
    for (name, value) in element.value().attrs() {
        match name {
            "id" => tree.set_id(node, value),
            "class" => {
                for class in value.split_whitespace() {
                    tree.add_class(node, class);
                }
            }
            _ => tree.set_attribute(node, name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingests_classes_ids_and_structure() {
        let tree = ingest(
            r#"<html><body>
                <div id="content" class="fb-like wide"></div>
                <script src="/app.js"></script>
            </body></html>"#,
        );

        assert!(tree.body().is_some());
        assert!(tree.has_any_class(&["fb-like"]));
        let content = tree.get_element_by_id("content").unwrap();
        assert!(tree.element(content).has_class("wide"));
        assert_eq!(tree.elements_by_tag("script").len(), 1);
    }

    #[test]
    fn fragment_is_normalized_into_a_full_document() {
        let tree = ingest(r#"<span class="g-plusone"></span>"#);

        assert!(tree.head().is_some());
        assert!(tree.body().is_some());
        assert!(tree.has_any_class(&["g-plusone"]));
    }

    #[test]
    fn attributes_other_than_id_and_class_are_kept() {
        let tree = ingest(r#"<html><head><script src="/boot.js" defer></script></head></html>"#);

        let script = tree.first_by_tag("script").unwrap();
        assert_eq!(tree.element(script).attribute("src"), Some("/boot.js"));
        assert!(tree.element(script).attribute("defer").is_some());
    }
}
