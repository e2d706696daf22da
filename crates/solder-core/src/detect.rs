//! Marker-class detection.

use std::sync::Arc;

use crate::dom::Document;

/// Detects whether a provider's widget markup is present in the document.
///
/// Detection is a pure read of the tree at call time: markup added later
/// is never picked up, because activation only consults the detector once.
pub struct MarkupDetector {
    document: Arc<Document>,
}

impl MarkupDetector {
    /// Creates a detector over the given document.
    pub fn new(document: Arc<Document>) -> Self {
        Self { document }
    }

    /// Returns true when at least one element carries at least one of the
    /// marker classes. An empty marker list never matches.
    pub fn any_present(&self, classes: &[&str]) -> bool {
        self.document.has_any_class(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_markup_is_detected() {
        let document = Document::from_html(r#"<div class="fb-like"></div>"#);
        let detector = MarkupDetector::new(document);

        assert!(detector.any_present(&["fb-like", "fb-share-button"]));
    }

    #[test]
    fn absent_markup_is_not_detected() {
        let document = Document::from_html(r#"<div class="unrelated"></div>"#);
        let detector = MarkupDetector::new(document);

        assert!(!detector.any_present(&["fb-like", "fb-share-button"]));
    }

    #[test]
    fn empty_marker_list_never_matches() {
        let document = Document::from_html(r#"<div class="fb-like"></div>"#);
        let detector = MarkupDetector::new(document);

        assert!(!detector.any_present(&[]));
    }

    #[test]
    fn markup_added_after_detection_is_not_revisited() {
        let document = Document::new();
        let detector = MarkupDetector::new(Arc::clone(&document));
        assert!(!detector.any_present(&["g-follow"]));

        {
            let mut dom = document.dom_mut();
            let body = dom.body().unwrap();
            let div = dom.create_element("div");
            dom.add_class(div, "g-follow");
            dom.append_child(body, div);
        }

        // A fresh query sees it; the activation flow simply never asks again.
        assert!(detector.any_present(&["g-follow"]));
    }
}
