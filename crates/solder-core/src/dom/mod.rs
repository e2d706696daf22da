//! In-memory document model.
//!
//! Solder does not render anything; it only needs enough of a document to
//! answer "is this marker class present", "does an element with this id
//! exist", and to perform the two mutations the loaders require (insert a
//! script element before the first existing one, insert a container as the
//! first child of the body).
//!
//! - [`Tree`] — an element arena with ordered children and document-order
//!   traversal.
//! - [`Document`] — the shared ambient resource: the tree behind a lock,
//!   plus the document-scoped event bus and the global registry.
//!
//! Documents are built empty ([`Document::new`]) or ingested from real
//! HTML ([`Document::from_html`]).

mod document;
mod html;
mod node;
mod tree;

pub use document::Document;
pub use node::{ElementData, NodeId};
pub use tree::Tree;
