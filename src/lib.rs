#![forbid(unsafe_code)]

//! xdom is an in-memory object model for XML documents.
//!
//! All nodes (documents, elements, attributes, text, CDATA sections,
//! comments, processing instructions, entity references and doctypes) live
//! in a [`Dom`]. You refer to them with [`Node`] handles, and you inspect
//! and change the tree with methods on `Dom`.
//!
//! Every change keeps the tree well-formed and namespace consistent:
//!
//! - a node has at most one parent, and an element is never added below
//!   itself;
//! - a document has at most one root element and one doctype, and the
//!   doctype comes first;
//! - namespace prefixes never collide on an element;
//! - attributes are unique per element by local name and namespace URI.
//!
//! A change that would break one of these rules is refused with an
//! [`Error`] and leaves the tree as it was, including bulk changes such as
//! [`Dom::set_content`].
//!
//! ```rust
//! use xdom::Dom;
//!
//! let mut dom = Dom::new();
//! let ns = dom.namespace("x", "urn:example")?;
//! let root = dom.new_element_ns("root", ns.clone())?;
//! let doc = dom.new_document(Some(root), None)?;
//!
//! let item = dom.new_element_ns("item", ns.clone())?;
//! dom.add_content(root, item)?;
//! dom.add_text(item, "hello")?;
//! dom.set_attribute_value(item, "id", "1")?;
//!
//! assert_eq!(dom.child_text(root, "item", &ns).as_deref(), Some("hello"));
//!
//! // a node can only have one parent
//! assert!(dom.add_content(root, item).is_err());
//! // a document can only have one root element
//! let other = dom.new_element("other")?;
//! assert!(dom.add_content(doc, other).is_err());
//! # Ok::<(), xdom::Error>(())
//! ```
//!
//! Filtered, live views of content and attributes are available through
//! [`Dom::content_view`] and [`Dom::attribute_view`], and a depth-first
//! walk through [`Dom::descendants`]. Views do not borrow the `Dom`; they
//! notice changes made behind their back and report them as
//! [`Error::ConcurrentModification`].
//!
//! Tree builders create nodes through a [`NodeFactory`]. The
//! [`fixed`] module describes whole trees as plain values.

mod access;
mod attributes;
mod clone;
mod content;
mod creation;
mod descendants;
mod document;
mod dom;
mod element;
mod error;
mod factory;
pub mod filter;
pub mod fixed;
mod namespace;
#[cfg(feature = "proptest")]
pub mod proptest;
mod scope;
pub mod validator;
mod valueaccess;
mod view;
mod xmlvalue;

pub use descendants::Descendants;
pub use dom::{Dom, Node};
pub use error::Error;
pub use factory::{CheckedFactory, NodeFactory, TrustedFactory};
pub use namespace::{Namespace, NamespaceRegistry, XML_NAMESPACE_URI};
pub use view::{ContentList, ListCursor};
pub use xmlvalue::{
    normalize_string, Attribute, AttributeType, CData, Comment, DocType, Document, Element,
    EntityRef, ProcessingInstruction, Text, Value, ValueType,
};
