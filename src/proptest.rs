//! Proptest support for xdom
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. xdom helps you write a proptest by letting you
//! generate arbitrary XML trees as [`fixed`](crate::fixed) values.
//!
//! Generated trees are always legal: attributes are unique per element,
//! namespace prefixes never collide and every prefix is bound to one URI
//! throughout, so a tree builds with a
//! [`CheckedFactory`](crate::CheckedFactory) and captures back unchanged.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xdom = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use ahash::HashSet;
use proptest::prelude::*;

use crate::fixed::{
    Attribute, Content, DocType, Document, DocumentContent, Element, EntityRef, Namespace,
    ProcessingInstruction,
};

// (prefix, uri); each URI has exactly one prefix
const ELEMENT_NAMESPACES: &[(&str, &str)] = &[
    ("", ""),
    ("", "http://example.com/d"),
    ("x", "http://example.com/x"),
    ("y", "http://example.com/y"),
];
const PREFIXED_NAMESPACES: &[(&str, &str)] =
    &[("x", "http://example.com/x"), ("y", "http://example.com/y")];
const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s"];
const PI_NAMES: &[&str] = &["pi1", "pi2", "pi3", "pi4", "pi5"];
const ENTITY_NAMES: &[&str] = &["amp", "lt", "custom"];
const XML_STRING: &str = "[\u{0009}\u{000A}\u{0020}-\u{D7FF}\u{E000}-\u{FFFD}]{1,16}";

fn arb_namespace(namespaces: &'static [(&'static str, &'static str)]) -> impl Strategy<Value = Namespace> {
    prop::sample::select(namespaces).prop_map(|(prefix, uri)| Namespace::new(prefix, uri))
}

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (
        prop::sample::select(ATTRIBUTE_NAMES),
        prop_oneof![
            Just(Namespace::default()),
            arb_namespace(PREFIXED_NAMESPACES)
        ],
        XML_STRING,
    )
        .prop_map(|(name, namespace, value)| Attribute {
            name: name.to_string(),
            namespace,
            value,
        })
}

fn arb_comment() -> impl Strategy<Value = String> {
    XML_STRING.prop_filter("comment", |s| !s.contains('-'))
}

fn arb_processing_instruction() -> impl Strategy<Value = ProcessingInstruction> {
    (
        prop::sample::select(PI_NAMES),
        prop_oneof![
            Just(String::new()),
            XML_STRING.prop_filter("processing instruction data", |s| !s.contains("?>")),
        ],
    )
        .prop_map(|(target, data)| ProcessingInstruction {
            target: target.to_string(),
            data,
        })
}

fn arb_entity_ref() -> impl Strategy<Value = EntityRef> {
    prop::sample::select(ENTITY_NAMES).prop_map(|name| EntityRef {
        name: name.to_string(),
        public_id: None,
        system_id: None,
    })
}

fn arb_element_with(children: impl Strategy<Value = Vec<Content>>) -> impl Strategy<Value = Element> {
    (
        prop::sample::select(ELEMENT_NAMES),
        arb_namespace(ELEMENT_NAMESPACES),
        prop::collection::vec(arb_namespace(PREFIXED_NAMESPACES), 0..3),
        prop::collection::vec(arb_attribute(), 0..4),
        children,
    )
        .prop_map(|(name, namespace, declarations, attributes, children)| Element {
            name: name.to_string(),
            namespace,
            declarations: unduplicate_declarations(declarations),
            attributes: unduplicate_attributes(attributes),
            children,
        })
}

fn arb_fixed_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        XML_STRING.prop_map(Content::Text),
        XML_STRING
            .prop_filter("cdata", |s| !s.contains("]]>"))
            .prop_map(Content::CData),
        arb_comment().prop_map(Content::Comment),
        arb_processing_instruction().prop_map(Content::ProcessingInstruction),
        arb_entity_ref().prop_map(Content::EntityRef),
    ];

    leaf.prop_recursive(
        8,   // levels deep
        256, // maximum size of 256 nodes
        10,  // up to 10 items per collection
        |inner| arb_element_with(prop::collection::vec(inner, 0..10)).prop_map(Content::Element),
    )
}

/// Generate a random detached element.
pub fn arb_fixed_element() -> impl Strategy<Value = Element> {
    arb_element_with(prop::collection::vec(arb_fixed_content(), 0..4))
}

fn unduplicate_attributes(attributes: Vec<Attribute>) -> Vec<Attribute> {
    let mut seen = HashSet::default();
    attributes
        .into_iter()
        .filter(|attribute| seen.insert((attribute.name.clone(), attribute.namespace.uri.clone())))
        .collect()
}

fn unduplicate_declarations(declarations: Vec<Namespace>) -> Vec<Namespace> {
    let mut seen = HashSet::default();
    declarations
        .into_iter()
        .filter(|namespace| seen.insert(namespace.prefix.clone()))
        .collect()
}

fn arb_document_content() -> impl Strategy<Value = DocumentContent> {
    prop_oneof![
        arb_comment().prop_map(DocumentContent::Comment),
        arb_processing_instruction().prop_map(DocumentContent::ProcessingInstruction),
    ]
}

/// Configure the document strategy
#[derive(Default)]
pub struct Config {
    /// Can generate comments and processing instructions outside the root
    /// element
    pub content_outside_root: bool,
    /// Can generate a doctype
    pub doc_type: bool,
}

/// Generate a random XML document.
///
/// ```notrust
/// use proptest::prelude::*;
/// use xdom::proptest::arb_fixed_document;
/// use xdom::{CheckedFactory, Dom};
///
/// proptest! {
///   #[test]
///   fn test_builds(fixed in arb_fixed_document()) {
///     let mut dom = Dom::new();
///     prop_assert!(fixed.build(&mut dom, &CheckedFactory).is_ok());
///   }
/// }
/// ```
pub fn arb_fixed_document() -> impl Strategy<Value = Document> {
    arb_fixed_document_with_config(Config {
        content_outside_root: true,
        doc_type: true,
    })
}

/// Generate a random XML document, with configuration.
pub fn arb_fixed_document_with_config(config: Config) -> BoxedStrategy<Document> {
    let outside = if config.content_outside_root { 0..5 } else { 0..1 };
    let doc_type = config.doc_type;
    (
        prop::collection::vec(arb_document_content(), outside.clone()),
        prop::bool::ANY,
        arb_fixed_element(),
        prop::collection::vec(arb_document_content(), outside),
    )
        .prop_map(move |(mut before, with_doc_type, root, after)| {
            if doc_type && with_doc_type {
                before.push(DocumentContent::DocType(DocType {
                    element_name: root.name.clone(),
                    public_id: None,
                    system_id: None,
                    internal_subset: None,
                }));
            }
            Document {
                before,
                root,
                after,
            }
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use crate::factory::CheckedFactory;

    proptest! {
        #[test]
        fn test_arb_document_builds_checked(fixed in arb_fixed_document()) {
            let mut dom = Dom::new();
            let built = fixed.build(&mut dom, &CheckedFactory);
            prop_assert!(built.is_ok(), "Cannot build: {:?} {:?}", fixed, built.err());
        }
    }

    proptest! {
        #[test]
        fn test_arb_element_builds_checked(fixed in arb_fixed_element()) {
            let mut dom = Dom::new();
            let built = fixed.build(&mut dom, &CheckedFactory);
            prop_assert!(built.is_ok(), "Cannot build: {:?} {:?}", fixed, built.err());
        }
    }
}
