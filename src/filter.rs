//! Filters select the nodes a [`ContentList`](crate::ContentList) view
//! shows.
//!
//! A filter answers three questions about a node: does the view show it,
//! may it be added through the view, and may it be removed through the
//! view. By default the last two follow the first. Filters never change
//! the tree.
//!
//! ```rust
//! use xdom::filter::{ContentFilter, ElementFilter, Filter};
//! use xdom::Dom;
//!
//! let mut dom = Dom::new();
//! let p = dom.new_element("p")?;
//! let a = dom.new_element("a")?;
//! let text = dom.new_text("x")?;
//! dom.add_content(p, a)?;
//! dom.add_content(p, text)?;
//!
//! let elements = ElementFilter::named("a");
//! assert!(elements.matches(&dom, a));
//! assert!(!elements.matches(&dom, text));
//!
//! let either = ElementFilter::new().or(ContentFilter::new(ContentFilter::TEXT));
//! assert!(either.matches(&dom, text));
//! assert!(!either.clone().negate().matches(&dom, a));
//! # Ok::<(), xdom::Error>(())
//! ```

use crate::dom::{Dom, Node};
use crate::namespace::Namespace;
use crate::xmlvalue::{Value, ValueType};

/// The list a view is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The content of an element or document.
    Content,
    /// The attributes of an element.
    Attributes,
}

/// A node selection strategy for views.
pub trait Filter {
    /// Return true if the view shows this node.
    fn matches(&self, dom: &Dom, node: Node) -> bool;

    /// Return true if this node may be added through the view.
    fn can_add(&self, dom: &Dom, node: Node) -> bool {
        self.matches(dom, node)
    }

    /// Return true if this node may be removed through the view.
    fn can_remove(&self, dom: &Dom, node: Node) -> bool {
        self.matches(dom, node)
    }

    /// Return true if the filter shows every node that `container` can
    /// hold. Views use this to skip scanning, so it must never be true
    /// for a node `matches` would refuse.
    fn matches_all(&self, _container: Container) -> bool {
        false
    }

    /// Nodes matched by both filters.
    fn and<F: Filter>(self, other: F) -> And<Self, F>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Nodes matched by either filter.
    fn or<F: Filter>(self, other: F) -> Or<Self, F>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Nodes not matched by this filter.
    fn negate(self) -> Negate<Self>
    where
        Self: Sized,
    {
        Negate(self)
    }
}

/// Every content node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyContent;

impl Filter for AnyContent {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        !matches!(
            dom.value_type(node),
            ValueType::Attribute | ValueType::Document
        )
    }

    fn matches_all(&self, container: Container) -> bool {
        container == Container::Content
    }
}

/// Every attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAttribute;

impl Filter for AnyAttribute {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        dom.is_attribute(node)
    }

    fn matches_all(&self, container: Container) -> bool {
        container == Container::Attributes
    }
}

/// Elements, optionally restricted to a local name and a namespace URI.
#[derive(Debug, Clone, Default)]
pub struct ElementFilter {
    name: Option<String>,
    namespace: Option<Namespace>,
}

impl ElementFilter {
    /// Any element.
    pub fn new() -> Self {
        ElementFilter::default()
    }

    /// Elements with this local name, in any namespace.
    pub fn named(name: &str) -> Self {
        ElementFilter {
            name: Some(name.to_string()),
            namespace: None,
        }
    }

    /// Elements in this namespace, with any name.
    pub fn in_namespace(namespace: Namespace) -> Self {
        ElementFilter {
            name: None,
            namespace: Some(namespace),
        }
    }

    /// Elements with this local name in this namespace.
    pub fn named_ns(name: &str, namespace: Namespace) -> Self {
        ElementFilter {
            name: Some(name.to_string()),
            namespace: Some(namespace),
        }
    }
}

impl Filter for ElementFilter {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        let Some(element) = dom.element(node) else {
            return false;
        };
        if let Some(name) = &self.name {
            if element.name() != name {
                return false;
            }
        }
        if let Some(namespace) = &self.namespace {
            if element.namespace_uri() != namespace.uri() {
                return false;
            }
        }
        true
    }
}

/// Content nodes of the kinds in a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFilter {
    mask: u16,
}

impl ContentFilter {
    /// Elements.
    pub const ELEMENT: u16 = 1;
    /// CDATA sections.
    pub const CDATA: u16 = 1 << 1;
    /// Text.
    pub const TEXT: u16 = 1 << 2;
    /// Comments.
    pub const COMMENT: u16 = 1 << 3;
    /// Processing instructions.
    pub const PROCESSING_INSTRUCTION: u16 = 1 << 4;
    /// Entity references.
    pub const ENTITY_REF: u16 = 1 << 5;
    /// Doctypes.
    pub const DOC_TYPE: u16 = 1 << 6;

    const ALL: u16 = (1 << 7) - 1;
    const DOCUMENT: u16 = Self::ELEMENT | Self::COMMENT | Self::PROCESSING_INSTRUCTION | Self::DOC_TYPE;

    /// A filter for the kinds in `mask`.
    pub fn new(mask: u16) -> Self {
        ContentFilter {
            mask: mask & Self::ALL,
        }
    }

    /// Every kind of content.
    pub fn all() -> Self {
        ContentFilter { mask: Self::ALL }
    }

    /// The kinds allowed directly in a document.
    pub fn document_content() -> Self {
        ContentFilter {
            mask: Self::DOCUMENT,
        }
    }

    /// The kinds allowed in an element.
    pub fn element_content() -> Self {
        ContentFilter {
            mask: Self::ALL & !Self::DOC_TYPE,
        }
    }

    /// The current mask.
    pub fn mask(&self) -> u16 {
        self.mask
    }

    /// Also accept this kind of node.
    pub fn with(self, value_type: ValueType) -> Self {
        ContentFilter {
            mask: self.mask | Self::bit(value_type),
        }
    }

    /// Stop accepting this kind of node.
    pub fn without(self, value_type: ValueType) -> Self {
        ContentFilter {
            mask: self.mask & !Self::bit(value_type),
        }
    }

    /// Return true if this kind of node is accepted.
    pub fn accepts(&self, value_type: ValueType) -> bool {
        self.mask & Self::bit(value_type) != 0
    }

    fn bit(value_type: ValueType) -> u16 {
        match value_type {
            ValueType::Element => Self::ELEMENT,
            ValueType::CData => Self::CDATA,
            ValueType::Text => Self::TEXT,
            ValueType::Comment => Self::COMMENT,
            ValueType::ProcessingInstruction => Self::PROCESSING_INSTRUCTION,
            ValueType::EntityRef => Self::ENTITY_REF,
            ValueType::DocType => Self::DOC_TYPE,
            ValueType::Document | ValueType::Attribute => 0,
        }
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl Filter for ContentFilter {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        self.accepts(dom.value_type(node))
    }

    fn matches_all(&self, container: Container) -> bool {
        container == Container::Content && self.mask == Self::ALL
    }
}

/// Processing instructions, optionally only those with a given target.
#[derive(Debug, Clone, Default)]
pub struct ProcessingInstructionFilter {
    target: Option<String>,
}

impl ProcessingInstructionFilter {
    /// A filter for the given target, or for any target.
    pub fn new(target: Option<&str>) -> Self {
        ProcessingInstructionFilter {
            target: target.map(str::to_string),
        }
    }
}

impl Filter for ProcessingInstructionFilter {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        match dom.value(node) {
            Value::ProcessingInstruction(pi) => self
                .target
                .as_deref()
                .map_or(true, |target| pi.target() == target),
            _ => false,
        }
    }
}

/// See [`Filter::and`].
#[derive(Debug, Clone)]
pub struct And<A, B>(A, B);

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        self.0.matches(dom, node) && self.1.matches(dom, node)
    }

    fn can_add(&self, dom: &Dom, node: Node) -> bool {
        self.0.can_add(dom, node) && self.1.can_add(dom, node)
    }

    fn can_remove(&self, dom: &Dom, node: Node) -> bool {
        self.0.can_remove(dom, node) && self.1.can_remove(dom, node)
    }

    fn matches_all(&self, container: Container) -> bool {
        self.0.matches_all(container) && self.1.matches_all(container)
    }
}

/// See [`Filter::or`].
#[derive(Debug, Clone)]
pub struct Or<A, B>(A, B);

impl<A: Filter, B: Filter> Filter for Or<A, B> {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        self.0.matches(dom, node) || self.1.matches(dom, node)
    }

    fn can_add(&self, dom: &Dom, node: Node) -> bool {
        self.0.can_add(dom, node) || self.1.can_add(dom, node)
    }

    fn can_remove(&self, dom: &Dom, node: Node) -> bool {
        self.0.can_remove(dom, node) || self.1.can_remove(dom, node)
    }

    fn matches_all(&self, container: Container) -> bool {
        self.0.matches_all(container) || self.1.matches_all(container)
    }
}

/// See [`Filter::negate`].
#[derive(Debug, Clone)]
pub struct Negate<A>(A);

impl<A: Filter> Filter for Negate<A> {
    fn matches(&self, dom: &Dom, node: Node) -> bool {
        !self.0.matches(dom, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_filter_mask() {
        let filter = ContentFilter::element_content();
        assert!(filter.accepts(ValueType::Text));
        assert!(!filter.accepts(ValueType::DocType));
        let filter = filter.without(ValueType::Text).with(ValueType::DocType);
        assert!(!filter.accepts(ValueType::Text));
        assert!(filter.accepts(ValueType::DocType));
        assert!(ContentFilter::all().matches_all(Container::Content));
        assert!(!ContentFilter::all().matches_all(Container::Attributes));
        assert!(!ContentFilter::document_content().matches_all(Container::Content));
        assert_eq!(ContentFilter::new(u16::MAX), ContentFilter::all());
    }

    #[test]
    fn test_document_content() {
        let filter = ContentFilter::document_content();
        assert!(filter.accepts(ValueType::Element));
        assert!(filter.accepts(ValueType::Comment));
        assert!(!filter.accepts(ValueType::Text));
        assert!(!filter.accepts(ValueType::EntityRef));
    }

    #[test]
    fn test_processing_instruction_filter() {
        let mut dom = Dom::new();
        let a = dom.new_processing_instruction("a", "").unwrap();
        let b = dom.new_processing_instruction("b", "").unwrap();
        let comment = dom.new_comment("c").unwrap();
        let any = ProcessingInstructionFilter::new(None);
        assert!(any.matches(&dom, a));
        assert!(any.matches(&dom, b));
        assert!(!any.matches(&dom, comment));
        let only_a = ProcessingInstructionFilter::new(Some("a"));
        assert!(only_a.matches(&dom, a));
        assert!(!only_a.matches(&dom, b));
    }

    #[test]
    fn test_element_filter_uses_uri() {
        let mut dom = Dom::new();
        let ns = dom.namespace("x", "urn:x").unwrap();
        let e = dom.new_element_ns("e", ns).unwrap();
        let same_uri = Namespace::new_unchecked("other", "urn:x");
        assert!(ElementFilter::named_ns("e", same_uri).matches(&dom, e));
        assert!(!ElementFilter::named_ns("e", dom.no_namespace()).matches(&dom, e));
        assert!(ElementFilter::in_namespace(Namespace::new_unchecked("", "urn:x")).matches(&dom, e));
    }

    #[test]
    fn test_combinators() {
        let mut dom = Dom::new();
        let e = dom.new_element("e").unwrap();
        let f = dom.new_element("f").unwrap();
        let text = dom.new_text("t").unwrap();
        let filter = ElementFilter::new().and(ElementFilter::named("e").negate());
        assert!(!filter.matches(&dom, e));
        assert!(filter.matches(&dom, f));
        assert!(!filter.matches(&dom, text));
        assert!(AnyContent.or(ElementFilter::new()).matches_all(Container::Content));
        assert!(!AnyContent.and(ElementFilter::new()).matches_all(Container::Content));
        assert!(!AnyContent.matches_all(Container::Attributes));
        assert!(!AnyAttribute.matches_all(Container::Content));
        assert!(ElementFilter::new()
            .or(AnyAttribute)
            .matches_all(Container::Attributes));
        assert!(!ElementFilter::new()
            .or(AnyAttribute)
            .matches_all(Container::Content));
    }
}
