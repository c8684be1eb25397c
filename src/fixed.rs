//! A fixed representation of a tree of nodes.
//!
//! Trees in a [`Dom`] are mutable, but it is useful to have a fixed
//! representation of a subtree that you can create, compare and store
//! separately. The types in this module own all their data and have no
//! dependency on a `Dom`. Turn them into nodes with `build`, passing the
//! [`NodeFactory`] that should do the construction, and capture an existing
//! subtree with [`Dom::to_fixed_element`] or [`Dom::to_fixed_document`].
//!
//! With the `serde` feature enabled all types in this module can be
//! serialized and deserialized.
//!
//! ```rust
//! use xdom::fixed;
//! use xdom::CheckedFactory;
//!
//! let fixed_element = fixed::Element {
//!     name: "foo".to_string(),
//!     namespace: fixed::Namespace::default(),
//!     declarations: vec![],
//!     attributes: vec![],
//!     children: vec![fixed::Content::Text("Example".to_string())],
//! };
//!
//! let mut dom = xdom::Dom::new();
//! let node = fixed_element.build(&mut dom, &CheckedFactory)?;
//! assert_eq!(dom.element_text(node), "Example");
//! assert_eq!(dom.to_fixed_element(node)?, fixed_element);
//! # Ok::<(), xdom::Error>(())
//! ```

use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::factory::NodeFactory;
use crate::xmlvalue::Value;

/// A fixed representation of an XML document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Doctype, comments and processing instructions before the root
    /// element
    pub before: Vec<DocumentContent>,
    /// The root element
    pub root: Element,
    /// Comments and processing instructions after the root element
    pub after: Vec<DocumentContent>,
}

/// A fixed representation of a namespace. The default is no namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Namespace {
    /// Prefix. Empty string means the default namespace
    pub prefix: String,
    /// Namespace URI. Empty string means no namespace
    pub uri: String,
}

impl Namespace {
    /// A namespace with a prefix and URI.
    pub fn new(prefix: &str, uri: &str) -> Self {
        Namespace {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        }
    }
}

/// A fixed representation of an XML element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Local name
    pub name: String,
    /// Namespace of the element
    pub namespace: Namespace,
    /// Additional namespace declarations
    pub declarations: Vec<Namespace>,
    /// Attributes, in order
    pub attributes: Vec<Attribute>,
    /// Children
    pub children: Vec<Content>,
}

/// A fixed representation of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Local name
    pub name: String,
    /// Namespace; a namespace with a URI needs a prefix
    pub namespace: Namespace,
    /// Value
    pub value: String,
}

/// A fixed representation of element content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Content {
    /// A text node
    Text(String),
    /// A CDATA section
    CData(String),
    /// A comment node
    Comment(String),
    /// A processing instruction node
    ProcessingInstruction(ProcessingInstruction),
    /// An entity reference
    EntityRef(EntityRef),
    /// An element node
    Element(Element),
}

/// Content that is allowed next to the root element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentContent {
    /// A comment node
    Comment(String),
    /// A processing instruction node
    ProcessingInstruction(ProcessingInstruction),
    /// A doctype; only allowed before the root element
    DocType(DocType),
}

/// A fixed representation of a processing instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingInstruction {
    /// Target of processing instruction
    pub target: String,
    /// Raw data. Empty means no data
    pub data: String,
}

/// A fixed representation of an entity reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRef {
    /// Entity name
    pub name: String,
    /// Public ID
    pub public_id: Option<String>,
    /// System ID
    pub system_id: Option<String>,
}

/// A fixed representation of a doctype
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocType {
    /// Declared root element name
    pub element_name: String,
    /// Public ID
    pub public_id: Option<String>,
    /// System ID
    pub system_id: Option<String>,
    /// Internal subset
    pub internal_subset: Option<String>,
}

impl Document {
    /// Build a document node.
    ///
    /// Everything is linked through the factory, so with a
    /// [`CheckedFactory`](crate::CheckedFactory) a doctype in `after` is
    /// rejected like any other illegal document content. On failure every
    /// node created so far is freed again.
    pub fn build<F: NodeFactory>(&self, dom: &mut Dom, factory: &F) -> Result<Node, Error> {
        let document = factory.document(dom, None)?;
        if let Err(err) = self.build_into(dom, factory, document) {
            dom.dispose(document);
            return Err(err);
        }
        Ok(document)
    }

    fn build_into<F: NodeFactory>(&self, dom: &mut Dom, factory: &F, document: Node) -> Result<(), Error> {
        for content in &self.before {
            let node = content.build(dom, factory)?;
            add_or_dispose(dom, factory, document, node)?;
        }
        let root = self.root.build(dom, factory)?;
        add_or_dispose(dom, factory, document, root)?;
        for content in &self.after {
            let node = content.build(dom, factory)?;
            add_or_dispose(dom, factory, document, node)?;
        }
        Ok(())
    }
}

fn add_or_dispose<F: NodeFactory>(dom: &mut Dom, factory: &F, parent: Node, node: Node) -> Result<(), Error> {
    let result = factory.add_content(dom, parent, node);
    if result.is_err() {
        dom.dispose(node);
    }
    result
}

impl Element {
    /// Build a detached element node with its attributes and content. On
    /// failure every node created so far is freed again.
    pub fn build<F: NodeFactory>(&self, dom: &mut Dom, factory: &F) -> Result<Node, Error> {
        let namespace = factory.namespace(dom, &self.namespace.prefix, &self.namespace.uri)?;
        let element = factory.element(dom, &self.name, namespace)?;
        if let Err(err) = self.build_into(dom, factory, element) {
            dom.dispose(element);
            return Err(err);
        }
        Ok(element)
    }

    fn build_into<F: NodeFactory>(&self, dom: &mut Dom, factory: &F, element: Node) -> Result<(), Error> {
        for declaration in &self.declarations {
            let namespace = factory.namespace(dom, &declaration.prefix, &declaration.uri)?;
            factory.add_namespace_declaration(dom, element, namespace)?;
        }
        for attribute in &self.attributes {
            let namespace =
                factory.namespace(dom, &attribute.namespace.prefix, &attribute.namespace.uri)?;
            let node = factory.attribute(dom, &attribute.name, &attribute.value, namespace)?;
            if let Err(err) = factory.set_attribute(dom, element, node) {
                dom.dispose(node);
                return Err(err);
            }
        }
        for child in &self.children {
            let node = child.build(dom, factory)?;
            add_or_dispose(dom, factory, element, node)?;
        }
        Ok(())
    }
}

impl ProcessingInstruction {
    fn build<F: NodeFactory>(&self, dom: &mut Dom, factory: &F) -> Result<Node, Error> {
        factory.processing_instruction(dom, &self.target, &self.data)
    }
}

impl Content {
    /// Build a detached content node.
    pub fn build<F: NodeFactory>(&self, dom: &mut Dom, factory: &F) -> Result<Node, Error> {
        match self {
            Content::Text(text) => factory.text(dom, text),
            Content::CData(text) => factory.cdata(dom, text),
            Content::Comment(comment) => factory.comment(dom, comment),
            Content::ProcessingInstruction(pi) => pi.build(dom, factory),
            Content::EntityRef(entity_ref) => factory.entity_ref(
                dom,
                &entity_ref.name,
                entity_ref.public_id.as_deref(),
                entity_ref.system_id.as_deref(),
            ),
            Content::Element(element) => element.build(dom, factory),
        }
    }
}

impl DocumentContent {
    fn build<F: NodeFactory>(&self, dom: &mut Dom, factory: &F) -> Result<Node, Error> {
        match self {
            DocumentContent::Comment(comment) => factory.comment(dom, comment),
            DocumentContent::ProcessingInstruction(pi) => pi.build(dom, factory),
            DocumentContent::DocType(doc_type) => {
                let node = factory.doc_type(
                    dom,
                    &doc_type.element_name,
                    doc_type.public_id.as_deref(),
                    doc_type.system_id.as_deref(),
                )?;
                if let Some(data) = dom.doc_type_data_mut(node) {
                    data.set_internal_subset(doc_type.internal_subset.clone());
                }
                Ok(node)
            }
        }
    }
}

/// ## Fixed trees
impl Dom {
    /// Capture an element and everything below it as a fixed tree.
    pub fn to_fixed_element(&self, element: Node) -> Result<Element, Error> {
        let data = self.element(element).ok_or(Error::NotElement(element))?;
        let attributes = self
            .attributes(element)
            .filter_map(|attribute| self.attribute_data(attribute))
            .map(|attribute| Attribute {
                name: attribute.name().to_string(),
                namespace: fixed_namespace(attribute.namespace()),
                value: attribute.value().to_string(),
            })
            .collect();
        let children = self
            .content(element)
            .map(|child| self.to_fixed_content(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Element {
            name: data.name().to_string(),
            namespace: fixed_namespace(data.namespace()),
            declarations: data
                .additional_namespaces()
                .iter()
                .map(fixed_namespace)
                .collect(),
            attributes,
            children,
        })
    }

    /// Capture a document as a fixed tree. The document must have a root
    /// element.
    pub fn to_fixed_document(&self, document: Node) -> Result<Document, Error> {
        if !self.is_document(document) {
            return Err(Error::NotDocument(document));
        }
        let mut before = Vec::new();
        let mut root = None;
        let mut after = Vec::new();
        for child in self.content(document) {
            if self.is_element(child) {
                root = Some(self.to_fixed_element(child)?);
                continue;
            }
            let content = match self.value(child) {
                Value::Comment(comment) => DocumentContent::Comment(comment.get().to_string()),
                Value::ProcessingInstruction(pi) => {
                    DocumentContent::ProcessingInstruction(fixed_processing_instruction(pi))
                }
                Value::DocType(doc_type) => DocumentContent::DocType(DocType {
                    element_name: doc_type.element_name().to_string(),
                    public_id: doc_type.public_id().map(str::to_string),
                    system_id: doc_type.system_id().map(str::to_string),
                    internal_subset: doc_type.internal_subset().map(str::to_string),
                }),
                _ => continue,
            };
            if root.is_some() {
                after.push(content);
            } else {
                before.push(content);
            }
        }
        let root = root.ok_or_else(|| {
            Error::IllegalState("A document needs a root element".to_string())
        })?;
        Ok(Document {
            before,
            root,
            after,
        })
    }

    fn to_fixed_content(&self, node: Node) -> Result<Content, Error> {
        Ok(match self.value(node) {
            Value::Text(text) => Content::Text(text.get().to_string()),
            Value::CData(cdata) => Content::CData(cdata.get().to_string()),
            Value::Comment(comment) => Content::Comment(comment.get().to_string()),
            Value::ProcessingInstruction(pi) => {
                Content::ProcessingInstruction(fixed_processing_instruction(pi))
            }
            Value::EntityRef(entity_ref) => Content::EntityRef(EntityRef {
                name: entity_ref.name().to_string(),
                public_id: entity_ref.public_id().map(str::to_string),
                system_id: entity_ref.system_id().map(str::to_string),
            }),
            Value::Element(_) => Content::Element(self.to_fixed_element(node)?),
            _ => return Err(Error::NotParent(node)),
        })
    }
}

fn fixed_namespace(namespace: &crate::namespace::Namespace) -> Namespace {
    Namespace::new(namespace.prefix(), namespace.uri())
}

fn fixed_processing_instruction(pi: &crate::xmlvalue::ProcessingInstruction) -> ProcessingInstruction {
    ProcessingInstruction {
        target: pi.target().to_string(),
        data: pi.data().to_string(),
    }
}
