use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::namespace::Namespace;
use crate::xmlvalue::{
    Attribute, CData, Comment, DocType, Document, Element, EntityRef, ProcessingInstruction,
    Text, Value,
};

/// The construction interface used by tree builders.
///
/// A builder that turns some input into a tree (a parser, the
/// [`fixed`](crate::fixed) module) creates and links nodes only through a
/// factory. [`CheckedFactory`] runs every check; [`TrustedFactory`] skips
/// them for input that was already validated.
pub trait NodeFactory {
    /// Get a namespace for a prefix and URI.
    fn namespace(&self, dom: &mut Dom, prefix: &str, uri: &str) -> Result<Namespace, Error>;

    /// Create an element.
    fn element(&self, dom: &mut Dom, name: &str, namespace: Namespace) -> Result<Node, Error>;

    /// Create an attribute.
    fn attribute(&self, dom: &mut Dom, name: &str, value: &str, namespace: Namespace) -> Result<Node, Error>;

    /// Create a text node.
    fn text(&self, dom: &mut Dom, text: &str) -> Result<Node, Error>;

    /// Create a CDATA section.
    fn cdata(&self, dom: &mut Dom, text: &str) -> Result<Node, Error>;

    /// Create a comment.
    fn comment(&self, dom: &mut Dom, text: &str) -> Result<Node, Error>;

    /// Create a processing instruction.
    fn processing_instruction(&self, dom: &mut Dom, target: &str, data: &str) -> Result<Node, Error>;

    /// Create an entity reference.
    fn entity_ref(
        &self,
        dom: &mut Dom,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error>;

    /// Create a doctype.
    fn doc_type(
        &self,
        dom: &mut Dom,
        element_name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error>;

    /// Create a document, optionally with a root element.
    fn document(&self, dom: &mut Dom, root: Option<Node>) -> Result<Node, Error>;

    /// Append a node to the content of an element or document.
    fn add_content(&self, dom: &mut Dom, parent: Node, child: Node) -> Result<(), Error>;

    /// Add an attribute to an element.
    fn set_attribute(&self, dom: &mut Dom, element: Node, attribute: Node) -> Result<(), Error>;

    /// Declare a namespace on an element.
    fn add_namespace_declaration(&self, dom: &mut Dom, element: Node, namespace: Namespace) -> Result<(), Error>;
}

/// A factory that validates names and data and enforces every structural
/// rule, through the regular [`Dom`] API.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedFactory;

impl NodeFactory for CheckedFactory {
    fn namespace(&self, dom: &mut Dom, prefix: &str, uri: &str) -> Result<Namespace, Error> {
        dom.namespace(prefix, uri)
    }

    fn element(&self, dom: &mut Dom, name: &str, namespace: Namespace) -> Result<Node, Error> {
        dom.new_element_ns(name, namespace)
    }

    fn attribute(&self, dom: &mut Dom, name: &str, value: &str, namespace: Namespace) -> Result<Node, Error> {
        dom.new_attribute_ns(name, value, namespace)
    }

    fn text(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        dom.new_text(text)
    }

    fn cdata(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        dom.new_cdata(text)
    }

    fn comment(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        dom.new_comment(text)
    }

    fn processing_instruction(&self, dom: &mut Dom, target: &str, data: &str) -> Result<Node, Error> {
        dom.new_processing_instruction(target, data)
    }

    fn entity_ref(
        &self,
        dom: &mut Dom,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        dom.new_entity_ref(name, public_id, system_id)
    }

    fn doc_type(
        &self,
        dom: &mut Dom,
        element_name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        dom.new_doc_type(element_name, public_id, system_id)
    }

    fn document(&self, dom: &mut Dom, root: Option<Node>) -> Result<Node, Error> {
        dom.new_document(root, None)
    }

    fn add_content(&self, dom: &mut Dom, parent: Node, child: Node) -> Result<(), Error> {
        dom.add_content(parent, child)
    }

    fn set_attribute(&self, dom: &mut Dom, element: Node, attribute: Node) -> Result<(), Error> {
        dom.set_attribute(element, attribute).map(|_| ())
    }

    fn add_namespace_declaration(&self, dom: &mut Dom, element: Node, namespace: Namespace) -> Result<(), Error> {
        dom.add_namespace_declaration(element, namespace)
    }
}

/// A factory for input that is already known to be well-formed.
///
/// Names and data are not validated, and linking does not check
/// parentage, cycles, document rules, duplicates or namespace collisions.
/// Feeding it bad input produces a tree that breaks those rules; it is
/// meant for builders sitting on a validating parser.
///
/// ```rust
/// use xdom::{Dom, NodeFactory, TrustedFactory};
///
/// let mut dom = Dom::new();
/// let factory = TrustedFactory;
/// let ns = factory.namespace(&mut dom, "", "")?;
/// let root = factory.element(&mut dom, "root", ns)?;
/// let text = factory.text(&mut dom, "hello")?;
/// factory.add_content(&mut dom, root, text)?;
/// let doc = factory.document(&mut dom, Some(root))?;
/// assert_eq!(dom.root_element(doc), Some(root));
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedFactory;

impl NodeFactory for TrustedFactory {
    fn namespace(&self, dom: &mut Dom, prefix: &str, uri: &str) -> Result<Namespace, Error> {
        if prefix == "xml" {
            return Ok(dom.xml_namespace());
        }
        Ok(dom.registry.intern(prefix, uri))
    }

    fn element(&self, dom: &mut Dom, name: &str, namespace: Namespace) -> Result<Node, Error> {
        Ok(dom.new_node(Value::Element(Element::new(name.to_string(), namespace))))
    }

    fn attribute(&self, dom: &mut Dom, name: &str, value: &str, namespace: Namespace) -> Result<Node, Error> {
        Ok(dom.new_node(Value::Attribute(Attribute::new(
            name.to_string(),
            namespace,
            value.to_string(),
        ))))
    }

    fn text(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        Ok(dom.new_node(Value::Text(Text::new(text.to_string()))))
    }

    fn cdata(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        Ok(dom.new_node(Value::CData(CData::new(text.to_string()))))
    }

    fn comment(&self, dom: &mut Dom, text: &str) -> Result<Node, Error> {
        Ok(dom.new_node(Value::Comment(Comment::new(text.to_string()))))
    }

    fn processing_instruction(&self, dom: &mut Dom, target: &str, data: &str) -> Result<Node, Error> {
        Ok(dom.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.to_string(),
        ))))
    }

    fn entity_ref(
        &self,
        dom: &mut Dom,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        let mut entity_ref = EntityRef::new(name.to_string());
        entity_ref.public_id = public_id.map(str::to_string);
        entity_ref.system_id = system_id.map(str::to_string);
        Ok(dom.new_node(Value::EntityRef(entity_ref)))
    }

    fn doc_type(
        &self,
        dom: &mut Dom,
        element_name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        let mut doc_type = DocType::new(element_name.to_string());
        doc_type.public_id = public_id.map(str::to_string);
        doc_type.system_id = system_id.map(str::to_string);
        Ok(dom.new_node(Value::DocType(doc_type)))
    }

    fn document(&self, dom: &mut Dom, root: Option<Node>) -> Result<Node, Error> {
        let document = dom.new_node(Value::Document(Document::new()));
        if let Some(root) = root {
            self.add_content(dom, document, root)?;
        }
        Ok(document)
    }

    fn add_content(&self, dom: &mut Dom, parent: Node, child: Node) -> Result<(), Error> {
        parent.get().checked_append(child.get(), dom.arena_mut())?;
        dom.bump_content_stamp(parent);
        Ok(())
    }

    fn set_attribute(&self, dom: &mut Dom, element: Node, attribute: Node) -> Result<(), Error> {
        let len = dom.attribute_count(element);
        dom.link_attribute(element, len, attribute)
    }

    fn add_namespace_declaration(&self, dom: &mut Dom, element: Node, namespace: Namespace) -> Result<(), Error> {
        dom.element_mut(element)
            .ok_or(Error::NotElement(element))?
            .additional_namespaces
            .push(namespace);
        Ok(())
    }
}
