use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::namespace::Namespace;
use crate::validator;
use crate::xmlvalue::{
    Attribute, CData, Comment, DocType, Element, EntityRef, ProcessingInstruction, Text, Value,
};

/// ## Creation
///
/// Checked constructors. Every name and every piece of data is validated;
/// the new node is detached. Builders that already validated their input
/// can use [`TrustedFactory`](crate::TrustedFactory) instead.
impl Dom {
    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena.new_node(value))
    }

    /// Create a new element in no namespace.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// assert_eq!(dom.element(p).unwrap().name(), "p");
    /// assert!(dom.new_element("x:p").is_err());
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn new_element(&mut self, name: &str) -> Result<Node, Error> {
        let ns = self.no_namespace();
        self.new_element_ns(name, ns)
    }

    /// Create a new element in a namespace.
    pub fn new_element_ns(&mut self, name: &str, namespace: Namespace) -> Result<Node, Error> {
        validator::check_element_name(name)
            .map_err(|reason| Error::illegal_name(name, "element", reason))?;
        Ok(self.new_node(Value::Element(Element::new(name.to_string(), namespace))))
    }

    /// Create a new attribute in no namespace.
    pub fn new_attribute(&mut self, name: &str, value: &str) -> Result<Node, Error> {
        let ns = self.no_namespace();
        self.new_attribute_ns(name, value, ns)
    }

    /// Create a new attribute in a namespace.
    ///
    /// Attributes are only in a namespace through a prefix, so a namespace
    /// with a URI but an empty prefix is rejected.
    pub fn new_attribute_ns(
        &mut self,
        name: &str,
        value: &str,
        namespace: Namespace,
    ) -> Result<Node, Error> {
        validator::check_attribute_name(name)
            .map_err(|reason| Error::illegal_name(name, "attribute", reason))?;
        check_attribute_namespace(&namespace)?;
        validator::check_character_data(value)
            .map_err(|reason| Error::illegal_data(value, "attribute", reason))?;
        Ok(self.new_node(Value::Attribute(Attribute::new(
            name.to_string(),
            namespace,
            value.to_string(),
        ))))
    }

    /// Create a new text node.
    pub fn new_text(&mut self, text: &str) -> Result<Node, Error> {
        validator::check_character_data(text)
            .map_err(|reason| Error::illegal_data(text, "character content", reason))?;
        Ok(self.new_node(Value::Text(Text::new(text.to_string()))))
    }

    /// Create a new CDATA section.
    pub fn new_cdata(&mut self, text: &str) -> Result<Node, Error> {
        validator::check_cdata_section(text)
            .map_err(|reason| Error::illegal_data(text, "CDATA section", reason))?;
        Ok(self.new_node(Value::CData(CData::new(text.to_string()))))
    }

    /// Create a new comment.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// assert!(dom.new_comment(" fine ").is_ok());
    /// assert!(dom.new_comment("not -- fine").is_err());
    /// ```
    pub fn new_comment(&mut self, comment: &str) -> Result<Node, Error> {
        validator::check_comment_data(comment)
            .map_err(|reason| Error::illegal_data(comment, "comment", reason))?;
        Ok(self.new_node(Value::Comment(Comment::new(comment.to_string()))))
    }

    /// Create a new processing instruction. Pass an empty string for no data.
    pub fn new_processing_instruction(&mut self, target: &str, data: &str) -> Result<Node, Error> {
        validator::check_processing_instruction_target(target).map_err(|reason| {
            Error::illegal_name(target, "processing instruction target", reason)
        })?;
        validator::check_processing_instruction_data(data)
            .map_err(|reason| Error::illegal_data(data, "processing instruction", reason))?;
        Ok(self.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.to_string(),
        ))))
    }

    /// Create a new entity reference.
    pub fn new_entity_ref(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        validator::check_xml_name(name)
            .map_err(|reason| Error::illegal_name(name, "entity reference", reason))?;
        let mut entity_ref = EntityRef::new(name.to_string());
        entity_ref.set_public_id(public_id.map(str::to_string))?;
        entity_ref.set_system_id(system_id.map(str::to_string))?;
        Ok(self.new_node(Value::EntityRef(entity_ref)))
    }

    /// Create a new doctype.
    ///
    /// The element name is the declared name of the root element and may
    /// include a prefix.
    pub fn new_doc_type(
        &mut self,
        element_name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<Node, Error> {
        validator::check_xml_name(element_name)
            .map_err(|reason| Error::illegal_name(element_name, "DocType element name", reason))?;
        let mut doc_type = DocType::new(element_name.to_string());
        doc_type.set_public_id(public_id.map(str::to_string))?;
        doc_type.set_system_id(system_id.map(str::to_string))?;
        Ok(self.new_node(Value::DocType(doc_type)))
    }
}

pub(crate) fn check_attribute_namespace(namespace: &Namespace) -> Result<(), Error> {
    if !namespace.is_no_namespace() && namespace.prefix().is_empty() {
        return Err(Error::illegal_name(
            namespace.uri(),
            "attribute namespace",
            "An attribute namespace without a prefix can only be the no namespace".to_string(),
        ));
    }
    Ok(())
}
