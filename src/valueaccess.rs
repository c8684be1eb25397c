use crate::dom::{Dom, Node};
use crate::xmlvalue::{
    Attribute, CData, Comment, DocType, Document, Element, EntityRef, ProcessingInstruction,
    Text, Value, ValueType,
};

/// Obtain XML values and their types.
///
/// These are handy if you only need to match against a single value or know
/// the value type already. If you want to handle all value types, use a
/// `match` statement on [`Value`](crate::Value) instead.
///
/// The mutable accessors give access to the value structs only. Their
/// setters validate the new data; structure (names of elements, attribute
/// names and namespaces) is changed through the `Dom` methods instead.
impl Dom {
    /// Access to the XML value for this node.
    ///
    /// ```rust
    /// use xdom::{Dom, Value};
    ///
    /// let mut dom = Dom::new();
    /// let doc = dom.new_element("doc")?;
    ///
    /// match dom.value(doc) {
    ///     Value::Element(element) => assert_eq!(element.name(), "doc"),
    ///     _ => unreachable!(),
    /// }
    /// # Ok::<(), xdom::Error>(())
    /// ```
    #[inline]
    pub fn value(&self, node: Node) -> &Value {
        self.arena[node.get()].get()
    }

    // Not public: swapping a value for one of another kind would break
    // the containment rules.
    #[inline]
    pub(crate) fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena[node.get()].get_mut()
    }

    /// Get the [`ValueType`] of a node.
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// Return true if node is a document.
    pub fn is_document(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Document
    }

    /// Return true if node is an element.
    pub fn is_element(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Element
    }

    /// Return true if node is an attribute.
    pub fn is_attribute(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Attribute
    }

    /// Return true if node is text.
    pub fn is_text(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Text
    }

    /// Return true if node is a CDATA section.
    pub fn is_cdata(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::CData
    }

    /// Return true if node is a comment.
    pub fn is_comment(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Comment
    }

    /// Return true if node is a processing instruction.
    pub fn is_processing_instruction(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::ProcessingInstruction
    }

    /// Return true if node is an entity reference.
    pub fn is_entity_ref(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::EntityRef
    }

    /// Return true if node is a doctype.
    pub fn is_doc_type(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::DocType
    }

    /// If this node's value is a document, return a reference to it.
    pub fn document(&self, node: Node) -> Option<&Document> {
        if let Value::Document(document) = self.value(node) {
            Some(document)
        } else {
            None
        }
    }

    /// If this node's value is a document, return a mutable reference to it.
    pub fn document_mut(&mut self, node: Node) -> Option<&mut Document> {
        if let Value::Document(document) = self.value_mut(node) {
            Some(document)
        } else {
            None
        }
    }

    /// If this node's value is an element, return a reference to it.
    pub fn element(&self, node: Node) -> Option<&Element> {
        if let Value::Element(element) = self.value(node) {
            Some(element)
        } else {
            None
        }
    }

    pub(crate) fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        if let Value::Element(element) = self.value_mut(node) {
            Some(element)
        } else {
            None
        }
    }

    /// If this node's value is an attribute, return a reference to it.
    ///
    /// To find an attribute of an element by name, use
    /// [`Dom::attribute`](crate::Dom::attribute).
    pub fn attribute_data(&self, node: Node) -> Option<&Attribute> {
        if let Value::Attribute(attribute) = self.value(node) {
            Some(attribute)
        } else {
            None
        }
    }

    /// If this node's value is an attribute, return a mutable reference to
    /// it. Use it to change the value or the declared type.
    pub fn attribute_data_mut(&mut self, node: Node) -> Option<&mut Attribute> {
        if let Value::Attribute(attribute) = self.value_mut(node) {
            Some(attribute)
        } else {
            None
        }
    }

    /// If this node's value is text, return a reference to it.
    pub fn text(&self, node: Node) -> Option<&Text> {
        if let Value::Text(text) = self.value(node) {
            Some(text)
        } else {
            None
        }
    }

    /// If this node's value is text, return a reference to the string.
    pub fn text_str(&self, node: Node) -> Option<&str> {
        self.text(node).map(|n| n.get())
    }

    /// If this node's value is a text, return a mutable reference to it.
    pub fn text_mut(&mut self, node: Node) -> Option<&mut Text> {
        if let Value::Text(text) = self.value_mut(node) {
            Some(text)
        } else {
            None
        }
    }

    /// If this node's value is a CDATA section, return a reference to it.
    pub fn cdata(&self, node: Node) -> Option<&CData> {
        if let Value::CData(cdata) = self.value(node) {
            Some(cdata)
        } else {
            None
        }
    }

    /// If this node's value is a CDATA section, return a mutable reference
    /// to it.
    pub fn cdata_mut(&mut self, node: Node) -> Option<&mut CData> {
        if let Value::CData(cdata) = self.value_mut(node) {
            Some(cdata)
        } else {
            None
        }
    }

    /// If this node's value is a comment, return a reference to it.
    pub fn comment(&self, node: Node) -> Option<&Comment> {
        if let Value::Comment(comment) = self.value(node) {
            Some(comment)
        } else {
            None
        }
    }

    /// If this node's value is a comment, return a reference to the string.
    pub fn comment_str(&self, node: Node) -> Option<&str> {
        self.comment(node).map(|n| n.get())
    }

    /// If this node's value is a comment, return a mutable reference to it.
    pub fn comment_mut(&mut self, node: Node) -> Option<&mut Comment> {
        if let Value::Comment(comment) = self.value_mut(node) {
            Some(comment)
        } else {
            None
        }
    }

    /// If this node's value is a processing instruction, return a reference
    /// to it.
    pub fn processing_instruction(&self, node: Node) -> Option<&ProcessingInstruction> {
        if let Value::ProcessingInstruction(pi) = self.value(node) {
            Some(pi)
        } else {
            None
        }
    }

    /// If this node's value is a processing instruction, return a mutable
    /// reference to it.
    pub fn processing_instruction_mut(&mut self, node: Node) -> Option<&mut ProcessingInstruction> {
        if let Value::ProcessingInstruction(pi) = self.value_mut(node) {
            Some(pi)
        } else {
            None
        }
    }

    /// If this node's value is an entity reference, return a reference to it.
    pub fn entity_ref(&self, node: Node) -> Option<&EntityRef> {
        if let Value::EntityRef(entity_ref) = self.value(node) {
            Some(entity_ref)
        } else {
            None
        }
    }

    /// If this node's value is an entity reference, return a mutable
    /// reference to it.
    pub fn entity_ref_mut(&mut self, node: Node) -> Option<&mut EntityRef> {
        if let Value::EntityRef(entity_ref) = self.value_mut(node) {
            Some(entity_ref)
        } else {
            None
        }
    }

    /// If this node's value is a doctype, return a reference to it.
    pub fn doc_type_data(&self, node: Node) -> Option<&DocType> {
        if let Value::DocType(doc_type) = self.value(node) {
            Some(doc_type)
        } else {
            None
        }
    }

    /// If this node's value is a doctype, return a mutable reference to it.
    pub fn doc_type_data_mut(&mut self, node: Node) -> Option<&mut DocType> {
        if let Value::DocType(doc_type) = self.value_mut(node) {
            Some(doc_type)
        } else {
            None
        }
    }
}
