use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::filter::ProcessingInstructionFilter;
use crate::view::ContentList;
use crate::xmlvalue::{Document, Value, ValueType};

/// ## Documents
///
/// A document holds at most one root element and at most one doctype,
/// with the doctype first. Comments and processing instructions may
/// appear anywhere around them.
impl Dom {
    /// Create a new document, optionally with a root element and a doctype.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let root = dom.new_element("html")?;
    /// let doctype = dom.new_doc_type("html", None, None)?;
    /// let doc = dom.new_document(Some(root), Some(doctype))?;
    /// assert_eq!(dom.root_element(doc), Some(root));
    /// assert_eq!(dom.content(doc).collect::<Vec<_>>(), vec![doctype, root]);
    /// assert!(dom.is_root_element(root));
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn new_document(&mut self, root: Option<Node>, doc_type: Option<Node>) -> Result<Node, Error> {
        if let Some(root) = root {
            if !self.is_element(root) {
                return Err(Error::NotElement(root));
            }
        }
        if let Some(doc_type) = doc_type {
            self.check_doc_type(doc_type)?;
        }
        let document = self.new_node(Value::Document(Document::new()));
        if let Err(err) = self.set_content(document, doc_type.into_iter().chain(root)) {
            self.dispose(document);
            return Err(err);
        }
        Ok(document)
    }

    /// The root element of a document.
    pub fn root_element(&self, document: Node) -> Option<Node> {
        if !self.is_document(document) {
            return None;
        }
        self.content(document).find(|n| self.is_element(*n))
    }

    /// Return true if the document has a root element.
    pub fn has_root_element(&self, document: Node) -> bool {
        self.root_element(document).is_some()
    }

    /// Set the root element of a document.
    ///
    /// An existing root element is replaced in place and returned
    /// detached; otherwise the element is appended.
    pub fn set_root_element(&mut self, document: Node, root: Node) -> Result<Option<Node>, Error> {
        if !self.is_document(document) {
            return Err(Error::NotDocument(document));
        }
        if !self.is_element(root) {
            return Err(Error::NotElement(root));
        }
        if self.is_root_element(root) {
            return Err(Error::IllegalAdd(
                "The element is already the root element of a document".to_string(),
            ));
        }
        if let Some(parent) = self.parent(root) {
            return Err(self.already_parented(root, parent));
        }
        let existing = self.content(document).position(|n| self.is_element(n));
        match existing {
            Some(index) => self.set_content_at(document, index, root).map(Some),
            None => self.append_content(document, root).map(|_| None),
        }
    }

    /// Detach the root element and return it.
    pub fn detach_root_element(&mut self, document: Node) -> Option<Node> {
        let root = self.root_element(document)?;
        self.detach(root);
        Some(root)
    }

    /// The doctype of a document.
    pub fn doc_type(&self, document: Node) -> Option<Node> {
        if !self.is_document(document) {
            return None;
        }
        self.content(document).find(|n| self.is_doc_type(*n))
    }

    /// Set the doctype of a document.
    ///
    /// An existing doctype is replaced in place and returned detached.
    /// Otherwise the doctype goes right before the root element, or first
    /// if there is no root element.
    pub fn set_doc_type(&mut self, document: Node, doc_type: Node) -> Result<Option<Node>, Error> {
        if !self.is_document(document) {
            return Err(Error::NotDocument(document));
        }
        self.check_doc_type(doc_type)?;
        if let Some(parent) = self.parent(doc_type) {
            return Err(self.already_parented(doc_type, parent));
        }
        let existing = self.content(document).position(|n| self.is_doc_type(n));
        if let Some(index) = existing {
            return self.set_content_at(document, index, doc_type).map(Some);
        }
        let index = self
            .content(document)
            .position(|n| self.is_element(n))
            .unwrap_or(0);
        self.insert_content(document, index, doc_type).map(|_| None)
    }

    /// Replace the comments, processing instructions and root element of a
    /// document at once. The doctype, if any, stays in front.
    ///
    /// The nodes must hold exactly one element; everything else must be a
    /// comment or a processing instruction. Nothing changes if the nodes
    /// are refused. The replaced nodes are returned detached.
    pub fn set_mixed_content(
        &mut self,
        document: Node,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Vec<Node>, Error> {
        if !self.is_document(document) {
            return Err(Error::NotDocument(document));
        }
        let nodes = nodes.into_iter().collect::<Vec<_>>();
        if let Err(err) = self.check_mixed_content(&nodes) {
            tracing::debug!(error = %err, "mixed document content refused");
            return Err(err);
        }
        let doc_type = self.doc_type(document);
        let old = self.set_content(document, doc_type.into_iter().chain(nodes))?;
        Ok(old.into_iter().filter(|n| Some(*n) != doc_type).collect())
    }

    /// A live view of the processing instructions directly in a document,
    /// optionally only those with the given target.
    pub fn processing_instructions(
        &self,
        document: Node,
        target: Option<&str>,
    ) -> Result<ContentList<ProcessingInstructionFilter>, Error> {
        if !self.is_document(document) {
            return Err(Error::NotDocument(document));
        }
        Ok(self.content_view(document, ProcessingInstructionFilter::new(target)))
    }

    /// The base URI of a document, if known.
    pub fn base_uri(&self, document: Node) -> Option<&str> {
        self.document(document).and_then(|d| d.base_uri())
    }

    /// Set or clear the base URI of a document.
    pub fn set_base_uri(&mut self, document: Node, base_uri: Option<String>) -> Result<(), Error> {
        let data = self
            .document_mut(document)
            .ok_or(Error::NotDocument(document))?;
        data.set_base_uri(base_uri);
        Ok(())
    }

    fn check_doc_type(&self, doc_type: Node) -> Result<(), Error> {
        if !self.is_doc_type(doc_type) {
            return Err(Error::IllegalArgument(format!(
                "Expected a DocType, got {}",
                self.value_type(doc_type).with_article()
            )));
        }
        Ok(())
    }

    fn check_mixed_content(&self, nodes: &[Node]) -> Result<(), Error> {
        let mut has_root = false;
        for node in nodes {
            match self.value_type(*node) {
                ValueType::Element => {
                    if has_root {
                        return Err(Error::IllegalAdd(
                            "Cannot add a second root element, only one is allowed".to_string(),
                        ));
                    }
                    has_root = true;
                }
                ValueType::Comment | ValueType::ProcessingInstruction => {}
                value_type => {
                    return Err(Error::IllegalAdd(format!(
                        "{} is not allowed in mixed document content",
                        value_type.with_article()
                    )));
                }
            }
        }
        if !has_root {
            return Err(Error::IllegalAdd(
                "A document needs a root element".to_string(),
            ));
        }
        Ok(())
    }
}
