use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::xmlvalue::{Value, ValueType};

/// ## Content container
///
/// The ordered content of an element or a document.
///
/// Every insert is checked before anything changes:
/// - The node must not have a parent already.
/// - An element cannot be added below itself or below one of its own
///   descendants.
/// - A document holds at most one root element and at most one doctype,
///   and the doctype comes before the root element. Text, CDATA and entity
///   references cannot be placed directly in a document.
/// - A doctype can only be placed in a document.
///
/// Each structural change bumps the content stamp of the owner, which is
/// how views and traversals notice changes made behind their back.
///
/// Bulk operations are all-or-nothing: when one node is refused, the
/// nodes inserted so far are taken out again and the original content is
/// restored before the error is returned.
impl Dom {
    /// Insert `node` into the content of `owner` at `index`.
    ///
    /// `index` may be equal to the content length, which appends.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// let a = dom.new_element("a")?;
    /// let b = dom.new_element("b")?;
    /// dom.insert_content(p, 0, b)?;
    /// dom.insert_content(p, 0, a)?;
    /// assert_eq!(dom.content(p).collect::<Vec<_>>(), vec![a, b]);
    /// // p cannot go inside its own child
    /// assert!(dom.insert_content(a, 0, p).is_err());
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn insert_content(&mut self, owner: Node, index: usize, node: Node) -> Result<(), Error> {
        self.check_content_add(owner, index, node)?;
        self.link_content(owner, index, node)
    }

    /// Append `node` to the content of `owner`.
    pub fn append_content(&mut self, owner: Node, node: Node) -> Result<(), Error> {
        let len = self.content_len(owner);
        self.insert_content(owner, len, node)
    }

    /// Remove the content node at `index` and return it. It is detached
    /// afterward and can be added elsewhere.
    pub fn remove_content_at(&mut self, owner: Node, index: usize) -> Result<Node, Error> {
        let node = self.content_at(owner, index)?;
        self.detach(node);
        Ok(node)
    }

    /// Remove `node` from the content of `owner`. Returns false if it was
    /// not there.
    pub fn remove_content(&mut self, owner: Node, node: Node) -> bool {
        if self.parent(node) != Some(owner) || self.is_attribute(node) {
            return false;
        }
        self.detach(node);
        true
    }

    /// Replace the content node at `index` and return the old node.
    ///
    /// If the new node is refused, the old node is put back in its place.
    pub fn set_content_at(&mut self, owner: Node, index: usize, node: Node) -> Result<Node, Error> {
        let old = self.remove_content_at(owner, index)?;
        if let Err(err) = self.insert_content(owner, index, node) {
            tracing::debug!(index, error = %err, "replacement refused, restoring content");
            self.link_content(owner, index, old)?;
            return Err(err);
        }
        Ok(old)
    }

    /// Insert several nodes, in order, starting at `index`.
    pub fn insert_all(
        &mut self,
        owner: Node,
        index: usize,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<(), Error> {
        let nodes = nodes.into_iter().collect::<Vec<_>>();
        for (offset, node) in nodes.iter().enumerate() {
            if let Err(err) = self.insert_content(owner, index + offset, *node) {
                tracing::debug!(
                    inserted = offset,
                    error = %err,
                    "bulk insert refused, rolling back"
                );
                for inserted in &nodes[..offset] {
                    self.detach(*inserted);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Replace the whole content of `owner`. The old content is detached
    /// and returned.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// let old = dom.new_text("old")?;
    /// dom.append_content(p, old)?;
    /// let a = dom.new_text("a")?;
    /// // a doctype is refused, so nothing changes
    /// let doctype = dom.new_doc_type("p", None, None)?;
    /// assert!(dom.set_content(p, [a, doctype]).is_err());
    /// assert_eq!(dom.content(p).collect::<Vec<_>>(), vec![old]);
    /// assert_eq!(dom.parent(a), None);
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn set_content(
        &mut self,
        owner: Node,
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Vec<Node>, Error> {
        self.check_parent(owner)?;
        let nodes = nodes.into_iter().collect::<Vec<_>>();
        let old = self.clear_content(owner);
        for (index, node) in nodes.iter().enumerate() {
            if let Err(err) = self.insert_content(owner, index, *node) {
                tracing::debug!(
                    inserted = index,
                    restored = old.len(),
                    error = %err,
                    "content replacement refused, rolling back"
                );
                for inserted in &nodes[..index] {
                    self.detach(*inserted);
                }
                for node in &old {
                    owner.get().checked_append(node.get(), self.arena_mut())?;
                }
                self.bump_content_stamp(owner);
                return Err(err);
            }
        }
        Ok(old)
    }

    /// Detach all content of `owner` and return it in order.
    pub fn clear_content(&mut self, owner: Node) -> Vec<Node> {
        let content = self.content(owner).collect::<Vec<_>>();
        if content.is_empty() {
            return content;
        }
        for node in &content {
            node.get().detach(self.arena_mut());
        }
        self.bump_content_stamp(owner);
        content
    }

    /// Detach a node from its parent, whether it is content or an
    /// attribute. Returns the former parent.
    pub fn detach(&mut self, node: Node) -> Option<Node> {
        let parent = self.parent(node)?;
        let is_attribute = self.is_attribute(node);
        node.get().detach(self.arena_mut());
        if is_attribute {
            self.bump_attribute_stamp(parent);
        } else {
            self.bump_content_stamp(parent);
        }
        Some(parent)
    }

    /// Detach a node and free it with everything below it. The handle and
    /// the handles of its descendants must not be used afterward.
    pub fn dispose(&mut self, node: Node) {
        self.detach(node);
        tracing::trace!(node = ?node, "disposing subtree");
        node.get().remove_subtree(self.arena_mut());
    }

    pub(crate) fn check_parent(&self, owner: Node) -> Result<ValueType, Error> {
        match self.value_type(owner) {
            value_type @ (ValueType::Element | ValueType::Document) => Ok(value_type),
            _ => Err(Error::NotParent(owner)),
        }
    }

    pub(crate) fn check_content_add(&self, owner: Node, index: usize, node: Node) -> Result<(), Error> {
        let owner_type = self.check_parent(owner)?;
        let node_type = self.value_type(node);
        if matches!(node_type, ValueType::Document | ValueType::Attribute) {
            return Err(Error::IllegalAdd(format!(
                "{} cannot be added as content",
                node_type.with_article()
            )));
        }
        if let Some(parent) = self.parent(node) {
            return Err(self.already_parented(node, parent));
        }
        if node_type == ValueType::Element && owner_type == ValueType::Element {
            if node == owner {
                return Err(Error::IllegalAdd(
                    "The element cannot be added to itself".to_string(),
                ));
            }
            if self.is_ancestor_of(node, owner) {
                return Err(Error::IllegalAdd(
                    "The element cannot be added as a descendant of itself".to_string(),
                ));
            }
        }
        let len = self.content_len(owner);
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        if owner_type == ValueType::Document {
            self.check_document_add(owner, index, node_type)
        } else if node_type == ValueType::DocType {
            Err(Error::IllegalAdd(
                "A DocType is not allowed except at the document level".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn check_document_add(&self, document: Node, index: usize, node_type: ValueType) -> Result<(), Error> {
        match node_type {
            ValueType::Element => {
                if self.content(document).any(|n| self.is_element(n)) {
                    return Err(Error::IllegalAdd(
                        "Cannot add a second root element, only one is allowed".to_string(),
                    ));
                }
                if let Some(doc_type) = self.content(document).position(|n| self.is_doc_type(n)) {
                    if index <= doc_type {
                        return Err(Error::IllegalAdd(
                            "A root element cannot be added before the DocType".to_string(),
                        ));
                    }
                }
                Ok(())
            }
            ValueType::DocType => {
                if self.content(document).any(|n| self.is_doc_type(n)) {
                    return Err(Error::IllegalAdd(
                        "Cannot add a second doctype, only one is allowed".to_string(),
                    ));
                }
                if let Some(root) = self.content(document).position(|n| self.is_element(n)) {
                    if index > root {
                        return Err(Error::IllegalAdd(
                            "A DocType cannot be added after the root element".to_string(),
                        ));
                    }
                }
                Ok(())
            }
            ValueType::Text | ValueType::CData | ValueType::EntityRef => {
                Err(Error::IllegalAdd(format!(
                    "{} is not allowed at the document level",
                    node_type.with_article()
                )))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn already_parented(&self, node: Node, parent: Node) -> Error {
        let kind = self.value_type(node).describe();
        match self.qualified_name(parent) {
            Some(name) => Error::IllegalAdd(format!(
                "The {} already has an existing parent \"{}\"",
                kind, name
            )),
            None => Error::IllegalAdd(format!(
                "The {} already has an existing parent (the document root)",
                kind
            )),
        }
    }

    // Links without checks; `index` must be within the content.
    pub(crate) fn link_content(&mut self, owner: Node, index: usize, node: Node) -> Result<(), Error> {
        let before = self.content(owner).nth(index);
        match before {
            Some(before) => before.get().checked_insert_before(node.get(), self.arena_mut())?,
            None => owner.get().checked_append(node.get(), self.arena_mut())?,
        }
        self.bump_content_stamp(owner);
        Ok(())
    }

    pub(crate) fn bump_content_stamp(&mut self, owner: Node) {
        match self.value_mut(owner) {
            Value::Element(element) => element.content_stamp += 1,
            Value::Document(document) => document.content_stamp += 1,
            _ => {}
        }
    }
}
