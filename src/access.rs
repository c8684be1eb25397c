use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::xmlvalue::{Value, ValueCategory};

/// ## Read-only access
///
/// An element stores its attributes and its content in one child list in
/// the arena, attributes first. These accessors always expose the two
/// parts separately: the content of an element never includes its
/// attributes.
impl Dom {
    /// Get parent node.
    ///
    /// Returns [`None`] if the node is detached or is a document.
    ///
    /// Attributes have their element as parent, even though they are not
    /// part of its content.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// let text = dom.new_text("Example")?;
    /// dom.append_content(p, text)?;
    /// assert_eq!(dom.parent(text), Some(p));
    /// assert_eq!(dom.parent(p), None);
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.arena[node.get()].parent().map(Node::new)
    }

    /// Iterate over the ancestors of a node, nearest first. The node itself
    /// is not included.
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().ancestors(&self.arena).skip(1).map(Node::new)
    }

    /// Check whether a node has been disposed.
    pub fn is_removed(&self, node: Node) -> bool {
        self.arena[node.get()].is_removed()
    }

    pub(crate) fn all_children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(&self.arena).map(Node::new)
    }

    /// Iterate over the content of an element or document.
    ///
    /// Nodes of any other kind have no content.
    pub fn content(&self, owner: Node) -> impl Iterator<Item = Node> + '_ {
        owner
            .get()
            .children(&self.arena)
            .skip_while(|n| !self.arena[*n].get().is_normal())
            .map(Node::new)
    }

    /// The number of content nodes.
    pub fn content_len(&self, owner: Node) -> usize {
        self.content(owner).count()
    }

    /// The content node at `index`.
    pub fn content_at(&self, owner: Node, index: usize) -> Result<Node, Error> {
        self.content(owner)
            .nth(index)
            .ok_or_else(|| Error::IndexOutOfBounds {
                index,
                len: self.content_len(owner),
            })
    }

    /// The position of `node` within the content of `owner`.
    pub fn content_index_of(&self, owner: Node, node: Node) -> Option<usize> {
        if self.parent(node) != Some(owner) {
            return None;
        }
        self.content(owner).position(|n| n == node)
    }

    /// The last content node.
    pub fn last_content(&self, owner: Node) -> Option<Node> {
        let last = self.arena[owner.get()].last_child()?;
        if self.arena[last].get().is_normal() {
            Some(Node::new(last))
        } else {
            None
        }
    }

    /// Iterate over the attribute nodes of an element, in order.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// dom.set_attribute_value(p, "a", "1")?;
    /// dom.set_attribute_value(p, "b", "2")?;
    /// let values = dom
    ///     .attributes(p)
    ///     .map(|a| dom.attribute_data(a).unwrap().value())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(values, vec!["1", "2"]);
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn attributes(&self, element: Node) -> impl Iterator<Item = Node> + '_ {
        element
            .get()
            .children(&self.arena)
            .take_while(|n| self.arena[*n].get().value_category() == ValueCategory::Attribute)
            .map(Node::new)
    }

    /// The number of attributes of an element.
    pub fn attribute_count(&self, element: Node) -> usize {
        self.attributes(element).count()
    }

    /// Return true if the element has any attributes.
    pub fn has_attributes(&self, element: Node) -> bool {
        self.attributes(element).next().is_some()
    }

    /// The structural modification stamp of a content container.
    ///
    /// It changes on every insert and removal, and never decreases. Nodes
    /// without content report 0.
    pub fn content_stamp(&self, owner: Node) -> u64 {
        match self.value(owner) {
            Value::Element(element) => element.content_stamp,
            Value::Document(document) => document.content_stamp,
            _ => 0,
        }
    }

    /// The structural modification stamp of the attributes of an element.
    pub fn attribute_stamp(&self, element: Node) -> u64 {
        match self.value(element) {
            Value::Element(element) => element.attribute_stamp,
            _ => 0,
        }
    }

    /// Return true if `ancestor` is a proper ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: Node, node: Node) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Return true if the node is an element directly in a document.
    pub fn is_root_element(&self, node: Node) -> bool {
        self.is_element(node)
            && self
                .parent(node)
                .is_some_and(|parent| self.is_document(parent))
    }

    /// The document this node belongs to, if any. A document belongs to
    /// itself.
    pub fn document_of(&self, node: Node) -> Option<Node> {
        if self.is_document(node) {
            return Some(node);
        }
        self.ancestors(node).find(|n| self.is_document(*n))
    }
}
