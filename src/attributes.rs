use crate::creation::check_attribute_namespace;
use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::namespace::Namespace;
use crate::validator;
use crate::xmlvalue::Value;

/// ## Attribute container
///
/// The attributes of an element are ordered, and no two of them share the
/// same local name and namespace URI. Setting an attribute whose key is
/// already present replaces the old one; inserting one at an explicit
/// index refuses the duplicate instead.
///
/// A prefixed attribute namespace must not collide with the namespace of
/// the element, with the namespaces it declares, or with the namespaces of
/// its other attributes. Two namespaces collide when they bind the same
/// prefix to different URIs.
impl Dom {
    /// Find an attribute in no namespace by local name.
    pub fn attribute(&self, element: Node, name: &str) -> Option<Node> {
        self.attributes(element).find(|a| {
            self.attribute_data(*a)
                .is_some_and(|data| data.name() == name && data.namespace().is_no_namespace())
        })
    }

    /// Find an attribute by local name and namespace URI. The prefix does
    /// not matter.
    pub fn attribute_ns(&self, element: Node, name: &str, namespace: &Namespace) -> Option<Node> {
        self.attributes(element).find(|a| {
            self.attribute_data(*a).is_some_and(|data| {
                data.name() == name && data.namespace().uri() == namespace.uri()
            })
        })
    }

    /// The value of an attribute in no namespace.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// dom.set_attribute_value(p, "class", "intro")?;
    /// assert_eq!(dom.attribute_value(p, "class"), Some("intro"));
    /// assert_eq!(dom.attribute_value_or(p, "id", "none"), "none");
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn attribute_value(&self, element: Node, name: &str) -> Option<&str> {
        self.attribute(element, name)
            .and_then(|a| self.attribute_data(a))
            .map(|data| data.value())
    }

    /// The value of an attribute by local name and namespace URI.
    pub fn attribute_value_ns(&self, element: Node, name: &str, namespace: &Namespace) -> Option<&str> {
        self.attribute_ns(element, name, namespace)
            .and_then(|a| self.attribute_data(a))
            .map(|data| data.value())
    }

    /// The value of an attribute in no namespace, or `default` if it is
    /// absent.
    pub fn attribute_value_or<'a>(&'a self, element: Node, name: &str, default: &'a str) -> &'a str {
        self.attribute_value(element, name).unwrap_or(default)
    }

    /// The attribute at `index`.
    pub fn attribute_at(&self, element: Node, index: usize) -> Result<Node, Error> {
        self.attributes(element)
            .nth(index)
            .ok_or_else(|| Error::IndexOutOfBounds {
                index,
                len: self.attribute_count(element),
            })
    }

    /// The position of an attribute node within its element.
    pub fn attribute_index_of(&self, element: Node, attribute: Node) -> Option<usize> {
        if self.parent(attribute) != Some(element) {
            return None;
        }
        self.attributes(element).position(|a| a == attribute)
    }

    /// Set an attribute node on an element.
    ///
    /// An attribute with the same local name and namespace URI is replaced;
    /// it is returned detached. The new attribute goes last.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let e = dom.new_element("e")?;
    /// let x1 = dom.namespace("x", "urn:1")?;
    /// dom.add_namespace_declaration(e, x1)?;
    /// let x2 = dom.namespace("x", "urn:2")?;
    /// let foo = dom.new_attribute_ns("foo", "v", x2)?;
    /// assert!(matches!(dom.set_attribute(e, foo), Err(xdom::Error::IllegalAdd(_))));
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn set_attribute(&mut self, element: Node, attribute: Node) -> Result<Option<Node>, Error> {
        let (name, namespace) = self.check_attribute_add(element, attribute)?;
        let existing = self.attribute_ns(element, &name, &namespace);
        self.check_attribute_collision(element, &namespace, existing)?;
        if let Some(existing) = existing {
            self.detach(existing);
        }
        let len = self.attribute_count(element);
        self.link_attribute(element, len, attribute)?;
        Ok(existing)
    }

    /// Set the value of an attribute in no namespace, creating the
    /// attribute if needed. Returns the attribute node.
    pub fn set_attribute_value(&mut self, element: Node, name: &str, value: &str) -> Result<Node, Error> {
        let namespace = self.no_namespace();
        self.set_attribute_value_ns(element, name, value, namespace)
    }

    /// Set the value of an attribute in a namespace, creating the attribute
    /// if needed. Returns the attribute node.
    pub fn set_attribute_value_ns(
        &mut self,
        element: Node,
        name: &str,
        value: &str,
        namespace: Namespace,
    ) -> Result<Node, Error> {
        if !self.is_element(element) {
            return Err(Error::NotElement(element));
        }
        if let Some(existing) = self.attribute_ns(element, name, &namespace) {
            if let Some(data) = self.attribute_data_mut(existing) {
                data.set_value(value)?;
            }
            return Ok(existing);
        }
        let attribute = self.new_attribute_ns(name, value, namespace)?;
        if let Err(err) = self.set_attribute(element, attribute) {
            self.dispose(attribute);
            return Err(err);
        }
        Ok(attribute)
    }

    /// Remove an attribute in no namespace and return it detached.
    pub fn remove_attribute(&mut self, element: Node, name: &str) -> Option<Node> {
        let attribute = self.attribute(element, name)?;
        self.detach(attribute);
        Some(attribute)
    }

    /// Remove an attribute by local name and namespace URI and return it
    /// detached.
    pub fn remove_attribute_ns(&mut self, element: Node, name: &str, namespace: &Namespace) -> Option<Node> {
        let attribute = self.attribute_ns(element, name, namespace)?;
        self.detach(attribute);
        Some(attribute)
    }

    /// Remove an attribute node from its element. Returns false if it was
    /// not an attribute of this element.
    pub fn remove_attribute_node(&mut self, element: Node, attribute: Node) -> bool {
        if self.parent(attribute) != Some(element) || !self.is_attribute(attribute) {
            return false;
        }
        self.detach(attribute);
        true
    }

    /// Insert an attribute at `index`. An attribute with the same key
    /// is refused.
    pub fn insert_attribute_at(&mut self, element: Node, index: usize, attribute: Node) -> Result<(), Error> {
        let (name, namespace) = self.check_attribute_add(element, attribute)?;
        let len = self.attribute_count(element);
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        if self.attribute_ns(element, &name, &namespace).is_some() {
            return Err(duplicate_attribute(&name, &namespace));
        }
        self.check_attribute_collision(element, &namespace, None)?;
        self.link_attribute(element, index, attribute)
    }

    /// Remove the attribute at `index` and return it detached.
    pub fn remove_attribute_at(&mut self, element: Node, index: usize) -> Result<Node, Error> {
        let attribute = self.attribute_at(element, index)?;
        self.detach(attribute);
        Ok(attribute)
    }

    /// Replace the attribute at `index` and return the old one detached.
    ///
    /// The new attribute may share its key with the one it replaces, but
    /// not with any other attribute.
    pub fn set_attribute_at(&mut self, element: Node, index: usize, attribute: Node) -> Result<Node, Error> {
        let (name, namespace) = self.check_attribute_add(element, attribute)?;
        let old = self.attribute_at(element, index)?;
        if let Some(duplicate) = self.attribute_ns(element, &name, &namespace) {
            if duplicate != old {
                return Err(duplicate_attribute(&name, &namespace));
            }
        }
        self.check_attribute_collision(element, &namespace, Some(old))?;
        self.detach(old);
        self.link_attribute(element, index, attribute)?;
        Ok(old)
    }

    /// Replace all attributes of an element. The old attributes are
    /// detached and returned.
    ///
    /// Nothing changes if any of the new attributes is refused.
    pub fn set_attributes(
        &mut self,
        element: Node,
        attributes: impl IntoIterator<Item = Node>,
    ) -> Result<Vec<Node>, Error> {
        if !self.is_element(element) {
            return Err(Error::NotElement(element));
        }
        let attributes = attributes.into_iter().collect::<Vec<_>>();
        let old = self.attributes(element).collect::<Vec<_>>();
        for attribute in &old {
            self.detach(*attribute);
        }
        for (index, attribute) in attributes.iter().enumerate() {
            if let Err(err) = self.insert_attribute_at(element, index, *attribute) {
                tracing::debug!(
                    inserted = index,
                    restored = old.len(),
                    error = %err,
                    "attribute replacement refused, rolling back"
                );
                for inserted in &attributes[..index] {
                    self.detach(*inserted);
                }
                for (index, attribute) in old.iter().enumerate() {
                    self.link_attribute(element, index, *attribute)?;
                }
                return Err(err);
            }
        }
        Ok(old)
    }

    /// Rename an attribute.
    ///
    /// If the attribute belongs to an element, the new name must not
    /// duplicate another of its attributes.
    pub fn set_attribute_name(&mut self, attribute: Node, name: &str) -> Result<(), Error> {
        let namespace = self
            .attribute_data(attribute)
            .ok_or(Error::NotAttribute(attribute))?
            .namespace()
            .clone();
        validator::check_attribute_name(name)
            .map_err(|reason| Error::illegal_name(name, "attribute", reason))?;
        if let Some(element) = self.parent(attribute) {
            if let Some(other) = self.attribute_ns(element, name, &namespace) {
                if other != attribute {
                    return Err(duplicate_attribute(name, &namespace));
                }
            }
        }
        if let Value::Attribute(data) = self.value_mut(attribute) {
            data.name = name.to_string();
        }
        Ok(())
    }

    /// Move an attribute into another namespace.
    ///
    /// A namespace with a URI needs a prefix. If the attribute belongs to
    /// an element, the namespace must not collide there.
    pub fn set_attribute_namespace(&mut self, attribute: Node, namespace: Namespace) -> Result<(), Error> {
        let name = self
            .attribute_data(attribute)
            .ok_or(Error::NotAttribute(attribute))?
            .name()
            .to_string();
        check_attribute_namespace(&namespace)?;
        if let Some(element) = self.parent(attribute) {
            self.check_attribute_collision(element, &namespace, Some(attribute))?;
            if let Some(other) = self.attribute_ns(element, &name, &namespace) {
                if other != attribute {
                    return Err(duplicate_attribute(&name, &namespace));
                }
            }
        }
        if let Value::Attribute(data) = self.value_mut(attribute) {
            data.namespace = namespace;
        }
        Ok(())
    }

    fn check_attribute_add(&self, element: Node, attribute: Node) -> Result<(String, Namespace), Error> {
        if !self.is_element(element) {
            return Err(Error::NotElement(element));
        }
        let data = self
            .attribute_data(attribute)
            .ok_or(Error::NotAttribute(attribute))?;
        if let Some(parent) = self.parent(attribute) {
            return Err(self.already_parented(attribute, parent));
        }
        Ok((data.name().to_string(), data.namespace().clone()))
    }

    // `exclude` is an attribute that is about to be replaced or changed.
    pub(crate) fn check_attribute_collision(
        &self,
        element: Node,
        namespace: &Namespace,
        exclude: Option<Node>,
    ) -> Result<(), Error> {
        if namespace.prefix().is_empty() {
            return Ok(());
        }
        let data = self.element(element).ok_or(Error::NotElement(element))?;
        if validator::namespaces_collide(namespace, data.namespace()) {
            return Err(collision(namespace, "the element namespace prefix"));
        }
        if data
            .additional_namespaces()
            .iter()
            .any(|declared| validator::namespaces_collide(namespace, declared))
        {
            return Err(collision(namespace, "an additional namespace declared by the element"));
        }
        let collides_with_attribute = self
            .attributes(element)
            .filter(|a| Some(*a) != exclude)
            .filter_map(|a| self.attribute_data(a))
            .any(|other| validator::namespaces_collide(namespace, other.namespace()));
        if collides_with_attribute {
            return Err(collision(namespace, "another attribute namespace on the element"));
        }
        Ok(())
    }

    // Links without checks.
    pub(crate) fn link_attribute(&mut self, element: Node, index: usize, attribute: Node) -> Result<(), Error> {
        let before = self
            .attributes(element)
            .nth(index)
            .or_else(|| self.content(element).next());
        match before {
            Some(before) => before
                .get()
                .checked_insert_before(attribute.get(), self.arena_mut())?,
            None => element.get().checked_append(attribute.get(), self.arena_mut())?,
        }
        self.bump_attribute_stamp(element);
        Ok(())
    }

    pub(crate) fn bump_attribute_stamp(&mut self, element: Node) {
        if let Value::Element(element) = self.value_mut(element) {
            element.attribute_stamp += 1;
        }
    }
}

fn collision(namespace: &Namespace, with: &str) -> Error {
    Error::IllegalAdd(format!(
        "The attribute namespace prefix \"{}\" collides with {}",
        namespace.prefix(),
        with
    ))
}

fn duplicate_attribute(name: &str, namespace: &Namespace) -> Error {
    if namespace.is_no_namespace() {
        Error::IllegalAdd(format!("Cannot add duplicate attribute \"{}\"", name))
    } else {
        Error::IllegalAdd(format!(
            "Cannot add duplicate attribute \"{}\" in namespace \"{}\"",
            name,
            namespace.uri()
        ))
    }
}
