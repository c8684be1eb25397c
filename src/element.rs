use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::namespace::Namespace;
use crate::validator;
use crate::xmlvalue::{normalize_string, Value};

/// ## Elements
///
/// Names, namespaces, namespace declarations and content of elements.
impl Dom {
    /// The qualified name (`prefix:name`) of an element or attribute.
    /// Other nodes have no name.
    pub fn qualified_name(&self, node: Node) -> Option<String> {
        match self.value(node) {
            Value::Element(element) => Some(element.qualified_name()),
            Value::Attribute(attribute) => Some(attribute.qualified_name()),
            _ => None,
        }
    }

    /// The local name of an element.
    pub fn element_name(&self, element: Node) -> Option<&str> {
        self.element(element).map(|e| e.name())
    }

    /// Rename an element.
    pub fn set_element_name(&mut self, element: Node, name: &str) -> Result<(), Error> {
        if !self.is_element(element) {
            return Err(Error::NotElement(element));
        }
        validator::check_element_name(name)
            .map_err(|reason| Error::illegal_name(name, "element", reason))?;
        if let Some(data) = self.element_mut(element) {
            data.name = name.to_string();
        }
        Ok(())
    }

    /// The namespace of an element.
    pub fn element_namespace(&self, element: Node) -> Option<&Namespace> {
        self.element(element).map(|e| e.namespace())
    }

    /// Move an element into another namespace.
    ///
    /// The new namespace must not collide with the namespaces the element
    /// declares or with the namespaces of its attributes.
    pub fn set_element_namespace(&mut self, element: Node, namespace: Namespace) -> Result<(), Error> {
        let data = self.element(element).ok_or(Error::NotElement(element))?;
        if data
            .additional_namespaces()
            .iter()
            .any(|declared| validator::namespaces_collide(&namespace, declared))
        {
            return Err(prefix_collision(
                &namespace,
                "an additional namespace declared by the element",
            ));
        }
        if self.attribute_namespace_collides(element, &namespace) {
            return Err(prefix_collision(&namespace, "an attribute namespace on the element"));
        }
        if let Some(data) = self.element_mut(element) {
            data.namespace = namespace;
        }
        Ok(())
    }

    /// The namespaces an element declares besides its own.
    pub fn additional_namespaces(&self, element: Node) -> &[Namespace] {
        self.element(element)
            .map(|e| e.additional_namespaces())
            .unwrap_or(&[])
    }

    /// Declare a namespace on an element.
    ///
    /// The prefix must not be bound to a different URI by the element's own
    /// namespace, by another declaration, or by an attribute. Declaring a
    /// namespace that is already declared does nothing.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let e = dom.new_element("e")?;
    /// let x1 = dom.namespace("x", "urn:1")?;
    /// dom.add_namespace_declaration(e, x1.clone())?;
    /// dom.add_namespace_declaration(e, x1)?;
    /// assert_eq!(dom.additional_namespaces(e).len(), 1);
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn add_namespace_declaration(&mut self, element: Node, namespace: Namespace) -> Result<(), Error> {
        let data = self.element(element).ok_or(Error::NotElement(element))?;
        if data
            .additional_namespaces()
            .iter()
            .any(|declared| declared.prefix() == namespace.prefix() && declared.uri() == namespace.uri())
        {
            return Ok(());
        }
        if validator::namespaces_collide(&namespace, data.namespace()) {
            return Err(prefix_collision(&namespace, "the element namespace prefix"));
        }
        if data
            .additional_namespaces()
            .iter()
            .any(|declared| validator::namespaces_collide(&namespace, declared))
        {
            return Err(prefix_collision(
                &namespace,
                "an additional namespace declared by the element",
            ));
        }
        if self.attribute_namespace_collides(element, &namespace) {
            return Err(prefix_collision(&namespace, "an attribute namespace on the element"));
        }
        if let Some(data) = self.element_mut(element) {
            data.additional_namespaces.push(namespace);
        }
        Ok(())
    }

    /// Remove a namespace declaration. Returns false if it was not declared.
    pub fn remove_namespace_declaration(&mut self, element: Node, namespace: &Namespace) -> bool {
        let Some(data) = self.element_mut(element) else {
            return false;
        };
        let before = data.additional_namespaces.len();
        data.additional_namespaces
            .retain(|declared| !(declared.prefix() == namespace.prefix() && declared.uri() == namespace.uri()));
        data.additional_namespaces.len() != before
    }

    /// Add a node to the end of the content of an element or document.
    ///
    /// This is [`Dom::append_content`] with early checks that explain why
    /// an element cannot be moved.
    pub fn add_content(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        if self.is_element(child) {
            if self.is_root_element(child) {
                return Err(Error::IllegalAdd(
                    "The element is already the root element of a document".to_string(),
                ));
            }
            if let Some(existing) = self.parent(child) {
                return Err(self.already_parented(child, existing));
            }
            if child == parent {
                return Err(Error::IllegalAdd(
                    "The element cannot be added to itself".to_string(),
                ));
            }
            if self.is_ancestor_of(child, parent) {
                return Err(Error::IllegalAdd(
                    "The element cannot be added as a descendant of itself".to_string(),
                ));
            }
        }
        self.append_content(parent, child)
    }

    /// Add text to the end of an element.
    ///
    /// If the content already ends with a text node, the text is appended
    /// to it; otherwise a new text node is added. CDATA sections are never
    /// extended.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let p = dom.new_element("p")?;
    /// dom.add_text(p, "Hello")?;
    /// dom.add_text(p, ", world")?;
    /// assert_eq!(dom.content_len(p), 1);
    /// assert_eq!(dom.element_text(p), "Hello, world");
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn add_text(&mut self, parent: Node, text: &str) -> Result<(), Error> {
        self.check_parent(parent)?;
        if let Some(last) = self.last_content(parent) {
            if let Some(existing) = self.text_mut(last) {
                return existing.append(text);
            }
        }
        let node = self.new_text(text)?;
        if let Err(err) = self.append_content(parent, node) {
            self.dispose(node);
            return Err(err);
        }
        Ok(())
    }

    /// Iterate over the child elements.
    pub fn children(&self, element: Node) -> impl Iterator<Item = Node> + '_ {
        self.content(element).filter(|n| self.is_element(*n))
    }

    /// Iterate over the child elements with a local name and namespace
    /// URI. The prefix does not matter.
    pub fn children_named<'a>(
        &'a self,
        element: Node,
        name: &'a str,
        namespace: &'a Namespace,
    ) -> impl Iterator<Item = Node> + 'a {
        self.content(element).filter(move |n| {
            self.element(*n)
                .is_some_and(|e| e.name() == name && e.namespace_uri() == namespace.uri())
        })
    }

    /// The first child element with a local name and namespace URI.
    pub fn child(&self, element: Node, name: &str, namespace: &Namespace) -> Option<Node> {
        self.children_named(element, name, namespace).next()
    }

    /// Remove the first child element with a local name and namespace URI
    /// and return it detached.
    pub fn remove_child(&mut self, element: Node, name: &str, namespace: &Namespace) -> Option<Node> {
        let child = self.child(element, name, namespace)?;
        self.detach(child);
        Some(child)
    }

    /// Remove all child elements with a local name and namespace URI and
    /// return them detached.
    pub fn remove_children(&mut self, element: Node, name: &str, namespace: &Namespace) -> Vec<Node> {
        let children = self
            .children_named(element, name, namespace)
            .collect::<Vec<_>>();
        for child in &children {
            self.detach(*child);
        }
        children
    }

    /// The text directly inside an element: its text and CDATA content
    /// concatenated. Text in child elements is not included.
    pub fn element_text(&self, element: Node) -> String {
        let mut result = String::new();
        for node in self.content(element) {
            match self.value(node) {
                Value::Text(text) => result.push_str(text.get()),
                Value::CData(cdata) => result.push_str(cdata.get()),
                _ => {}
            }
        }
        result
    }

    /// The element text with surrounding whitespace removed.
    pub fn element_text_trim(&self, element: Node) -> String {
        self.element_text(element)
            .trim_matches([' ', '\t', '\n', '\r'])
            .to_string()
    }

    /// The element text with whitespace runs collapsed.
    pub fn element_text_normalize(&self, element: Node) -> String {
        normalize_string(&self.element_text(element))
    }

    /// The text of the first child element with a local name and namespace
    /// URI.
    pub fn child_text(&self, element: Node, name: &str, namespace: &Namespace) -> Option<String> {
        self.child(element, name, namespace)
            .map(|child| self.element_text(child))
    }

    /// Like [`Dom::child_text`], trimmed.
    pub fn child_text_trim(&self, element: Node, name: &str, namespace: &Namespace) -> Option<String> {
        self.child(element, name, namespace)
            .map(|child| self.element_text_trim(child))
    }

    /// Replace the content of an element with a single text node. An empty
    /// string leaves the element empty. The old content is returned
    /// detached.
    pub fn set_element_text(&mut self, element: Node, text: &str) -> Result<Vec<Node>, Error> {
        if !self.is_element(element) {
            return Err(Error::NotElement(element));
        }
        if text.is_empty() {
            return Ok(self.clear_content(element));
        }
        let node = self.new_text(text)?;
        self.set_content(element, [node])
    }

    fn attribute_namespace_collides(&self, element: Node, namespace: &Namespace) -> bool {
        self.attributes(element)
            .filter_map(|a| self.attribute_data(a))
            .any(|attribute| {
                !attribute.namespace().prefix().is_empty()
                    && validator::namespaces_collide(namespace, attribute.namespace())
            })
    }
}

fn prefix_collision(namespace: &Namespace, with: &str) -> Error {
    Error::IllegalAdd(format!(
        "The namespace prefix \"{}\" collides with {}",
        namespace.prefix(),
        with
    ))
}
