use ahash::HashSet;
use genawaiter::rc::gen;
use genawaiter::yield_;

use crate::dom::{Dom, Node};
use crate::namespace::Namespace;

/// ## Namespace scope
///
/// An element sees the namespaces bound by itself and by its ancestor
/// elements: their own namespaces, their declarations, and the namespaces
/// of their prefixed attributes. The nearest binding of a prefix wins.
impl Dom {
    /// Resolve a prefix on an element.
    ///
    /// The `xml` prefix always resolves to the XML namespace. Returns
    /// [`None`] if no element up to the top of the tree binds the prefix.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let x = dom.namespace("x", "urn:x")?;
    /// let outer = dom.new_element("outer")?;
    /// dom.add_namespace_declaration(outer, x)?;
    /// let inner = dom.new_element("inner")?;
    /// dom.add_content(outer, inner)?;
    /// assert_eq!(dom.namespace_in_scope(inner, "x").unwrap().uri(), "urn:x");
    /// assert!(dom.namespace_in_scope(inner, "y").is_none());
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn namespace_in_scope(&self, element: Node, prefix: &str) -> Option<Namespace> {
        if prefix == "xml" {
            return Some(self.xml_namespace());
        }
        for node in std::iter::once(element).chain(self.ancestors(element)) {
            if let Some(namespace) = self.bound_here(node, prefix) {
                return Some(namespace);
            }
        }
        None
    }

    /// Iterate over every namespace visible on an element, nearest binding
    /// first. The XML namespace and, when nothing rebinds the empty
    /// prefix, the "no namespace" namespace come last.
    pub fn namespaces_in_scope(&self, element: Node) -> impl Iterator<Item = Namespace> + '_ {
        gen!({
            let mut seen = HashSet::default();
            for node in std::iter::once(element).chain(self.ancestors(element)) {
                for namespace in self.bindings(node) {
                    if seen.insert(namespace.prefix().to_string()) {
                        yield_!(namespace);
                    }
                }
            }
            if !seen.contains("xml") {
                yield_!(self.xml_namespace());
            }
            if !seen.contains("") {
                yield_!(self.no_namespace());
            }
        })
        .into_iter()
    }

    fn bound_here(&self, node: Node, prefix: &str) -> Option<Namespace> {
        self.bindings(node).into_iter().find(|n| n.prefix() == prefix)
    }

    // Namespaces bound on one element, in lookup order. Nothing for other
    // kinds of node.
    fn bindings(&self, node: Node) -> Vec<Namespace> {
        let Some(element) = self.element(node) else {
            return Vec::new();
        };
        let mut bindings = vec![element.namespace().clone()];
        bindings.extend(element.additional_namespaces().iter().cloned());
        bindings.extend(
            self.attributes(node)
                .filter_map(|a| self.attribute_data(a))
                .map(|a| a.namespace())
                .filter(|ns| !ns.prefix().is_empty())
                .cloned(),
        );
        bindings
    }
}
