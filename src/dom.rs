use indextree::{Arena, NodeId};

use crate::error::Error;
use crate::namespace::{Namespace, NamespaceRegistry};
use crate::xmlvalue::Value;

pub(crate) type XmlArena = Arena<Value>;

/// A node in the XML tree.
/// This is a lightweight value and can be copied.
///
/// Two handles are equal only if they refer to the very same node;
/// structurally identical nodes are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// The `Dom` struct owns all XML tree data in your program. It lets you
/// build, inspect and change one or more XML documents and detached
/// fragments.
///
/// Every mutation keeps the tree well-formed: a node has at most one
/// parent, an element is never added below itself, a document has at most
/// one root element and one doctype, and namespace prefixes never collide
/// on an element. A failing operation returns an [`Error`] and leaves the
/// tree unchanged.
///
/// `Dom` is implemented in several sections focusing on different aspects
/// of accessing and manipulating XML data.
pub struct Dom {
    pub(crate) arena: XmlArena,
    pub(crate) registry: NamespaceRegistry,
}

impl Dom {
    /// Create a new `Dom` instance with its own namespace registry.
    pub fn new() -> Self {
        Self::with_registry(NamespaceRegistry::new())
    }

    /// Create a new `Dom` instance that interns namespaces in an existing
    /// registry.
    pub fn with_registry(registry: NamespaceRegistry) -> Self {
        Dom {
            arena: XmlArena::new(),
            registry,
        }
    }

    /// The namespace registry.
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// The namespace registry, mutably. Use this to clear it.
    pub fn registry_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.registry
    }

    /// Get the interned namespace for a prefix and URI.
    ///
    /// See [`NamespaceRegistry::get`].
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let ns = dom.namespace("x", "urn:x")?;
    /// assert_eq!(ns.prefix(), "x");
    /// assert!(dom.namespace("x", "").is_err());
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn namespace(&mut self, prefix: &str, uri: &str) -> Result<Namespace, Error> {
        self.registry.get(prefix, uri)
    }

    /// Get the interned namespace for a URI, with the empty prefix if it
    /// is new.
    pub fn namespace_uri(&mut self, uri: &str) -> Result<Namespace, Error> {
        self.registry.get_uri(uri)
    }

    /// The "no namespace" namespace.
    pub fn no_namespace(&self) -> Namespace {
        self.registry.no_namespace()
    }

    /// The XML namespace, bound to the `xml` prefix.
    pub fn xml_namespace(&self) -> Namespace {
        self.registry.xml_namespace()
    }

    #[inline]
    pub(crate) fn arena(&self) -> &XmlArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut XmlArena {
        &mut self.arena
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
