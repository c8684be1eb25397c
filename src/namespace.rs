use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ahash::HashMap;

use crate::error::Error;
use crate::validator;

/// The URI bound to the `xml` prefix.
pub const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug)]
struct NamespaceData {
    prefix: String,
    uri: String,
}

/// An XML namespace: a prefix bound to a URI.
///
/// Namespaces are immutable and cheap to clone. They are obtained from a
/// [`NamespaceRegistry`] (usually through [`Dom::namespace`](crate::Dom::namespace))
/// which hands out one shared value per URI.
///
/// Equality and hashing only look at the URI, as the URI is what identifies
/// a namespace in XML; the prefix is a local shorthand.
///
/// ```rust
/// use xdom::Dom;
///
/// let mut dom = Dom::new();
/// let p = dom.namespace("p", "urn:a")?;
/// let q = dom.namespace("q", "urn:a")?;
/// assert!(p.ptr_eq(&q));
/// assert_eq!(q.prefix(), "p");
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Clone)]
pub struct Namespace(Arc<NamespaceData>);

impl Namespace {
    pub(crate) fn new_unchecked(prefix: &str, uri: &str) -> Self {
        Namespace(Arc::new(NamespaceData {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        }))
    }

    /// The "no namespace" namespace, with empty prefix and empty URI.
    pub fn no_namespace() -> Self {
        Self::new_unchecked("", "")
    }

    /// The namespace bound to the `xml` prefix.
    pub fn xml() -> Self {
        Self::new_unchecked("xml", XML_NAMESPACE_URI)
    }

    /// The prefix. Empty for the default namespace and for no namespace.
    pub fn prefix(&self) -> &str {
        &self.0.prefix
    }

    /// The namespace URI. Empty for no namespace.
    pub fn uri(&self) -> &str {
        &self.0.uri
    }

    /// True if this is the "no namespace" namespace.
    pub fn is_no_namespace(&self) -> bool {
        self.0.uri.is_empty()
    }

    /// True if both values are the very same interned namespace.
    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.uri == other.0.uri
    }
}

impl Eq for Namespace {}

impl Hash for Namespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.uri.hash(state);
    }
}

impl Debug for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace")
            .field("prefix", &self.0.prefix)
            .field("uri", &self.0.uri)
            .finish()
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Namespace: prefix \"{}\" is mapped to URI \"{}\"]",
            self.0.prefix, self.0.uri
        )
    }
}

/// Interning table for namespaces.
///
/// The URI is the identity key: once a URI is registered, asking for it
/// again returns the registered namespace, whatever prefix was requested.
/// The table only grows; call [`NamespaceRegistry::clear`] to drop the
/// interned entries in long-running processes. Namespaces handed out
/// before a clear stay valid.
pub struct NamespaceRegistry {
    by_uri: HashMap<String, Namespace>,
    no_namespace: Namespace,
    xml_namespace: Namespace,
}

impl NamespaceRegistry {
    /// Create a registry that only knows the built-in namespaces.
    pub fn new() -> Self {
        let no_namespace = Namespace::no_namespace();
        let xml_namespace = Namespace::xml();
        let mut by_uri = HashMap::default();
        by_uri.insert(String::new(), no_namespace.clone());
        by_uri.insert(XML_NAMESPACE_URI.to_string(), xml_namespace.clone());
        NamespaceRegistry {
            by_uri,
            no_namespace,
            xml_namespace,
        }
    }

    /// Get the namespace for a prefix and URI, interning it if needed.
    ///
    /// Blank prefixes and URIs count as empty. The `xml` prefix always
    /// gives the XML namespace. A non-empty prefix needs a non-empty URI.
    pub fn get(&mut self, prefix: &str, uri: &str) -> Result<Namespace, Error> {
        let prefix = if prefix.trim().is_empty() { "" } else { prefix };
        let uri = if uri.trim().is_empty() { "" } else { uri };
        if prefix == "xml" {
            return Ok(self.xml_namespace.clone());
        }
        if uri.is_empty() {
            if prefix.is_empty() {
                return Ok(self.no_namespace.clone());
            }
            return Err(Error::illegal_name(
                uri,
                "namespace",
                "Namespace URIs must be non-empty when a prefix is given".to_string(),
            ));
        }
        if let Some(existing) = self.by_uri.get(uri) {
            return Ok(existing.clone());
        }
        validator::check_namespace_prefix(prefix)
            .map_err(|reason| Error::illegal_name(prefix, "namespace prefix", reason))?;
        validator::check_namespace_uri(uri)
            .map_err(|reason| Error::illegal_name(uri, "namespace URI", reason))?;
        Ok(self.intern(prefix, uri))
    }

    /// Get the namespace for a URI with the empty prefix.
    pub fn get_uri(&mut self, uri: &str) -> Result<Namespace, Error> {
        self.get("", uri)
    }

    /// Look up an interned namespace by URI without interning anything.
    pub fn lookup(&self, uri: &str) -> Option<Namespace> {
        self.by_uri.get(uri).cloned()
    }

    // Interns without validation; only the trusted construction path and
    // `get` (after validation) come through here.
    pub(crate) fn intern(&mut self, prefix: &str, uri: &str) -> Namespace {
        if uri.is_empty() {
            return self.no_namespace.clone();
        }
        if let Some(existing) = self.by_uri.get(uri) {
            return existing.clone();
        }
        tracing::trace!(prefix = %prefix, uri = %uri, "interning namespace");
        let namespace = Namespace::new_unchecked(prefix, uri);
        self.by_uri.insert(uri.to_string(), namespace.clone());
        namespace
    }

    /// The "no namespace" namespace.
    pub fn no_namespace(&self) -> Namespace {
        self.no_namespace.clone()
    }

    /// The XML namespace.
    pub fn xml_namespace(&self) -> Namespace {
        self.xml_namespace.clone()
    }

    /// Number of interned namespaces, including the two built-ins.
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    /// Always false: the built-in namespaces are always present.
    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }

    /// Drop everything except the built-in namespaces.
    pub fn clear(&mut self) {
        tracing::trace!(interned = self.by_uri.len(), "clearing namespace registry");
        self.by_uri.clear();
        self.by_uri
            .insert(String::new(), self.no_namespace.clone());
        self.by_uri
            .insert(XML_NAMESPACE_URI.to_string(), self.xml_namespace.clone());
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
