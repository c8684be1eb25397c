use crate::dom::Node;

/// Errors raised by tree construction and mutation.
///
/// None of these are transient: they signal that the caller asked for
/// something the XML data model does not allow. Every failing operation
/// leaves the tree as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A name, prefix, URI or target failed the XML naming rules.
    #[error("The name \"{name}\" is not legal for an XML {construct}: {reason}.")]
    IllegalName {
        /// The offending name.
        name: String,
        /// What was being named (element, attribute, namespace prefix, ...).
        construct: &'static str,
        /// Why the name was rejected.
        reason: String,
    },
    /// A structural rule was violated: duplicate root or doctype, a node
    /// that already has a parent, a cycle, a namespace collision, or a
    /// node kind that the container does not accept.
    #[error("{0}")]
    IllegalAdd(String),
    /// Character data failed the XML character, CDATA or comment rules.
    #[error("The data \"{data}\" is not legal for XML {construct}: {reason}.")]
    IllegalData {
        /// The offending data.
        data: String,
        /// What the data was for (text, comment, CDATA section, ...).
        construct: &'static str,
        /// Why the data was rejected.
        reason: String,
    },
    /// A view or traversal saw its backing container change underneath it.
    #[error("The backing content changed while it was being iterated")]
    ConcurrentModification,
    /// An index outside of the valid range.
    #[error("Index: {index}, Size: {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The size of the list at the time of the request.
        len: usize,
    },
    /// A filter refused to accept or give up a node.
    #[error("{0}")]
    IllegalArgument(String),
    /// A cursor operation that needs a current node was called without one.
    #[error("{0}")]
    IllegalState(String),
    /// The node is not an element.
    #[error("Node is not an element: {0:?}")]
    NotElement(Node),
    /// The node is not a document.
    #[error("Node is not a document: {0:?}")]
    NotDocument(Node),
    /// The node is neither an element nor a document and cannot have content.
    #[error("Node cannot have content: {0:?}")]
    NotParent(Node),
    /// The node is not an attribute.
    #[error("Node is not an attribute: {0:?}")]
    NotAttribute(Node),
    /// A value could not be converted to the requested type.
    #[error("{target} conversion failed for value \"{value}\"")]
    DataConversion {
        /// The value that failed to convert.
        value: String,
        /// The name of the target type.
        target: &'static str,
    },
    /// The arena refused a link operation.
    #[error(transparent)]
    Tree(#[from] indextree::NodeError),
}

impl Error {
    pub(crate) fn illegal_name(name: &str, construct: &'static str, reason: String) -> Self {
        Error::IllegalName {
            name: name.to_string(),
            construct,
            reason,
        }
    }

    pub(crate) fn illegal_data(data: &str, construct: &'static str, reason: String) -> Self {
        Error::IllegalData {
            data: data.to_string(),
            construct,
            reason,
        }
    }
}
