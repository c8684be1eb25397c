use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::filter::{AnyContent, Filter};

/// A depth-first, pre-order walk over everything below a node.
///
/// The node itself is not included. Attributes are never visited. With a
/// filter, only matching nodes are returned, but the walk still enters
/// every element.
///
/// The walk descends into an element lazily, on the call after the one
/// that returned it. That makes [`Descendants::remove`] well defined: it
/// detaches the node returned last and the walk goes on with its next
/// sibling, without entering the removed element.
///
/// Like [`ListCursor`](crate::ListCursor), a walk takes the [`Dom`] on
/// every call and fails with [`Error::ConcurrentModification`] when any
/// container it is walking, the current one or one of its ancestors, was
/// changed through another path.
///
/// ```rust
/// use xdom::filter::ElementFilter;
///
/// let mut dom = xdom::Dom::new();
/// let doc = dom.new_element("doc")?;
/// let a = dom.new_element("a")?;
/// let b = dom.new_element("b")?;
/// dom.add_content(doc, a)?;
/// dom.add_content(a, b)?;
/// dom.add_text(b, "text")?;
///
/// let all = dom.descendants(doc).iter(&dom).collect::<Vec<_>>();
/// assert_eq!(all.len(), 3);
///
/// let mut walk = dom.descendants_filtered(doc, ElementFilter::named("a"));
/// assert_eq!(walk.next(&dom)?, Some(a));
/// walk.remove(&mut dom)?;
/// assert_eq!(walk.next(&dom)?, None);
/// assert_eq!(dom.content_len(doc), 0);
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Debug)]
pub struct Descendants<F: Filter> {
    filter: F,
    levels: Vec<Level>,
    // an element that was returned and whose content comes next
    pending: Option<Node>,
    last: Option<Node>,
}

#[derive(Debug)]
struct Level {
    owner: Node,
    expected_stamp: u64,
    next: Option<Node>,
}

impl Level {
    fn new(dom: &Dom, owner: Node) -> Self {
        Level {
            owner,
            expected_stamp: dom.content_stamp(owner),
            next: dom.content(owner).next(),
        }
    }

    fn check(&self, dom: &Dom) -> Result<(), Error> {
        if dom.content_stamp(self.owner) != self.expected_stamp {
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }
}

/// ## Traversal
impl Dom {
    /// Walk over every content node below `parent`.
    pub fn descendants(&self, parent: Node) -> Descendants<AnyContent> {
        self.descendants_filtered(parent, AnyContent)
    }

    /// Walk over the content nodes below `parent` that match a filter.
    pub fn descendants_filtered<F: Filter>(&self, parent: Node, filter: F) -> Descendants<F> {
        Descendants {
            filter,
            levels: vec![Level::new(self, parent)],
            pending: None,
            last: None,
        }
    }
}

impl<F: Filter> Descendants<F> {
    /// The next node in document order, or [`None`] when the walk is done.
    pub fn next(&mut self, dom: &Dom) -> Result<Option<Node>, Error> {
        self.last = None;
        loop {
            if let Some(element) = self.pending.take() {
                self.levels.push(Level::new(dom, element));
            }
            self.check(dom)?;
            let Some(level) = self.levels.last_mut() else {
                return Ok(None);
            };
            let Some(node) = level.next else {
                self.levels.pop();
                continue;
            };
            level.next = dom.arena()[node.get()].next_sibling().map(Node::new);
            if dom.is_element(node) {
                self.pending = Some(node);
            }
            if self.filter.matches(dom, node) {
                self.last = Some(node);
                return Ok(Some(node));
            }
        }
    }

    /// Detach the node returned by the last call to [`Descendants::next`].
    /// If it is an element, the walk does not enter it.
    pub fn remove(&mut self, dom: &mut Dom) -> Result<Node, Error> {
        let node = self.last.take().ok_or_else(|| {
            Error::IllegalState("next must return a node before it can be removed".to_string())
        })?;
        self.check(dom)?;
        let level = self.levels.last_mut().ok_or_else(|| {
            Error::IllegalState("the walk is already done".to_string())
        })?;
        dom.detach(node);
        level.expected_stamp = dom.content_stamp(level.owner);
        if self.pending == Some(node) {
            self.pending = None;
        }
        Ok(node)
    }

    fn check(&self, dom: &Dom) -> Result<(), Error> {
        self.levels.iter().try_for_each(|level| level.check(dom))
    }

    /// Turn the walk into a standard iterator over an immutably borrowed
    /// `Dom`. The tree cannot change while it is borrowed, so no error can
    /// occur.
    pub fn iter<'a>(mut self, dom: &'a Dom) -> impl Iterator<Item = Node> + 'a
    where
        F: 'a,
    {
        std::iter::from_fn(move || self.next(dom).ok().flatten())
    }
}
