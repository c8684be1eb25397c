use std::cell::Cell;

use crate::dom::{Dom, Node};
use crate::error::Error;
use crate::filter::{Container, Filter};

/// A live, filtered view of the content or the attributes of a node.
///
/// The view holds no nodes itself: every access looks at the current
/// state of the tree, so it always reflects changes made through other
/// paths. View indexes count only the nodes the filter matches; they are
/// translated into container indexes by scanning the container.
///
/// The view does not borrow the [`Dom`]; each method takes it as an
/// argument instead. The size is cached until the container changes
/// structurally.
///
/// ```rust
/// use xdom::filter::ElementFilter;
///
/// let mut dom = xdom::Dom::new();
/// let p = dom.new_element("p")?;
/// dom.add_text(p, "text")?;
/// let a = dom.new_element("a")?;
/// dom.add_content(p, a)?;
///
/// let elements = dom.content_view(p, ElementFilter::new());
/// assert_eq!(elements.len(&dom), 1);
/// assert_eq!(elements.get(&dom, 0)?, a);
///
/// // changes made directly are visible through the view
/// let b = dom.new_element("b")?;
/// dom.add_content(p, b)?;
/// assert_eq!(elements.to_vec(&dom), vec![a, b]);
///
/// // and changes made through the view show up in the element
/// let c = dom.new_element("c")?;
/// elements.insert(&mut dom, 0, c)?;
/// assert_eq!(dom.content_index_of(p, c), Some(1));
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContentList<F: Filter> {
    owner: Node,
    container: Container,
    filter: F,
    size: Cell<Option<(u64, usize)>>,
}

/// ## Views
impl Dom {
    /// A live view of the content of an element or document.
    pub fn content_view<F: Filter>(&self, owner: Node, filter: F) -> ContentList<F> {
        ContentList::new(owner, Container::Content, filter)
    }

    /// A live view of the attributes of an element.
    pub fn attribute_view<F: Filter>(&self, element: Node, filter: F) -> ContentList<F> {
        ContentList::new(element, Container::Attributes, filter)
    }
}

impl<F: Filter> ContentList<F> {
    fn new(owner: Node, container: Container, filter: F) -> Self {
        ContentList {
            owner,
            container,
            filter,
            size: Cell::new(None),
        }
    }

    /// The node whose content or attributes this view shows.
    pub fn owner(&self) -> Node {
        self.owner
    }

    /// The filter of this view.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub(crate) fn stamp(&self, dom: &Dom) -> u64 {
        match self.container {
            Container::Content => dom.content_stamp(self.owner),
            Container::Attributes => dom.attribute_stamp(self.owner),
        }
    }

    fn backing<'a>(&self, dom: &'a Dom) -> Box<dyn Iterator<Item = Node> + 'a> {
        match self.container {
            Container::Content => Box::new(dom.content(self.owner)),
            Container::Attributes => Box::new(dom.attributes(self.owner)),
        }
    }

    /// The number of nodes in the view.
    pub fn len(&self, dom: &Dom) -> usize {
        let stamp = self.stamp(dom);
        if let Some((cached_stamp, size)) = self.size.get() {
            if cached_stamp == stamp {
                return size;
            }
        }
        let size = if self.filter.matches_all(self.container) {
            self.backing(dom).count()
        } else {
            self.backing(dom)
                .filter(|n| self.filter.matches(dom, *n))
                .count()
        };
        self.size.set(Some((stamp, size)));
        size
    }

    /// Return true if the view shows no nodes.
    pub fn is_empty(&self, dom: &Dom) -> bool {
        self.len(dom) == 0
    }

    // The container index and node for a view index.
    fn resolve(&self, dom: &Dom, index: usize) -> Option<(usize, Node)> {
        self.backing(dom)
            .enumerate()
            .filter(|(_, n)| self.filter.matches(dom, *n))
            .nth(index)
    }

    fn out_of_bounds(&self, dom: &Dom, index: usize) -> Error {
        Error::IndexOutOfBounds {
            index,
            len: self.len(dom),
        }
    }

    /// The node at a view index.
    pub fn get(&self, dom: &Dom, index: usize) -> Result<Node, Error> {
        self.resolve(dom, index)
            .map(|(_, node)| node)
            .ok_or_else(|| self.out_of_bounds(dom, index))
    }

    /// The view index of a node.
    pub fn index_of(&self, dom: &Dom, node: Node) -> Option<usize> {
        self.iter(dom).position(|n| n == node)
    }

    /// Return true if the view shows this node.
    pub fn contains(&self, dom: &Dom, node: Node) -> bool {
        self.index_of(dom, node).is_some()
    }

    /// Iterate over the nodes in the view.
    pub fn iter<'a>(&'a self, dom: &'a Dom) -> impl Iterator<Item = Node> + 'a {
        self.backing(dom)
            .filter(move |n| self.filter.matches(dom, *n))
    }

    /// The nodes in the view, as a snapshot.
    pub fn to_vec(&self, dom: &Dom) -> Vec<Node> {
        self.iter(dom).collect()
    }

    /// Insert a node at a view index.
    ///
    /// The node goes right before the node currently at that view index.
    /// Inserting at the length of the view appends to the container.
    pub fn insert(&self, dom: &mut Dom, index: usize, node: Node) -> Result<(), Error> {
        let len = self.len(dom);
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let container_index = if index == len {
            self.backing(dom).count()
        } else {
            match self.resolve(dom, index) {
                Some((container_index, _)) => container_index,
                None => return Err(self.out_of_bounds(dom, index)),
            }
        };
        self.insert_at_container(dom, container_index, node)
    }

    // Insert at a container index, after the filter agrees.
    fn insert_at_container(&self, dom: &mut Dom, container_index: usize, node: Node) -> Result<(), Error> {
        if !self.filter.can_add(dom, node) {
            return Err(Error::IllegalArgument(format!(
                "Filter won't allow the {} to be added to the list",
                dom.value_type(node).describe()
            )));
        }
        match self.container {
            Container::Content => dom.insert_content(self.owner, container_index, node),
            Container::Attributes => dom.insert_attribute_at(self.owner, container_index, node),
        }
    }

    /// Append a node to the view.
    pub fn push(&self, dom: &mut Dom, node: Node) -> Result<(), Error> {
        let len = self.len(dom);
        self.insert(dom, len, node)
    }

    /// Remove the node at a view index and return it detached.
    pub fn remove(&self, dom: &mut Dom, index: usize) -> Result<Node, Error> {
        let (container_index, node) = self
            .resolve(dom, index)
            .ok_or_else(|| self.out_of_bounds(dom, index))?;
        if !self.filter.can_remove(dom, node) {
            return Err(Error::IllegalArgument(format!(
                "Filter won't allow the {} to be removed from the list",
                dom.value_type(node).describe()
            )));
        }
        match self.container {
            Container::Content => dom.remove_content_at(self.owner, container_index),
            Container::Attributes => dom.remove_attribute_at(self.owner, container_index),
        }
    }

    /// Replace the node at a view index and return the old node detached.
    pub fn set(&self, dom: &mut Dom, index: usize, node: Node) -> Result<Node, Error> {
        let (container_index, old) = self
            .resolve(dom, index)
            .ok_or_else(|| self.out_of_bounds(dom, index))?;
        if !self.filter.can_remove(dom, old) {
            return Err(Error::IllegalArgument(format!(
                "Filter won't allow the {} to be removed from the list",
                dom.value_type(old).describe()
            )));
        }
        if !self.filter.can_add(dom, node) {
            return Err(Error::IllegalArgument(format!(
                "Filter won't allow the {} to be added to the list",
                dom.value_type(node).describe()
            )));
        }
        match self.container {
            Container::Content => dom.set_content_at(self.owner, container_index, node),
            Container::Attributes => dom.set_attribute_at(self.owner, container_index, node),
        }
    }

    /// A cursor before the first node of the view.
    pub fn cursor(&self, dom: &Dom) -> ListCursor<'_, F> {
        ListCursor {
            view: self,
            expected_stamp: self.stamp(dom),
            position: 0,
            last: None,
        }
    }

    /// A cursor before the node at a view index. `index` may be the length
    /// of the view.
    pub fn cursor_at(&self, dom: &Dom, index: usize) -> Result<ListCursor<'_, F>, Error> {
        let len = self.len(dom);
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let mut cursor = self.cursor(dom);
        cursor.position = index;
        Ok(cursor)
    }
}

/// A bidirectional cursor over a [`ContentList`].
///
/// The cursor sits between two nodes of the view. [`ListCursor::next`] and
/// [`ListCursor::previous`] move it and return the node they pass;
/// [`ListCursor::remove`] and [`ListCursor::set`] work on that node, and
/// [`ListCursor::add`] inserts at the cursor position.
///
/// The cursor notices when its container is changed through any other
/// path and then fails with [`Error::ConcurrentModification`]. Changes
/// made through the cursor itself are fine.
///
/// ```rust
/// use xdom::filter::AnyContent;
///
/// let mut dom = xdom::Dom::new();
/// let p = dom.new_element("p")?;
/// let a = dom.new_element("a")?;
/// let b = dom.new_element("b")?;
/// dom.add_content(p, a)?;
/// dom.add_content(p, b)?;
///
/// let view = dom.content_view(p, AnyContent);
/// let mut cursor = view.cursor(&dom);
/// assert_eq!(cursor.next(&dom)?, Some(a));
/// cursor.remove(&mut dom)?;
/// assert_eq!(cursor.next(&dom)?, Some(b));
/// assert_eq!(cursor.next(&dom)?, None);
///
/// // a change behind the cursor's back
/// let c = dom.new_element("c")?;
/// dom.add_content(p, c)?;
/// assert!(matches!(cursor.previous(&dom), Err(xdom::Error::ConcurrentModification)));
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Debug)]
pub struct ListCursor<'a, F: Filter> {
    view: &'a ContentList<F>,
    expected_stamp: u64,
    position: usize,
    // view index of the node last returned by next or previous
    last: Option<usize>,
}

impl<'a, F: Filter> ListCursor<'a, F> {
    fn check(&self, dom: &Dom) -> Result<(), Error> {
        if self.view.stamp(dom) != self.expected_stamp {
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }

    fn current(&self) -> Result<usize, Error> {
        self.last.ok_or_else(|| {
            Error::IllegalState(
                "next or previous must be called before changing the current node".to_string(),
            )
        })
    }

    /// Return true if [`ListCursor::next`] would return a node.
    pub fn has_next(&self, dom: &Dom) -> Result<bool, Error> {
        self.check(dom)?;
        Ok(self.position < self.view.len(dom))
    }

    /// Move forward and return the node passed, or [`None`] at the end.
    pub fn next(&mut self, dom: &Dom) -> Result<Option<Node>, Error> {
        self.check(dom)?;
        if self.position >= self.view.len(dom) {
            return Ok(None);
        }
        let node = self.view.get(dom, self.position)?;
        self.last = Some(self.position);
        self.position += 1;
        Ok(Some(node))
    }

    /// Return true if [`ListCursor::previous`] would return a node.
    pub fn has_previous(&self, dom: &Dom) -> Result<bool, Error> {
        self.check(dom)?;
        Ok(self.position > 0)
    }

    /// Move backward and return the node passed, or [`None`] at the start.
    pub fn previous(&mut self, dom: &Dom) -> Result<Option<Node>, Error> {
        self.check(dom)?;
        if self.position == 0 {
            return Ok(None);
        }
        let node = self.view.get(dom, self.position - 1)?;
        self.position -= 1;
        self.last = Some(self.position);
        Ok(Some(node))
    }

    /// The view index of the node [`ListCursor::next`] would return.
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// The view index of the node [`ListCursor::previous`] would return.
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Insert a node at the cursor position, before the node `next` would
    /// return. At the end of the view the node goes right after the node
    /// `previous` would return, not at the end of the container. A
    /// following `previous` returns the new node.
    pub fn add(&mut self, dom: &mut Dom, node: Node) -> Result<(), Error> {
        self.check(dom)?;
        let at_end = self.position > 0 && self.position == self.view.len(dom);
        let result = if at_end {
            match self.view.resolve(dom, self.position - 1) {
                Some((container_index, _)) => {
                    self.view.insert_at_container(dom, container_index + 1, node)
                }
                None => Err(self.view.out_of_bounds(dom, self.position - 1)),
            }
        } else {
            self.view.insert(dom, self.position, node)
        };
        self.expected_stamp = self.view.stamp(dom);
        result?;
        self.position += 1;
        self.last = None;
        Ok(())
    }

    /// Remove the node last returned by `next` or `previous`.
    pub fn remove(&mut self, dom: &mut Dom) -> Result<Node, Error> {
        self.check(dom)?;
        let current = self.current()?;
        let result = self.view.remove(dom, current);
        self.expected_stamp = self.view.stamp(dom);
        let node = result?;
        if current < self.position {
            self.position -= 1;
        }
        self.last = None;
        Ok(node)
    }

    /// Replace the node last returned by `next` or `previous`, and return
    /// the old node detached.
    pub fn set(&mut self, dom: &mut Dom, node: Node) -> Result<Node, Error> {
        self.check(dom)?;
        let current = self.current()?;
        let result = self.view.set(dom, current, node);
        self.expected_stamp = self.view.stamp(dom);
        result
    }
}
