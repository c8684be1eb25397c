use crate::dom::{Dom, Node};
use crate::xmlvalue::Value;

/// ## Copying
impl Dom {
    /// Make a detached deep copy of a node.
    ///
    /// An element is copied with its namespace declarations, its attributes
    /// and all of its content; a document with all of its content. Every
    /// node in the copy is new: it has its own identity and its parent is
    /// inside the copy. Namespaces are shared, as they are immutable.
    ///
    /// ```rust
    /// let mut dom = xdom::Dom::new();
    /// let doc = dom.new_element("doc")?;
    /// let a = dom.new_element("a")?;
    /// dom.add_content(doc, a)?;
    /// dom.set_attribute_value(a, "x", "1")?;
    ///
    /// let copy = dom.deep_clone(a);
    /// assert_ne!(copy, a);
    /// assert_eq!(dom.parent(copy), None);
    /// assert_eq!(dom.attribute_value(copy, "x"), Some("1"));
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn deep_clone(&mut self, node: Node) -> Node {
        let copy = self.clone_value(node);
        let mut todo = vec![(node, copy)];
        while let Some((original, copy)) = todo.pop() {
            let children = self.all_children(original).collect::<Vec<_>>();
            for child in children {
                let child_copy = self.clone_value(child);
                // both nodes are fresh, so linking cannot fail
                copy.get().append(child_copy.get(), self.arena_mut());
                todo.push((child, child_copy));
            }
        }
        copy
    }

    fn clone_value(&mut self, node: Node) -> Node {
        let mut value = self.value(node).clone();
        match &mut value {
            Value::Element(element) => {
                element.content_stamp = 0;
                element.attribute_stamp = 0;
            }
            Value::Document(document) => document.content_stamp = 0,
            _ => {}
        }
        self.new_node(value)
    }
}
