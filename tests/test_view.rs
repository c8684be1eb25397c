use xdom::filter::{AnyAttribute, AnyContent, ContentFilter, ElementFilter, Filter};
use xdom::{Dom, Error, Node};

// <p>t1<a/>t2<b/></p>
fn mixed(dom: &mut Dom) -> (Node, Vec<Node>) {
    let p = dom.new_element("p").unwrap();
    let t1 = dom.new_text("t1").unwrap();
    let a = dom.new_element("a").unwrap();
    let t2 = dom.new_comment("t2").unwrap();
    let b = dom.new_element("b").unwrap();
    dom.insert_all(p, 0, [t1, a, t2, b]).unwrap();
    (p, vec![t1, a, t2, b])
}

#[test]
fn test_view_translates_indexes() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let elements = dom.content_view(p, ElementFilter::new());
    assert_eq!(elements.len(&dom), 2);
    assert_eq!(elements.get(&dom, 1).unwrap(), nodes[3]);
    assert_eq!(elements.index_of(&dom, nodes[3]), Some(1));
    assert!(!elements.contains(&dom, nodes[0]));
    let err = elements.get(&dom, 2).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Index: 2, Size: 2");

    // insert before the element at view index 1, which is after the comment
    let c = dom.new_element("c").unwrap();
    elements.insert(&mut dom, 1, c).unwrap();
    assert_eq!(
        dom.content(p).collect::<Vec<_>>(),
        vec![nodes[0], nodes[1], nodes[2], c, nodes[3]]
    );

    // inserting at the length appends to the container
    let d = dom.new_element("d").unwrap();
    elements.insert(&mut dom, 3, d).unwrap();
    assert_eq!(dom.last_content(p), Some(d));
}

#[test]
fn test_view_refuses_unmatched_nodes() {
    let mut dom = Dom::new();
    let (p, _) = mixed(&mut dom);
    let elements = dom.content_view(p, ElementFilter::new());
    let text = dom.new_text("x").unwrap();
    let err = elements.push(&mut dom, text).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Filter won't allow the Text to be added to the list");
    assert_eq!(dom.parent(text), None);
}

#[test]
fn test_view_is_live() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let elements = dom.content_view(p, ElementFilter::new());
    assert_eq!(elements.len(&dom), 2);
    dom.remove_content(p, nodes[1]);
    assert_eq!(elements.len(&dom), 1);
    assert_eq!(elements.to_vec(&dom), vec![nodes[3]]);
    let removed = elements.remove(&mut dom, 0).unwrap();
    assert_eq!(removed, nodes[3]);
    assert!(elements.is_empty(&dom));
    assert_eq!(dom.content_len(p), 2);
}

#[test]
fn test_view_set() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let elements = dom.content_view(p, ElementFilter::new());
    let c = dom.new_element("c").unwrap();
    assert_eq!(elements.set(&mut dom, 0, c).unwrap(), nodes[1]);
    assert_eq!(dom.content_index_of(p, c), Some(1));
    let text = dom.new_text("x").unwrap();
    assert!(matches!(
        elements.set(&mut dom, 0, text),
        Err(Error::IllegalArgument(_))
    ));
}

#[test]
fn test_content_filter_view() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let view = dom.content_view(
        p,
        ContentFilter::new(ContentFilter::TEXT | ContentFilter::COMMENT),
    );
    assert_eq!(view.to_vec(&dom), vec![nodes[0], nodes[2]]);
    let everything = dom.content_view(p, ElementFilter::new().or(ContentFilter::all()));
    assert_eq!(everything.len(&dom), 4);
}

#[test]
fn test_attribute_view() {
    let mut dom = Dom::new();
    let e = dom.new_element("e").unwrap();
    dom.add_text(e, "content").unwrap();
    let a = dom.set_attribute_value(e, "a", "1").unwrap();
    let view = dom.attribute_view(e, AnyAttribute);
    assert_eq!(view.to_vec(&dom), vec![a]);
    let b = dom.new_attribute("b", "2").unwrap();
    view.insert(&mut dom, 0, b).unwrap();
    assert_eq!(dom.attributes(e).collect::<Vec<_>>(), vec![b, a]);
    assert_eq!(dom.content_len(e), 1);

    let duplicate = dom.new_attribute("a", "again").unwrap();
    assert!(matches!(
        view.push(&mut dom, duplicate),
        Err(Error::IllegalAdd(_))
    ));
    assert_eq!(view.remove(&mut dom, 1).unwrap(), a);
    assert_eq!(view.len(&dom), 1);
}

#[test]
fn test_cursor_walks_both_ways() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let view = dom.content_view(p, AnyContent);
    let mut cursor = view.cursor(&dom);
    let mut seen = Vec::new();
    while cursor.has_next(&dom).unwrap() {
        seen.push(cursor.next(&dom).unwrap().unwrap());
    }
    assert_eq!(seen, nodes);
    assert_eq!(cursor.next_index(), 4);
    assert_eq!(cursor.previous(&dom).unwrap(), Some(nodes[3]));
    assert_eq!(cursor.previous_index(), Some(2));
    let mut cursor = view.cursor_at(&dom, 0).unwrap();
    assert!(!cursor.has_previous(&dom).unwrap());
    assert_eq!(cursor.previous(&dom).unwrap(), None);
    assert_eq!(cursor.previous_index(), None);
}

#[test]
fn test_cursor_mutations() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let view = dom.content_view(p, ElementFilter::new());
    let mut cursor = view.cursor(&dom);

    // nothing returned yet
    let err = cursor.remove(&mut dom).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"next or previous must be called before changing the current node");

    assert_eq!(cursor.next(&dom).unwrap(), Some(nodes[1]));
    let removed = cursor.remove(&mut dom).unwrap();
    assert_eq!(removed, nodes[1]);
    // only once
    assert!(matches!(
        cursor.remove(&mut dom),
        Err(Error::IllegalState(_))
    ));

    let c = dom.new_element("c").unwrap();
    cursor.add(&mut dom, c).unwrap();
    assert_eq!(cursor.previous(&dom).unwrap(), Some(c));
    assert_eq!(cursor.next(&dom).unwrap(), Some(c));
    assert_eq!(cursor.next(&dom).unwrap(), Some(nodes[3]));

    let d = dom.new_element("d").unwrap();
    assert_eq!(cursor.set(&mut dom, d).unwrap(), nodes[3]);
    assert_eq!(cursor.next(&dom).unwrap(), None);
    assert_eq!(view.to_vec(&dom), vec![c, d]);
}

#[test]
fn test_cursor_detects_concurrent_modification() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let view = dom.content_view(p, AnyContent);
    let mut cursor = view.cursor(&dom);
    cursor.next(&dom).unwrap();

    dom.remove_content(p, nodes[2]);
    assert!(matches!(
        cursor.next(&dom),
        Err(Error::ConcurrentModification)
    ));
    assert!(matches!(
        cursor.has_next(&dom),
        Err(Error::ConcurrentModification)
    ));
    let text = dom.new_text("x").unwrap();
    assert!(matches!(
        cursor.add(&mut dom, text),
        Err(Error::ConcurrentModification)
    ));
    assert_eq!(dom.parent(text), None);
}

#[test]
fn test_cursor_refused_add_keeps_working() {
    let mut dom = Dom::new();
    let (p, nodes) = mixed(&mut dom);
    let view = dom.content_view(p, AnyContent);
    let mut cursor = view.cursor(&dom);
    let doc_type = dom.new_doc_type("p", None, None).unwrap();
    assert!(matches!(
        cursor.add(&mut dom, doc_type),
        Err(Error::IllegalAdd(_))
    ));
    assert_eq!(cursor.next(&dom).unwrap(), Some(nodes[0]));
}

#[test]
fn test_size_cache_follows_changes() {
    let mut dom = Dom::new();
    let (p, _) = mixed(&mut dom);
    let view = dom.content_view(p, ContentFilter::new(ContentFilter::TEXT));
    assert_eq!(view.len(&dom), 1);
    assert_eq!(view.len(&dom), 1);
    // the last node is an element, so this adds a new text node
    dom.add_text(p, "tail").unwrap();
    assert_eq!(view.len(&dom), 2);
    assert!(view.filter().matches(&dom, dom.last_content(p).unwrap()));
}

#[test]
fn test_filter_for_the_other_container_shows_nothing() {
    let mut dom = Dom::new();
    let e = dom.new_element("e").unwrap();
    dom.set_attribute_value(e, "a", "1").unwrap();
    dom.set_attribute_value(e, "b", "2").unwrap();
    dom.add_text(e, "text").unwrap();

    let attributes = dom.attribute_view(e, AnyContent);
    assert_eq!(attributes.len(&dom), 0);
    assert!(attributes.to_vec(&dom).is_empty());
    let attributes = dom.attribute_view(e, ContentFilter::all());
    assert_eq!(attributes.len(&dom), 0);

    let content = dom.content_view(e, AnyAttribute);
    assert_eq!(content.len(&dom), 0);
    assert!(matches!(
        content.get(&dom, 0),
        Err(Error::IndexOutOfBounds { index: 0, len: 0 })
    ));
    let mut cursor = content.cursor(&dom);
    assert_eq!(cursor.next(&dom).unwrap(), None);

    let content = dom.content_view(e, ElementFilter::new().or(AnyAttribute));
    assert_eq!(content.len(&dom), content.to_vec(&dom).len());
    assert_eq!(content.len(&dom), 0);
    // the same filter over the attributes shows all of them
    let attributes = dom.attribute_view(e, ElementFilter::new().or(AnyAttribute));
    assert_eq!(attributes.len(&dom), 2);
    assert_eq!(attributes.to_vec(&dom).len(), 2);
}

#[test]
fn test_cursor_add_at_end_follows_previous_node() {
    let mut dom = Dom::new();
    let p = dom.new_element("p").unwrap();
    let a = dom.new_element("a").unwrap();
    let text = dom.new_text("text").unwrap();
    dom.insert_all(p, 0, [a, text]).unwrap();
    let view = dom.content_view(p, ElementFilter::new());
    let mut cursor = view.cursor(&dom);
    assert_eq!(cursor.next(&dom).unwrap(), Some(a));
    let c = dom.new_element("c").unwrap();
    cursor.add(&mut dom, c).unwrap();
    assert_eq!(dom.content(p).collect::<Vec<_>>(), vec![a, c, text]);
    assert_eq!(cursor.previous(&dom).unwrap(), Some(c));

    // an empty view still appends to the container
    let q = dom.new_element("q").unwrap();
    dom.add_text(q, "only").unwrap();
    let view = dom.content_view(q, ElementFilter::new());
    let mut cursor = view.cursor(&dom);
    let d = dom.new_element("d").unwrap();
    cursor.add(&mut dom, d).unwrap();
    assert_eq!(dom.last_content(q), Some(d));
}
