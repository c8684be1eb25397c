use xdom::{Dom, Error};

#[test]
fn test_element_names() {
    let mut dom = Dom::new();
    let ns = dom.namespace("h", "http://www.w3.org/1999/xhtml").unwrap();
    let p = dom.new_element_ns("p", ns.clone()).unwrap();
    assert_eq!(dom.element_name(p), Some("p"));
    assert_eq!(dom.qualified_name(p).as_deref(), Some("h:p"));
    assert_eq!(dom.element_namespace(p), Some(&ns));

    dom.set_element_name(p, "div").unwrap();
    assert_eq!(dom.qualified_name(p).as_deref(), Some("h:div"));
    let err = dom.set_element_name(p, "x:div").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The name "x:div" is not legal for an XML element: Element names cannot contain colons."###);
    assert_eq!(dom.element_name(p), Some("div"));
}

#[test]
fn test_illegal_element_names() {
    let mut dom = Dom::new();
    let err = dom.new_element("").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The name "" is not legal for an XML element: XML names cannot be empty."###);
    let err = dom.new_element("1a").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The name "1a" is not legal for an XML element: XML names cannot begin with the character "1"."###);
}

#[test]
fn test_children_by_uri() {
    let mut dom = Dom::new();
    let x = dom.namespace("x", "urn:x").unwrap();
    let doc = dom.new_element("doc").unwrap();
    let a1 = dom.new_element_ns("a", x.clone()).unwrap();
    let a2 = dom.new_element("a").unwrap();
    let a3 = dom.new_element_ns("a", x.clone()).unwrap();
    for child in [a1, a2, a3] {
        dom.add_content(doc, child).unwrap();
    }
    dom.add_text(doc, "text").unwrap();

    assert_eq!(dom.children(doc).count(), 3);
    assert_eq!(
        dom.children_named(doc, "a", &x).collect::<Vec<_>>(),
        vec![a1, a3]
    );
    let no_namespace = dom.no_namespace();
    assert_eq!(dom.child(doc, "a", &no_namespace), Some(a2));
    assert_eq!(dom.child(doc, "b", &no_namespace), None);
}

#[test]
fn test_child_lookup_then_removal() {
    let mut dom = Dom::new();
    let x = dom.namespace("x", "http://x").unwrap();
    let doc = dom.new_element("doc").unwrap();
    let a1 = dom.new_element_ns("a", x.clone()).unwrap();
    let a2 = dom.new_element_ns("a", x.clone()).unwrap();
    dom.add_content(doc, a1).unwrap();
    dom.add_content(doc, a2).unwrap();

    // the prefix does not matter, only the URI
    let registered = dom.namespace("y", "http://x").unwrap();
    assert_eq!(dom.child(doc, "a", &registered), Some(a1));
    assert_eq!(dom.remove_child(doc, "a", &registered), Some(a1));
    assert_eq!(dom.parent(a1), None);
    assert_eq!(dom.content(doc).collect::<Vec<_>>(), vec![a2]);
}

#[test]
fn test_remove_children() {
    let mut dom = Dom::new();
    let doc = dom.new_element("doc").unwrap();
    let ns = dom.no_namespace();
    let a1 = dom.new_element("a").unwrap();
    let b = dom.new_element("b").unwrap();
    let a2 = dom.new_element("a").unwrap();
    for child in [a1, b, a2] {
        dom.add_content(doc, child).unwrap();
    }
    assert_eq!(dom.remove_children(doc, "a", &ns), vec![a1, a2]);
    assert_eq!(dom.children(doc).collect::<Vec<_>>(), vec![b]);
    assert!(dom.remove_children(doc, "a", &ns).is_empty());
}

#[test]
fn test_element_text() {
    let mut dom = Dom::new();
    let doc = dom.new_element("doc").unwrap();
    dom.add_text(doc, "  Hello").unwrap();
    let child = dom.new_element("child").unwrap();
    dom.add_content(doc, child).unwrap();
    dom.add_text(child, "ignored").unwrap();
    let cdata = dom.new_cdata(" <world>  ").unwrap();
    dom.add_content(doc, cdata).unwrap();

    assert_eq!(dom.element_text(doc), "  Hello <world>  ");
    assert_eq!(dom.element_text_trim(doc), "Hello <world>");
    assert_eq!(dom.element_text_normalize(doc), "Hello <world>");

    let ns = dom.no_namespace();
    assert_eq!(dom.child_text(doc, "child", &ns).as_deref(), Some("ignored"));
    assert_eq!(dom.child_text(doc, "missing", &ns), None);
}

#[test]
fn test_set_element_text() {
    let mut dom = Dom::new();
    let doc = dom.new_element("doc").unwrap();
    let child = dom.new_element("child").unwrap();
    dom.add_content(doc, child).unwrap();
    dom.set_attribute_value(doc, "a", "1").unwrap();

    let old = dom.set_element_text(doc, "new").unwrap();
    assert_eq!(old, vec![child]);
    assert_eq!(dom.element_text(doc), "new");
    assert_eq!(dom.content_len(doc), 1);
    assert_eq!(dom.attribute_count(doc), 1);

    dom.set_element_text(doc, "").unwrap();
    assert_eq!(dom.content_len(doc), 0);
}

#[test]
fn test_ancestry() {
    let mut dom = Dom::new();
    let a = dom.new_element("a").unwrap();
    let b = dom.new_element("b").unwrap();
    let c = dom.new_element("c").unwrap();
    dom.add_content(a, b).unwrap();
    dom.add_content(b, c).unwrap();
    assert!(dom.is_ancestor_of(a, c));
    assert!(!dom.is_ancestor_of(c, a));
    assert!(!dom.is_ancestor_of(a, a));
    assert_eq!(dom.ancestors(c).collect::<Vec<_>>(), vec![b, a]);
    assert_eq!(dom.document_of(c), None);
    assert!(!dom.is_root_element(a));
}

#[test]
fn test_element_operations_need_element() {
    let mut dom = Dom::new();
    let text = dom.new_text("t").unwrap();
    assert!(matches!(
        dom.set_element_name(text, "a"),
        Err(Error::NotElement(_))
    ));
    assert!(matches!(
        dom.set_element_text(text, "a"),
        Err(Error::NotElement(_))
    ));
    assert_eq!(dom.element_name(text), None);
    assert_eq!(dom.qualified_name(text), None);
}
