use xdom::{Dom, Error, Namespace, NamespaceRegistry, XML_NAMESPACE_URI};

#[test]
fn test_uri_wins_interning() {
    let mut registry = NamespaceRegistry::new();
    let a = registry.get("a", "urn:1").unwrap();
    let b = registry.get("b", "urn:1").unwrap();
    assert_eq!(b.prefix(), "a");
    assert!(a.ptr_eq(&b));
    assert_eq!(registry.get_uri("urn:1").unwrap().prefix(), "a");
}

#[test]
fn test_namespace_equality_is_by_uri() {
    let mut first = NamespaceRegistry::new();
    let mut second = NamespaceRegistry::new();
    let a = first.get("a", "urn:1").unwrap();
    let b = second.get("b", "urn:1").unwrap();
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert_ne!(a, second.get("a", "urn:2").unwrap());
}

#[test]
fn test_builtin_namespaces() {
    let mut registry = NamespaceRegistry::new();
    let xml = registry.get("xml", "").unwrap();
    assert_eq!(xml.uri(), XML_NAMESPACE_URI);
    assert_eq!(registry.get("", "").unwrap(), Namespace::no_namespace());
    assert!(registry.get("", "").unwrap().is_no_namespace());
    insta::assert_snapshot!(xml.to_string(), @r###"[Namespace: prefix "xml" is mapped to URI "http://www.w3.org/XML/1998/namespace"]"###);
}

#[test]
fn test_illegal_namespaces() {
    let mut registry = NamespaceRegistry::new();
    let err = registry.get("x", "").unwrap_err();
    assert!(matches!(err, Error::IllegalName { .. }));
    let err = registry.get("xmlfoo", "urn:x").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The name "xmlfoo" is not legal for an XML namespace prefix: Namespace prefixes cannot begin with "xml" in any combination of case."###);
    let err = registry.get("p", "1urn").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The name "1urn" is not legal for an XML namespace URI: Namespace URIs cannot begin with a number."###);
    assert!(registry.lookup("urn:x").is_none());
}

#[test]
fn test_registry_clear() {
    let mut registry = NamespaceRegistry::new();
    let before = registry.len();
    let ns = registry.get("a", "urn:1").unwrap();
    assert_eq!(registry.len(), before + 1);
    registry.clear();
    assert_eq!(registry.len(), before);
    // handed out values stay valid
    assert_eq!(ns.uri(), "urn:1");
    // and the URI can be bound to a new prefix
    assert_eq!(registry.get("b", "urn:1").unwrap().prefix(), "b");
}

#[test]
fn test_shared_registry() {
    let mut registry = NamespaceRegistry::new();
    registry.get("a", "urn:1").unwrap();
    let mut dom = Dom::with_registry(registry);
    assert_eq!(dom.namespace("b", "urn:1").unwrap().prefix(), "a");
    assert!(dom.registry().lookup("urn:1").is_some());
    dom.registry_mut().clear();
    assert!(dom.registry().lookup("urn:1").is_none());
}

#[test]
fn test_declaration_collides_with_attribute() {
    let mut dom = Dom::new();
    let e = dom.new_element("e").unwrap();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    dom.add_namespace_declaration(e, x1).unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    let foo = dom.new_attribute_ns("foo", "v", x2).unwrap();
    let err = dom.set_attribute(e, foo).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The attribute namespace prefix "x" collides with an additional namespace declared by the element"###);
    assert!(!dom.has_attributes(e));
    assert_eq!(dom.parent(foo), None);
}

#[test]
fn test_attribute_collides_with_element_namespace() {
    let mut dom = Dom::new();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    let e = dom.new_element_ns("e", x1).unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    let err = dom
        .set_attribute_value_ns(e, "a", "v", x2)
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The attribute namespace prefix "x" collides with the element namespace prefix"###);
    assert!(!dom.has_attributes(e));
}

#[test]
fn test_attributes_collide_with_each_other() {
    let mut dom = Dom::new();
    let e = dom.new_element("e").unwrap();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    dom.set_attribute_value_ns(e, "a", "v", x1).unwrap();
    let err = dom.set_attribute_value_ns(e, "b", "v", x2).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The attribute namespace prefix "x" collides with another attribute namespace on the element"###);
}

#[test]
fn test_declaration_collisions() {
    let mut dom = Dom::new();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    let y = dom.namespace("y", "urn:y").unwrap();
    let y2 = dom.namespace("y", "urn:y2").unwrap();
    let e = dom.new_element_ns("e", x1.clone()).unwrap();
    let err = dom.add_namespace_declaration(e, x2.clone()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The namespace prefix "x" collides with the element namespace prefix"###);

    // same binding twice is a no-op
    dom.add_namespace_declaration(e, y.clone()).unwrap();
    dom.add_namespace_declaration(e, y.clone()).unwrap();
    assert_eq!(dom.additional_namespaces(e), &[y.clone()]);
    let err = dom.add_namespace_declaration(e, y2.clone()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The namespace prefix "y" collides with an additional namespace declared by the element"###);

    let z = dom.namespace("z", "urn:z").unwrap();
    let z2 = dom.namespace("z", "urn:z2").unwrap();
    dom.set_attribute_value_ns(e, "a", "v", z).unwrap();
    let err = dom.add_namespace_declaration(e, z2.clone()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The namespace prefix "z" collides with an attribute namespace on the element"###);

    assert!(dom.remove_namespace_declaration(e, &y));
    assert!(!dom.remove_namespace_declaration(e, &y));
    dom.add_namespace_declaration(e, y2).unwrap();
}

#[test]
fn test_set_element_namespace_collisions() {
    let mut dom = Dom::new();
    let e = dom.new_element("e").unwrap();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    dom.add_namespace_declaration(e, x1.clone()).unwrap();
    let err = dom.set_element_namespace(e, x2).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"The namespace prefix "x" collides with an additional namespace declared by the element"###);
    dom.set_element_namespace(e, x1.clone()).unwrap();
    assert_eq!(dom.element_namespace(e), Some(&x1));
}

#[test]
fn test_attribute_namespace_change_checked() {
    let mut dom = Dom::new();
    let x1 = dom.namespace("x", "urn:1").unwrap();
    let x2 = dom.namespace("x", "urn:2").unwrap();
    let e = dom.new_element_ns("e", x1).unwrap();
    let a = dom.set_attribute_value(e, "a", "v").unwrap();
    assert!(matches!(
        dom.set_attribute_namespace(a, x2.clone()),
        Err(Error::IllegalAdd(_))
    ));
    // detached, anything goes
    dom.detach(a);
    dom.set_attribute_namespace(a, x2.clone()).unwrap();
    assert_eq!(dom.attribute_data(a).unwrap().namespace(), &x2);
}

#[test]
fn test_namespace_in_scope() {
    let mut dom = Dom::new();
    let x = dom.namespace("x", "urn:x").unwrap();
    let y = dom.namespace("y", "urn:y").unwrap();
    let outer = dom.new_element("outer").unwrap();
    dom.add_namespace_declaration(outer, x.clone()).unwrap();
    let middle = dom.new_element_ns("middle", y.clone()).unwrap();
    dom.add_content(outer, middle).unwrap();
    let inner = dom.new_element("inner").unwrap();
    dom.add_content(middle, inner).unwrap();
    let z = dom.namespace("z", "urn:z").unwrap();
    dom.set_attribute_value_ns(inner, "a", "v", z.clone()).unwrap();

    assert_eq!(dom.namespace_in_scope(inner, "x"), Some(x.clone()));
    assert_eq!(dom.namespace_in_scope(inner, "y"), Some(y.clone()));
    assert_eq!(dom.namespace_in_scope(inner, "z"), Some(z.clone()));
    assert_eq!(dom.namespace_in_scope(middle, "z"), None);
    assert_eq!(
        dom.namespace_in_scope(inner, "xml").unwrap().uri(),
        XML_NAMESPACE_URI
    );
    assert_eq!(dom.namespace_in_scope(inner, "").unwrap(), dom.no_namespace());
    assert_eq!(dom.namespace_in_scope(inner, "nope"), None);
}

#[test]
fn test_namespaces_in_scope() {
    let mut dom = Dom::new();
    let x = dom.namespace("x", "urn:x").unwrap();
    let other_x = dom.namespace("xx", "urn:other").unwrap();
    let outer = dom.new_element_ns("outer", x.clone()).unwrap();
    let inner = dom.new_element("inner").unwrap();
    dom.add_content(outer, inner).unwrap();
    dom.add_namespace_declaration(inner, other_x.clone()).unwrap();

    let prefixes = dom
        .namespaces_in_scope(inner)
        .map(|ns| ns.prefix().to_string())
        .collect::<Vec<_>>();
    assert_eq!(prefixes, vec!["", "xx", "x", "xml"]);
}
