use xdom::fixed;
use xdom::{CheckedFactory, Dom, Error, NodeFactory, TrustedFactory};

#[test]
fn test_checked_factory_validates_names() {
    let mut dom = Dom::new();
    let no_namespace = dom.no_namespace();
    let err = CheckedFactory
        .element(&mut dom, "1bad", no_namespace)
        .unwrap_err();
    assert!(matches!(err, Error::IllegalName { .. }));
}

#[test]
fn test_trusted_factory_skips_checks() {
    let mut dom = Dom::new();
    let no_namespace = dom.no_namespace();
    let e = TrustedFactory
        .element(&mut dom, "1bad", no_namespace)
        .unwrap();
    assert_eq!(dom.element_name(e), Some("1bad"));
    let comment = TrustedFactory.comment(&mut dom, "a--b").unwrap();
    TrustedFactory.add_content(&mut dom, e, comment).unwrap();
    assert_eq!(dom.content_len(e), 1);
    assert!(CheckedFactory.comment(&mut dom, "a--b").is_err());
}

#[test]
fn test_factories_share_the_registry() {
    let mut dom = Dom::new();
    let a = CheckedFactory.namespace(&mut dom, "a", "urn:1").unwrap();
    let b = TrustedFactory.namespace(&mut dom, "b", "urn:1").unwrap();
    assert!(a.ptr_eq(&b));
    let xml = TrustedFactory.namespace(&mut dom, "xml", "").unwrap();
    assert!(xml.ptr_eq(&dom.xml_namespace()));
}

#[test]
fn test_trusted_factory_links_attributes_and_declarations() {
    let mut dom = Dom::new();
    let no_namespace = dom.no_namespace();
    let e = TrustedFactory
        .element(&mut dom, "e", no_namespace.clone())
        .unwrap();
    let text = TrustedFactory.text(&mut dom, "content").unwrap();
    TrustedFactory.add_content(&mut dom, e, text).unwrap();
    let a = TrustedFactory
        .attribute(&mut dom, "a", "1", no_namespace)
        .unwrap();
    TrustedFactory.set_attribute(&mut dom, e, a).unwrap();
    let x = TrustedFactory.namespace(&mut dom, "x", "urn:x").unwrap();
    TrustedFactory
        .add_namespace_declaration(&mut dom, e, x.clone())
        .unwrap();

    assert_eq!(dom.attributes(e).collect::<Vec<_>>(), vec![a]);
    assert_eq!(dom.content_len(e), 1);
    assert_eq!(dom.additional_namespaces(e), &[x]);
}

#[test]
fn test_document_through_factory() {
    let mut dom = Dom::new();
    let no_namespace = dom.no_namespace();
    let root = CheckedFactory
        .element(&mut dom, "root", no_namespace)
        .unwrap();
    let document = CheckedFactory.document(&mut dom, Some(root)).unwrap();
    let doc_type = CheckedFactory
        .doc_type(&mut dom, "root", Some("-//X//EN"), None)
        .unwrap();
    // a checked factory enforces document structure
    assert!(matches!(
        CheckedFactory.add_content(&mut dom, document, doc_type),
        Err(Error::IllegalAdd(_))
    ));
    let comment = CheckedFactory.comment(&mut dom, "after").unwrap();
    CheckedFactory.add_content(&mut dom, document, comment).unwrap();
    assert_eq!(dom.root_element(document), Some(root));
    assert_eq!(dom.last_content(document), Some(comment));
}

#[test]
fn test_same_tree_from_either_factory() {
    let fixed = fixed::Element {
        name: "doc".to_string(),
        namespace: fixed::Namespace::new("", "urn:default"),
        declarations: vec![fixed::Namespace::new("p", "urn:p")],
        attributes: vec![fixed::Attribute {
            name: "a".to_string(),
            namespace: fixed::Namespace::new("p", "urn:p"),
            value: "1".to_string(),
        }],
        children: vec![
            fixed::Content::Text("hello".to_string()),
            fixed::Content::ProcessingInstruction(fixed::ProcessingInstruction {
                target: "go".to_string(),
                data: String::new(),
            }),
        ],
    };
    let mut checked = Dom::new();
    let checked_node = fixed.build(&mut checked, &CheckedFactory).unwrap();
    let mut trusted = Dom::new();
    let trusted_node = fixed.build(&mut trusted, &TrustedFactory).unwrap();
    assert_eq!(
        checked.to_fixed_element(checked_node).unwrap(),
        trusted.to_fixed_element(trusted_node).unwrap()
    );
}
