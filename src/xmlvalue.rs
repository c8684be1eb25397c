use std::fmt::Debug;

use crate::error::Error;
use crate::namespace::Namespace;
use crate::validator;

/// The type of the XML node.
///
/// Access it using [`Value::value_type`] or
/// [`Dom::value_type`](crate::Dom::value_type).
///
/// The `ValueType` can be used if you are interested in
/// the type of the value without needing to match on it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// A document. It holds the root element, a doctype, and comments and
    /// processing instructions around them.
    Document,
    /// Element; it has a name, a namespace, attributes and content.
    Element,
    /// Attribute of an element.
    Attribute,
    /// Text.
    Text,
    /// CDATA section.
    CData,
    /// Comment.
    Comment,
    /// Processing instruction.
    ProcessingInstruction,
    /// Entity reference.
    EntityRef,
    /// Document type declaration.
    DocType,
}

impl ValueType {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ValueType::Document => "Document",
            ValueType::Element => "Element",
            ValueType::Attribute => "Attribute",
            ValueType::Text => "Text",
            ValueType::CData => "CDATA",
            ValueType::Comment => "Comment",
            ValueType::ProcessingInstruction => "ProcessingInstruction",
            ValueType::EntityRef => "EntityRef",
            ValueType::DocType => "DocType",
        }
    }

    // "An Element", "A Comment"
    pub(crate) fn with_article(&self) -> String {
        let article = match self {
            ValueType::Element | ValueType::Attribute | ValueType::EntityRef => "An",
            _ => "A",
        };
        format!("{} {}", article, self.describe())
    }
}

// Attribute nodes are stored as children of their element, before any
// content node.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ValueCategory {
    Attribute,
    Normal,
}

/// An XML value.
///
/// Access it using [`Dom::value`](crate::Dom::value) or
/// mutably using [`Dom::value_mut`](crate::Dom::value_mut).
#[derive(Debug, Clone)]
pub enum Value {
    /// Document that holds everything at the top level.
    Document(Document),
    /// Element.
    Element(Element),
    /// Attribute.
    Attribute(Attribute),
    /// Text.
    Text(Text),
    /// CDATA section.
    CData(CData),
    /// Comment.
    Comment(Comment),
    /// Processing instruction.
    ProcessingInstruction(ProcessingInstruction),
    /// Entity reference.
    EntityRef(EntityRef),
    /// Document type declaration.
    DocType(DocType),
}

impl Value {
    /// Returns the type of the XML value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Document(_) => ValueType::Document,
            Value::Element(_) => ValueType::Element,
            Value::Attribute(_) => ValueType::Attribute,
            Value::Text(_) => ValueType::Text,
            Value::CData(_) => ValueType::CData,
            Value::Comment(_) => ValueType::Comment,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
            Value::EntityRef(_) => ValueType::EntityRef,
            Value::DocType(_) => ValueType::DocType,
        }
    }

    pub(crate) fn value_category(&self) -> ValueCategory {
        match self {
            Value::Attribute(_) => ValueCategory::Attribute,
            _ => ValueCategory::Normal,
        }
    }

    #[inline]
    pub(crate) fn is_normal(&self) -> bool {
        self.value_category() == ValueCategory::Normal
    }
}

fn qualified(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", prefix, name)
    }
}

/// Document value.
///
/// The structure of the document (root element, doctype) is accessed
/// through [`Dom`](crate::Dom); this only holds document-wide properties.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) base_uri: Option<String>,
    pub(crate) content_stamp: u64,
}

impl Document {
    pub(crate) fn new() -> Self {
        Document::default()
    }

    /// The URI the document was loaded from, if known.
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Set or clear the base URI.
    pub fn set_base_uri(&mut self, base_uri: Option<String>) {
        self.base_uri = base_uri;
    }
}

/// XML element value.
///
/// Changing the name or namespace of an element needs the surrounding
/// tree for validation, so it happens through
/// [`Dom::set_element_name`](crate::Dom::set_element_name) and
/// [`Dom::set_element_namespace`](crate::Dom::set_element_namespace).
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) namespace: Namespace,
    pub(crate) additional_namespaces: Vec<Namespace>,
    pub(crate) content_stamp: u64,
    pub(crate) attribute_stamp: u64,
}

impl Element {
    pub(crate) fn new(name: String, namespace: Namespace) -> Self {
        Element {
            name,
            namespace,
            additional_namespaces: Vec::new(),
            content_stamp: 0,
            attribute_stamp: 0,
        }
    }

    /// The local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace of the element.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The namespace prefix of the element, empty if there is none.
    pub fn namespace_prefix(&self) -> &str {
        self.namespace.prefix()
    }

    /// The namespace URI of the element, empty if it is in no namespace.
    pub fn namespace_uri(&self) -> &str {
        self.namespace.uri()
    }

    /// The name including the prefix, like `xhtml:p`.
    ///
    /// ```rust
    /// use xdom::Dom;
    ///
    /// let mut dom = Dom::new();
    /// let ns = dom.namespace("xhtml", "http://www.w3.org/1999/xhtml")?;
    /// let p = dom.new_element_ns("p", ns)?;
    /// assert_eq!(dom.element(p).unwrap().qualified_name(), "xhtml:p");
    /// # Ok::<(), xdom::Error>(())
    /// ```
    pub fn qualified_name(&self) -> String {
        qualified(self.namespace.prefix(), &self.name)
    }

    /// Namespace declarations on this element besides its own namespace.
    pub fn additional_namespaces(&self) -> &[Namespace] {
        &self.additional_namespaces
    }
}

/// The declared type of an attribute, as known from a DTD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeType {
    /// No type was declared.
    #[default]
    Undeclared,
    /// `CDATA`
    CData,
    /// `ID`
    Id,
    /// `IDREF`
    IdRef,
    /// `IDREFS`
    IdRefs,
    /// `ENTITY`
    Entity,
    /// `ENTITIES`
    Entities,
    /// `NMTOKEN`
    NmToken,
    /// `NMTOKENS`
    NmTokens,
    /// `NOTATION`
    Notation,
    /// An enumeration of allowed values.
    Enumeration,
}

/// XML attribute value.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) namespace: Namespace,
    pub(crate) value: String,
    pub(crate) attribute_type: AttributeType,
}

impl Attribute {
    pub(crate) fn new(name: String, namespace: Namespace, value: String) -> Self {
        Attribute {
            name,
            namespace,
            value,
            attribute_type: AttributeType::Undeclared,
        }
    }

    /// The local name of the attribute.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace of the attribute.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The name including the prefix, like `xlink:href`.
    pub fn qualified_name(&self) -> String {
        qualified(self.namespace.prefix(), &self.name)
    }

    /// The attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the attribute value.
    ///
    /// Rejects characters that are not legal in XML.
    pub fn set_value<S: Into<String>>(&mut self, value: S) -> Result<(), Error> {
        let value = value.into();
        validator::check_character_data(&value)
            .map_err(|reason| Error::illegal_data(&value, "attribute", reason))?;
        self.value = value;
        Ok(())
    }

    /// The declared attribute type.
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    /// Set the declared attribute type.
    pub fn set_attribute_type(&mut self, attribute_type: AttributeType) {
        self.attribute_type = attribute_type;
    }

    /// The value as an integer.
    pub fn int_value(&self) -> Result<i64, Error> {
        self.value
            .trim()
            .parse()
            .map_err(|_| self.conversion_error("int"))
    }

    /// The value as a floating point number. `INF` and `-INF` are accepted
    /// as XML Schema spells infinity.
    pub fn float_value(&self) -> Result<f64, Error> {
        match self.value.trim() {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            v => v.parse().map_err(|_| self.conversion_error("float")),
        }
    }

    /// The value as a boolean. Accepts `true`/`false`, `on`/`off`,
    /// `yes`/`no` and `1`/`0`, case-insensitively.
    pub fn bool_value(&self) -> Result<bool, Error> {
        let v = self.value.trim();
        for t in ["true", "on", "yes", "1"] {
            if v.eq_ignore_ascii_case(t) {
                return Ok(true);
            }
        }
        for f in ["false", "off", "no", "0"] {
            if v.eq_ignore_ascii_case(f) {
                return Ok(false);
            }
        }
        Err(self.conversion_error("boolean"))
    }

    fn conversion_error(&self, target: &'static str) -> Error {
        Error::DataConversion {
            value: self.value.clone(),
            target,
        }
    }
}

/// Collapse runs of XML whitespace into a single space and trim the ends.
pub fn normalize_string(s: &str) -> String {
    s.split([' ', '\t', '\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn trim_xml(s: &str) -> &str {
    s.trim_matches([' ', '\t', '\n', '\r'])
}

/// XML text value.
///
/// Example: `Bar` in `<foo>Bar</foo>`.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) text: String,
}

impl Text {
    pub(crate) fn new(text: String) -> Self {
        Text { text }
    }

    /// Get the text value.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the text value. The empty string is allowed.
    ///
    /// Rejects characters that are not legal in XML.
    pub fn set<S: Into<String>>(&mut self, text: S) -> Result<(), Error> {
        let text = text.into();
        validator::check_character_data(&text)
            .map_err(|reason| Error::illegal_data(&text, "character content", reason))?;
        self.text = text;
        Ok(())
    }

    /// Append text to the current value.
    pub fn append(&mut self, text: &str) -> Result<(), Error> {
        validator::check_character_data(text)
            .map_err(|reason| Error::illegal_data(text, "character content", reason))?;
        self.text.push_str(text);
        Ok(())
    }

    /// The text with surrounding whitespace removed.
    pub fn text_trim(&self) -> &str {
        trim_xml(&self.text)
    }

    /// The text with whitespace runs collapsed and the ends trimmed.
    pub fn text_normalize(&self) -> String {
        normalize_string(&self.text)
    }
}

/// XML CDATA section.
///
/// Example: `<![CDATA[a < b]]>`.
#[derive(Debug, Clone)]
pub struct CData {
    pub(crate) text: String,
}

impl CData {
    pub(crate) fn new(text: String) -> Self {
        CData { text }
    }

    /// Get the section content.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the section content.
    ///
    /// Rejects content containing `]]>`.
    pub fn set<S: Into<String>>(&mut self, text: S) -> Result<(), Error> {
        let text = text.into();
        validator::check_cdata_section(&text)
            .map_err(|reason| Error::illegal_data(&text, "CDATA section", reason))?;
        self.text = text;
        Ok(())
    }

    /// Append to the section content.
    ///
    /// The check runs on the combined content, as the delimiter can be
    /// split over the old and the new part.
    pub fn append(&mut self, text: &str) -> Result<(), Error> {
        let mut combined = self.text.clone();
        combined.push_str(text);
        self.set(combined)
    }
}

/// XML comment.
///
/// Example: `<!-- foo -->`.
#[derive(Debug, Clone)]
pub struct Comment {
    pub(crate) text: String,
}

impl Comment {
    pub(crate) fn new(text: String) -> Self {
        Comment { text }
    }

    /// Get the comment text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the comment text.
    ///
    /// Rejects comments that contain `--` or end with `-`.
    pub fn set<S: Into<String>>(&mut self, text: S) -> Result<(), Error> {
        let text = text.into();
        validator::check_comment_data(&text)
            .map_err(|reason| Error::illegal_data(&text, "comment", reason))?;
        self.text = text;
        Ok(())
    }
}

/// XML processing instruction value.
///
/// Example: `<?xml-stylesheet href="a.xsl" type="text/xsl"?>`.
///
/// The data is available as a raw string and, when it is made of
/// `name="value"` pairs, as ordered pseudo-attributes. Changing one view
/// updates the other.
///
/// ```rust
/// use xdom::Dom;
///
/// let mut dom = Dom::new();
/// let pi = dom.new_processing_instruction("xml-stylesheet", r#"href="a.xsl""#)?;
/// let value = dom.processing_instruction_mut(pi).unwrap();
/// value.set_pseudo_attribute("type", "text/xsl")?;
/// assert_eq!(value.data(), r#"href="a.xsl" type="text/xsl""#);
/// # Ok::<(), xdom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: String,
    pub(crate) pseudo_attributes: Vec<(String, String)>,
}

impl ProcessingInstruction {
    pub(crate) fn new(target: String, data: String) -> Self {
        let pseudo_attributes = parse_pseudo_attributes(&data);
        ProcessingInstruction {
            target,
            data,
            pseudo_attributes,
        }
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Set target.
    ///
    /// Rejects any target that is not a name, contains a colon, or is the
    /// string `"xml"` (or case variations).
    pub fn set_target<S: Into<String>>(&mut self, target: S) -> Result<(), Error> {
        let target = target.into();
        validator::check_processing_instruction_target(&target).map_err(|reason| {
            Error::illegal_name(&target, "processing instruction target", reason)
        })?;
        self.target = target;
        Ok(())
    }

    /// Get processing instruction data. Empty when there is none.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Set the raw data. The pseudo-attributes are parsed again from it.
    pub fn set_data<S: Into<String>>(&mut self, data: S) -> Result<(), Error> {
        let data = data.into();
        validator::check_processing_instruction_data(&data)
            .map_err(|reason| Error::illegal_data(&data, "processing instruction", reason))?;
        self.pseudo_attributes = parse_pseudo_attributes(&data);
        self.data = data;
        Ok(())
    }

    /// Get a pseudo-attribute value.
    pub fn pseudo_attribute(&self, name: &str) -> Option<&str> {
        self.pseudo_attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The pseudo-attribute names in order.
    pub fn pseudo_attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.pseudo_attributes.iter().map(|(n, _)| n.as_str())
    }

    /// Set a pseudo-attribute and rewrite the raw data.
    ///
    /// An existing pseudo-attribute keeps its position.
    pub fn set_pseudo_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        validator::check_xml_name(name)
            .map_err(|reason| Error::illegal_name(name, "processing instruction pseudo-attribute", reason))?;
        validator::check_processing_instruction_data(value)
            .map_err(|reason| Error::illegal_data(value, "processing instruction", reason))?;
        if value.contains('"') && value.contains('\'') {
            return Err(Error::illegal_data(
                value,
                "processing instruction",
                "Pseudo-attribute values cannot contain both quote characters".to_string(),
            ));
        }
        match self.pseudo_attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .pseudo_attributes
                .push((name.to_string(), value.to_string())),
        }
        self.data = serialize_pseudo_attributes(&self.pseudo_attributes);
        Ok(())
    }

    /// Remove a pseudo-attribute and rewrite the raw data. Returns true if
    /// it was present.
    pub fn remove_pseudo_attribute(&mut self, name: &str) -> bool {
        let before = self.pseudo_attributes.len();
        self.pseudo_attributes.retain(|(n, _)| n != name);
        if self.pseudo_attributes.len() == before {
            return false;
        }
        self.data = serialize_pseudo_attributes(&self.pseudo_attributes);
        true
    }
}

// Parses `name="value"` and `name='value'` pairs separated by whitespace.
// Parsing stops at the first malformed pair; the pairs before it are kept.
pub(crate) fn parse_pseudo_attributes(data: &str) -> Vec<(String, String)> {
    let mut result = Vec::new();
    let mut rest = data;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return result;
        }
        let Some(eq) = rest.find('=') else {
            return result;
        };
        let name = rest[..eq].trim_end();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return result;
        }
        let after_eq = rest[eq + 1..].trim_start();
        let Some(quote) = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            return result;
        };
        let value_and_rest = &after_eq[1..];
        let Some(end) = value_and_rest.find(quote) else {
            return result;
        };
        result.push((name.to_string(), value_and_rest[..end].to_string()));
        rest = &value_and_rest[end + 1..];
    }
}

pub(crate) fn serialize_pseudo_attributes(pseudo_attributes: &[(String, String)]) -> String {
    pseudo_attributes
        .iter()
        .map(|(name, value)| {
            if value.contains('"') {
                format!("{}='{}'", name, value)
            } else {
                format!("{}=\"{}\"", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// XML entity reference.
///
/// Example: `&foo;`.
#[derive(Debug, Clone)]
pub struct EntityRef {
    pub(crate) name: String,
    pub(crate) public_id: Option<String>,
    pub(crate) system_id: Option<String>,
}

impl EntityRef {
    pub(crate) fn new(name: String) -> Self {
        EntityRef {
            name,
            public_id: None,
            system_id: None,
        }
    }

    /// The entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the entity name.
    pub fn set_name<S: Into<String>>(&mut self, name: S) -> Result<(), Error> {
        let name = name.into();
        validator::check_xml_name(&name)
            .map_err(|reason| Error::illegal_name(&name, "entity reference", reason))?;
        self.name = name;
        Ok(())
    }

    /// The public ID, if any.
    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    /// Set or clear the public ID.
    pub fn set_public_id(&mut self, public_id: Option<String>) -> Result<(), Error> {
        if let Some(public_id) = &public_id {
            validator::check_public_id(public_id)
                .map_err(|reason| Error::illegal_data(public_id, "public ID", reason))?;
        }
        self.public_id = public_id;
        Ok(())
    }

    /// The system ID, if any.
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    /// Set or clear the system ID.
    pub fn set_system_id(&mut self, system_id: Option<String>) -> Result<(), Error> {
        if let Some(system_id) = &system_id {
            validator::check_system_literal(system_id)
                .map_err(|reason| Error::illegal_data(system_id, "system ID", reason))?;
        }
        self.system_id = system_id;
        Ok(())
    }
}

/// Document type declaration.
///
/// Example: `<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "xhtml1-strict.dtd">`.
#[derive(Debug, Clone)]
pub struct DocType {
    pub(crate) element_name: String,
    pub(crate) public_id: Option<String>,
    pub(crate) system_id: Option<String>,
    pub(crate) internal_subset: Option<String>,
}

impl DocType {
    pub(crate) fn new(element_name: String) -> Self {
        DocType {
            element_name,
            public_id: None,
            system_id: None,
            internal_subset: None,
        }
    }

    /// The declared name of the root element. This can include a prefix.
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Set the declared root element name.
    pub fn set_element_name<S: Into<String>>(&mut self, element_name: S) -> Result<(), Error> {
        let element_name = element_name.into();
        validator::check_xml_name(&element_name)
            .map_err(|reason| Error::illegal_name(&element_name, "DocType element name", reason))?;
        self.element_name = element_name;
        Ok(())
    }

    /// The public ID, if any.
    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    /// Set or clear the public ID.
    pub fn set_public_id(&mut self, public_id: Option<String>) -> Result<(), Error> {
        if let Some(public_id) = &public_id {
            validator::check_public_id(public_id)
                .map_err(|reason| Error::illegal_data(public_id, "public ID", reason))?;
        }
        self.public_id = public_id;
        Ok(())
    }

    /// The system ID, if any.
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    /// Set or clear the system ID.
    pub fn set_system_id(&mut self, system_id: Option<String>) -> Result<(), Error> {
        if let Some(system_id) = &system_id {
            validator::check_system_literal(system_id)
                .map_err(|reason| Error::illegal_data(system_id, "system ID", reason))?;
        }
        self.system_id = system_id;
        Ok(())
    }

    /// The internal subset, if any. It is kept as raw text.
    pub fn internal_subset(&self) -> Option<&str> {
        self.internal_subset.as_deref()
    }

    /// Set or clear the internal subset.
    pub fn set_internal_subset(&mut self, internal_subset: Option<String>) {
        self.internal_subset = internal_subset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pseudo_attributes() {
        assert_eq!(
            parse_pseudo_attributes(r#"href="a.xsl"  type='text/xsl'"#),
            vec![
                ("href".to_string(), "a.xsl".to_string()),
                ("type".to_string(), "text/xsl".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_pseudo_attributes_spaces_around_equals() {
        assert_eq!(
            parse_pseudo_attributes(r#"a = "1""#),
            vec![("a".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_parse_pseudo_attributes_stops_at_garbage() {
        assert_eq!(
            parse_pseudo_attributes(r#"a="1" not a pair b="2""#),
            vec![("a".to_string(), "1".to_string())]
        );
        assert!(parse_pseudo_attributes("free form data").is_empty());
        assert!(parse_pseudo_attributes(r#"a="unterminated"#).is_empty());
    }

    #[test]
    fn test_pseudo_attribute_roundtrip() {
        let mut pi = ProcessingInstruction::new("target".to_string(), r#"a="1""#.to_string());
        pi.set_pseudo_attribute("b", "it's").unwrap();
        pi.set_pseudo_attribute("c", r#"say "hi""#).unwrap();
        assert_eq!(pi.data(), r#"a="1" b="it's" c='say "hi"'"#);
        pi.set_pseudo_attribute("a", "2").unwrap();
        assert_eq!(pi.data(), r#"a="2" b="it's" c='say "hi"'"#);
        assert!(pi.remove_pseudo_attribute("b"));
        assert!(!pi.remove_pseudo_attribute("b"));
        assert_eq!(pi.data(), r#"a="2" c='say "hi"'"#);
        assert_eq!(pi.pseudo_attribute("c"), Some(r#"say "hi""#));
    }

    #[test]
    fn test_set_data_reparses() {
        let mut pi = ProcessingInstruction::new("target".to_string(), String::new());
        assert_eq!(pi.pseudo_attribute_names().count(), 0);
        pi.set_data(r#"x="1" y="2""#).unwrap();
        assert_eq!(pi.pseudo_attribute_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(pi.set_data("a ?> b").is_err());
        assert_eq!(pi.data(), r#"x="1" y="2""#);
    }

    #[test]
    fn test_normalize_string() {
        assert_eq!(normalize_string("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_string(" \n "), "");
    }

    #[test]
    fn test_comment_set() {
        let mut comment = Comment::new("ok".to_string());
        assert!(comment.set("not -- ok").is_err());
        assert_eq!(comment.get(), "ok");
    }

    #[test]
    fn test_cdata_append_checks_combined() {
        let mut cdata = CData::new("a]]".to_string());
        assert!(cdata.append(">b").is_err());
        assert_eq!(cdata.get(), "a]]");
        cdata.append(" b").unwrap();
        assert_eq!(cdata.get(), "a]] b");
    }

    #[test]
    fn test_attribute_typed_values() {
        let ns = Namespace::no_namespace();
        let attr = Attribute::new("n".to_string(), ns.clone(), " 42 ".to_string());
        assert_eq!(attr.int_value().unwrap(), 42);
        let attr = Attribute::new("b".to_string(), ns.clone(), "Yes".to_string());
        assert!(attr.bool_value().unwrap());
        let attr = Attribute::new("f".to_string(), ns.clone(), "-INF".to_string());
        assert_eq!(attr.float_value().unwrap(), f64::NEG_INFINITY);
        let attr = Attribute::new("x".to_string(), ns, "maybe".to_string());
        assert!(matches!(
            attr.bool_value(),
            Err(Error::DataConversion { target: "boolean", .. })
        ));
    }
}
