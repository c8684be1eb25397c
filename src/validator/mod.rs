//! Checks for XML names, namespace prefixes and URIs, and character data.
//!
//! Every check is a pure function. It returns `Ok(())` when the candidate is
//! legal, and otherwise a human-readable reason. The tree operations turn
//! that reason into an [`Error::IllegalName`](crate::Error::IllegalName) or
//! [`Error::IllegalData`](crate::Error::IllegalData); the checks themselves
//! never fail in any other way.
//!
//! ```rust
//! use xdom::validator;
//!
//! assert!(validator::check_element_name("para").is_ok());
//! assert!(validator::check_element_name("x:para").is_err());
//! assert!(validator::check_comment_data("a -- b").is_err());
//! ```

mod chars;

use crate::namespace::Namespace;

use chars::{is_name_character, is_name_start_character, is_pubid_character, is_xml_character};

type Reason = String;

/// Check that a string is a legal XML 1.0 name. Colons are allowed.
pub fn check_xml_name(name: &str) -> Result<(), Reason> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| "XML names cannot be empty".to_string())?;
    if !is_name_start_character(first) {
        return Err(format!("XML names cannot begin with the character \"{}\"", first));
    }
    for c in chars {
        if !is_name_character(c) {
            return Err(format!("XML names cannot contain the character \"{}\"", c));
        }
    }
    Ok(())
}

/// Check that a string is a legal local element name.
///
/// Namespace prefixes are carried by the element's namespace, never by
/// its name, so colons are rejected.
pub fn check_element_name(name: &str) -> Result<(), Reason> {
    check_xml_name(name)?;
    if name.contains(':') {
        return Err("Element names cannot contain colons".to_string());
    }
    Ok(())
}

/// Check that a string is a legal local attribute name.
///
/// Besides the element name rules, `xmlns` is rejected: namespace
/// declarations are not attributes in this model.
pub fn check_attribute_name(name: &str) -> Result<(), Reason> {
    check_xml_name(name)?;
    if name.contains(':') {
        return Err("Attribute names cannot contain colons".to_string());
    }
    if name == "xmlns" {
        return Err(
            "An attribute name may not be \"xmlns\"; declare namespaces on the element instead"
                .to_string(),
        );
    }
    Ok(())
}

/// Check that a string is a legal namespace prefix. The empty prefix is
/// always legal.
pub fn check_namespace_prefix(prefix: &str) -> Result<(), Reason> {
    let Some(first) = prefix.chars().next() else {
        return Ok(());
    };
    if first.is_ascii_digit() {
        return Err("Namespace prefixes cannot begin with a number".to_string());
    }
    if first == '$' {
        return Err("Namespace prefixes cannot begin with a dollar sign ($)".to_string());
    }
    if first == '-' {
        return Err("Namespace prefixes cannot begin with a hyphen (-)".to_string());
    }
    if first == '.' {
        return Err("Namespace prefixes cannot begin with a period (.)".to_string());
    }
    if prefix
        .get(..3)
        .is_some_and(|start| start.eq_ignore_ascii_case("xml"))
    {
        return Err(
            "Namespace prefixes cannot begin with \"xml\" in any combination of case".to_string(),
        );
    }
    for c in prefix.chars() {
        if c == ':' {
            return Err("Namespace prefixes cannot contain colons".to_string());
        }
        if !is_name_character(c) {
            return Err(format!(
                "Namespace prefixes cannot contain the character \"{}\"",
                c
            ));
        }
    }
    Ok(())
}

/// Check that a string is an acceptable namespace URI. The empty URI is
/// always legal.
pub fn check_namespace_uri(uri: &str) -> Result<(), Reason> {
    let Some(first) = uri.chars().next() else {
        return Ok(());
    };
    if first.is_ascii_digit() {
        return Err("Namespace URIs cannot begin with a number".to_string());
    }
    if first == '$' {
        return Err("Namespace URIs cannot begin with a dollar sign ($)".to_string());
    }
    if first == '-' {
        return Err("Namespace URIs cannot begin with a hyphen (-)".to_string());
    }
    Ok(())
}

/// Check that every character is a legal XML character.
///
/// A Rust `str` cannot hold unpaired surrogates, so surrogate pairing is
/// guaranteed before this check runs.
pub fn check_character_data(text: &str) -> Result<(), Reason> {
    match text.chars().find(|c| !is_xml_character(*c)) {
        Some(c) => Err(format!("0x{:x} is not a legal XML character", c as u32)),
        None => Ok(()),
    }
}

/// Check the content of a CDATA section.
pub fn check_cdata_section(text: &str) -> Result<(), Reason> {
    check_character_data(text)?;
    if text.contains("]]>") {
        return Err("CDATA cannot internally contain a CDATA ending delimiter (]]>)".to_string());
    }
    Ok(())
}

/// Check the content of a comment.
pub fn check_comment_data(text: &str) -> Result<(), Reason> {
    check_character_data(text)?;
    if text.contains("--") {
        return Err("Comments cannot contain double hyphens (--)".to_string());
    }
    if text.ends_with('-') {
        return Err("Comment data cannot end with a hyphen".to_string());
    }
    Ok(())
}

/// Check a processing instruction target.
pub fn check_processing_instruction_target(target: &str) -> Result<(), Reason> {
    check_xml_name(target)?;
    if target.contains(':') {
        return Err("Processing instruction targets cannot contain colons".to_string());
    }
    if target.eq_ignore_ascii_case("xml") {
        return Err(
            "Processing instructions cannot have a target of \"xml\" in any combination of case"
                .to_string(),
        );
    }
    Ok(())
}

/// Check processing instruction data, including the values of
/// pseudo-attributes.
pub fn check_processing_instruction_data(data: &str) -> Result<(), Reason> {
    check_character_data(data)?;
    if data.contains("?>") {
        return Err(
            "Processing instructions cannot contain the string \"?>\"".to_string(),
        );
    }
    Ok(())
}

/// Check a public ID as used in doctypes and entity references.
pub fn check_public_id(public_id: &str) -> Result<(), Reason> {
    match public_id.chars().find(|c| !is_pubid_character(*c)) {
        Some(c) => Err(format!("0x{:x} is not a legal character in public IDs", c as u32)),
        None => Ok(()),
    }
}

/// Check a system literal as used in doctypes and entity references.
pub fn check_system_literal(system_id: &str) -> Result<(), Reason> {
    check_character_data(system_id)?;
    if system_id.contains('\'') && system_id.contains('"') {
        return Err(
            "System literals cannot simultaneously contain both single and double quotes"
                .to_string(),
        );
    }
    Ok(())
}

/// Two namespaces collide when they bind the same prefix to different URIs.
pub fn namespaces_collide(a: &Namespace, b: &Namespace) -> bool {
    a.prefix() == b.prefix() && a.uri() != b.uri()
}
