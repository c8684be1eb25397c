// Codepoint classes used by the name and character data checks.
//
// Both ends of a range are inclusive.

#[derive(Debug, Clone, Copy)]
pub(crate) struct CodepointRange(pub(crate) char, pub(crate) char);

impl CodepointRange {
    #[inline]
    fn contains(&self, c: char) -> bool {
        self.0 <= c && c <= self.1
    }
}

/// Legal characters (XML 1.0 § 2.2 [2]).
const XML_CHAR_RANGES: &[CodepointRange] = &[
    CodepointRange('\x09', '\x0a'),
    CodepointRange('\x0d', '\x0d'),
    CodepointRange('\u{0020}', '\u{d7ff}'),
    CodepointRange('\u{e000}', '\u{fffd}'),
    CodepointRange('\u{10000}', '\u{10ffff}'),
];

/// NameStartChar (XML 1.0 § 2.3 [4]).
const NAME_START_RANGES: &[CodepointRange] = &[
    CodepointRange(':', ':'),
    CodepointRange('A', 'Z'),
    CodepointRange('_', '_'),
    CodepointRange('a', 'z'),
    CodepointRange('\u{c0}', '\u{d6}'),
    CodepointRange('\u{d8}', '\u{f6}'),
    CodepointRange('\u{f8}', '\u{2ff}'),
    CodepointRange('\u{370}', '\u{37d}'),
    CodepointRange('\u{37f}', '\u{1fff}'),
    CodepointRange('\u{200c}', '\u{200d}'),
    CodepointRange('\u{2070}', '\u{218f}'),
    CodepointRange('\u{2c00}', '\u{2fef}'),
    CodepointRange('\u{3001}', '\u{d7ff}'),
    CodepointRange('\u{f900}', '\u{fdcf}'),
    CodepointRange('\u{fdf0}', '\u{fffd}'),
    CodepointRange('\u{10000}', '\u{effff}'),
];

/// NameChar (XML 1.0 § 2.3 [4a]): NameStartChar plus digits, hyphen,
/// period, combining marks and extenders.
const NAME_RANGES: &[CodepointRange] = &[
    CodepointRange('-', '.'),
    CodepointRange('0', ':'),
    CodepointRange('A', 'Z'),
    CodepointRange('_', '_'),
    CodepointRange('a', 'z'),
    CodepointRange('\u{b7}', '\u{b7}'),
    CodepointRange('\u{c0}', '\u{d6}'),
    CodepointRange('\u{d8}', '\u{f6}'),
    CodepointRange('\u{f8}', '\u{37d}'),
    CodepointRange('\u{37f}', '\u{1fff}'),
    CodepointRange('\u{200c}', '\u{200d}'),
    CodepointRange('\u{203f}', '\u{2040}'),
    CodepointRange('\u{2070}', '\u{218f}'),
    CodepointRange('\u{2c00}', '\u{2fef}'),
    CodepointRange('\u{3001}', '\u{d7ff}'),
    CodepointRange('\u{f900}', '\u{fdcf}'),
    CodepointRange('\u{fdf0}', '\u{fffd}'),
    CodepointRange('\u{10000}', '\u{effff}'),
];

fn contained_in_ranges(c: char, ranges: &[CodepointRange]) -> bool {
    ranges.iter().any(|r| r.contains(c))
}

#[inline]
pub(crate) fn is_xml_character(c: char) -> bool {
    contained_in_ranges(c, XML_CHAR_RANGES)
}

#[inline]
pub(crate) fn is_name_start_character(c: char) -> bool {
    contained_in_ranges(c, NAME_START_RANGES)
}

#[inline]
pub(crate) fn is_name_character(c: char) -> bool {
    contained_in_ranges(c, NAME_RANGES)
}

/// PubidChar (XML 1.0 § 2.3 [13]).
pub(crate) fn is_pubid_character(c: char) -> bool {
    matches!(c,
        ' ' | '\r' | '\n'
        | 'a'..='z' | 'A'..='Z' | '0'..='9'
        | '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':' | '='
        | '?' | ';' | '!' | '*' | '#' | '@' | '$' | '_' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_start_is_subset_of_name() {
        for cp in 0x0..=0x10ffffu32 {
            if let Some(c) = char::from_u32(cp) {
                if is_name_start_character(c) {
                    assert!(is_name_character(c), "U+{:x} starts but cannot continue a name", cp);
                }
            }
        }
    }

    #[test]
    fn test_name_characters() {
        assert!(is_name_start_character('a'));
        assert!(is_name_start_character('_'));
        assert!(is_name_start_character(':'));
        assert!(!is_name_start_character('1'));
        assert!(!is_name_start_character('-'));
        assert!(is_name_character('1'));
        assert!(is_name_character('-'));
        assert!(is_name_character('.'));
        assert!(is_name_character('\u{300}'));
        assert!(!is_name_start_character('\u{300}'));
        assert!(!is_name_character(' '));
        assert!(!is_name_character('/'));
    }

    #[test]
    fn test_xml_characters() {
        assert!(is_xml_character('\t'));
        assert!(is_xml_character('\n'));
        assert!(is_xml_character('\r'));
        assert!(!is_xml_character('\x00'));
        assert!(!is_xml_character('\x0b'));
        assert!(!is_xml_character('\u{fffe}'));
        assert!(is_xml_character('\u{1f600}'));
    }
}
