//! Échappement XML

/// Escape a string for use as XML element text or attribute value.
///
/// `&`, `<`, `>`, `'` and `"` are replaced by their predefined entities.
/// Characters that cannot appear in an XML document (control characters
/// other than tab, newline and carriage return, U+FFFE, U+FFFF) are replaced
/// by U+FFFD.
pub fn xml_escape(value: &str) -> String {
    if value.chars().all(is_xml_char) {
        return quick_xml::escape::escape(value).into_owned();
    }

    let cleaned: String = value
        .chars()
        .map(|c| {
            if is_xml_char(c) {
                c
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect();
    quick_xml::escape::escape(&cleaned).into_owned()
}

/// XML 1.0 `Char` production. Surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
