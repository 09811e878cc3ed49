//! Name conversions between the JS-facing and attribute-facing spellings of
//! style properties and `dataset` keys.

use crate::error::ErrorKind;

/// Convert a style property as written on `element.style` (`backgroundColor`,
/// `WebkitTransform`, `cssFloat`) into its CSS name (`background-color`,
/// `-webkit-transform`, `float`). Names that are already CSS names, including
/// custom properties, pass through unchanged.
pub(crate) fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars().peekable();

    // `msTransform` is the one vendor prefix that starts lowercase.
    if name.starts_with("ms") && name[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push_str("-ms");
        chars.next();
        chars.next();
    }

    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// The attribute that `element.dataset[key]` maps to.
///
/// Like `dataset`, rejects keys containing a `-` followed by a lowercase ASCII
/// letter.
pub(crate) fn dataset_attribute_name(key: &str) -> Result<String, ErrorKind> {
    let bytes = key.as_bytes();
    if bytes
        .windows(2)
        .any(|pair| pair[0] == b'-' && pair[1].is_ascii_lowercase())
    {
        return Err(ErrorKind::InvalidDataKey(key.to_string()));
    }

    let mut out = String::with_capacity(key.len() + 8);
    out.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
