//! XML attribute parsing
//!
//! Parses the raw attribute substring carried by an opening tag into an
//! ordered name/value list. This is a pure helper: the tokenizer never calls
//! it, so consumers only pay for attribute parsing on the tags they care
//! about.

use super::scanner::is_whitespace;
use crate::error::Error;

/// A parsed attribute, borrowed from the input string.
///
/// Values are raw: entity references are not expanded. Call
/// [`expand_entities`](crate::expand_entities) on the value when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name
    pub name: &'a str,
    /// Attribute value, without its quotes
    pub value: &'a str,
}

/// Parse attributes from the raw attribute substring of an opening tag.
///
/// The input is the `attributes` payload of a tag-open event: everything
/// after the first whitespace inside the tag. Attributes must be quoted with
/// `"` or `'`. Order is preserved; a duplicate name overwrites the earlier
/// value in place.
///
/// ```
/// use saxine::parse_attributes;
///
/// let attrs = parse_attributes(" href=\"/feed\" rel='self'").unwrap();
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].name, "href");
/// assert_eq!(attrs[0].value, "/feed");
/// assert_eq!(attrs[1].value, "self");
/// ```
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute<'_>>, Error> {
    let bytes = input.as_bytes();
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        // Skip whitespace between attributes
        if is_whitespace(bytes[pos]) {
            pos += 1;
            continue;
        }

        // Everything up to '=' is the candidate name
        let name_start = pos;
        loop {
            if pos >= bytes.len() {
                return Err(Error::MissingAttributeValue);
            }
            if bytes[pos] == b'=' {
                break;
            }
            pos += 1;
        }

        let name = &input[name_start..pos];
        if name.bytes().any(is_whitespace) {
            return Err(Error::AttributeNameWhitespace);
        }

        pos += 1; // skip '='

        let quote = match bytes.get(pos) {
            None => return Err(Error::MissingAttributeValue),
            Some(&b) if b == b'"' || b == b'\'' => b,
            Some(_) => return Err(Error::UnquotedAttributeValue),
        };
        pos += 1;

        let value_start = pos;
        let value_end = match memchr::memchr(quote, &bytes[pos..]) {
            Some(offset) => pos + offset,
            None => return Err(Error::UnclosedAttributeValue),
        };
        let value = &input[value_start..value_end];
        pos = value_end + 1;

        // Duplicate names: last value wins, original position kept
        match attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => attrs.push(Attribute { name, value }),
        }
    }

    Ok(attrs)
}
