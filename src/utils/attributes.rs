// src/utils/attributes.rs
use crate::error::{ConvertError, Result};
use std::collections::HashMap;

/// Attribute name to (unquoted) value
pub type Attributes = HashMap<String, String>;

/// Decode the `key="value"` pairs of the first tag on a line.
///
/// Only the restricted dialect written by the solver is understood: one
/// opening (or self-closing) tag per line, attribute values without
/// embedded whitespace. Tokens without `=`, such as the tag name, are
/// dropped. Later duplicates of a key replace earlier ones.
pub fn decode_attributes(line: &str) -> Result<Attributes> {
    let malformed = || ConvertError::MalformedLine {
        line: line.trim_end().to_string(),
    };

    let open = line.find('<').ok_or_else(malformed)?;
    let close = line[open..]
        .find('>')
        .map(|offset| open + offset)
        .ok_or_else(malformed)?;

    let inner = line[open + 1..close].trim_end().trim_end_matches('/');

    let mut attributes = Attributes::new();
    for token in inner.split_whitespace() {
        if let Some((key, value)) = token.split_once('=') {
            attributes.insert(key.to_string(), value.trim_matches('"').to_string());
        }
    }

    Ok(attributes)
}
