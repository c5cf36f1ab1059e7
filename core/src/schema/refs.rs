#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Encoding and decoding of `#/definitions/<name>` pointers.
//!
//! Definition names are JSON Pointer escaped (`~0`, `~1`) and then percent
//! encoded so the pointer is a valid URI fragment.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Prefix every Swagger 2.0 definition pointer starts with.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds the `$ref` value pointing at the definition called `name`.
pub fn definition_ref(name: &str) -> String {
    format!("{}{}", DEFINITIONS_PREFIX, encode_pointer_segment(name))
}

/// Extracts the definition name from a `#/definitions/<name>` pointer.
///
/// Returns `None` for pointers into any other section or nested pointers.
pub fn extract_definition_name(ref_str: &str) -> Option<String> {
    let segment = ref_str.strip_prefix(DEFINITIONS_PREFIX)?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(segment))
}

/// Encodes a JSON Pointer segment (handles `~0`, `~1`, and URI fragment escaping).
pub(crate) fn encode_pointer_segment(segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    utf8_percent_encode(&escaped, FRAGMENT).to_string()
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_ref_plain() {
        assert_eq!(definition_ref("Pet"), "#/definitions/Pet");
        assert_eq!(extract_definition_name("#/definitions/Pet").as_deref(), Some("Pet"));
    }

    #[test]
    fn test_definition_ref_escaping() {
        let encoded = definition_ref("User Profile/details~v2");
        assert_eq!(encoded, "#/definitions/User%20Profile~1details~0v2");
        assert_eq!(
            extract_definition_name(&encoded).as_deref(),
            Some("User Profile/details~v2")
        );
    }

    #[test]
    fn test_extract_rejects_other_sections() {
        assert!(extract_definition_name("#/parameters/Limit").is_none());
        assert!(extract_definition_name("#/definitions/").is_none());
        assert!(extract_definition_name("#/definitions/Pet/properties/id").is_none());
        assert!(extract_definition_name("other.yaml#/definitions/Pet").is_none());
    }
}
