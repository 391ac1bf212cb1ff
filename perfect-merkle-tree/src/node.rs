//! Conversions between stored node bytes and their lowercase hex form.

use crate::Result;

/// Decode a hex-encoded node. The empty string decodes to an empty node.
pub fn node_from_hex(value: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(value)?)
}

/// Lowercase hex rendering used for every externally visible node.
pub fn node_to_hex(node: &[u8]) -> String {
    hex::encode(node)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::Error;

    #[test]
    fn test_node_hex_accepts_mixed_case() {
        assert_eq!(node_from_hex("0aFf").expect("decode"), vec![0x0a, 0xff]);
        assert_eq!(node_to_hex(&[0x0a, 0xff]), "0aff");
    }

    #[test]
    fn test_empty_hex_is_empty_node() {
        assert!(node_from_hex("").expect("decode").is_empty());
    }

    #[test]
    fn test_invalid_hex() {
        assert_matches!(node_from_hex("0"), Err(Error::InvalidHex(_)));
        assert_matches!(node_from_hex("zz"), Err(Error::InvalidHex(_)));
    }
}
