//! Binary to text transcoding for persisted nonces and ciphertexts.
//!
//! Standard base64 alphabet with padding and no line wraps.  This carries
//! no cryptographic meaning; it only exists because the storage layer is
//! text-oriented.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::DecryptError;

/// Encode bytes as a base64 string.
pub fn to_text(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a base64 string back into bytes.
pub fn from_text(text: &str) -> Result<Vec<u8>, DecryptError> {
    BASE64
        .decode(text)
        .map_err(|e| DecryptError::Encoding(format!("base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(to_text(&[]), "");
        assert!(from_text("").unwrap().is_empty());
    }

    #[test]
    fn uses_standard_alphabet_with_padding() {
        assert_eq!(to_text(&[0xFB, 0xFF]), "+/8=");
    }

    #[test]
    fn long_input_has_no_line_wraps() {
        let text = to_text(&[0x42; 4096]);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(matches!(from_text("not base64!"), Err(DecryptError::Encoding(_))));
    }
}
