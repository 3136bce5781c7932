//! URL-safe base64 without padding
//!
//! Tokens and generated keys use the base64url alphabet (`-` and `_` instead
//! of `+` and `/`) with trailing `=` stripped. Decoding tolerates padding so
//! a token that went through a padding-adding tool still opens, and ignores
//! the unused low bits of the final character.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::{AegisError, AegisResult};

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded base64url
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

/// Decode base64url text, trimming surrounding whitespace first
pub fn decode(text: &str) -> AegisResult<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(text.trim())
        .map_err(|e| AegisError::TokenFormat(format!("Not valid base64url: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8=" in standard base64
        let encoded = encode(&[0xfb, 0xff]);
        assert_eq!(encoded, "-_8");
    }

    #[test]
    fn test_encode_strips_padding() {
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b"ab"), "YWI");
        assert_eq!(encode(b"abc"), "YWJj");
    }

    #[test]
    fn test_decode_accepts_padded_input() {
        assert_eq!(decode("YQ==").unwrap(), b"a");
        assert_eq!(decode("YQ").unwrap(), b"a");
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        // 'Q' and 'R' differ only in bits past the end of the single byte
        assert_eq!(decode("YQ").unwrap(), b"a");
        assert_eq!(decode("YR").unwrap(), b"a");
    }

    #[test]
    fn test_decode_trims_whitespace() {
        assert_eq!(decode("  YWJj\n").unwrap(), b"abc");
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        let err = decode("+/8").unwrap_err();
        assert!(err.is_token_format());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("not-valid-base64!!").unwrap_err();
        assert!(err.is_token_format());
    }

    #[test]
    fn test_empty_round_trip() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }
}
