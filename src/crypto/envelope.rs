//! Token framing: the seal/open envelope
//!
//! A token is the base64url (unpadded) encoding of
//!
//! ```text
//! salt (16 bytes) || iv (16 bytes) || ciphertext (16 * n bytes, n >= 1)
//! ```
//!
//! There is no version byte and no authentication tag. Salt and IV travel in
//! the token, so sealing needs no state beyond the random source.

use tracing::debug;

use crate::error::{AegisError, AegisResult};

use super::cipher::{self, IV_LEN};
use super::encoding;
use super::key_derivation::{derive_key, SALT_LEN};
use super::random::random_bytes;

/// Minimum decoded token length: a full salt and IV
pub const MIN_FRAME_LEN: usize = SALT_LEN + IV_LEN;

/// Length of keys produced by [`generate_key`], before encoding
pub const GENERATED_KEY_LEN: usize = 32;

/// A decoded token split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub iv: &'a [u8; IV_LEN],
    pub ciphertext: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Split raw token bytes into salt, IV and ciphertext
    ///
    /// Only the length of salt and IV is checked here; the ciphertext is
    /// validated by the cipher.
    pub fn parse(bytes: &'a [u8]) -> AegisResult<Self> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(AegisError::TokenFormat(format!(
                "Token too short: expected at least {} bytes, got {}",
                MIN_FRAME_LEN,
                bytes.len()
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        Ok(Self {
            // Lengths were checked above
            salt: salt.try_into().map_err(|_| AegisError::TokenFormat("Bad salt".into()))?,
            iv: iv.try_into().map_err(|_| AegisError::TokenFormat("Bad IV".into()))?,
            ciphertext,
        })
    }

    /// Concatenate the parts back into token bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_FRAME_LEN + self.ciphertext.len());
        out.extend_from_slice(self.salt);
        out.extend_from_slice(self.iv);
        out.extend_from_slice(self.ciphertext);
        out
    }
}

/// Encrypt plaintext under a passphrase and return a token
///
/// Every call draws a fresh salt and IV, so sealing the same input twice
/// yields different tokens.
pub fn seal(plaintext: &str, passphrase: &str) -> AegisResult<String> {
    let salt: [u8; SALT_LEN] = random_bytes()?;
    let iv: [u8; IV_LEN] = random_bytes()?;

    let key = derive_key(passphrase, &salt)?;
    let ciphertext = cipher::encrypt(&key, &iv, plaintext.as_bytes());

    let frame = Frame {
        salt: &salt,
        iv: &iv,
        ciphertext: &ciphertext,
    };
    let token = encoding::encode(&frame.to_bytes());

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed token"
    );
    Ok(token)
}

/// Recover plaintext from a token and passphrase
///
/// A wrong passphrase and a corrupted token both fail with
/// [`AegisError::Decryption`]; malformed text or a token too short to hold
/// salt and IV fails with [`AegisError::TokenFormat`] before any key is derived.
pub fn open(token: &str, passphrase: &str) -> AegisResult<String> {
    let bytes = encoding::decode(token)?;
    let frame = Frame::parse(&bytes)?;

    let key = derive_key(passphrase, frame.salt)?;
    let plaintext = cipher::decrypt(&key, frame.iv, frame.ciphertext)?;

    let text = std::str::from_utf8(&plaintext).map_err(|_| AegisError::Decryption)?;

    debug!(ciphertext_len = frame.ciphertext.len(), "opened token");
    Ok(text.to_owned())
}

/// Generate a random high-entropy key for use as a passphrase
///
/// 32 random bytes, base64url encoded: always 43 characters.
pub fn generate_key() -> AegisResult<String> {
    let bytes: [u8; GENERATED_KEY_LEN] = random_bytes()?;
    Ok(encoding::encode(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPHRASE: &str = "correct horse battery staple";

    #[test]
    fn test_hello_world_scenario() {
        let token = seal("hello world", PASSPHRASE).unwrap();

        let raw = encoding::decode(&token).unwrap();
        // 32 bytes salt+IV, 11 bytes of plaintext pad to one block
        assert_eq!(raw.len(), MIN_FRAME_LEN + 16);

        assert_eq!(open(&token, PASSPHRASE).unwrap(), "hello world");

        match open(&token, "wrong password") {
            Err(err) => assert!(err.is_decryption()),
            Ok(text) => assert_ne!(text, "hello world"),
        }
    }

    #[test]
    fn test_round_trip_empty_and_multibyte() {
        for plaintext in ["", "héllo wörld", "日本語のテキスト", "emoji 🔐🗝️"] {
            let token = seal(plaintext, "k").unwrap();
            assert_eq!(open(&token, "k").unwrap(), plaintext);
        }
    }

    #[test]
    fn test_empty_plaintext_frame_length() {
        let token = seal("", PASSPHRASE).unwrap();
        let raw = encoding::decode(&token).unwrap();
        assert_eq!(raw.len(), MIN_FRAME_LEN + 16);
    }

    #[test]
    fn test_seal_is_not_deterministic() {
        let t1 = seal("same input", PASSPHRASE).unwrap();
        let t2 = seal("same input", PASSPHRASE).unwrap();
        assert_ne!(t1, t2);

        let f1 = encoding::decode(&t1).unwrap();
        let f2 = encoding::decode(&t2).unwrap();
        assert_ne!(f1[..SALT_LEN], f2[..SALT_LEN]);
        assert_ne!(f1[SALT_LEN..MIN_FRAME_LEN], f2[SALT_LEN..MIN_FRAME_LEN]);

        assert_eq!(open(&t1, PASSPHRASE).unwrap(), "same input");
        assert_eq!(open(&t2, PASSPHRASE).unwrap(), "same input");
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = seal("some text that is long enough to need several blocks", "k").unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_malformed_token() {
        let err = open("not-valid-base64!!", "k").unwrap_err();
        assert!(err.is_token_format());
    }

    #[test]
    fn test_short_token() {
        let short: [u8; 5] = random_bytes().unwrap();
        let err = open(&encoding::encode(&short), "k").unwrap_err();
        assert!(err.is_token_format());
    }

    #[test]
    fn test_salt_and_iv_only_token() {
        let frame: [u8; MIN_FRAME_LEN] = random_bytes().unwrap();
        let err = open(&encoding::encode(&frame), "k").unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_truncated_ciphertext() {
        let token = seal("hello world", "k").unwrap();
        let mut raw = encoding::decode(&token).unwrap();
        raw.truncate(raw.len() - 3);

        let err = open(&encoding::encode(&raw), "k").unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_invalid_utf8_plaintext_is_decryption_error() {
        let salt = [4u8; SALT_LEN];
        let iv = [6u8; IV_LEN];
        let key = derive_key("k", &salt).unwrap();
        let ciphertext = cipher::encrypt(&key, &iv, &[0xff, 0xfe]);

        let frame = Frame {
            salt: &salt,
            iv: &iv,
            ciphertext: &ciphertext,
        };
        let token = encoding::encode(&frame.to_bytes());

        let err = open(&token, "k").unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_nonzero_trailing_bits_still_open() {
        const ALPHABET: &str =
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

        // 20 bytes pad to 32; the 64-byte frame leaves 4 unused bits at the end
        let plaintext = "twenty bytes of text";
        let mut token = seal(plaintext, "k").unwrap();
        assert_eq!(token.len(), 86);

        let last = token.pop().unwrap();
        let index = ALPHABET.find(last).unwrap();
        token.push(ALPHABET.as_bytes()[index ^ 1] as char);

        assert_eq!(open(&token, "k").unwrap(), plaintext);
    }

    #[test]
    fn test_token_with_surrounding_whitespace() {
        let token = seal("hello", "k").unwrap();
        assert_eq!(open(&format!("  {}\n", token), "k").unwrap(), "hello");
    }

    #[test]
    fn test_frame_parse_and_rebuild() {
        let raw: Vec<u8> = (0u8..64).collect();
        let frame = Frame::parse(&raw).unwrap();
        assert_eq!(frame.salt[0], 0);
        assert_eq!(frame.iv[0], 16);
        assert_eq!(frame.ciphertext.len(), 32);
        assert_eq!(frame.to_bytes(), raw);
    }

    #[test]
    fn test_frame_parse_rejects_short_input() {
        let err = Frame::parse(&[0u8; MIN_FRAME_LEN - 1]).unwrap_err();
        assert!(err.is_token_format());
    }

    #[test]
    fn test_generate_key() {
        let k1 = generate_key().unwrap();
        let k2 = generate_key().unwrap();

        assert_eq!(k1.len(), 43);
        assert!(!k1.contains('+') && !k1.contains('/') && !k1.contains('='));
        assert_ne!(k1, k2);
        assert_eq!(encoding::decode(&k1).unwrap().len(), GENERATED_KEY_LEN);
    }

    #[test]
    fn test_generated_key_works_as_passphrase() {
        let key = generate_key().unwrap();
        let token = seal("secret note", &key).unwrap();
        assert_eq!(open(&token, &key).unwrap(), "secret note");
    }
}
