//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Stretches a passphrase and a 16-byte salt into a 256-bit AES key. The
//! iteration count, hash and output length are part of the token format:
//! changing any of them makes previously issued tokens unreadable.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{AegisError, AegisResult};

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// Salt size in bytes
pub const SALT_LEN: usize = 16;

/// Derived key size in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a passphrase and salt
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> AegisResult<DerivedKey> {
    derive_key_with_rounds(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS)
}

pub(crate) fn derive_key_with_rounds(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
) -> AegisResult<DerivedKey> {
    // Scratch buffer is wiped when it goes out of scope, on error too
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, key.as_mut_slice())
        .map_err(|e| AegisError::KeyDerivation(format!("PBKDF2 failed: {}", e)))?;

    tracing::trace!(rounds, salt_len = salt.len(), "derived key");
    Ok(DerivedKey { key: *key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_key(key: &DerivedKey) -> String {
        hex::encode(key.as_bytes())
    }

    #[test]
    fn test_known_answer_one_round() {
        let key = derive_key_with_rounds(b"password", b"salt", 1).unwrap();
        assert_eq!(
            hex_key(&key),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_known_answer_4096_rounds() {
        let key = derive_key_with_rounds(b"password", b"salt", 4096).unwrap();
        assert_eq!(
            hex_key(&key),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn test_same_inputs_same_key() {
        let salt = [7u8; SALT_LEN];
        let key1 = derive_key("test_passphrase", &salt).unwrap();
        let key2 = derive_key("test_passphrase", &salt).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = [7u8; SALT_LEN];
        let key1 = derive_key_with_rounds(b"passphrase1", &salt, 10).unwrap();
        let key2 = derive_key_with_rounds(b"passphrase2", &salt, 10).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key_with_rounds(b"same", &[1u8; SALT_LEN], 10).unwrap();
        let key2 = derive_key_with_rounds(b"same", &[2u8; SALT_LEN], 10).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_zeroize_clears_key() {
        let mut key = derive_key_with_rounds(b"password", b"salt", 1).unwrap();
        assert_ne!(key.as_bytes(), &[0u8; KEY_LEN]);

        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = DerivedKey::from_bytes([0xAB; KEY_LEN]);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("171"));
        assert!(debug.contains("REDACTED"));
    }
}
