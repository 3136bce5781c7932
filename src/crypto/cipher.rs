//! AES-256-CBC encryption/decryption
//!
//! PKCS#7 padding is applied on encrypt and validated on decrypt. There is no
//! authentication tag, so every decrypt failure (bad padding, bad length)
//! collapses into the same [`AegisError::Decryption`] value.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::error::{AegisError, AegisResult};

use super::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

/// Size of the CBC initialization vector in bytes
pub const IV_LEN: usize = 16;

/// Encrypt plaintext bytes under a key and IV
///
/// The output length is the plaintext length rounded up to the next full
/// block; a plaintext that is already block-aligned gains a whole padding block.
pub fn encrypt(key: &DerivedKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt ciphertext bytes under a key and IV
pub fn decrypt(
    key: &DerivedKey,
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> AegisResult<Zeroizing<Vec<u8>>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        tracing::debug!(len = ciphertext.len(), "ciphertext is not block aligned");
        return Err(AegisError::Decryption);
    }

    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| AegisError::Decryption)
}
