//! Cryptographic core for Aegis
//!
//! PBKDF2-HMAC-SHA256 key derivation, AES-256-CBC encryption and the
//! base64url token framing that ties them together.

pub mod cipher;
pub mod encoding;
pub mod envelope;
pub mod key_derivation;
pub mod random;
pub mod secure_memory;

pub use cipher::{decrypt, encrypt};
pub use encoding::{decode, encode};
pub use envelope::{generate_key, open, seal, Frame};
pub use key_derivation::{derive_key, DerivedKey};
pub use random::random_bytes;
pub use secure_memory::Passphrase;
