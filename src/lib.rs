//! Aegis - passphrase-based text encryption
//!
//! Seals text under a passphrase into a portable base64url token and opens it
//! again. The token carries everything except the passphrase:
//!
//! ```text
//! base64url( salt[16] || iv[16] || AES-256-CBC(PBKDF2-SHA256(passphrase, salt), iv, text) )
//! ```
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key derivation, cipher, token framing and key generation
//! - `batch`: Concurrent seal/open over many items
//! - `session`: Per-run passphrase and result state
//! - `export`: Plain-text, CSV and JSON output
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `aegis` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,no_run
//! let token = aegis::crypto::seal("hello world", "correct horse battery staple")?;
//! let text = aegis::crypto::open(&token, "correct horse battery staple")?;
//! assert_eq!(text, "hello world");
//! # Ok::<(), aegis::AegisError>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod session;

pub use error::{AegisError, AegisResult};
