//! Per-run session state
//!
//! A [`Session`] holds the passphrase and the most recent key, token and
//! plaintext for one run of the front end. Everything is wiped when the
//! session is cleared or dropped. Derived keys never reach the session; they
//! live only inside a single seal/open call.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{self, Passphrase};
use crate::error::{AegisError, AegisResult};
use crate::export::{write_private_text_atomic, write_text_atomic, ExportKind};

#[derive(Default)]
pub struct Session {
    passphrase: Option<Passphrase>,
    token: Option<String>,
    plaintext: Option<Zeroizing<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-supplied passphrase
    pub fn set_passphrase(&mut self, passphrase: impl Into<Passphrase>) {
        self.passphrase = Some(passphrase.into());
    }

    /// Replace the passphrase with a freshly generated key and return it
    pub fn generate_passphrase(&mut self) -> AegisResult<&str> {
        let key = crypto::generate_key()?;
        Ok(self.passphrase.insert(Passphrase::new(key)).as_str())
    }

    /// Current passphrase, if any
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_ref().map(|p| p.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_ref().map(|p| p.as_str())
    }

    fn require_passphrase(&self) -> AegisResult<&str> {
        match self.passphrase() {
            Some(p) if !p.is_empty() => Ok(p),
            _ => Err(AegisError::missing("a secret key")),
        }
    }

    /// Seal plaintext with the session passphrase
    ///
    /// Empty input is rejected before the core is called. On failure the
    /// previous token is cleared so stale output is never shown.
    pub fn seal(&mut self, plaintext: &str) -> AegisResult<&str> {
        self.token = None;
        if plaintext.is_empty() {
            return Err(AegisError::missing("data to encrypt"));
        }
        let passphrase = self.require_passphrase()?;

        let token = crypto::seal(plaintext, passphrase)?;
        Ok(self.token.insert(token).as_str())
    }

    /// Open a token with the session passphrase
    pub fn open(&mut self, token: &str) -> AegisResult<&str> {
        self.plaintext = None;
        if token.trim().is_empty() {
            return Err(AegisError::missing("an encrypted token"));
        }
        let passphrase = self.require_passphrase()?;

        let plaintext = crypto::open(token, passphrase)?;
        Ok(self.plaintext.insert(Zeroizing::new(plaintext)).as_str())
    }

    /// Save the current value of `kind` into `dir` under its default name
    pub fn export(&self, kind: ExportKind, dir: &Path) -> AegisResult<PathBuf> {
        let contents = match kind {
            ExportKind::SecretKey => self.passphrase(),
            ExportKind::Token => self.token(),
            ExportKind::Plaintext => self.plaintext(),
        }
        .filter(|c| !c.is_empty())
        .ok_or_else(|| kind.nothing_to_export())?;

        let path = kind.path_in(dir);
        if kind.is_private() {
            write_private_text_atomic(&path, contents)?;
        } else {
            write_text_atomic(&path, contents)?;
        }
        Ok(path)
    }

    /// Forget everything held by the session
    pub fn clear(&mut self) {
        self.passphrase = None;
        self.token = None;
        self.plaintext = None;
    }
}

// Report presence only; never the values
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_passphrase", &self.passphrase.is_some())
            .field("has_token", &self.token.is_some())
            .field("has_plaintext", &self.plaintext.is_some())
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.clear();
    }
}
