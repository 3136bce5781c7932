//! Secure memory handling for passphrases
//!
//! A passphrase lives only as long as one operation or one session. The
//! wrapper zeroes its buffer on drop and keeps its contents out of `Debug`.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A passphrase that zeros its contents on drop
pub struct Passphrase {
    inner: Zeroizing<String>,
}

impl Passphrase {
    /// Create a new Passphrase
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Get the passphrase text
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Deref for Passphrase {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase")
            .field("len", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_creation() {
        let p = Passphrase::new("test");
        assert_eq!(p.as_str(), "test");
        assert!(!p.is_empty());
        assert!(Passphrase::new("").is_empty());
    }

    #[test]
    fn test_passphrase_from_string() {
        let p: Passphrase = String::from("test").into();
        assert_eq!(&*p, "test");
    }

    #[test]
    fn test_passphrase_debug() {
        let p = Passphrase::new("secret");
        let debug = format!("{:?}", p);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("Passphrase"));
    }
}
