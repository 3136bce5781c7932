//! Plain-text export with atomic writes
//!
//! A file is either completely written or not touched at all.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AegisError, AegisResult};

/// The artifacts a user can save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// A generated or entered secret key
    SecretKey,
    /// A sealed token
    Token,
    /// Recovered plaintext
    Plaintext,
}

impl ExportKind {
    /// Default file name for this artifact
    pub fn file_name(self) -> &'static str {
        match self {
            Self::SecretKey => "aegis-secret-key.txt",
            Self::Token => "aegis-encrypted-token.txt",
            Self::Plaintext => "aegis-decrypted-data.txt",
        }
    }

    /// Error returned when there is nothing to export
    pub fn nothing_to_export(self) -> AegisError {
        let what = match self {
            Self::SecretKey => "No key to export",
            Self::Token => "No encrypted data to export",
            Self::Plaintext => "No decrypted data to export",
        };
        AegisError::Input(what.to_string())
    }

    /// Whether the exported file should be readable by the owner only
    pub fn is_private(self) -> bool {
        matches!(self, Self::SecretKey | Self::Plaintext)
    }

    /// Full path of this artifact inside `dir`
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Write text to a file atomically (write to temp, then rename)
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> AegisResult<()> {
    write_atomic(path.as_ref(), contents, false)
}

/// Like [`write_text_atomic`], but the file is readable by the owner only
///
/// On unix the file is created with mode `0600`. Other platforms use the
/// default permissions.
pub fn write_private_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> AegisResult<()> {
    write_atomic(path.as_ref(), contents, true)
}

fn write_atomic(path: &Path, contents: &str, private: bool) -> AegisResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AegisError::Export(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("txt.tmp");

    // A stale temp file would keep its old permissions
    let _ = fs::remove_file(&temp_path);

    let result = write_temp(&temp_path, contents, private).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| AegisError::Export(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
        return result;
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), private, "exported text file");
    Ok(())
}

fn write_temp(temp_path: &Path, contents: &str, private: bool) -> AegisResult<()> {
    let file = create_file(temp_path, private)
        .map_err(|e| AegisError::Export(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| AegisError::Export(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| AegisError::Export(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| AegisError::Export(format!("Failed to sync data: {}", e)))
}

#[cfg(unix)]
fn create_file(path: &Path, private: bool) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    if private {
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(not(unix))]
fn create_file(path: &Path, _private: bool) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
