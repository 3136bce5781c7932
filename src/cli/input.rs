//! Input and passphrase sourcing for CLI commands
//!
//! Passphrase sources, first match wins:
//! 1. `--key-file <path>` (first line)
//! 2. `--key` / `AEGIS_KEY`
//! 3. Hidden interactive prompt

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::crypto::Passphrase;
use crate::error::{AegisError, AegisResult};

/// Passphrase options shared by every command that needs a key
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Read the secret key from the first line of a file
    #[arg(short = 'k', long, value_name = "FILE")]
    pub key_file: Option<PathBuf>,

    /// Secret key (prefer --key-file or the prompt; visible in process lists)
    #[arg(long, env = "AEGIS_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl KeyArgs {
    /// Resolve the passphrase, prompting if no other source is given
    ///
    /// `confirm` asks twice on the interactive path.
    pub fn resolve(&self, confirm: bool) -> AegisResult<Passphrase> {
        let passphrase = if let Some(path) = &self.key_file {
            read_key_file(path)?
        } else if let Some(key) = &self.key {
            Passphrase::new(key.as_str())
        } else if confirm {
            prompt_new_passphrase()?
        } else {
            prompt_passphrase("Secret key: ")?
        };

        if passphrase.is_empty() {
            return Err(AegisError::missing("a secret key"));
        }
        Ok(passphrase)
    }
}

/// Read the first line of a key file, without its line ending
pub fn read_key_file(path: &Path) -> AegisResult<Passphrase> {
    let contents = Passphrase::new(std::fs::read_to_string(path).map_err(|e| {
        AegisError::Io(format!("Failed to read key file {}: {}", path.display(), e))
    })?);
    let first_line = contents.lines().next().unwrap_or("");
    Ok(Passphrase::new(first_line))
}

/// Pick the command input: positional argument, `--input` file, or stdin
///
/// File contents are used verbatim. Stdin loses one trailing line ending,
/// since shells append one to piped text.
pub fn read_input(arg: Option<String>, file: Option<&Path>) -> AegisResult<String> {
    if let Some(text) = arg {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| AegisError::Io(format!("Failed to read {}: {}", path.display(), e)));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| AegisError::Io(format!("Failed to read stdin: {}", e)))?;
    Ok(strip_line_ending(buf))
}

fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Prompt for a new passphrase with confirmation
fn prompt_new_passphrase() -> AegisResult<Passphrase> {
    loop {
        let pass1 = prompt_passphrase("Enter secret key: ")?;

        if pass1.is_empty() {
            return Err(AegisError::missing("a secret key"));
        }

        let pass2 = prompt_passphrase("Confirm secret key: ")?;

        if pass1.as_str() != pass2.as_str() {
            eprintln!("Keys do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> AegisResult<Passphrase> {
    rpassword::prompt_password(prompt)
        .map(Passphrase::from)
        .map_err(|e| AegisError::Input(format!("Failed to read secret key: {}", e)))
}
