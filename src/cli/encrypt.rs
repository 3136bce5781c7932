//! Encrypt, decrypt and keygen commands

use std::path::PathBuf;

use clap::Args;

use crate::config::{paths::AegisPaths, settings::Settings};
use crate::error::AegisResult;
use crate::export::ExportKind;
use crate::session::Session;

use super::input::{read_input, KeyArgs};

/// Arguments for `aegis encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Text to encrypt (reads --input or stdin when omitted)
    pub text: Option<String>,

    /// Read the plaintext from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Also save the token to aegis-encrypted-token.txt
    #[arg(long)]
    pub save: bool,
}

/// Arguments for `aegis decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Token to decrypt (reads --input or stdin when omitted)
    pub token: Option<String>,

    /// Read the token from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "token")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Also save the plaintext to aegis-decrypted-data.txt
    #[arg(long)]
    pub save: bool,
}

/// Arguments for `aegis keygen`
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Also save the key to aegis-secret-key.txt
    #[arg(long)]
    pub save: bool,
}

/// Seal input text and print the token
pub fn handle_encrypt(paths: &AegisPaths, settings: &Settings, args: EncryptArgs) -> AegisResult<()> {
    let plaintext = read_input(args.text, args.input.as_deref())?;

    let mut session = Session::new();
    session.set_passphrase(args.key.resolve(true)?);

    println!("{}", session.seal(&plaintext)?);

    if args.save {
        let path = session.export(ExportKind::Token, &settings.export_dir(paths))?;
        eprintln!("Encrypted token saved to {}", path.display());
    }

    Ok(())
}

/// Open a token and print the plaintext
pub fn handle_decrypt(paths: &AegisPaths, settings: &Settings, args: DecryptArgs) -> AegisResult<()> {
    let token = read_input(args.token, args.input.as_deref())?;

    let mut session = Session::new();
    session.set_passphrase(args.key.resolve(false)?);

    println!("{}", session.open(&token)?);

    if args.save {
        let path = session.export(ExportKind::Plaintext, &settings.export_dir(paths))?;
        eprintln!("Decrypted data saved to {}", path.display());
    }

    Ok(())
}

/// Generate and print a random secret key
pub fn handle_keygen(paths: &AegisPaths, settings: &Settings, args: KeygenArgs) -> AegisResult<()> {
    let mut session = Session::new();
    println!("{}", session.generate_passphrase()?);

    if args.save {
        let path = session.export(ExportKind::SecretKey, &settings.export_dir(paths))?;
        eprintln!("Secret key saved to {}", path.display());
        eprintln!("Keep this file safe: a lost key cannot be recovered.");
    }

    Ok(())
}
