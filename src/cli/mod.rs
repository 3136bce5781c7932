//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the envelope core.

pub mod batch;
pub mod encrypt;
pub mod input;

pub use batch::{handle_batch_command, BatchCommands};
pub use encrypt::{handle_decrypt, handle_encrypt, handle_keygen, DecryptArgs, EncryptArgs, KeygenArgs};
pub use input::KeyArgs;
