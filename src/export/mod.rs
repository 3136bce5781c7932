//! Export module for Aegis
//!
//! Writes already-computed values out of the process:
//! - Text: a key, token or plaintext as a plain `.txt` file
//! - CSV: batch input rows and batch results
//! - JSON: machine-readable batch reports

pub mod csv;
pub mod json;
pub mod text;

pub use self::csv::{read_batch_items, write_batch_records};
pub use json::{write_batch_json, BatchSummary};
pub use text::{write_private_text_atomic, write_text_atomic, ExportKind};
