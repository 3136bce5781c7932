//! Display formatting for terminal output
//!
//! Provides utilities for formatting batch results and configuration for
//! terminal display.

pub mod batch;

pub use batch::{format_batch_summary, format_batch_table};
