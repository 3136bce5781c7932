//! Configuration module for Aegis
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AegisPaths;
pub use settings::{OutputFormat, Settings};
