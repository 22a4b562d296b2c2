//! Chacha Photobooth Common Utilities
//!
//! Shared infrastructure for all photobooth crates:
//! - Error types and result aliases
//! - Date stamp formatting for strips and file names
//! - Tracing/logging initialization
//! - Configuration loading
//! - Strip themes

pub mod config;
pub mod datestamp;
pub mod error;
pub mod logging;
pub mod theme;

pub use config::*;
pub use datestamp::*;
pub use error::*;
pub use theme::*;
