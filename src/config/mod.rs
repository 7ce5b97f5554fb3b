//! Configuration parsing
//!
//! This module handles the application settings: program name, shell
//! greeting and prompt, shell mode and verbosity.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
