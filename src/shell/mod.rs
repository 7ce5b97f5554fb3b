//! Interactive shell
//!
//! This module handles line tokenization and dispatch of typed lines to
//! operations.

pub mod dispatcher;
pub mod tokenize;

// Re-export main types
pub use dispatcher::*;
pub use tokenize::*;
