//! Argument schemas
//!
//! This module turns declared operation signatures into argument schemas
//! and binds incoming values against them.

pub mod bind;
pub mod docs;
pub mod extract;
pub mod types;

// Re-export main types
pub use bind::*;
pub use docs::*;
pub use extract::*;
pub use types::*;
