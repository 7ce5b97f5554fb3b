//! Terminal output helpers

pub mod output;

pub use output::*;
