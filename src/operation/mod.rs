//! Operations exposed to the dispatchers

pub mod args;
pub mod set;

pub use args::*;
pub use set::*;
