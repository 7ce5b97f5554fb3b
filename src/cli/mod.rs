//! CLI interface and argument parsing
//!
//! This module compiles operation schemas into a clap grammar, runs batch
//! dispatch, and glues batch and shell modes together.

pub mod app;
pub mod batch;
pub mod grammar;

// Re-export main types
pub use app::*;
pub use batch::*;
pub use grammar::*;

use crate::error::{DispatchError, MachError, Result};
use crate::ui::Reporter;
use std::process;

/// End the process with the status of a run.
///
/// Usage errors and help requests are rendered by clap with its own status.
pub fn exit(result: Result<i32>) -> ! {
    match result {
        Ok(code) => process::exit(code),
        Err(MachError::Dispatch(DispatchError::Usage(e))) => e.exit(),
        Err(e) => {
            Reporter::default().error(e);
            process::exit(1);
        }
    }
}
