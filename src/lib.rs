//! mach - turn declared operations into a command line and a shell
//!
//! Operations are declared once, with their parameters, defaults, types and
//! documentation. From that declaration mach derives a subcommand-style CLI
//! and a line-oriented interactive shell that bind arguments the same way.
//!
//! ```no_run
//! use mach::{App, AppConfig, Flow, Operation, OperationError, OperationSet, ParamType};
//! use std::io::Write;
//!
//! let ops = OperationSet::new().operation(
//!     Operation::new("add")
//!         .doc("adds two numbers and prints the result")
//!         .arg("a", ParamType::Integer)
//!         .arg("b", ParamType::Integer)
//!         .handler(|_: &mut (), args, out| {
//!             let (a, b) = (args.get_i64("a")?, args.get_i64("b")?);
//!             let sum = a
//!                 .checked_add(b)
//!                 .ok_or_else(|| OperationError::invalid("b", "integer overflow"))?;
//!             writeln!(out, "{} + {} => {}", a, b, sum)?;
//!             Ok(Flow::Continue)
//!         }),
//! );
//! let app = App::new(ops, ()).map(|app| app.with_config(AppConfig::new().with_name("calc")));
//! mach::cli::exit(app.and_then(|mut app| app.run()));
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod operation;
pub mod schema;
pub mod shell;
pub mod ui;

// Re-export commonly used types
pub use cli::App;
pub use config::{AppConfig, ShellMode};
pub use error::{MachError, OperationError, OperationResult, Result};
pub use operation::{Arguments, Flow, Operation, OperationSet};
pub use schema::ParamType;
pub use shell::{LineOutcome, Shell};

/// Current version of mach
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
