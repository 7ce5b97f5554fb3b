//! Diagnostic output
//!
//! Diagnostics go to stderr and respect the configured verbosity. Output that
//! belongs to the shell contract is written to the shell's own stream instead.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Verbosity levels for output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    #[default]
    Normal = 2,
    Verbose = 3,
}

/// Verbosity-gated stderr reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    pub verbosity: Verbosity,
}

impl Reporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Reporter { verbosity }
    }

    /// Print warning message
    pub fn warn(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[WARN]".yellow(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red().bold(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn debug(&self, message: impl Display) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_from_yaml() {
        let v: Verbosity = serde_yaml::from_str("verbose").unwrap();
        assert_eq!(v, Verbosity::Verbose);
    }
}
