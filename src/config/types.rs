//! Application configuration types

use crate::ui::Verbosity;
use serde::{Deserialize, Serialize};

/// Prompt used when none is configured
pub const DEFAULT_PROMPT: &str = "(Cmd) ";

/// How the interactive shell is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellMode {
    /// Batch dispatch only
    #[default]
    #[serde(rename = "none")]
    BatchOnly,
    /// A top-level `--shell` flag enters the shell
    Explicit,
    /// The shell starts when argv selects no operation
    Implicit,
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Program name shown in usage (defaults to the binary name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Program description shown in help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Greeting printed once when the shell starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    /// Prompt printed before each shell line
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Shell mode
    #[serde(default)]
    pub shell: ShellMode,

    /// Print usage when argv selects no operation
    #[serde(rename = "auto-help", default = "default_auto_help")]
    pub auto_help: bool,

    /// Diagnostic verbosity
    #[serde(default)]
    pub verbosity: Verbosity,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_auto_help() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            name: None,
            about: None,
            intro: None,
            prompt: default_prompt(),
            shell: ShellMode::default(),
            auto_help: default_auto_help(),
            verbosity: Verbosity::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the program description
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the shell greeting
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    /// Set the shell prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the shell mode
    pub fn with_shell(mut self, shell: ShellMode) -> Self {
        self.shell = shell;
        self
    }

    /// Enable or disable usage on an empty command line
    pub fn with_auto_help(mut self, auto_help: bool) -> Self {
        self.auto_help = auto_help;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}
