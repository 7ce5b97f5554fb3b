//! Main CLI application

use crate::cli::batch::{BatchDispatcher, BatchOutcome};
use crate::config::AppConfig;
use crate::error::Result;
use crate::operation::{BoundSet, Flow, OperationSet};
use crate::shell::Shell;
use crate::ui::Reporter;
use clap_complete::Shell as CompletionShell;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Write};

/// An operation set bound to its state, usable from argv or as a shell
pub struct App<S> {
    /// Bound operations
    set: BoundSet<S>,
    /// The object the operations act on
    state: S,
    /// Program settings
    config: AppConfig,
}

impl<S> App<S> {
    /// Bind an operation set; malformed declarations fail here
    pub fn new(operations: OperationSet<S>, state: S) -> Result<Self> {
        let set = operations.build()?;
        Ok(App {
            set,
            state,
            config: AppConfig::default(),
        })
    }

    /// Replace the program settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn operations(&self) -> &BoundSet<S> {
        &self.set
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Run with the process arguments, stdin and stdout.
    ///
    /// Returns the exit status the process should end with.
    pub fn run(&mut self) -> Result<i32> {
        // Operations may read stdin themselves, so it is never held locked
        let input = BufReader::new(io::stdin());
        let mut stdout = io::stdout();
        self.run_from(std::env::args_os(), input, &mut stdout)
    }

    /// Run one batch dispatch, handing off to the shell when asked to
    pub fn run_from<I, T, R>(&mut self, argv: I, input: R, out: &mut dyn Write) -> Result<i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
        R: BufRead,
    {
        let outcome =
            BatchDispatcher::new(&self.set, &self.config).dispatch(&mut self.state, argv, out)?;

        match outcome {
            BatchOutcome::Invoked(Flow::Exit(code)) => Ok(code),
            BatchOutcome::Invoked(Flow::Continue) | BatchOutcome::NoOperation => Ok(0),
            BatchOutcome::EnterShell => self.cmdloop_from(input, out),
        }
    }

    /// Run the shell on stdin and stdout
    pub fn cmdloop(&mut self) -> Result<i32> {
        let mut stdout = io::stdout();
        self.cmdloop_from(BufReader::new(io::stdin()), &mut stdout)
    }

    /// Run the shell until an operation ends it or input runs out
    pub fn cmdloop_from<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> Result<i32> {
        Reporter::new(self.config.verbosity).debug("entering shell");
        let status = self.shell(out).cmdloop(input)?;
        Ok(status.unwrap_or(0))
    }

    /// A shell bound to this app's operations and state
    pub fn shell<'a>(&'a mut self, out: &'a mut dyn Write) -> Shell<'a, S> {
        Shell::new(&self.set, &mut self.state, out).with_config(&self.config)
    }

    /// Write a completion script for the batch CLI
    pub fn generate_completions(&self, shell: CompletionShell, out: &mut dyn Write) {
        let mut cmd = BatchDispatcher::new(&self.set, &self.config).command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, out);
    }
}
