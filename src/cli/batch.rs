//! Batch (argv) dispatch

use crate::cli::grammar::{build_command, matched_value, SHELL_FLAG};
use crate::config::{AppConfig, ShellMode};
use crate::error::{DispatchError, DispatchResult};
use crate::operation::{BoundSet, Flow};
use crate::schema::{bind, decode_extra, ArgumentSchema, CallInput};
use crate::ui::Reporter;
use clap::{ArgMatches, Command};
use std::ffi::OsString;
use std::io::Write;

/// What a batch dispatch ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// An operation ran
    Invoked(Flow),
    /// The caller should start the interactive shell
    EnterShell,
    /// No operation was selected
    NoOperation,
}

/// One-shot argv dispatcher over a bound operation set
pub struct BatchDispatcher<'a, S> {
    set: &'a BoundSet<S>,
    config: &'a AppConfig,
    reporter: Reporter,
}

impl<'a, S> BatchDispatcher<'a, S> {
    pub fn new(set: &'a BoundSet<S>, config: &'a AppConfig) -> Self {
        BatchDispatcher {
            set,
            config,
            reporter: Reporter::new(config.verbosity),
        }
    }

    /// The combined argv grammar
    pub fn command(&self) -> Command {
        build_command(self.set, self.config)
    }

    /// Parse argv (program name first) and run the selected operation
    pub fn dispatch<I, T>(
        &self,
        state: &mut S,
        argv: I,
        out: &mut dyn Write,
    ) -> DispatchResult<BatchOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = self.with_default_operation(argv.into_iter().map(Into::into).collect());
        let matches = self.command().try_get_matches_from(argv)?;

        if self.config.shell == ShellMode::Explicit && matches.get_flag(SHELL_FLAG) {
            self.reporter.debug("--shell given, entering shell");
            return Ok(BatchOutcome::EnterShell);
        }

        let (name, sub_matches) = match matches.subcommand() {
            Some(selected) => selected,
            None => {
                if self.config.shell == ShellMode::Implicit {
                    return Ok(BatchOutcome::EnterShell);
                }
                if self.config.auto_help {
                    write!(out, "{}", self.command().render_help())?;
                }
                return Ok(BatchOutcome::NoOperation);
            }
        };

        let op = self
            .set
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;

        let input = call_input(op.schema(), sub_matches)?;
        op.schema().warn_bag_parameters(&input.extra, &self.reporter);
        let args = bind(op.schema(), input)?;
        self.reporter.debug(format!("invoking '{}' with {:?}", name, args));

        let flow = op.invoke(state, &args, out)?;
        Ok(BatchOutcome::Invoked(flow))
    }

    /// Insert the default operation when argv selects none.
    ///
    /// A help request is never redirected to the default.
    pub fn with_default_operation(&self, mut argv: Vec<OsString>) -> Vec<OsString> {
        let default = match self.set.default_operation() {
            Some(default) => default,
            None => return argv,
        };

        let tokens: Vec<&str> = argv.iter().skip(1).filter_map(|a| a.to_str()).collect();
        if tokens.iter().any(|t| *t == "-h" || *t == "--help") {
            return argv;
        }
        if tokens.iter().any(|t| self.set.contains(t)) {
            return argv;
        }

        let shell_flag = format!("--{}", SHELL_FLAG);
        let global_flags = tokens
            .iter()
            .take_while(|t| self.config.shell == ShellMode::Explicit && **t == shell_flag)
            .count();
        let at = (1 + global_flags).min(argv.len());

        self.reporter
            .debug(format!("no operation given, using default '{}'", default));
        argv.insert(at, OsString::from(default));
        argv
    }
}

/// Collect supplied values of one subcommand
fn call_input(schema: &ArgumentSchema, matches: &ArgMatches) -> DispatchResult<CallInput> {
    let named = schema
        .parameters
        .iter()
        .filter_map(|p| matched_value(p, matches).map(|v| (p.name.clone(), v)))
        .collect();

    let extra = match &schema.extra {
        Some(carrier) => match matches.get_one::<String>(&carrier.name) {
            Some(blob) => decode_extra(blob).map_err(|source| DispatchError::Json {
                carrier: carrier.name.clone(),
                source,
            })?,
            None => Default::default(),
        },
        None => Default::default(),
    };

    Ok(CallInput {
        positional: Vec::new(),
        named,
        extra,
    })
}
