//! Argument grammar for the batch CLI
//!
//! Each operation becomes a clap subcommand: required parameters are
//! positionals, optional ones are `--name`/`-n` options, boolean options are
//! toggles, and the keyword bag is a single `--NAME JSON` option.

use crate::config::{AppConfig, ShellMode};
use crate::operation::BoundSet;
use crate::schema::{ArgumentSchema, ParamType, Parameter, Value};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::collections::HashSet;

/// Id of the top-level flag that enters the shell
pub const SHELL_FLAG: &str = "shell";

/// Program name used when none is configured
pub const DEFAULT_NAME: &str = "mach";

/// Build the clap command for a bound operation set
pub fn build_command<S>(set: &BoundSet<S>, config: &AppConfig) -> Command {
    let mut cmd = Command::new(
        config
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
    )
    .subcommand_help_heading("Commands");

    if let Some(about) = &config.about {
        cmd = cmd.about(about.clone());
    }

    if config.shell == ShellMode::Explicit {
        cmd = cmd.arg(
            Arg::new(SHELL_FLAG)
                .long(SHELL_FLAG)
                .help("run an interactive shell")
                .action(ArgAction::SetTrue),
        );
    }

    // Add subcommands for each operation
    for schema in set.schemas() {
        cmd = cmd.subcommand(build_subcommand(schema));
    }

    cmd
}

/// Build the subcommand of one operation
pub fn build_subcommand(schema: &ArgumentSchema) -> Command {
    let mut sub = Command::new(schema.operation.clone()).about(schema.summary.clone());

    if schema.doc != schema.summary {
        sub = sub.long_about(schema.doc.clone());
    }

    // Single-letter names own their letter; `-h` stays with help
    let mut shorts: HashSet<char> = HashSet::from(['h']);
    for param in schema.optional() {
        if let Some(c) = single_char(&param.name) {
            shorts.insert(c);
        }
    }

    for param in &schema.parameters {
        let arg = if param.has_default() {
            option_arg(param, &mut shorts)
        } else {
            positional_arg(param)
        };
        sub = sub.arg(arg);
    }

    if let Some(extra) = &schema.extra {
        sub = sub.arg(
            Arg::new(extra.name.clone())
                .long(extra.name.clone())
                .value_name("JSON")
                .help(extra.help.clone()),
        );
    }

    sub
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn positional_arg(param: &Parameter) -> Arg {
    let arg = Arg::new(param.name.clone())
        .value_name(param.name.clone())
        .required(true)
        .help(param.help.clone());
    with_value_parser(arg, param.ty)
}

fn option_arg(param: &Parameter, shorts: &mut HashSet<char>) -> Arg {
    let mut arg = Arg::new(param.name.clone()).help(option_help(param));

    match single_char(&param.name) {
        Some(c) => arg = arg.short(c),
        None => {
            arg = arg.long(param.name.clone());
            if let Some(c) = param.name.chars().next().filter(|c| c.is_ascii_alphanumeric()) {
                if shorts.insert(c) {
                    arg = arg.short(c);
                }
            }
        }
    }

    if param.is_flag() {
        arg.action(ArgAction::SetTrue)
    } else {
        let arg = arg.value_name(param.name.to_uppercase());
        with_value_parser(arg, param.ty)
    }
}

fn with_value_parser(arg: Arg, ty: ParamType) -> Arg {
    match ty {
        ParamType::Integer => arg
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true),
        ParamType::Float => arg
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
        ParamType::String | ParamType::Untyped | ParamType::Boolean => {
            arg.value_parser(value_parser!(String))
        }
    }
}

fn option_help(param: &Parameter) -> String {
    let default = match &param.default {
        Some(Value::String(s)) => format!("{:?}", s),
        Some(Value::Null) | None => "None".to_string(),
        Some(Value::Bool(b)) => if *b { "True" } else { "False" }.to_string(),
        Some(other) => other.to_string(),
    };
    if param.help.is_empty() {
        format!("(default: {})", default)
    } else {
        format!("{} (default: {})", param.help, default)
    }
}

/// Read a parameter's value out of parsed matches.
///
/// Returns `None` when the user did not supply it, so the schema default applies.
pub fn matched_value(param: &Parameter, matches: &ArgMatches) -> Option<Value> {
    if matches.value_source(&param.name) != Some(ValueSource::CommandLine) {
        return None;
    }
    if param.is_flag() {
        return Some(Value::Bool(matches.get_flag(&param.name)));
    }
    match param.ty {
        ParamType::Integer => matches.get_one::<i64>(&param.name).map(|v| Value::from(*v)),
        ParamType::Float => matches.get_one::<f64>(&param.name).map(|v| Value::from(*v)),
        ParamType::String | ParamType::Untyped | ParamType::Boolean => matches
            .get_one::<String>(&param.name)
            .map(|v| Value::String(v.clone())),
    }
}
