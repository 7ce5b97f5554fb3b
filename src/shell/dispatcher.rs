//! Interactive line dispatch
//!
//! A line is resolved in fixed steps: split off the operation name, tokenize
//! the rest shell-style, separate `name=value` tokens from positional ones,
//! decode the keyword bag, bind and invoke. Every failure ends the current
//! line only; the loop keeps running.

use crate::config::{AppConfig, DEFAULT_PROMPT};
use crate::error::is_fallback;
use crate::operation::{BoundSet, Flow};
use crate::schema::{bind, decode_extra, CallInput, Value};
use crate::shell::tokenize::{split, split_first_word};
use crate::ui::Reporter;
use std::io::{self, BufRead, Write};

/// Prefix of the uniform unrecognized-input message
pub const UNKNOWN_SYNTAX: &str = "*** Unknown syntax:";

const DOC_HEADER: &str = "Documented commands (type help <topic>):";
const HELP_COMMAND: &str = "help";

/// How a single line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Nothing was typed
    Empty,
    /// Built-in help was shown
    Help,
    /// No such operation, or the call did not fit the operation
    Unrecognized,
    /// The line could not be tokenized
    ParseError,
    /// A `name=value` token named no parameter
    UnknownOption(String),
    /// The keyword bag value was not a JSON object
    BadJson(String),
    /// The operation ran
    Invoked(Flow),
    /// The operation ran and reported a failure
    Failed(String),
}

/// Line-oriented shell over a bound operation set
pub struct Shell<'a, S> {
    set: &'a BoundSet<S>,
    state: &'a mut S,
    out: &'a mut dyn Write,
    intro: Option<String>,
    prompt: String,
    reporter: Reporter,
}

impl<'a, S> Shell<'a, S> {
    pub fn new(set: &'a BoundSet<S>, state: &'a mut S, out: &'a mut dyn Write) -> Self {
        Shell {
            set,
            state,
            out,
            intro: None,
            prompt: DEFAULT_PROMPT.to_string(),
            reporter: Reporter::default(),
        }
    }

    /// Take greeting, prompt and verbosity from a config
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.intro = config.intro.clone();
        self.prompt = config.prompt.clone();
        self.reporter = Reporter::new(config.verbosity);
        self
    }

    /// Read and dispatch lines until an operation ends the session or input runs out.
    ///
    /// Returns the exit status requested by the terminating operation, if any.
    pub fn cmdloop<R: BufRead>(&mut self, mut input: R) -> io::Result<Option<i32>> {
        if let Some(intro) = &self.intro {
            writeln!(self.out, "{}", intro)?;
        }

        loop {
            write!(self.out, "{}", self.prompt)?;
            self.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                self.reporter.debug("end of input");
                writeln!(self.out)?;
                return Ok(None);
            }

            if let LineOutcome::Invoked(Flow::Exit(code)) = self.onecmd(&line)? {
                return Ok(Some(code));
            }
        }
    }

    /// Dispatch a single line
    pub fn onecmd(&mut self, line: &str) -> io::Result<LineOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Empty);
        }

        if let Some(topic) = line.strip_prefix('?') {
            self.help(topic.trim())?;
            return Ok(LineOutcome::Help);
        }

        let (name, rest) = split_first_word(line);
        if name == HELP_COMMAND {
            self.help(rest)?;
            return Ok(LineOutcome::Help);
        }

        let set = self.set;
        let op = match set.get(name) {
            Some(op) => op,
            None => return self.unrecognized(line),
        };
        let schema = op.schema();

        let tokens = match split(rest) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(self.out, "{}: {}", line, e)?;
                return Ok(LineOutcome::ParseError);
            }
        };

        let mut input = CallInput::default();
        let mut blob = None;
        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) => {
                    if !schema.accepts_name(key) {
                        writeln!(self.out, "Unknown option {}", key)?;
                        return Ok(LineOutcome::UnknownOption(key.to_string()));
                    }
                    if schema.is_carrier(key) {
                        blob = Some(value.to_string());
                    } else {
                        input
                            .named
                            .push((key.to_string(), Value::String(value.to_string())));
                    }
                }
                None => input.positional.push(token),
            }
        }

        if let (Some(blob), Some(carrier)) = (blob, &schema.extra) {
            match decode_extra(&blob) {
                Ok(extra) => {
                    schema.warn_bag_parameters(&extra, &self.reporter);
                    input.extra = extra;
                }
                Err(e) => {
                    self.reporter
                        .debug(format!("keyword blob for '{}': {}", carrier.name, e));
                    writeln!(self.out, "Could not parse JSON in {}", carrier.name)?;
                    return Ok(LineOutcome::BadJson(carrier.name.clone()));
                }
            }
        }

        let args = match bind(schema, input) {
            Ok(args) => args,
            Err(e) => {
                self.reporter.debug(format!("binding '{}': {}", name, e));
                return self.unrecognized(line);
            }
        };

        match op.invoke(self.state, &args, self.out) {
            Ok(flow) => Ok(LineOutcome::Invoked(flow)),
            Err(e) if is_fallback(&e) => {
                self.reporter.debug(format!("invoking '{}': {}", name, e));
                self.unrecognized(line)
            }
            Err(e) => {
                writeln!(self.out, "*** {}: {}", name, e)?;
                Ok(LineOutcome::Failed(e.to_string()))
            }
        }
    }

    fn unrecognized(&mut self, line: &str) -> io::Result<LineOutcome> {
        writeln!(self.out, "{} {}", UNKNOWN_SYNTAX, line)?;
        Ok(LineOutcome::Unrecognized)
    }

    /// Built-in help: list operations, or show one operation's documentation
    fn help(&mut self, topic: &str) -> io::Result<()> {
        if topic.is_empty() {
            let mut names: Vec<&str> = self.set.names().collect();
            names.push(HELP_COMMAND);
            names.sort_unstable();

            writeln!(self.out)?;
            writeln!(self.out, "{}", DOC_HEADER)?;
            writeln!(self.out, "{}", "=".repeat(DOC_HEADER.len()))?;
            writeln!(self.out, "{}", names.join("  "))?;
            writeln!(self.out)?;
            return Ok(());
        }

        if topic == HELP_COMMAND {
            writeln!(
                self.out,
                "List available commands with \"help\" or detailed help with \"help cmd\"."
            )?;
            return Ok(());
        }

        match self.set.get(topic).map(|op| op.schema()) {
            Some(schema) if !schema.doc.is_empty() => writeln!(self.out, "{}", schema.doc),
            _ => writeln!(self.out, "*** No help on {}", topic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;
    use crate::operation::{Operation, OperationSet};
    use crate::schema::ParamType;

    #[derive(Default)]
    struct Calc {
        calls: usize,
    }

    fn calc() -> BoundSet<Calc> {
        OperationSet::new()
            .operation(
                Operation::new("add")
                    .doc("adds two numbers and prints the result")
                    .arg("a", ParamType::Integer)
                    .arg("b", ParamType::Integer)
                    .handler(|state: &mut Calc, args, out| {
                        state.calls += 1;
                        let (a, b) = (args.get_i64("a")?, args.get_i64("b")?);
                        writeln!(out, "{} + {} => {}", a, b, a + b)?;
                        Ok(Flow::Continue)
                    }),
            )
            .operation(
                Operation::new("div")
                    .doc("divide one number by the other")
                    .arg("a", ParamType::Integer)
                    .arg("b", ParamType::Integer)
                    .handler(|_: &mut Calc, args, out| {
                        let (a, b) = (args.get_i64("a")?, args.get_i64("b")?);
                        let q = a
                            .checked_div(b)
                            .ok_or_else(|| OperationError::invalid("b", "division by zero"))?;
                        writeln!(out, "{} / {} => {}", a, b, q)?;
                        Ok(Flow::Continue)
                    }),
            )
            .operation(
                Operation::new("exit")
                    .doc("exit to finish this session")
                    .handler(|_: &mut Calc, _, out| {
                        writeln!(out, "Come back soon ...")?;
                        Ok(Flow::Exit(0))
                    }),
            )
            .build()
            .unwrap()
    }

    fn onecmd(line: &str) -> (LineOutcome, String, usize) {
        let set = calc();
        let mut state = Calc::default();
        let mut out = Vec::new();
        let outcome = Shell::new(&set, &mut state, &mut out).onecmd(line).unwrap();
        (outcome, String::from_utf8(out).unwrap(), state.calls)
    }

    #[test]
    fn test_add() {
        let (outcome, out, calls) = onecmd("add 1 2");
        assert_eq!(outcome, LineOutcome::Invoked(Flow::Continue));
        assert_eq!(out.trim(), "1 + 2 => 3");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_named_values() {
        let (_, out, _) = onecmd("add b=5 1");
        assert_eq!(out.trim(), "1 + 5 => 6");
    }

    #[test]
    fn test_empty_line() {
        let (outcome, out, _) = onecmd("   \n");
        assert_eq!(outcome, LineOutcome::Empty);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_operation() {
        let (outcome, out, _) = onecmd("moo");
        assert_eq!(outcome, LineOutcome::Unrecognized);
        assert_eq!(out.trim(), "*** Unknown syntax: moo");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let (outcome, out, calls) = onecmd("add 1 x");
        assert_eq!(outcome, LineOutcome::Unrecognized);
        assert_eq!(out.trim(), "*** Unknown syntax: add 1 x");
        assert_eq!(calls, 0);

        let (_, out, _) = onecmd("div 1 0");
        assert_eq!(out.trim(), "*** Unknown syntax: div 1 0");
    }

    #[test]
    fn test_wrong_arity_falls_back() {
        let (_, out, _) = onecmd("add 1 2 3");
        assert_eq!(out.trim(), "*** Unknown syntax: add 1 2 3");
        let (_, out, _) = onecmd("add 1");
        assert_eq!(out.trim(), "*** Unknown syntax: add 1");
    }

    #[test]
    fn test_unknown_option() {
        let (outcome, out, calls) = onecmd("add c=1 1 2");
        assert_eq!(outcome, LineOutcome::UnknownOption("c".to_string()));
        assert_eq!(out.trim(), "Unknown option c");
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_parse_error() {
        let (outcome, out, _) = onecmd("add '1 2");
        assert_eq!(outcome, LineOutcome::ParseError);
        assert_eq!(out.trim(), "add '1 2: No closing quotation");
    }

    #[test]
    fn test_exit_flow() {
        let (outcome, out, _) = onecmd("exit");
        assert_eq!(outcome, LineOutcome::Invoked(Flow::Exit(0)));
        assert_eq!(out.trim(), "Come back soon ...");
    }

    #[test]
    fn test_help_listing() {
        let (outcome, out, _) = onecmd("help");
        assert_eq!(outcome, LineOutcome::Help);
        assert_eq!(
            out.trim(),
            "Documented commands (type help <topic>):\n\
             ========================================\n\
             add  div  exit  help"
        );
    }

    #[test]
    fn test_help_topic() {
        let (_, out, _) = onecmd("help add");
        assert_eq!(out.trim(), "adds two numbers and prints the result");
        let (_, out, _) = onecmd("?div");
        assert_eq!(out.trim(), "divide one number by the other");
        let (_, out, _) = onecmd("help moo");
        assert_eq!(out.trim(), "*** No help on moo");
    }

    #[test]
    fn test_cmdloop() {
        let set = calc();
        let mut state = Calc::default();
        let mut out = Vec::new();
        let config = AppConfig::new()
            .with_intro("Welcome to the calc shell.")
            .with_prompt("calc2 > ");
        let input = "add 4 1\n\nadd '1\nadd 2 2\nexit\nadd 9 9\n".as_bytes();

        let status = Shell::new(&set, &mut state, &mut out)
            .with_config(&config)
            .cmdloop(input)
            .unwrap();

        assert_eq!(status, Some(0));
        assert_eq!(state.calls, 2);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Welcome to the calc shell.\ncalc2 > 4 + 1 => 5\n"));
        assert!(out.contains("add '1: No closing quotation"));
        assert!(out.contains("2 + 2 => 4"));
        assert!(!out.contains("9 + 9"));
    }

    #[test]
    fn test_cmdloop_end_of_input() {
        let set = calc();
        let mut state = Calc::default();
        let mut out = Vec::new();
        let status = Shell::new(&set, &mut state, &mut out)
            .cmdloop("add 1 1\n".as_bytes())
            .unwrap();
        assert_eq!(status, None);
        assert_eq!(state.calls, 1);
    }
}
