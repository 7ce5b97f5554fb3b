//! A calculator usable from the command line or as a shell
//!
//! ```text
//! $ calc add 4 1
//! 4 + 1 => 5
//! $ calc --shell
//! Welcome to the calc shell. Type help or ? to list commands.
//! calc2 > add 4 1
//! 4 + 1 => 5
//! calc2 > exit
//! Come back soon ...
//! ```

use mach::{App, AppConfig, Flow, Operation, OperationError, OperationSet, ParamType, ShellMode};
use std::io::Write;

/// Integer division rounding toward negative infinity
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn operations() -> OperationSet<()> {
    OperationSet::new()
        .operation(
            Operation::new("add")
                .doc("adds two numbers and prints the result")
                .arg("a", ParamType::Integer)
                .arg("b", ParamType::Integer)
                .handler(|_: &mut (), args, out| {
                    let (a, b) = (args.get_i64("a")?, args.get_i64("b")?);
                    let sum = a
                        .checked_add(b)
                        .ok_or_else(|| OperationError::invalid("b", "integer overflow"))?;
                    writeln!(out, "{} + {} => {}", a, b, sum)?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("div")
                .doc("divide one number by the other")
                .arg("a", ParamType::Integer)
                .arg("b", ParamType::Integer)
                .handler(|_: &mut (), args, out| {
                    let (a, b) = (args.get_i64("a")?, args.get_i64("b")?);
                    let q = floor_div(a, b)
                        .ok_or_else(|| OperationError::invalid("b", "division by zero"))?;
                    writeln!(out, "{} / {} => {}", a, b, q)?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("exit")
                .doc("exit to finish this session")
                .handler(|_: &mut (), _, out| {
                    writeln!(out, "Come back soon ...")?;
                    Ok(Flow::Exit(0))
                }),
        )
}

fn main() {
    let config = AppConfig::new()
        .with_name("calc")
        .with_about("adds and divides numbers")
        .with_intro("Welcome to the calc shell. Type help or ? to list commands.")
        .with_prompt("calc2 > ")
        .with_shell(ShellMode::Explicit);

    let app = App::new(operations(), ()).map(|app| app.with_config(config));
    mach::cli::exit(app.and_then(|mut app| app.run()));
}
