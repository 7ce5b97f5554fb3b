//! Greets a user; `greet` runs when no operation is named
//!
//! ```text
//! $ greet greet --name Tom
//! Hello Tom
//! $ greet
//! Your name: Tom
//! Hello Tom
//! ```

use anyhow::Context;
use mach::{App, AppConfig, Flow, Operation, OperationSet, ParamType};
use std::io::{self, Write};

fn operations() -> OperationSet<()> {
    OperationSet::new()
        .operation(
            Operation::new("greet")
                .doc(
                    "Greets a user one or more times\n\n\
                     count - how many times to say hello\n\
                     name - who to greet, asked for when empty",
                )
                .opt("count", ParamType::Integer, 1)
                .opt("name", ParamType::String, "")
                .handler(|_: &mut (), args, out| {
                    let mut name = args.get_str("name")?.to_string();
                    if name.is_empty() {
                        write!(out, "Your name: ")?;
                        out.flush()?;
                        io::stdin()
                            .read_line(&mut name)
                            .context("failed to read a name")?;
                        name = name.trim().to_string();
                    }

                    for _ in 0..args.get_i64("count")? {
                        writeln!(out, "Hello {}", name)?;
                    }
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("part")
                .doc("Politely part from a user")
                .handler(|_: &mut (), _, out| {
                    writeln!(out, "It was nice to meet you!")?;
                    Ok(Flow::Continue)
                }),
        )
        .default_operation("greet")
}

fn main() {
    let app = App::new(operations(), ())
        .map(|app| app.with_config(AppConfig::new().with_name("greet")));
    mach::cli::exit(app.and_then(|mut app| app.run()));
}
