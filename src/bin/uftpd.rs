//! Boolean flags and extra JSON options
//!
//! ```text
//! $ uftpd --opts '{"ftp": 21}'
//! serving FTP on port 21
//! $ uftpd --opts '{"ftp": 21, "foo": "bar"}'
//! Unknown option foo given
//! ```

use mach::{App, AppConfig, Flow, Operation, OperationError, OperationSet, ParamType};
use std::io::Write;

const KNOWN_OPTIONS: &[&str] = &["ftp", "tftp"];
const DEFAULT_FTP_PORT: i64 = 21;

fn operations() -> OperationSet<()> {
    OperationSet::new()
        .operation(
            Operation::new("server")
                .doc(
                    "No nonsense TFTP/FTP Server\n\n\
                     level - set the verbosity level: none, err, info, notice, debug\n\
                     foreground - Run in foreground, do not detach from controlling terminal\n\
                     syslog - Use syslog, even if running in foreground\n\
                     version - Show the program version and exit\n\
                     opts - ftp=PORT, tftp=PORT",
                )
                .opt("level", ParamType::Integer, 2)
                .opt("foreground", ParamType::Boolean, false)
                .opt("syslog", ParamType::Boolean, false)
                .opt("version", ParamType::Boolean, false)
                .extra("opts")
                .handler(|_: &mut (), args, out| {
                    if args.get_bool("version")? {
                        writeln!(out, "uftpd version {}", mach::VERSION)?;
                        return Ok(Flow::Exit(0));
                    }

                    for key in args.extra().keys() {
                        if !KNOWN_OPTIONS.contains(&key.as_str()) {
                            writeln!(out, "Unknown option {} given", key)?;
                            return Ok(Flow::Exit(1));
                        }
                    }

                    let port = match args.extra().get("ftp") {
                        Some(port) => port
                            .as_i64()
                            .ok_or_else(|| OperationError::invalid("ftp", "port must be a number"))?,
                        None => DEFAULT_FTP_PORT,
                    };
                    writeln!(out, "serving FTP on port {}", port)?;
                    Ok(Flow::Continue)
                }),
        )
        .default_operation("server")
}

fn main() {
    let app = App::new(operations(), ())
        .map(|app| app.with_config(AppConfig::new().with_name("uftpd")));
    mach::cli::exit(app.and_then(|mut app| app.run()));
}
