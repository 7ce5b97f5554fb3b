//! A shell-only FTP client
//!
//! ```text
//! $ lftp
//! Welcome to the lftp client. Type help or ? to list commands.
//! lftp > connect ftp.example.com 21 opts='{"user": "oz123", "password": "s3kr35"}'
//! Connected to ftp.example.com:21
//! Login success ...
//! ```

use mach::{App, AppConfig, Flow, Operation, OperationSet, ParamType};
use std::io::Write;

/// Session state of the client
#[derive(Debug, Default)]
struct FtpClient {
    host: Option<String>,
    user: Option<String>,
}

impl FtpClient {
    fn login(&mut self, user: &str, _password: &str, out: &mut dyn Write) -> std::io::Result<()> {
        self.user = Some(user.to_string());
        writeln!(out, "Login success ...")
    }

    fn disconnect(&mut self, out: &mut dyn Write) -> std::io::Result<()> {
        if let Some(host) = self.host.take() {
            match self.user.take() {
                Some(user) => writeln!(out, "{} disconnected from {}", user, host)?,
                None => writeln!(out, "Disconnected from {}", host)?,
            }
        }
        Ok(())
    }
}

fn operations() -> OperationSet<FtpClient> {
    OperationSet::new()
        .operation(
            Operation::new("connect")
                .doc(
                    "connect to FTP host\n\n\
                     host - the host IP or fqdn\n\
                     port - the port listening to FTP\n\
                     opts - user and password to log in with",
                )
                .arg("host", ParamType::String)
                .opt("port", ParamType::Integer, 21)
                .extra("opts")
                .handler(|client: &mut FtpClient, args, out| {
                    for key in args.extra().keys() {
                        if key != "user" && key != "password" {
                            writeln!(out, "Unknown option {} given", key)?;
                            return Ok(Flow::Continue);
                        }
                    }

                    let host = args.get_str("host")?;
                    writeln!(out, "Connected to {}:{}", host, args.get_i64("port")?)?;
                    client.host = Some(host.to_string());

                    let extra = args.extra();
                    if let (Some(user), Some(password)) = (
                        extra.get("user").and_then(|v| v.as_str()),
                        extra.get("password").and_then(|v| v.as_str()),
                    ) {
                        client.login(user, password, out)?;
                    }
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("login")
                .doc("login to the FTP server")
                .arg("user", ParamType::String)
                .arg("password", ParamType::String)
                .handler(|client: &mut FtpClient, args, out| {
                    client.login(args.get_str("user")?, args.get_str("password")?, out)?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("ls")
                .doc("list files in the current directory")
                .arg("path", ParamType::String)
                .handler(|_: &mut FtpClient, args, out| {
                    let path = match args.get_str("path")? {
                        "" => "/",
                        path => path,
                    };
                    writeln!(out, "Files in {}", path)?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("exit")
                .doc("exit the program")
                .handler(|client: &mut FtpClient, _, out| {
                    client.disconnect(out)?;
                    Ok(Flow::Exit(0))
                }),
        )
}

fn main() {
    let config = AppConfig::new()
        .with_name("lftp")
        .with_intro("Welcome to the lftp client. Type help or ? to list commands.")
        .with_prompt("lftp > ");

    let app = App::new(operations(), FtpClient::default()).map(|app| app.with_config(config));
    mach::cli::exit(app.and_then(|mut app| app.cmdloop()));
}
