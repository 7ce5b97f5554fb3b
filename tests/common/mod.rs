//! Common test utilities

#![allow(dead_code)]

use mach::cli::App;
use mach::{AppConfig, Flow, Operation, OperationSet, ParamType};
use std::io::Write;

/// State of the FTP client fixture
#[derive(Debug, Default)]
pub struct FtpClient {
    pub host: Option<String>,
    pub logins: usize,
}

/// An FTP client exposing connect/login/ls/exit
pub fn ftp_client() -> App<FtpClient> {
    let ops = OperationSet::new()
        .operation(
            Operation::new("connect")
                .doc("connect to FTP host\n\nhost - the host IP or fqdn\nport - the port listening to FTP")
                .arg("host", ParamType::String)
                .opt("port", ParamType::Integer, 21)
                .extra("opts")
                .handler(|client: &mut FtpClient, args, out| {
                    let host = args.get_str("host")?;
                    writeln!(out, "Connected to {}:{}", host, args.get_i64("port")?)?;
                    client.host = Some(host.to_string());
                    if args.extra().contains_key("user") && args.extra().contains_key("password") {
                        client.logins += 1;
                        writeln!(out, "Login success ...")?;
                    }
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("login")
                .doc("login to the FTP server")
                .arg("user", ParamType::String)
                .arg("password", ParamType::String)
                .handler(|client: &mut FtpClient, _, out| {
                    client.logins += 1;
                    writeln!(out, "Login success ...")?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("ls")
                .doc("list files in the current directory")
                .arg("path", ParamType::Untyped)
                .handler(|_: &mut FtpClient, args, out| {
                    let path = args.get_str("path")?;
                    writeln!(out, "Files in {}", if path.is_empty() { "/" } else { path })?;
                    Ok(Flow::Continue)
                }),
        )
        .operation(
            Operation::new("exit")
                .doc("exit the program")
                .handler(|_: &mut FtpClient, _, _| Ok(Flow::Exit(0))),
        );

    App::new(ops, FtpClient::default())
        .unwrap()
        .with_config(AppConfig::new().with_name("lftp").with_prompt("lftp > "))
}

/// Feed one line to an app's shell and return what it printed
pub fn run_line<S>(app: &mut App<S>, line: &str) -> String {
    let mut out = Vec::new();
    app.shell(&mut out).onecmd(line).unwrap();
    String::from_utf8(out).unwrap()
}

/// Run argv through an app and return the exit status and output
pub fn run_argv<S>(app: &mut App<S>, argv: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = app.run_from(argv, std::io::empty(), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}
