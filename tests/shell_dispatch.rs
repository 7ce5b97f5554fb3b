//! Integration tests for interactive line dispatch

mod common;

use common::{ftp_client, run_line};
use mach::{Flow, LineOutcome};

fn assert_line(input: &str, expected: &str) {
    let mut app = ftp_client();
    let out = run_line(&mut app, input);
    assert_eq!(out.trim(), expected, "input: {}", input);
}

#[test]
fn test_connect_with_port() {
    assert_line("connect foo.example.com 21", "Connected to foo.example.com:21");
}

#[test]
fn test_connect_uses_default_port() {
    assert_line("connect foo.example.com", "Connected to foo.example.com:21");
}

#[test]
fn test_connect_named_port() {
    assert_line("connect foo.bar.com port=2121", "Connected to foo.bar.com:2121");
}

#[test]
fn test_connect_unquoted_json() {
    assert_line(
        r#"connect ftp.example.com 21 opts={"user": oz123, "password":s3kr35}"#,
        "Could not parse JSON in opts",
    );
}

#[test]
fn test_connect_with_login_options() {
    let mut app = ftp_client();
    let out = run_line(
        &mut app,
        r#"connect ftp.example.com 21 opts='{"user": "oz123", "password":"s3kr35"}'"#,
    );
    assert_eq!(out.trim(), "Connected to ftp.example.com:21\nLogin success ...");
    assert_eq!(app.state().logins, 1);
    assert_eq!(app.state().host.as_deref(), Some("ftp.example.com"));
}

#[test]
fn test_login() {
    assert_line("login foo s3kr35", "Login success ...");
}

#[test]
fn test_unrecognized_inputs() {
    assert_line(r#""""#, r#"*** Unknown syntax: """#);
    assert_line("login foo bar bla", "*** Unknown syntax: login foo bar bla");
    assert_line("moo", "*** Unknown syntax: moo");
}

#[test]
fn test_free_text_argument() {
    assert_line("ls", "Files in /");
    assert_line("ls /foo/", "Files in /foo/");
}

#[test]
fn test_help_lists_commands() {
    assert_line(
        "help",
        "Documented commands (type help <topic>):\n\
         ========================================\n\
         connect  exit  help  login  ls",
    );
}

#[test]
fn test_unknown_option() {
    let mut app = ftp_client();
    assert_eq!(run_line(&mut app, "connect foo=21").trim(), "Unknown option foo");
    assert!(app.state().host.is_none());
}

#[test]
fn test_unbalanced_quote_keeps_shell_alive() {
    let line = r#"connect foo.example.com 21 opts='{"user": "oz123", "password": "s3kr35"}"#;
    let mut app = ftp_client();
    assert_eq!(
        run_line(&mut app, line).trim(),
        format!("{}: No closing quotation", line)
    );
    assert_eq!(
        run_line(&mut app, "connect foo.example.com").trim(),
        "Connected to foo.example.com:21"
    );
}

#[test]
fn test_repeated_lines_are_idempotent() {
    let mut app = ftp_client();
    let first = run_line(&mut app, "connect a.example.com port=x");
    let second = run_line(&mut app, "connect a.example.com port=x");
    assert_eq!(first, second);
    assert_eq!(first.trim(), "*** Unknown syntax: connect a.example.com port=x");
}

#[test]
fn test_line_outcomes() {
    let mut app = ftp_client();
    let mut out = Vec::new();
    let mut shell = app.shell(&mut out);
    assert_eq!(shell.onecmd("").unwrap(), LineOutcome::Empty);
    assert_eq!(
        shell.onecmd("connect h opts=[1]").unwrap(),
        LineOutcome::BadJson("opts".to_string())
    );
    assert_eq!(shell.onecmd("exit").unwrap(), LineOutcome::Invoked(Flow::Exit(0)));
}

#[test]
fn test_cmdloop_session() {
    let mut app = ftp_client();
    let mut out = Vec::new();
    let input = "connect foo.example.com\nmoo\nls /pub/\nexit\nls\n";
    let code = app.cmdloop_from(input.as_bytes(), &mut out).unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "lftp > Connected to foo.example.com:21\n\
         lftp > *** Unknown syntax: moo\n\
         lftp > Files in /pub/\n\
         lftp > "
    );
}
