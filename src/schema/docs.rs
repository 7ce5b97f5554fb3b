//! Documentation string parsing
//!
//! Operation docs follow a small convention:
//!
//! ```text
//! connect to FTP host
//!
//! host - the host IP or fqdn
//! port - the port listening to FTP
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static PARAM_LINE: OnceLock<Regex> = OnceLock::new();

/// Parsed operation documentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    /// First non-empty line
    pub summary: String,

    /// Per-parameter help taken from `name - description` lines
    pub params: HashMap<String, String>,
}

impl Docs {
    /// Help for a parameter, empty when undocumented
    pub fn param(&self, name: &str) -> String {
        self.params.get(name).cloned().unwrap_or_default()
    }
}

/// Parse a documentation string into a summary and parameter help
pub fn parse_docs(doc: &str) -> Docs {
    let re = PARAM_LINE
        .get_or_init(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*) - (.+)$").unwrap());

    let mut lines = doc.lines().map(str::trim).filter(|l| !l.is_empty());
    let summary = lines.next().unwrap_or_default().to_string();

    let params = lines
        .filter_map(|line| {
            re.captures(line)
                .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
        })
        .collect();

    Docs { summary, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_only() {
        let docs = parse_docs("adds two numbers and prints the result");
        assert_eq!(docs.summary, "adds two numbers and prints the result");
        assert!(docs.params.is_empty());
    }

    #[test]
    fn test_parse_param_lines() {
        let docs = parse_docs(
            r#"
            No nonsense TFTP/FTP Server

            level - set the verbosity level: none, err, info, notice, debug
            foreground - Run in foreground, do not detach from controlling terminal
            opts - ftp=PORT, tftp=PORT
            "#,
        );
        assert_eq!(docs.summary, "No nonsense TFTP/FTP Server");
        assert_eq!(
            docs.param("level"),
            "set the verbosity level: none, err, info, notice, debug"
        );
        assert_eq!(docs.param("opts"), "ftp=PORT, tftp=PORT");
        assert_eq!(docs.param("syslog"), "");
    }

    #[test]
    fn test_free_prose_is_not_param_help() {
        let docs = parse_docs("summary\n\nThis line - has a dash but spaces before it");
        assert!(docs.params.is_empty());
    }

    #[test]
    fn test_pattern_is_built_once() {
        let first = parse_docs("summary\n\nport - the port");
        let re = PARAM_LINE.get().unwrap() as *const Regex;
        let second = parse_docs("summary\n\nport - the port");
        assert_eq!(first, second);
        assert_eq!(PARAM_LINE.get().unwrap() as *const Regex, re);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_docs(""), Docs::default());
    }
}
