//! Shell-style tokenization of a command line
//!
//! POSIX-like rules: whitespace separates tokens, single quotes are literal,
//! double quotes allow backslash escapes of `"` and `\` only, and a backslash
//! outside quotes escapes the next character.

use crate::error::TokenizeError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split a line into tokens
pub fn split(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    // Distinguishes `''` (an empty token) from no token at all
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '\\' => {
                    let next = chars.next().ok_or(TokenizeError::NoEscapedCharacter)?;
                    current.push(next);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        out.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                c => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => {
                    let next = chars.next().ok_or(TokenizeError::NoEscapedCharacter)?;
                    if !matches!(next, '"' | '\\') {
                        current.push('\\');
                    }
                    current.push(next);
                }
                c => current.push(c),
            },
        }
    }

    if quote != Quote::None {
        return Err(TokenizeError::NoClosingQuotation);
    }
    if in_token {
        out.push(current);
    }

    Ok(out)
}

/// Split off the first word of a line, returning `(word, rest)`
pub fn split_first_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], line[i..].trim_start()),
        None => (line, ""),
    }
}
