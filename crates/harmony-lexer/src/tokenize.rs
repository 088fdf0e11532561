//! Argument tokenizer.
//!
//! Splits the argument part of a command line into tokens. Rules:
//!
//! - a space separates tokens outside quotes; runs of spaces yield no empty
//!   tokens
//! - `'` or `"` opens a quoted span in which spaces are literal
//! - the same quote character closes the span and always emits the current
//!   token, even when empty
//! - the other quote character inside a span is literal text
//! - `\` escapes the next character, which is emitted without the backslash
//! - text accumulated before an opening quote stays in the same token
//! - an unterminated span is emitted as the last token rather than rejected

use std::mem;

/// Tokenize an argument string.
///
/// # Examples
///
/// ```
/// use harmony_lexer::tokenize;
///
/// assert_eq!(tokenize("a b c"), vec!["a", "b", "c"]);
/// assert_eq!(tokenize("\"a b\" c"), vec!["a b", "c"]);
/// assert_eq!(tokenize(r"a\ b"), vec!["a b"]);
/// assert_eq!(tokenize("'it''s'"), vec!["it", "s"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in input.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '"' | '\'' => match quote {
                Some(open) if open == ch => {
                    tokens.push(mem::take(&mut current));
                    quote = None;
                }
                Some(_) => current.push(ch),
                None => quote = Some(ch),
            },
            ' ' if quote.is_none() => {
                if !current.is_empty() {
                    tokens.push(mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    // Dangling escape at end of input
    if escaped {
        current.push('\\');
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
