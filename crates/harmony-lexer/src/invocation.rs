//! Prefix stripping and command-name extraction.

/// Strip `prefix` from the start of `content`, along with any whitespace
/// directly after it.
///
/// An empty prefix matches every message.
///
/// ```
/// use harmony_lexer::strip_prefix;
///
/// assert_eq!(strip_prefix("!  ping", "!"), Some("ping"));
/// assert_eq!(strip_prefix("ping", "!"), None);
/// assert_eq!(strip_prefix("ping", ""), Some("ping"));
/// ```
pub fn strip_prefix<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    content.strip_prefix(prefix).map(str::trim_start)
}

/// Split a prefix-less command line into `(name, arguments)`.
///
/// The name is everything up to the first whitespace run; the arguments are
/// the rest with leading whitespace removed (possibly empty). Returns `None`
/// for blank input.
///
/// ```
/// use harmony_lexer::split_command;
///
/// assert_eq!(split_command("say  hello world"), Some(("say", "hello world")));
/// assert_eq!(split_command("ping"), Some(("ping", "")));
/// assert_eq!(split_command("   "), None);
/// ```
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }

    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => Some((name, rest.trim_start())),
        None => Some((line, "")),
    }
}
