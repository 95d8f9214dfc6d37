//! Key patterns: `*` globs and delimiter-wrapped regular expressions
//!
//! Globs are matched case-insensitively against the whole key, with `*`
//! standing for any run of characters. Regular expressions are written
//! between delimiters with optional trailing modifiers, e.g. `/nested/` or
//! `#^db\.(\w+)$#i`, and match anywhere in the key.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Translate a glob into an anchored, case-insensitive regex source.
///
/// ```
/// use config_container::pattern::glob_to_regex;
///
/// assert_eq!(glob_to_regex("*array"), "(?i)^.*array$");
/// assert_eq!(glob_to_regex("db.host"), r"(?i)^db\.host$");
/// ```
pub fn glob_to_regex(glob: &str) -> String {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    format!("(?i)^{body}$")
}

/// Compile a glob into a [`Regex`].
pub fn compile_glob(glob: &str) -> Result<Regex> {
    let source = glob_to_regex(glob);
    Regex::new(&source).map_err(|source| Error::InvalidRegex {
        pattern: glob.to_string(),
        source,
    })
}

/// Compile a delimiter-wrapped pattern such as `/^db\./i`.
///
/// The first character is the delimiter and may not be alphanumeric or a
/// backslash. The body ends at the first unescaped closing delimiter, so
/// `/foo/bar/` is rejected for its unknown modifiers. Bracket delimiters
/// close with their counterpart (`(...)`, `{...}`, `[...]`, `<...>`) and may
/// nest inside the body. Supported modifiers are `i`, `m`, `s`, `x`, `U`,
/// `u`, `D` and `A`.
pub fn compile_delimited(pattern: &str) -> Result<Regex> {
    let mut chars = pattern.chars();
    let Some(open) = chars.next() else {
        return Err(Error::invalid_argument("Empty regular expression"));
    };

    if open.is_alphanumeric() || open == '\\' {
        return Err(Error::invalid_argument(format!(
            "Illegal regex delimiter {open:?}, must not be alphanumeric or backslash"
        )));
    }

    let close = closing_delimiter(open);
    let rest = chars.as_str();
    let Some(end) = find_closing(rest, open, close) else {
        return Err(Error::invalid_argument(format!(
            "No ending delimiter {close:?} found in {pattern:?}"
        )));
    };

    let body = &rest[..end];
    let modifiers = &rest[end + close.len_utf8()..];

    let mut anchored = false;
    let mut builder_flags = Flags::default();
    for modifier in modifiers.chars() {
        match modifier {
            'i' => builder_flags.case_insensitive = true,
            'm' => builder_flags.multi_line = true,
            's' => builder_flags.dot_matches_new_line = true,
            'x' => builder_flags.ignore_whitespace = true,
            'U' => builder_flags.swap_greed = true,
            'A' => anchored = true,
            'u' | 'D' => {}
            c if c.is_whitespace() => {}
            other => {
                return Err(Error::invalid_argument(format!(
                    "Unknown modifier {other:?} in {pattern:?}"
                )));
            }
        }
    }

    let source = match (anchored, builder_flags.ignore_whitespace) {
        // A trailing `#` comment under `x` would swallow the group's `)`.
        (true, true) => format!("\\A(?:{body}\n)"),
        (true, false) => format!(r"\A(?:{body})"),
        (false, _) => body.to_string(),
    };

    RegexBuilder::new(&source)
        .case_insensitive(builder_flags.case_insensitive)
        .multi_line(builder_flags.multi_line)
        .dot_matches_new_line(builder_flags.dot_matches_new_line)
        .ignore_whitespace(builder_flags.ignore_whitespace)
        .swap_greed(builder_flags.swap_greed)
        .build()
        .map_err(|source| Error::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })
}

#[derive(Debug, Default)]
struct Flags {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
    swap_greed: bool,
}

/// Byte offset of the delimiter closing the body in `rest`.
fn find_closing(rest: &str, open: char, close: char) -> Option<usize> {
    let nests = open != close;
    let mut depth = 0usize;
    let mut escaped = false;

    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        } else if nests && c == open {
            depth += 1;
        }
    }

    None
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        '<' => '>',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*", "anything.at.all", true)]
    #[case("*array", "testing.some_ARRAY", true)]
    #[case("*array", "testing.array.key", false)]
    #[case("db.*.host", "db.primary.host", true)]
    #[case("db.host", "DB.HOST", true)]
    #[case("db.host", "dbxhost", false)]
    #[case("a+b", "a+b", true)]
    fn test_glob_matching(#[case] glob: &str, #[case] key: &str, #[case] matches: bool) {
        let re = compile_glob(glob).unwrap();
        assert_eq!(re.is_match(key), matches);
    }

    #[rstest]
    #[case("/nested/", "testing.nested_key", true)]
    #[case("/NESTED/i", "testing.nested_key", true)]
    #[case("/NESTED/", "testing.nested_key", false)]
    #[case("#^testing\\.#", "testing.nested_key", true)]
    #[case("{bool}", "testing.bool.true", true)]
    #[case("/key/A", "testing.key", false)]
    #[case("/testing/A", "testing.key", true)]
    #[case("/testing # section/xA", "testing.key", true)]
    #[case("/key # trailing/xA", "testing.key", false)]
    #[case("/a\\/b/", "a/b", true)]
    #[case("{^a{2}}", "aa.key", true)]
    #[case("(x(y)?)", "testing.x", true)]
    fn test_delimited_matching(#[case] pattern: &str, #[case] key: &str, #[case] matches: bool) {
        let re = compile_delimited(pattern).unwrap();
        assert_eq!(re.is_match(key), matches);
    }

    #[rstest]
    #[case("")]
    #[case("illegal delimiter")]
    #[case("\\x\\")]
    #[case("/unterminated")]
    #[case("/ok/q")]
    #[case("/foo/bar/")]
    #[case("{a{2}")]
    fn test_delimited_rejected(#[case] pattern: &str) {
        let err = compile_delimited(pattern).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }), "{err:?}");
    }

    #[test]
    fn test_delimited_compile_error() {
        let err = compile_delimited("/(/").unwrap_err();
        assert!(matches!(err, Error::InvalidRegex { .. }));
        assert!(err.is_invalid_argument());
    }
}
