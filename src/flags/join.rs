//! Join arguments into a single quoted command line.

use serde::{Deserialize, Serialize};

/// Command-line quoting convention to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// POSIX shell double-quote rules.
    Unix,
    /// cmd.exe / C runtime argument rules.
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Join arguments for the current platform.
pub fn join<S: AsRef<str>>(args: &[S]) -> String {
    join_for(Platform::current(), args)
}

/// Join arguments using the quoting rules of `platform`.
pub fn join_for<S: AsRef<str>>(platform: Platform, args: &[S]) -> String {
    log::trace!("joining {} args for {:?}", args.len(), platform);
    match platform {
        Platform::Unix => unix_join(args),
        Platform::Windows => windows_join(args),
    }
}

/// Join arguments for a POSIX shell.
///
/// Arguments containing whitespace, quotes, `\`, `$` or `` ` `` are wrapped
/// in double quotes with `$`, `` ` ``, `"` and `\` backslash-escaped.
pub fn unix_join<S: AsRef<str>>(args: &[S]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let arg = arg.as_ref();
        if !arg.chars().any(is_unix_special) {
            out.push_str(arg);
            continue;
        }
        out.push('"');
        for c in arg.chars() {
            if matches!(c, '$' | '`' | '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    out
}

fn is_unix_special(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '$' | '`')
}

/// Join arguments for cmd.exe and the C runtime argument parser.
///
/// Only arguments containing a space or `"` are quoted. Backslashes that
/// precede a `"` are doubled and the quote is escaped; all other
/// backslashes are copied as-is.
pub fn windows_join<S: AsRef<str>>(args: &[S]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let arg = arg.as_ref();
        if !arg.contains([' ', '"']) {
            out.push_str(arg);
            continue;
        }

        out.push('"');
        let mut backslashes = 0;
        for c in arg.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' => {
                    push_backslashes(&mut out, 2 * backslashes + 1);
                    backslashes = 0;
                    out.push('"');
                }
                _ => {
                    push_backslashes(&mut out, backslashes);
                    backslashes = 0;
                    out.push(c);
                }
            }
        }
        push_backslashes(&mut out, backslashes);
        out.push('"');
    }
    out
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n('\\', count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::split;

    #[test]
    fn test_unix_simple() {
        assert_eq!(unix_join(&["echo", "hello", "world"]), "echo hello world");
    }

    #[test]
    fn test_unix_spaces() {
        assert_eq!(unix_join(&["echo", "hello world"]), r#"echo "hello world""#);
        assert_eq!(unix_join(&["echo", "tab\there"]), "echo \"tab\there\"");
    }

    #[test]
    fn test_unix_quotes() {
        assert_eq!(unix_join(&["echo", r#"he"llo"#]), r#"echo "he\"llo""#);
        assert_eq!(unix_join(&["echo", "he'llo"]), r#"echo "he'llo""#);
    }

    #[test]
    fn test_unix_backslash_dollar_backtick() {
        assert_eq!(unix_join(&["echo", r"he\llo"]), r#"echo "he\\llo""#);
        assert_eq!(
            unix_join(&["echo", "he$llo", "he`llo"]),
            r#"echo "he\$llo" "he\`llo""#
        );
    }

    #[test]
    fn test_windows_simple() {
        assert_eq!(windows_join(&["echo", "hello", "world"]), "echo hello world");
        assert_eq!(windows_join(&["foo", r"bar\baz"]), r"foo bar\baz");
        assert_eq!(windows_join(&["echo", "he$llo", "he`llo"]), "echo he$llo he`llo");
    }

    #[test]
    fn test_windows_quotes() {
        assert_eq!(windows_join(&["echo", "hello world"]), r#"echo "hello world""#);
        assert_eq!(windows_join(&["foo", r#"bar"baz"#]), r#"foo "bar\"baz""#);
    }

    #[test]
    fn test_windows_backslash_before_quote() {
        assert_eq!(windows_join(&["echo", r#"he\"llo"#]), r#"echo "he\\\"llo""#);
        assert_eq!(windows_join(&[r#"a\\"b"#]), r#""a\\\\\"b""#);
    }

    #[test]
    fn test_windows_backslashes_in_quoted_arg() {
        assert_eq!(
            windows_join(&[r"C:\Program Files\app\"]),
            r#""C:\Program Files\app\""#
        );
    }

    #[test]
    fn test_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(unix_join(&empty), "");
        assert_eq!(windows_join(&empty), "");
    }

    #[test]
    fn test_join_for_dispatch() {
        let args = ["echo", r"a\b c"];
        assert_eq!(join_for(Platform::Unix, &args), r#"echo "a\\b c""#);
        assert_eq!(join_for(Platform::Windows, &args), r#"echo "a\b c""#);
        assert_eq!(join(&args), join_for(Platform::current(), &args));
    }

    #[test]
    fn test_round_trip_through_split() {
        let args = vec![
            "echo".to_string(),
            "hello world".to_string(),
            "it's".to_string(),
            r#"say "hi""#.to_string(),
        ];
        assert_eq!(split(&unix_join(args.as_slice())), args);
        assert_eq!(split(&windows_join(args.as_slice())), args);
    }

    #[test]
    fn test_round_trip_tabs_and_inner_quotes() {
        let args = vec!["tab\there", "it's a test", "\"quoted\" 'mixed'"];
        assert_eq!(split(&unix_join(args.as_slice())), args);
        assert_eq!(split(&windows_join(args.as_slice())), args);
    }

    #[test]
    fn test_windows_round_trip_interior_backslashes() {
        let args = vec![r"C:\dir\file", r"C:\my dir\file", r"\\server\share"];
        assert_eq!(windows_join(args.as_slice()), r#"C:\dir\file "C:\my dir\file" \\server\share"#);
        assert_eq!(split(&windows_join(args.as_slice())), args);
    }

    #[test]
    fn test_platform_serde() {
        let p: Platform = serde_json::from_str("\"windows\"").unwrap();
        assert_eq!(p, Platform::Windows);
    }
}
