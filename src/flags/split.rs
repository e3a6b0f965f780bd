//! Split a command line into arguments.
//!
//! Quotes open only at the start of an argument. Inside quotes an escaped
//! matching quote is resolved to the bare quote; outside quotes `\ `, `\'`
//! and `\"` are kept verbatim. A space followed by `\` or `` ` `` and a
//! newline joins the next line onto the current one.

/// Which quote is open while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

impl Quote {
    /// The character that closes this quote, if one is open.
    fn closing_char(self) -> Option<char> {
        match self {
            Quote::None => None,
            Quote::Single => Some('\''),
            Quote::Double => Some('"'),
        }
    }
}

/// Split a command line into arguments.
///
/// Never fails. Unterminated quotes run to the end of the input.
pub fn split(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = Quote::None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p]);

        if let Some(close) = quote.closing_char() {
            if c == close {
                if prev == Some('\\') {
                    // Escaped quote: swap the backslash for the quote, stay open
                    current.pop();
                    current.push(c);
                } else {
                    quote = Quote::None;
                    flush(&mut tokens, &mut current);
                }
            } else {
                current.push(c);
            }
            i += 1;
            continue;
        }

        match c {
            ' ' => {
                i += continuation_width(&chars, i);
                flush(&mut tokens, &mut current);
            }
            '\\' => match chars.get(i + 1) {
                Some(&next @ (' ' | '\'' | '"')) => {
                    current.push(c);
                    current.push(next);
                    i += 1;
                }
                _ => current.push(c),
            },
            '\'' | '"' if current.is_empty() && prev != Some('\\') => {
                quote = if c == '\'' { Quote::Single } else { Quote::Double };
            }
            _ => current.push(c),
        }
        i += 1;
    }

    flush(&mut tokens, &mut current);
    tokens
}

/// Number of characters after the space at `i` that form a line
/// continuation (`\` or `` ` `` followed by `\n` or `\r\n`), or 0.
///
/// At least one character must follow the marker.
fn continuation_width(chars: &[char], i: usize) -> usize {
    let remaining = chars.len() - 1 - i;
    if remaining <= 2 || !matches!(chars[i + 1], '\\' | '`') {
        return 0;
    }
    match chars[i + 2] {
        '\n' => 2,
        '\r' if remaining > 3 && chars[i + 3] == '\n' => 3,
        _ => 0,
    }
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
