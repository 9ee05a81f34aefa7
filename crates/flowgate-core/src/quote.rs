//! Quoting of scalar text as it appears in execution results.
//!
//! Strings come back from the execution layer in their quoted, escaped form
//! (`"\"hello\\n\""`). [`unquote`] reverses that and reports `None` for any
//! text that is not a well-formed quoted literal.

/// Quote a string the way the execution layer prints string scalars.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Unquote a double-quoted, back-quoted or single-quoted literal.
pub fn unquote(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    if open != close {
        return None;
    }
    let inner = chars.as_str();

    match open {
        '`' => {
            if inner.contains('`') {
                return None;
            }
            Some(inner.chars().filter(|&c| c != '\r').collect())
        }
        '"' => unescape(inner, '"'),
        '\'' => {
            let value = unescape(inner, '\'')?;
            if value.chars().count() != 1 {
                return None;
            }
            Some(value)
        }
        _ => None,
    }
}

fn unescape(inner: &str, delimiter: char) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == delimiter || c == '\n' {
            return None;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = chars.next()?;
        let decoded = match escaped {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' => '\\',
            '"' | '\'' if escaped == delimiter => escaped,
            'x' => ascii(hex_digits(&mut chars, 2)?)?,
            'u' => char::from_u32(hex_digits(&mut chars, 4)?)?,
            'U' => char::from_u32(hex_digits(&mut chars, 8)?)?,
            '0'..='7' => {
                let mut value = escaped.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                ascii(value)?
            }
            _ => return None,
        };
        out.push(decoded);
    }

    Some(out)
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

// Byte escapes above 0x7f would produce invalid UTF-8 on their own.
fn ascii(value: u32) -> Option<char> {
    if value < 0x80 {
        char::from_u32(value)
    } else {
        None
    }
}
