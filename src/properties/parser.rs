//! Properties text parsing
//!
//! Follows the classic `.properties` line format: `#`/`!` comments, `=`, `:` or
//! whitespace separators, backslash line continuation and `\uXXXX` escapes.

use thiserror::Error;

use super::Properties;

/// A properties document that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Decode a properties file. The format is ISO-8859-1: every byte is one
/// character, so no input is rejected here.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Parse properties text into a [`Properties`] map.
///
/// Later duplicates of a key replace earlier ones.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed `\uXXXX` escapes.
pub fn parse(text: &str) -> Result<Properties, ParseError> {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split(['\n', '\r']).collect();

    let mut properties = Properties::new();
    let mut idx = 0;

    while idx < lines.len() {
        let start_line = idx + 1;
        let mut line = lines[idx].trim_start_matches(is_blank);
        idx += 1;

        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = String::new();
        loop {
            if !ends_with_continuation(line) {
                logical.push_str(line);
                break;
            }
            logical.push_str(&line[..line.len() - 1]);
            match lines.get(idx) {
                Some(next) => {
                    line = next.trim_start_matches(is_blank);
                    idx += 1;
                }
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, start_line)?;
        let value = unescape(raw_value, start_line)?;
        properties.insert(key, value);
    }

    Ok(properties)
}

/// Splits a logical line at the first unescaped separator.
fn split_key_value(logical: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = logical.len();
    let mut separator = None;

    for (pos, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = pos;
            separator = Some(c);
            break;
        }
    }

    let Some(separator) = separator else {
        return (logical, "");
    };

    let mut rest = &logical[key_end + separator.len_utf8()..];
    if is_blank(separator) {
        rest = rest.trim_start_matches(is_blank);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }
    (&logical[..key_end], rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, line)?;
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(ParseError {
                        line,
                        reason: format!("malformed \\uxxxx encoding '\\u{hex}'"),
                    });
                }
                let unit = u16::from_str_radix(&hex, 16).map_err(|e| ParseError {
                    line,
                    reason: e.to_string(),
                })?;
                units.push(unit);
            }
            Some(other) => {
                flush_units(&mut units, &mut out, line)?;
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    c => c,
                });
            }
            None => {}
        }
    }
    flush_units(&mut units, &mut out, line)?;

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line: usize) -> Result<(), ParseError> {
    for decoded in char::decode_utf16(units.drain(..)) {
        out.push(decoded.map_err(|e| ParseError {
            line,
            reason: format!("invalid \\u escape: {e}"),
        })?);
    }
    Ok(())
}
