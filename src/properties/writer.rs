//! Properties serialization
//!
//! Output is deterministic: a single header comment followed by entries in key
//! order, so writing the same properties twice produces identical bytes.

use std::fmt::Write as _;

use super::Properties;

/// Serialize `properties` with a `#<header>` comment line.
pub fn store(properties: &Properties, header: &str) -> String {
    let mut out = String::new();
    for line in header.lines() {
        out.push('#');
        out.push_str(line);
        out.push('\n');
    }
    for (key, value) in properties {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (pos, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || pos == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (' '..='~').contains(&c) => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::parse;

    #[test]
    fn test_store_writes_header_and_sorted_entries() {
        let props: Properties = [("grinder.threads", "4"), ("grinder.processes", "1")]
            .into_iter()
            .collect();
        let text = store(&props, "Grinder Agent Properties");
        assert_eq!(
            text,
            "#Grinder Agent Properties\ngrinder.processes=1\ngrinder.threads=4\n"
        );
    }

    #[test]
    fn test_store_escapes_separators_and_specials() {
        let props: Properties = [("a key", " lead=x:y#z!"), ("path", "C:\\tmp")]
            .into_iter()
            .collect();
        let text = store(&props, "h");
        assert!(text.contains("a\\ key=\\ lead\\=x\\:y\\#z\\!\n"));
        assert!(text.contains("path=C\\:\\\\tmp\n"));
    }

    #[test]
    fn test_store_escapes_non_ascii() {
        let props: Properties = [("greeting", "café 😀")].into_iter().collect();
        let text = store(&props, "h");
        assert!(text.contains("greeting=caf\\u00E9 \\uD83D\\uDE00"));
    }

    #[test]
    fn test_stored_text_parses_back() {
        let props: Properties = [
            ("grinder.jvm.arguments", "-Xmx1g -javaagent:/repo/agent.jar"),
            ("odd key", "line\nbreak\ttab"),
            ("unicode", "naïve"),
        ]
        .into_iter()
        .collect();
        let reparsed = parse(&store(&props, "Grinder Agent Properties")).unwrap();
        assert_eq!(reparsed, props);
    }
}
