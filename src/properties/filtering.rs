//! `${...}` placeholder filtering of properties file text
//!
//! `${name}` resolves from the configured filter values and `${env.NAME}` from
//! the process environment. Unresolved placeholders are left untouched.

use std::collections::BTreeMap;

const ENV_PREFIX: &str = "env.";

#[derive(Debug, Clone, Default)]
pub struct PlaceholderFilter {
    values: BTreeMap<String, String>,
}

impl PlaceholderFilter {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(var) = name.strip_prefix(ENV_PREFIX) {
            return std::env::var(var).ok();
        }
        self.values.get(name).cloned()
    }

    /// Replace every resolvable placeholder in `text`.
    pub fn interpolate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let name = &after[..end];
            match self.resolve(name) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&rest[start..start + 2 + end + 1]),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }
}
