//! Build-tool supplied property overrides

use std::collections::BTreeMap;

/// Key prefix an override must carry to reach the run configuration.
pub const OVERRIDE_NAMESPACE: &str = "grinder.";

/// Key/value overrides supplied by the embedding build tool.
///
/// Values may be absent (a null entry in the manifest); absent values never
/// overlay anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    entries: BTreeMap<String, Option<String>>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.entries.insert(key.into(), value.map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries allowed to overlay file properties: namespaced keys with a value.
    pub fn eligible(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, value)| {
            let value = value.as_deref()?;
            key.starts_with(OVERRIDE_NAMESPACE)
                .then_some((key.as_str(), value))
        })
    }

    /// Keys that will be ignored because they fall outside the namespace.
    pub fn ignored_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .filter(|key| !key.starts_with(OVERRIDE_NAMESPACE))
            .map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for OverrideMap {
    fn from_iter<T: IntoIterator<Item = (K, Option<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Option<String>)> for OverrideMap {
    fn extend<T: IntoIterator<Item = (K, Option<String>)>>(&mut self, iter: T) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}
