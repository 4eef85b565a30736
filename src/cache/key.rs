//! Cache Key Module
//!
//! Composes store keys from a (name, mode, locale) triple.

use std::fmt;

/// Joins the three key segments. Never appears in names, template modes or
/// locale tags, so distinct triples cannot collide.
pub const KEY_SEPARATOR: char = '\u{1f}';

// == Cache Key ==
/// Composite identity of a cached fragment.
///
/// The textual form is `name SEP mode SEP locale`, in that order, with no
/// normalization of case or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Composes the key for a (name, mode, locale) triple.
    pub fn compose(name: &str, mode: &str, locale: &str) -> Self {
        let mut key = String::with_capacity(name.len() + mode.len() + locale.len() + 2);
        key.push_str(name);
        key.push(KEY_SEPARATOR);
        key.push_str(mode);
        key.push(KEY_SEPARATOR);
        key.push_str(locale);
        Self(key)
    }

    /// Prefix shared by every key whose name segment is exactly `name`.
    pub fn name_prefix(name: &str) -> String {
        let mut prefix = String::with_capacity(name.len() + 1);
        prefix.push_str(name);
        prefix.push(KEY_SEPARATOR);
        prefix
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Readable `name/mode/locale` form for messages and logs.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.split(KEY_SEPARATOR);
        let name = segments.next().unwrap_or_default();
        let mode = segments.next().unwrap_or_default();
        let locale = segments.next().unwrap_or_default();
        write!(f, "{}/{}/{}", name, mode, locale)
    }
}
