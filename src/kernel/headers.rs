//! Ordered header collection with wire-name normalization.
//!
//! # Responsibilities
//! - Store headers in insertion order (outgoing wire order follows it)
//! - Case-insensitive lookup; `-` and `_` are the same word separator
//! - Render `Name: value` wire lines with canonical Hyphen-Case names
//!
//! # Design Decisions
//! - Keys normalized to lowercase underscore form at insertion
//! - Setting an existing name replaces the value in place, keeping its slot
//! - One value per logical name

/// Ordered, case-insensitive header collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBag {
    entries: Vec<(String, String)>,
}

impl HeaderBag {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header. An existing entry for the same logical name is
    /// replaced in place; a new name is appended at the end.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let key = logical_key(name);
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a header value. Lookup is case-insensitive and treats
    /// `Content-Type`, `content_type` and `CONTENT_TYPE` as the same name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = logical_key(name);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order as (logical name, value).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Render the collection as `Name: value` wire lines, in insertion order,
    /// with each name in its canonical wire form.
    pub fn wire_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}: {}", wire_name(name), value))
            .collect()
    }
}

/// Normalized storage form of a header name: lowercase, underscores as
/// word separators.
fn logical_key(name: &str) -> String {
    name.to_ascii_lowercase().replace('-', "_")
}

/// Canonical wire form of a header name: lowercase the input, split on
/// underscores, capitalize each segment's first letter, rejoin with hyphens.
/// `content_type` becomes `Content-Type`.
pub fn wire_name(name: &str) -> String {
    name.to_ascii_lowercase()
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
