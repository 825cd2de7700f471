//! Transport option map.
//!
//! # Responsibilities
//! - Name every knob the transport understands (`TransportOption`)
//! - Hold computed and caller-supplied settings in one ordered map
//! - Merge caller overrides after computed values; caller wins on collision
//!
//! # Design Decisions
//! - Closed key enum instead of stringly-typed option names
//! - Last write wins per key; a replaced key keeps its slot in the map
//! - The method-name → flag table is a process-wide immutable constant

use bytes::Bytes;
use http::Method;

/// Every option key the transport layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportOption {
    /// Target URL for the exchange.
    Url,
    /// Hand the response body back to the caller (set on every forward).
    ReturnTransfer,
    /// Outgoing `Name: value` wire header lines, in order.
    HttpHeaders,
    /// Method flag: GET.
    HttpGet,
    /// Method flag: POST.
    Post,
    /// Method flag: HEAD (no response body expected).
    NoBody,
    /// Method flag: PUT.
    Upload,
    /// Literal verb string for methods outside the flag table.
    CustomRequest,
    /// POST payload: raw bytes, or form fields the transport encodes.
    PostFields,
    /// Prepend the response head (status line + headers) to the returned bytes.
    IncludeHeaders,
    /// Connection establishment timeout in milliseconds.
    ConnectTimeoutMs,
    /// Total exchange timeout in milliseconds.
    TimeoutMs,
    /// Upper bound on buffered response body size in bytes.
    MaxResponseBytes,
    /// User-Agent header to send when the request carries none.
    UserAgent,
}

/// A value attached to a [`TransportOption`] key.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Int(u64),
    Str(String),
    Bytes(Bytes),
    Lines(Vec<String>),
    Form(Vec<(String, String)>),
}

/// Ordered option map with last-write-wins semantics per key.
///
/// The forwarder fills this with computed settings, then merges the
/// caller-supplied map on top, so callers can force behaviors the request
/// model cannot express.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOptions {
    entries: Vec<(TransportOption, OptionValue)>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. An existing key is overwritten in place.
    pub fn set(&mut self, key: TransportOption, value: OptionValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: TransportOption, value: OptionValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: TransportOption) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// True when the key is present as `Flag(true)`.
    pub fn flag(&self, key: TransportOption) -> bool {
        matches!(self.get(key), Some(OptionValue::Flag(true)))
    }

    /// Integer value for the key, if present as `Int`.
    pub fn int(&self, key: TransportOption) -> Option<u64> {
        match self.get(key) {
            Some(OptionValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Apply every entry of `overrides` on top of this map. Colliding keys
    /// take the override's value; new keys are appended.
    pub fn merge(&mut self, overrides: &TransportOptions) {
        for (key, value) in &overrides.entries {
            self.set(*key, value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransportOption, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

/// Method name → transport flag table. Consulted read-only; verbs outside
/// this table travel as a literal custom-method string.
static METHOD_FLAGS: [(Method, TransportOption); 4] = [
    (Method::GET, TransportOption::HttpGet),
    (Method::POST, TransportOption::Post),
    (Method::HEAD, TransportOption::NoBody),
    (Method::PUT, TransportOption::Upload),
];

/// Transport flag for the method, if it has one.
pub fn method_flag(method: &Method) -> Option<TransportOption> {
    METHOD_FLAGS
        .iter()
        .find(|(known, _)| known == method)
        .map(|(_, flag)| *flag)
}
