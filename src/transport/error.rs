//! Transport error taxonomy.

use std::fmt;

use thiserror::Error;

/// Numeric failure codes reported by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// The target URL is missing or unparseable.
    BadUrl = 1,
    /// The target URL names a scheme this transport does not speak.
    UnsupportedScheme = 2,
    /// A header line, verb string or other message part is malformed.
    BadMessage = 3,
    /// DNS resolution or connection establishment failed.
    Connect = 4,
    /// The exchange did not complete within the configured deadline.
    Timeout = 5,
    /// The peer violated the protocol or the exchange broke mid-flight.
    Protocol = 6,
    /// The response body exceeded the configured size cap.
    BodyTooLarge = 7,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// A failed wire exchange: the transport's numeric code plus its message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport error {code}: {message}")]
pub struct TransportError {
    pub code: ErrorCode,
    pub message: String,
}

impl TransportError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
