//! Transport layer: the seam to the native HTTP client.
//!
//! # Data Flow
//! ```text
//! TransportOptions (computed by the forwarder, caller overrides merged)
//!     → Transport::execute
//!     → fresh single-use handle (one client per exchange)
//!     → blocking-style round trip (awaited to completion)
//!     → raw response bytes, or TransportError { code, message }
//! ```
//!
//! The trait exists so tests can substitute a recording transport for the
//! hyper-backed one without touching the forwarding path.

pub mod error;
pub mod hyper;
pub mod options;

use async_trait::async_trait;
use bytes::Bytes;

pub use self::hyper::HyperTransport;
pub use error::{ErrorCode, TransportError};
pub use options::{method_flag, OptionValue, TransportOption, TransportOptions};

/// A native HTTP client behind an option map.
///
/// One `execute` call performs one complete exchange: the implementation
/// opens a fresh handle, drives the call to completion, and releases the
/// handle before returning, on success and failure alike.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, options: &TransportOptions) -> Result<Bytes, TransportError>;
}
