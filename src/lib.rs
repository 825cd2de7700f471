//! Remote HTTP kernel.
//!
//! Satisfies an HTTP-kernel contract by proxying requests to a remote
//! origin instead of dispatching them to local application code: an
//! in-process request representation is translated into an outbound call
//! on a native HTTP client, and the raw response comes back.
//!
//! # Architecture Overview
//!
//! ```text
//! InboundRequest ──▶ kernel (HttpKernel contract, error conversion)
//!                       │
//!                       ▼
//!                    forward (translate request → option map,
//!                       │     merge caller overrides, one exchange)
//!                       ▼
//!                    transport (fresh per-call handle over hyper,
//!                       │       timeouts, caps, error codes)
//!                       ▼
//!                    remote origin
//!
//! Cross-cutting: config (TOML → TransportOptions), observability
//! (tracing events, metrics facade).
//! ```

// Core subsystems
pub mod forward;
pub mod kernel;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::ForwarderConfig;
pub use forward::RequestForwarder;
pub use kernel::request::InboundRequest;
pub use kernel::response::{
    KernelResponse, PopulateError, RawBodyPopulator, ResponsePopulator, WirePopulator,
};
pub use kernel::{ErrorMode, HeaderBag, HttpKernel, KernelError, RemoteHttpKernel};
pub use transport::{
    ErrorCode, HyperTransport, OptionValue, Transport, TransportError, TransportOption,
    TransportOptions,
};
