//! The HTTP kernel contract and its remote implementation.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → RemoteHttpKernel::handle
//!     → RequestForwarder (translate + execute)
//!     → raw response bytes
//!     → ResponsePopulator strategy fills a KernelResponse
//!
//! On failure:
//!     ErrorMode::Propagate → KernelError to the caller
//!     ErrorMode::Convert   → 502 Bad Gateway response carrying the message
//! ```

pub mod headers;
pub mod request;
pub mod response;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

use crate::forward::RequestForwarder;
use crate::kernel::request::InboundRequest;
use crate::kernel::response::{
    KernelResponse, PopulateError, RawBodyPopulator, ResponsePopulator, WirePopulator,
};
use crate::transport::{Transport, TransportError, TransportOption, TransportOptions};

pub use headers::HeaderBag;

/// What `handle` does with a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Surface the failure to the caller.
    Propagate,
    /// Convert the failure into a gateway-error response.
    Convert,
}

/// Errors surfaced by the kernel when not converting them into responses.
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    #[error("upstream transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("response population failed: {0}")]
    Populate(#[from] PopulateError),
}

/// The kernel contract: turn an inbound request into a response.
#[async_trait]
pub trait HttpKernel: Send + Sync {
    async fn handle(
        &self,
        request: &InboundRequest,
        mode: ErrorMode,
    ) -> Result<KernelResponse, KernelError>;
}

/// An [`HttpKernel`] that satisfies requests by proxying them to a remote
/// origin instead of dispatching to local application code.
///
/// Constructor-supplied [`TransportOptions`] override the computed transport
/// configuration on every call, taking precedence on key collision.
pub struct RemoteHttpKernel<T: Transport> {
    forwarder: RequestForwarder<T>,
    options: TransportOptions,
}

impl<T: Transport> RemoteHttpKernel<T> {
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, TransportOptions::new())
    }

    pub fn with_options(transport: T, options: TransportOptions) -> Self {
        Self {
            forwarder: RequestForwarder::new(transport),
            options,
        }
    }

    /// Failed exchanges convert to 502 Bad Gateway, body carrying the
    /// transport's rendered error.
    fn convert_failure(&self, err: &TransportError) -> KernelResponse {
        let mut response = KernelResponse::new();
        response.status = StatusCode::BAD_GATEWAY;
        response.body = err.to_string().into();
        response
    }
}

#[async_trait]
impl<T: Transport> HttpKernel for RemoteHttpKernel<T> {
    async fn handle(
        &self,
        request: &InboundRequest,
        mode: ErrorMode,
    ) -> Result<KernelResponse, KernelError> {
        match self.forwarder.forward(request, &self.options).await {
            Ok(raw) => {
                let mut response = KernelResponse::new();
                if self.options.flag(TransportOption::IncludeHeaders) {
                    WirePopulator::new(&mut response, raw).populate()?;
                } else {
                    RawBodyPopulator::new(&mut response, raw).populate()?;
                }
                Ok(response)
            }
            Err(err) => match mode {
                ErrorMode::Convert => Ok(self.convert_failure(&err)),
                ErrorMode::Propagate => Err(err.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use bytes::Bytes;
    use http::Method;

    use crate::transport::ErrorCode;

    struct FixedTransport(Result<Bytes, TransportError>);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn execute(&self, _options: &TransportOptions) -> Result<Bytes, TransportError> {
            self.0.clone()
        }
    }

    fn get() -> InboundRequest {
        InboundRequest::new(Method::GET, "http://example.com/".parse().unwrap())
    }

    #[tokio::test]
    async fn test_handle_wraps_raw_bytes_in_response() {
        let kernel = RemoteHttpKernel::new(FixedTransport(Ok(Bytes::from_static(b"payload"))));

        let response = kernel.handle(&get(), ErrorMode::Propagate).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.as_ref(), b"payload");
    }

    #[tokio::test]
    async fn test_handle_propagates_failures_when_asked() {
        let kernel = RemoteHttpKernel::new(FixedTransport(Err(TransportError::new(
            ErrorCode::Connect,
            "connection refused",
        ))));

        let err = kernel.handle(&get(), ErrorMode::Propagate).await.unwrap_err();

        match err {
            KernelError::Transport(err) => {
                assert_eq!(err.code, ErrorCode::Connect);
                assert_eq!(err.message, "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_converts_failures_to_bad_gateway() {
        let kernel = RemoteHttpKernel::new(FixedTransport(Err(TransportError::new(
            ErrorCode::Timeout,
            "no complete response within 250ms",
        ))));

        let response = kernel.handle(&get(), ErrorMode::Convert).await.unwrap();

        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        let body = std::str::from_utf8(&response.body).unwrap();
        assert!(body.contains("no complete response within 250ms"));
    }

    #[tokio::test]
    async fn test_handle_parses_head_when_constructor_options_ask_for_it() {
        let framed = Bytes::from_static(
            b"HTTP/1.1 201 Created\r\nX-Origin: remote\r\n\r\ncreated",
        );
        let options = TransportOptions::new()
            .with(TransportOption::IncludeHeaders, crate::transport::OptionValue::Flag(true));
        let kernel = RemoteHttpKernel::with_options(FixedTransport(Ok(framed)), options);

        let response = kernel.handle(&get(), ErrorMode::Propagate).await.unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.headers["x-origin"], "remote");
        assert_eq!(response.body.as_ref(), b"created");
    }
}
