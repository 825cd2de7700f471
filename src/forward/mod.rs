//! Request forwarding.
//!
//! # Responsibilities
//! - Translate an inbound request into a transport option map
//! - Merge caller-supplied overrides last (caller wins on collision)
//! - Execute one wire exchange per call and surface the outcome
//!
//! # Design Decisions
//! - Translation is a pure function; the network only happens in `forward`
//! - No retries, no partial-failure handling, no timeout defaulting beyond
//!   the transport's own
//! - POST payload: raw body verbatim, else form fields, else left unset

use std::time::Instant;

use bytes::Bytes;
use http::Method;
use tracing::{debug, error};
use uuid::Uuid;

use crate::kernel::request::InboundRequest;
use crate::observability::metrics;
use crate::transport::options::{method_flag, OptionValue, TransportOption, TransportOptions};
use crate::transport::{Transport, TransportError};

/// Executes inbound requests against a remote origin through a [`Transport`].
pub struct RequestForwarder<T: Transport> {
    transport: T,
}

impl<T: Transport> RequestForwarder<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Execute one wire exchange for `request`, with `overrides` applied on
    /// top of the computed transport options. Returns the raw response bytes
    /// or the transport's error, verbatim.
    pub async fn forward(
        &self,
        request: &InboundRequest,
        overrides: &TransportOptions,
    ) -> Result<Bytes, TransportError> {
        let options = translate(request, overrides);
        let call_id = Uuid::new_v4();

        debug!(
            call_id = %call_id,
            method = %request.method(),
            uri = %request.uri(),
            "forwarding request to remote origin"
        );

        let started = Instant::now();
        let result = self.transport.execute(&options).await;

        match &result {
            Ok(body) => {
                debug!(call_id = %call_id, bytes = body.len(), "wire exchange succeeded");
                metrics::record_forward(request.method(), "ok", started);
            }
            Err(err) => {
                error!(
                    call_id = %call_id,
                    code = err.code.as_u32(),
                    error = %err,
                    "wire exchange failed"
                );
                metrics::record_forward(request.method(), "error", started);
            }
        }

        result
    }
}

/// Interpret an inbound request as a transport option map, then apply the
/// caller's overrides on top.
pub fn translate(request: &InboundRequest, overrides: &TransportOptions) -> TransportOptions {
    let mut options = TransportOptions::new();

    options.set(TransportOption::Url, OptionValue::Str(request.uri().to_string()));
    options.set(TransportOption::ReturnTransfer, OptionValue::Flag(true));
    options.set(
        TransportOption::HttpHeaders,
        OptionValue::Lines(request.headers().wire_lines()),
    );

    match method_flag(request.method()) {
        Some(flag) => options.set(flag, OptionValue::Flag(true)),
        None => options.set(
            TransportOption::CustomRequest,
            OptionValue::Str(request.method().as_str().to_owned()),
        ),
    }

    if request.method() == Method::POST {
        if let Some(payload) = post_payload(request) {
            options.set(TransportOption::PostFields, payload);
        }
    }

    options.merge(overrides);
    options
}

/// Raw body verbatim if present, else the form-field mapping if non-empty.
/// Neither present means the payload stays unset, which is distinct from an
/// empty payload.
fn post_payload(request: &InboundRequest) -> Option<OptionValue> {
    if let Some(body) = request.body() {
        return Some(OptionValue::Bytes(body.clone()));
    }
    if !request.form().is_empty() {
        return Some(OptionValue::Form(request.form().to_vec()));
    }
    None
}
