//! Hyper-backed transport.
//!
//! # Responsibilities
//! - Interpret the merged option map into one wire exchange
//! - Build a fresh single-use client per call (no handle reuse)
//! - Enforce connect/total timeouts and the response size cap
//! - Classify failures into numeric error codes
//!
//! # Design Decisions
//! - Plain-HTTP connector; an https target is an UnsupportedScheme error
//! - Custom-verb string wins over method flags, then POST/HEAD/PUT/GET
//! - Form payloads are sent application/x-www-form-urlencoded
//! - Response body fully buffered before returning (no streaming surface)

use std::time::Duration;

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use http::header::{self, HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, StatusCode, Uri, Version};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tracing::trace;
use url::form_urlencoded;

use crate::transport::error::{ErrorCode, TransportError};
use crate::transport::options::{OptionValue, TransportOption, TransportOptions};
use crate::transport::Transport;

/// Default cap on buffered response bodies.
const DEFAULT_MAX_RESPONSE_BYTES: u64 = 2 * 1024 * 1024;

/// Executes option maps over hyper's legacy client. Stateless; every call
/// opens its own handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyperTransport;

impl HyperTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(&self, options: &TransportOptions) -> Result<Bytes, TransportError> {
        let uri = target_uri(options)?;
        let method = wire_method(options)?;
        let payload = wire_payload(options);
        let request = build_request(options, &uri, &method, payload)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(
            options
                .int(TransportOption::ConnectTimeoutMs)
                .map(Duration::from_millis),
        );

        // The per-call handle: built here, dropped before this call returns.
        let client: Client<HttpConnector, Full<Bytes>> =
            Client::builder(TokioExecutor::new()).build(connector);

        let cap = options
            .int(TransportOption::MaxResponseBytes)
            .unwrap_or(DEFAULT_MAX_RESPONSE_BYTES) as usize;

        let exchange = async {
            let response: http::Response<hyper::body::Incoming> = client
                .request(request)
                .await
                .map_err(classify_client_error)?;
            let (parts, body) = response.into_parts();
            let collected = Limited::new(body, cap)
                .collect()
                .await
                .map_err(classify_body_error)?;
            Ok::<_, TransportError>((parts, collected.to_bytes()))
        };

        let (parts, body) = match options.int(TransportOption::TimeoutMs) {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), exchange)
                .await
                .map_err(|_| {
                    TransportError::new(
                        ErrorCode::Timeout,
                        format!("no complete response within {ms}ms"),
                    )
                })??,
            None => exchange.await?,
        };

        trace!(
            method = %method,
            uri = %uri,
            status = parts.status.as_u16(),
            bytes = body.len(),
            "wire exchange complete"
        );

        if matches!(
            options.get(TransportOption::ReturnTransfer),
            Some(OptionValue::Flag(false))
        ) {
            return Ok(Bytes::new());
        }

        if options.flag(TransportOption::IncludeHeaders) {
            return Ok(prepend_head(
                parts.status,
                parts.version,
                &parts.headers,
                &body,
            ));
        }

        Ok(body)
    }
}

fn target_uri(options: &TransportOptions) -> Result<Uri, TransportError> {
    let raw = match options.get(TransportOption::Url) {
        Some(OptionValue::Str(url)) => url,
        _ => return Err(TransportError::new(ErrorCode::BadUrl, "no target url configured")),
    };

    let uri: Uri = raw
        .parse()
        .map_err(|e| TransportError::new(ErrorCode::BadUrl, format!("{raw}: {e}")))?;

    match uri.scheme_str() {
        Some("http") => Ok(uri),
        Some(other) => Err(TransportError::new(
            ErrorCode::UnsupportedScheme,
            format!("scheme {other:?} is not supported by this transport"),
        )),
        None => Err(TransportError::new(
            ErrorCode::BadUrl,
            format!("{raw}: target url must be absolute"),
        )),
    }
}

/// Custom-verb string wins, then the method flags, defaulting to GET.
fn wire_method(options: &TransportOptions) -> Result<Method, TransportError> {
    if let Some(OptionValue::Str(verb)) = options.get(TransportOption::CustomRequest) {
        return Method::from_bytes(verb.as_bytes()).map_err(|_| {
            TransportError::new(ErrorCode::BadMessage, format!("invalid method {verb:?}"))
        });
    }

    for (flag, method) in [
        (TransportOption::Post, Method::POST),
        (TransportOption::NoBody, Method::HEAD),
        (TransportOption::Upload, Method::PUT),
        (TransportOption::HttpGet, Method::GET),
    ] {
        if options.flag(flag) {
            return Ok(method);
        }
    }

    Ok(Method::GET)
}

struct WirePayload {
    bytes: Bytes,
    content_type: Option<HeaderValue>,
}

fn wire_payload(options: &TransportOptions) -> WirePayload {
    match options.get(TransportOption::PostFields) {
        Some(OptionValue::Bytes(raw)) => WirePayload {
            bytes: raw.clone(),
            content_type: None,
        },
        Some(OptionValue::Form(fields)) => {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (name, value) in fields {
                serializer.append_pair(name, value);
            }
            WirePayload {
                bytes: Bytes::from(serializer.finish()),
                content_type: Some(HeaderValue::from_static(
                    "application/x-www-form-urlencoded",
                )),
            }
        }
        _ => WirePayload {
            bytes: Bytes::new(),
            content_type: None,
        },
    }
}

fn build_request(
    options: &TransportOptions,
    uri: &Uri,
    method: &Method,
    payload: WirePayload,
) -> Result<Request<Full<Bytes>>, TransportError> {
    let mut builder = Request::builder().method(method.clone()).uri(uri.clone());

    if let Some(headers) = builder.headers_mut() {
        if let Some(OptionValue::Lines(lines)) = options.get(TransportOption::HttpHeaders) {
            for line in lines {
                let (name, value) = parse_header_line(line)?;
                headers.append(name, value);
            }
        }

        if let Some(content_type) = payload.content_type {
            headers.entry(header::CONTENT_TYPE).or_insert(content_type);
        }

        if let Some(OptionValue::Str(agent)) = options.get(TransportOption::UserAgent) {
            if !headers.contains_key(header::USER_AGENT) {
                let agent = HeaderValue::from_str(agent).map_err(|_| {
                    TransportError::new(ErrorCode::BadMessage, format!("invalid user agent {agent:?}"))
                })?;
                headers.insert(header::USER_AGENT, agent);
            }
        }
    }

    builder
        .body(Full::new(payload.bytes))
        .map_err(|e| TransportError::new(ErrorCode::BadMessage, e.to_string()))
}

fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue), TransportError> {
    let (name, value) = line.split_once(':').ok_or_else(|| {
        TransportError::new(ErrorCode::BadMessage, format!("malformed header line {line:?}"))
    })?;

    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| {
        TransportError::new(ErrorCode::BadMessage, format!("invalid header name in {line:?}"))
    })?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| {
        TransportError::new(ErrorCode::BadMessage, format!("invalid header value in {line:?}"))
    })?;

    Ok((name, value))
}

/// Render `HTTP/x.y <code> <reason>` plus the header block ahead of the body.
fn prepend_head(status: StatusCode, version: Version, headers: &HeaderMap, body: &Bytes) -> Bytes {
    let mut out = BytesMut::new();
    out.put_slice(
        format!(
            "{:?} {} {}\r\n",
            version,
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .as_bytes(),
    );
    for (name, value) in headers {
        out.put_slice(name.as_str().as_bytes());
        out.put_slice(b": ");
        out.put_slice(value.as_bytes());
        out.put_slice(b"\r\n");
    }
    out.put_slice(b"\r\n");
    out.put_slice(body);
    out.freeze()
}

fn classify_client_error(err: hyper_util::client::legacy::Error) -> TransportError {
    let code = if err.is_connect() {
        ErrorCode::Connect
    } else {
        ErrorCode::Protocol
    };
    TransportError::new(code, error_chain(&err))
}

fn classify_body_error(err: Box<dyn std::error::Error + Send + Sync>) -> TransportError {
    if err.is::<LengthLimitError>() {
        TransportError::new(
            ErrorCode::BodyTooLarge,
            "response body exceeded the configured cap",
        )
    } else {
        TransportError::new(ErrorCode::Protocol, error_chain(err.as_ref()))
    }
}

/// Flatten an error and its sources into one message.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
