//! Response object and population strategies.
//!
//! A [`ResponsePopulator`] is constructed over a mutable [`KernelResponse`]
//! plus some external input and fills the response's fields in a single
//! `populate` call. Strategies can be swapped without touching the
//! forwarding path.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use thiserror::Error;

/// The response object the dispatch wrapper returns.
#[derive(Debug, Clone)]
pub struct KernelResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl KernelResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for KernelResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

/// Errors raised while filling a response from transport output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PopulateError {
    /// The transport output carries no response head to parse.
    #[error("response head missing from transport output")]
    MissingHead,

    /// The response head was present but unparseable.
    #[error("malformed response head: {0}")]
    Malformed(String),
}

/// Fill a held response object from some external input.
pub trait ResponsePopulator {
    fn populate(&mut self) -> Result<(), PopulateError>;
}

/// Fills only the body from the raw transport bytes. The status stays at
/// its default; headers are left empty.
pub struct RawBodyPopulator<'a> {
    response: &'a mut KernelResponse,
    raw: Bytes,
}

impl<'a> RawBodyPopulator<'a> {
    pub fn new(response: &'a mut KernelResponse, raw: Bytes) -> Self {
        Self { response, raw }
    }
}

impl ResponsePopulator for RawBodyPopulator<'_> {
    fn populate(&mut self) -> Result<(), PopulateError> {
        self.response.body = std::mem::take(&mut self.raw);
        Ok(())
    }
}

/// Parses a response head (status line plus header block) off the front of
/// the raw transport bytes and fills status, headers and body. Expects the
/// transport to have been asked to include the head in its output.
pub struct WirePopulator<'a> {
    response: &'a mut KernelResponse,
    raw: Bytes,
}

impl<'a> WirePopulator<'a> {
    pub fn new(response: &'a mut KernelResponse, raw: Bytes) -> Self {
        Self { response, raw }
    }
}

impl ResponsePopulator for WirePopulator<'_> {
    fn populate(&mut self) -> Result<(), PopulateError> {
        let boundary = self
            .raw
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .ok_or(PopulateError::MissingHead)?;

        let head = std::str::from_utf8(&self.raw[..boundary])
            .map_err(|_| PopulateError::Malformed("head is not valid UTF-8".into()))?;

        let mut lines = head.split("\r\n");
        let status_line = lines.next().ok_or(PopulateError::MissingHead)?;
        let status = parse_status_line(status_line)?;

        let mut headers = HeaderMap::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| PopulateError::Malformed(format!("header line {line:?}")))?;
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| PopulateError::Malformed(format!("header name {name:?}")))?;
            let value = HeaderValue::from_str(value.trim())
                .map_err(|_| PopulateError::Malformed(format!("header value for {name}")))?;
            headers.append(name, value);
        }

        self.response.status = status;
        self.response.headers = headers;
        self.response.body = self.raw.slice(boundary + 4..);
        Ok(())
    }
}

fn parse_status_line(line: &str) -> Result<StatusCode, PopulateError> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some(version) if version.starts_with("HTTP/") => {}
        _ => return Err(PopulateError::Malformed(format!("status line {line:?}"))),
    }
    let code = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| PopulateError::Malformed(format!("status line {line:?}")))?;
    StatusCode::from_u16(code)
        .map_err(|_| PopulateError::Malformed(format!("status code {code}")))
}
