//! The in-process request representation handed to the kernel.

use bytes::Bytes;
use http::{Method, Uri};

use crate::kernel::headers::HeaderBag;

/// An abstract inbound HTTP request: method, target URI, ordered headers,
/// an optional opaque body, and (for POST) optional parsed form fields.
///
/// The form fields are consulted only when no raw body is present.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    method: Method,
    uri: Uri,
    headers: HeaderBag,
    body: Option<Bytes>,
    form: Vec<(String, String)>,
}

impl InboundRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderBag::new(),
            body: None,
            form: Vec::new(),
        }
    }

    /// Add or replace a header. Names are case-insensitive; `-` and `_`
    /// are interchangeable word separators.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Attach a raw body. For POST requests the raw body takes precedence
    /// over any form fields.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append a parsed form field. Only consulted for POST requests with
    /// no raw body.
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderBag {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_fields() {
        let request = InboundRequest::new(Method::POST, "http://example.com/submit".parse().unwrap())
            .with_header("content_type", "application/x-www-form-urlencoded")
            .with_form_field("a", "1")
            .with_form_field("b", "2");

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.uri().host(), Some("example.com"));
        assert_eq!(
            request.headers().get("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(request.body().is_none());
        assert_eq!(request.form().len(), 2);
    }

    #[test]
    fn test_body_is_opaque_bytes() {
        let request = InboundRequest::new(Method::POST, "http://example.com/".parse().unwrap())
            .with_body(&b"a=1&b=2"[..]);

        assert_eq!(request.body().unwrap().as_ref(), b"a=1&b=2");
    }
}
