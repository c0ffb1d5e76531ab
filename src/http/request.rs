use std::collections::HashMap;

use bytes::Bytes;

/// Represents a fully assembled HTTP request from a client.
///
/// Contains the three request-line tokens, the header map, and any body
/// bytes that arrived under the declared `Content-Length`.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method token (e.g. "GET", "POST"), as sent
    pub method: String,
    /// The request path/URL (e.g. "/index.html")
    pub path: String,
    /// Protocol token from the request line (typically "HTTP/1.1")
    pub protocol: String,
    /// Request headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Request body, exactly as many bytes as were declared
    pub body: Bytes,
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// # Arguments
    ///
    /// * `key` - Header name to look up
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
