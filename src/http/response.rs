use bytes::Bytes;

const PROTOCOL: &str = "HTTP/1.1";
const CRLF: &str = "\r\n";

/// Represents the single response a connection sends before closing.
///
/// The status line and CORS header are fixed; only the body varies. Use
/// [`to_bytes`] to render the wire form.
///
/// [`to_bytes`]: Response::to_bytes
#[derive(Debug)]
pub struct Response {
    /// Response body as bytes
    pub body: Bytes,
}

impl Response {
    /// Creates a response carrying the given body.
    pub fn with_body(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    /// Renders the status line, fixed headers, and body.
    ///
    /// The declared `Content-Length` covers the body plus one trailing CRLF,
    /// and two CRLFs follow the body on the wire. Compatibility behavior;
    /// asserted by tests rather than corrected.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        let status_line = format!("{PROTOCOL} 200 OK{CRLF}");
        buf.extend_from_slice(status_line.as_bytes());

        buf.extend_from_slice(b"Access-Control-Allow-Origin: *\r\n");

        let declared_len = self.body.len() + CRLF.len();
        let length_line = format!("Content-Length: {declared_len}{CRLF}");
        buf.extend_from_slice(length_line.as_bytes());

        // Header/body separator
        buf.extend_from_slice(CRLF.as_bytes());

        buf.extend_from_slice(&self.body);
        buf.extend_from_slice(CRLF.as_bytes());
        buf.extend_from_slice(CRLF.as_bytes());

        buf
    }
}
