use std::collections::HashMap;

use bytes::{Buf, BytesMut};

use crate::http::request::Request;

const CRLF: &[u8] = b"\r\n";
const HEADER_END: &[u8] = b"\r\n\r\n";
const CONTENT_LENGTH: &str = "Content-Length";

/// Where the assembler is in the request: request line, header block, or
/// body. Advances monotonically; `Body` carries the declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    RequestLine,
    Headers,
    Body { expected: usize },
}

/// Whether a complete request has been assembled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStatus {
    Processing,
    Done,
}

#[derive(Debug)]
pub enum FramingError {
    /// Request line did not split into exactly method, path, and protocol.
    InvalidRequestLine,
    /// Header line without a `:` separator.
    InvalidHeader,
    /// `Content-Length` value is not a base-10 length.
    InvalidContentLength,
    /// Request line or header block holds non-UTF-8 bytes.
    InvalidUtf8,
}

/// Incrementally assembles one HTTP request from a stream of byte chunks.
///
/// Feed each chunk read off the socket to [`accept_chunk`]; the return value
/// says whether the request is complete. Chunk boundaries carry no meaning:
/// a request split one byte at a time assembles to the same result as one
/// delivered whole. Once complete, [`into_request`] yields the parsed
/// request.
///
/// [`accept_chunk`]: RequestAssembler::accept_chunk
/// [`into_request`]: RequestAssembler::into_request
#[derive(Debug)]
pub struct RequestAssembler {
    phase: Phase,
    status: AssemblyStatus,
    /// Bytes received but not yet consumed; persists across calls.
    pending: BytesMut,
    method: Option<String>,
    path: Option<String>,
    protocol: Option<String>,
    headers: HashMap<String, String>,
    body: BytesMut,
}

impl RequestAssembler {
    pub fn new() -> Self {
        Self {
            phase: Phase::RequestLine,
            status: AssemblyStatus::Processing,
            pending: BytesMut::new(),
            method: None,
            path: None,
            protocol: None,
            headers: HashMap::new(),
            body: BytesMut::new(),
        }
    }

    /// Consumes the next chunk read off the transport.
    ///
    /// Returns [`AssemblyStatus::Done`] exactly when the request is complete:
    /// after the header block if no `Content-Length` was declared, otherwise
    /// after the declared number of body bytes has accumulated. Body bytes
    /// beyond the declared length are discarded. Calls after completion
    /// consume nothing.
    pub fn accept_chunk(&mut self, chunk: &[u8]) -> Result<AssemblyStatus, FramingError> {
        if self.status == AssemblyStatus::Done {
            return Ok(AssemblyStatus::Done);
        }

        // Body bytes bypass the pending buffer and accumulate directly.
        if let Phase::Body { expected } = self.phase {
            return Ok(self.push_body(chunk, expected));
        }

        self.pending.extend_from_slice(chunk);

        if self.phase == Phase::RequestLine {
            match find_subsequence(&self.pending, CRLF) {
                None => return Ok(AssemblyStatus::Processing),
                Some(line_end) => self.parse_request_line(line_end)?,
            }
        }

        let Some(block_end) = find_subsequence(&self.pending, HEADER_END) else {
            return Ok(AssemblyStatus::Processing);
        };
        self.parse_header_block(block_end)?;

        // Anything after the header terminator is already body data.
        let first_body = self.pending.split_off(block_end + HEADER_END.len());
        self.pending.clear();

        match self.headers.get(CONTENT_LENGTH) {
            None => {
                self.status = AssemblyStatus::Done;
                Ok(AssemblyStatus::Done)
            }
            Some(raw) => {
                let expected = raw
                    .parse::<usize>()
                    .map_err(|_| FramingError::InvalidContentLength)?;
                self.phase = Phase::Body { expected };
                Ok(self.push_body(&first_body, expected))
            }
        }
    }

    /// Yields the assembled request, or `None` while still processing.
    pub fn into_request(self) -> Option<Request> {
        if self.status != AssemblyStatus::Done {
            return None;
        }
        Some(Request {
            method: self.method?,
            path: self.path?,
            protocol: self.protocol?,
            headers: self.headers,
            body: self.body.freeze(),
        })
    }

    pub fn status(&self) -> AssemblyStatus {
        self.status
    }

    /// Body bytes accumulated so far; never exceeds the declared length.
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    fn parse_request_line(&mut self, line_end: usize) -> Result<(), FramingError> {
        let line = std::str::from_utf8(&self.pending[..line_end])
            .map_err(|_| FramingError::InvalidUtf8)?;

        let mut tokens = line.split_whitespace();
        let (Some(method), Some(path), Some(protocol), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(FramingError::InvalidRequestLine);
        };

        self.method = Some(method.to_string());
        self.path = Some(path.to_string());
        self.protocol = Some(protocol.to_string());

        // Keep the terminator: the header block of a header-less request is
        // then still delimited by a double CRLF.
        self.pending.advance(line_end);
        self.phase = Phase::Headers;
        Ok(())
    }

    fn parse_header_block(&mut self, block_end: usize) -> Result<(), FramingError> {
        let block = std::str::from_utf8(&self.pending[..block_end])
            .map_err(|_| FramingError::InvalidUtf8)?;

        for line in block.trim().split("\r\n") {
            if line.is_empty() {
                continue;
            }
            let Some((name, value)) = line.split_once(':') else {
                return Err(FramingError::InvalidHeader);
            };
            // Last occurrence of a repeated header wins.
            self.headers.insert(name.to_string(), value.trim().to_string());
        }
        Ok(())
    }

    fn push_body(&mut self, chunk: &[u8], expected: usize) -> AssemblyStatus {
        let needed = expected - self.body.len();
        if chunk.len() >= needed {
            // Trailing bytes past the declared length are dropped.
            self.body.extend_from_slice(&chunk[..needed]);
            self.status = AssemblyStatus::Done;
        } else {
            self.body.extend_from_slice(chunk);
        }
        self.status
    }
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
