//! HTTP protocol implementation.
//!
//! This module implements a minimal single-shot HTTP/1.x exchange: one request
//! is assembled from an arbitrary sequence of partial reads, one response is
//! written, and the connection closes. There is no keep-alive and no routing.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection handler implementing the read-respond-close state machine
//! - **`assembler`**: Incrementally reconstructs a request from byte chunks
//! - **`request`**: HTTP request representation and accessors
//! - **`response`**: The fixed-format HTTP response
//! - **`writer`**: Serializes and writes a response to the client
//!
//! # Assembly State Machine
//!
//! Each request moves through the assembler's phases as bytes arrive:
//!
//! ```text
//!        ┌──────────────┐
//!        │ Request line │ ← Wait for the first CRLF, split into three tokens
//!        └──────┬───────┘
//!               │ Line parsed (same call continues)
//!               ▼
//!        ┌──────────────┐
//!        │   Headers    │ ← Accumulate until the double CRLF, build header map
//!        └──────┬───────┘
//!               │ No Content-Length → Done
//!               ▼
//!        ┌──────────────┐
//!        │     Body     │ ← Accumulate declared byte count, drop any excess
//!        └──────┬───────┘
//!               │ Declared length reached
//!               ▼
//!             Done (terminal; exactly one transition)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use beacon::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:5555").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, String::new());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod assembler;
pub mod connection;
pub mod request;
pub mod response;
pub mod writer;
