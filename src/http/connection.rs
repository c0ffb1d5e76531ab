use bytes::Bytes;
use tokio::net::TcpStream;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::http::assembler::{AssemblyStatus, RequestAssembler};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

const READ_BUF_SIZE: usize = 8192;

pub struct Connection {
    stream: TcpStream,
    assembler: RequestAssembler,
    default_body: String,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, default_body: String) -> Self {
        Self {
            stream,
            assembler: RequestAssembler::new(),
            default_body,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut chunk = vec![0u8; READ_BUF_SIZE];

        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let read = self.stream.read(&mut chunk).await?;

                    if read == 0 {
                        // Peer closed before completing a request; nothing to answer.
                        self.state = ConnectionState::Closed;
                        continue;
                    }

                    match self.assembler.accept_chunk(&chunk[..read]) {
                        Ok(AssemblyStatus::Processing) => {
                            // Need more data → read again
                        }

                        Ok(AssemblyStatus::Done) => {
                            let assembler = std::mem::take(&mut self.assembler);
                            let request = assembler
                                .into_request()
                                .ok_or_else(|| anyhow::anyhow!("assembly finished without a request"))?;
                            self.state = ConnectionState::Processing(request);
                        }

                        Err(e) => {
                            // Malformed request → close without a response
                            return Err(anyhow::anyhow!("framing error: {:?}", e));
                        }
                    }
                }

                ConnectionState::Processing(request) => {
                    debug!("{} {} {}", request.method, request.path, request.protocol);

                    let body = if request.body.is_empty() {
                        Bytes::from(self.default_body.clone())
                    } else {
                        request.body.clone()
                    };

                    let response = Response::with_body(body);
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request, one response: never reused
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
