use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;

const LISTEN_BACKLOG: u32 = 1024;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.listen_addr)?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg.clone()).await
}

/// Builds the listening socket with reuse-address and keep-alive set.
pub fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = addr.parse()?;
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };

    socket.set_reuseaddr(true)?;
    // Accepted sockets inherit keep-alive from the listening socket.
    socket.set_keepalive(true)?;
    socket.bind(addr)?;

    Ok(socket.listen(LISTEN_BACKLOG)?)
}

/// Admits connections and hands ready sockets off to their own tasks.
///
/// The loop multiplexes two readiness sources and never blocks on I/O
/// itself: the listener's accept readiness, and read readiness of every
/// accepted-but-not-yet-dispatched socket. A socket is registered for read
/// interest only; the moment it reports readable its registration completes
/// (single-shot, the loop cannot observe it again) and ownership moves into
/// a freshly spawned connection task.
pub async fn serve(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let dispatched = AtomicU64::new(0);
    let mut registered = FuturesUnordered::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        debug!("Accepted connection from {}", peer);
                        if let Err(e) = socket.set_nodelay(true) {
                            debug!("set_nodelay failed for {}: {}", peer, e);
                        }
                        registered.push(wait_readable(socket, peer));
                    }
                    // Scoped to the one connection attempt; keep serving.
                    Err(e) => warn!("Accept failed: {}", e),
                }
            }

            Some(ready) = registered.next() => {
                match ready {
                    Ok((socket, peer)) => {
                        let count = dispatched.fetch_add(1, Ordering::Relaxed);
                        debug!(count, "Handing off connection from {}", peer);

                        let default_body = cfg.default_body.clone();
                        tokio::spawn(async move {
                            let mut conn = Connection::new(socket, default_body);
                            if let Err(e) = conn.run().await {
                                error!("Connection error from {}: {}", peer, e);
                            }
                        });
                    }
                    // The peer can reset before ever turning readable; the
                    // stale entry is skipped, not fatal.
                    Err(e) => debug!("Dropping socket before handoff: {}", e),
                }
            }
        }
    }
}

async fn wait_readable(
    socket: TcpStream,
    peer: SocketAddr,
) -> io::Result<(TcpStream, SocketAddr)> {
    socket.readable().await?;
    Ok((socket, peer))
}
