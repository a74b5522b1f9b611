// 服务器模块入口
// Server startup, accept loop and shutdown

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

pub use listener::create_listener;
pub use signal::shutdown_signal;

/// A bound static CORS server, ready to accept connections
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Resolve the serving root and bind the listening socket.
    ///
    /// Fails fast on an invalid address, missing root or a port that
    /// cannot be bound. Must be called from within a Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let state = Arc::new(AppState::new(config)?);
        let addr = config.get_socket_addr()?;
        let listener = create_listener(addr)?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn root(&self) -> &Path {
        self.state.root()
    }

    /// Accept connections until `shutdown` resolves, then close the listener
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let Self { listener, state } = self;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            connection::handle_connection(stream, peer_addr, Arc::clone(&state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = &mut shutdown => break,
            }
        }

        drop(listener);
    }
}
