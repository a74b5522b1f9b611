// Connection handling module
// Serves one accepted TCP connection in its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::cors::CorsService;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// The request handler is wrapped in [`CorsService`], so every response on
/// this connection leaves with the CORS header set. Errors and panics stay
/// inside the task; the accept loop is unaffected.
pub fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.http.keep_alive);

        let service = CorsService::new(service_fn(move |req: Request<Incoming>| {
            handler::handle_request(req, Arc::clone(&state))
        }));

        if let Err(err) = builder.serve_connection(io, service).await {
            if !err.is_incomplete_message() {
                logger::log_connection_error(&format!("{peer_addr}: {err}"));
            }
        }
    });
}
