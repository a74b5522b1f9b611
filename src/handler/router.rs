//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch and error mapping.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request information needed by the file server, detached from the body
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Raw (still percent-encoded) request path
    pub path: String,
    pub query: Option<String>,
    pub is_head: bool,
    /// `If-Modified-Since`, only kept when no `If-None-Match` is present
    pub if_modified_since: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let headers = req.headers();
        let if_modified_since = if headers.contains_key(IF_NONE_MATCH) {
            None
        } else {
            headers
                .get(IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            is_head: req.method() == Method::HEAD,
            if_modified_since,
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails: every error is turned into a response here so the CORS
/// layer sees it like any other reply.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let ctx = RequestContext::from_request(&req);
    drop(req);

    let result = match method {
        Method::OPTIONS => Ok(http::build_preflight_response()),
        Method::GET | Method::HEAD => static_files::serve_path(&ctx, state.root()).await,
        other => Err(ServeError::UnsupportedMethod(other.to_string())),
    };

    Ok(result.unwrap_or_else(|err| error_response(&err, ctx.is_head)))
}

fn error_response(err: &ServeError, is_head: bool) -> Response<Full<Bytes>> {
    if let ServeError::Io { .. } = err {
        logger::log_error(&err.to_string());
    }
    http::build_error_response(err.status(), &err.public_message(), is_head)
}
