//! CORS header decoration
//!
//! `CorsService` wraps any hyper service and stamps the fixed header set
//! onto every response it produces, whichever branch of the inner service
//! built it (file, redirect, error page or preflight).

use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
};
use hyper::service::Service;
use hyper::{HeaderMap, Request, Response};
use std::future::Future;
use std::pin::Pin;

/// Headers attached to every response
pub static CORS_HEADERS: [(HeaderName, &str); 4] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "*"),
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
];

/// Insert the fixed header set, replacing any existing values
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in &CORS_HEADERS {
        headers.insert(name.clone(), HeaderValue::from_static(*value));
    }
}

/// Service decorator that applies [`CORS_HEADERS`] to every response
#[derive(Debug, Clone)]
pub struct CorsService<S> {
    inner: S,
}

impl<S> CorsService<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        let fut = self.inner.call(req);
        Box::pin(async move {
            let mut response = fut.await?;
            apply_cors_headers(response.headers_mut());
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::{Empty, Full};
    use hyper::body::Bytes;
    use hyper::service::service_fn;
    use hyper::StatusCode;
    use std::convert::Infallible;

    fn assert_cors_headers(headers: &HeaderMap) {
        for (name, value) in &CORS_HEADERS {
            let values: Vec<_> = headers.get_all(name).iter().collect();
            assert_eq!(values.len(), 1, "expected exactly one {name}");
            assert_eq!(values[0], *value);
        }
    }

    #[tokio::test]
    async fn test_decorates_success_and_error_responses() {
        let inner = service_fn(|req: Request<Empty<Bytes>>| async move {
            let status = if req.uri().path() == "/ok" {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            Ok::<_, Infallible>(resp)
        });
        let service = CorsService::new(inner);

        for (path, status) in [("/ok", StatusCode::OK), ("/missing", StatusCode::NOT_FOUND)] {
            let req = Request::builder()
                .uri(path)
                .body(Empty::<Bytes>::new())
                .unwrap();
            let resp = service.call(req).await.unwrap();
            assert_eq!(resp.status(), status);
            assert_cors_headers(resp.headers());
        }
    }

    #[test]
    fn test_replaces_existing_cache_control() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        headers.append(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://a.test"));
        apply_cors_headers(&mut headers);
        assert_cors_headers(&headers);
    }
}
