//! Path-to-URL redirect dispatch.
//!
//! A [`MapHandler`] owns a frozen path→URL table and a fallback service.
//! Requests whose path is a key with a non-empty URL get a `302 Found`;
//! everything else goes to the fallback untouched.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Method, Request, StatusCode};
use tower::{Service, ServiceExt};

/// Redirects mapped paths and delegates the rest to `fallback`.
///
/// The table is shared behind an `Arc` and never mutated, so clones are
/// cheap and concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct MapHandler<S> {
    paths: Arc<HashMap<String, String>>,
    fallback: S,
}

/// Build a handler that redirects each key of `paths_to_urls` to its value.
///
/// Paths match exactly: case-sensitive, no trailing-slash normalization and
/// no percent-decoding. The query string is never part of the path.
pub fn map_handler<S>(paths_to_urls: HashMap<String, String>, fallback: S) -> MapHandler<S> {
    MapHandler {
        paths: Arc::new(paths_to_urls),
        fallback,
    }
}

impl<S> MapHandler<S> {
    /// The redirect target for `path`, if there is one.
    ///
    /// Empty targets count as unmapped.
    pub fn target(&self, path: &str) -> Option<&str> {
        self.paths
            .get(path)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

impl<S, B> Service<Request<B>> for MapHandler<S>
where
    S: Service<Request<B>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Fallback readiness is awaited per call via `oneshot`.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let path = req.uri().path();

        if let Some(url) = self.target(path) {
            tracing::debug!(path, location = url, "Redirecting");
            let response = redirect(req.method(), url);
            return Box::pin(futures_util::future::ready(Ok(response)));
        }

        tracing::debug!(path, "No redirect, delegating to fallback");
        let fallback = self.fallback.clone();
        Box::pin(async move {
            let response = fallback.oneshot(req).await?;
            Ok(response.into_response())
        })
    }
}

/// `302 Found` to `url`, with the short HTML hint body browsers show while
/// following a GET redirect.
fn redirect(method: &Method, url: &str) -> Response {
    let location = match HeaderValue::from_str(url) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(
                target_url = url,
                error = %e,
                "Redirect target is not a valid Location header"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response = (StatusCode::FOUND, [(LOCATION, location)]).into_response();

    if *method == Method::GET || *method == Method::HEAD {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
    if *method == Method::GET {
        *response.body_mut() = Body::from(format!("<a href=\"{}\">Found</a>.\n", html_escape(url)));
    }

    response
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
