//! Axum HTTP server: redirect layering, listener, graceful shutdown.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use axum::extract::Request;
use axum::response::Response;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::UrlshortConfig;

/// Build and run the HTTP server.
pub async fn run(config: UrlshortConfig) -> anyhow::Result<()> {
    let app = build_app(&config).await?;

    let listen_addr = config.server.listen_address.clone();
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(address = %listen_addr, "urlshort listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("urlshort shut down gracefully");
    Ok(())
}

/// Assemble the redirect stack.
///
/// ```text
/// json_file layer → yaml_file layer → inline paths → hello fallback
/// ```
///
/// Each layer only sees requests the layers above it did not redirect.
/// Unreadable or malformed record files abort startup.
pub async fn build_app(config: &UrlshortConfig) -> anyhow::Result<Router> {
    let redirects = &config.redirects;

    let fallback: Router = Router::new().fallback(handle_hello);
    let mut app = Router::new().fallback_service(urlshort::map_handler(
        redirects.paths.clone(),
        fallback,
    ));
    tracing::info!(count = redirects.paths.len(), "Inline redirects loaded");

    if let Some(path) = &redirects.yaml_file {
        let yml = read_records(path).await?;
        let handler = urlshort::yaml_handler(&yml, app)
            .with_context(|| format!("invalid YAML redirects in {}", path.display()))?;
        app = Router::new().fallback_service(handler);
        tracing::info!(file = %path.display(), "YAML redirects loaded");
    }

    if let Some(path) = &redirects.json_file {
        let json = read_records(path).await?;
        let handler = urlshort::json_handler(&json, app)
            .with_context(|| format!("invalid JSON redirects in {}", path.display()))?;
        app = Router::new().fallback_service(handler);
        tracing::info!(file = %path.display(), "JSON redirects loaded");
    }

    Ok(app.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                urlshort_tracing::request_span!(req.method(), req.uri().path())
            })
            .on_response(|response: &Response, latency: Duration, span: &Span| {
                span.record("status", response.status().as_u16());
                span.record("latency_ms", latency.as_millis() as u64);
                tracing::debug!("Response sent");
            }),
    ))
}

async fn read_records(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read redirects file {}", path.display()))
}

/// Default handler for every path no layer redirected.
async fn handle_hello() -> &'static str {
    "Hello, world!"
}

/// Wait for SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use axum::body::Body;
    use http::header::LOCATION;
    use http::StatusCode;
    use tower::ServiceExt;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("urlshort-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn config_with_paths() -> UrlshortConfig {
        let mut config = UrlshortConfig::default();
        config.redirects.paths.insert(
            "/urlshort-godoc".into(),
            "https://godoc.org/github.com/gophercises/urlshort".into(),
        );
        config
            .redirects
            .paths
            .insert("/shared".into(), "https://inline".into());
        config
    }

    async fn get(app: Router, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    fn location(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_unmapped_path_says_hello() {
        let app = build_app(&UrlshortConfig::default()).await.unwrap();

        let response = get(app, "/anything").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Hello, world!");
    }

    #[tokio::test]
    async fn test_inline_paths_redirect() {
        let app = build_app(&config_with_paths()).await.unwrap();

        let response = get(app, "/urlshort-godoc").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            location(&response),
            Some("https://godoc.org/github.com/gophercises/urlshort")
        );
    }

    #[tokio::test]
    async fn test_file_layers_stack_over_inline() {
        let yaml = temp_file(
            "layers.yaml",
            "- path: /shared\n  url: https://yaml\n- path: /yaml-only\n  url: https://yaml-only\n",
        );
        let json = temp_file(
            "layers.json",
            r#"[{"path": "/yaml-only", "url": "https://json"}]"#,
        );

        let mut config = config_with_paths();
        config.redirects.yaml_file = Some(yaml.clone());
        config.redirects.json_file = Some(json.clone());
        let app = build_app(&config).await.unwrap();

        let response = get(app.clone(), "/shared").await;
        assert_eq!(location(&response), Some("https://yaml"));

        let response = get(app.clone(), "/yaml-only").await;
        assert_eq!(location(&response), Some("https://json"));

        let response = get(app.clone(), "/urlshort-godoc").await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let response = get(app, "/nope").await;
        assert_eq!(response.status(), StatusCode::OK);

        std::fs::remove_file(yaml).unwrap();
        std::fs::remove_file(json).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails_startup() {
        let mut config = UrlshortConfig::default();
        config.redirects.yaml_file = Some(PathBuf::from("/nonexistent/urlshort/redirects.yaml"));

        let err = build_app(&config).await.unwrap_err();
        assert!(err.to_string().contains("failed to read redirects file"));
    }

    #[tokio::test]
    async fn test_malformed_file_fails_startup() {
        let yaml = temp_file("malformed.yaml", "- path: /a\n  url: [oops\n");
        let mut config = UrlshortConfig::default();
        config.redirects.yaml_file = Some(yaml.clone());

        let err = build_app(&config).await.unwrap_err();
        assert!(err.to_string().contains("invalid YAML redirects"));
        assert!(err.downcast_ref::<urlshort::DecodeError>().is_some());

        std::fs::remove_file(yaml).unwrap();
    }
}
