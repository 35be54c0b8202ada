//! Request logging and CORS middleware.
//!
//! `request_log_layer` assigns every request a UUID, wraps its processing in a
//! `request` span and logs one line when the request arrives and one when the
//! response leaves. Payloads pass through untouched.
//!
//! `panic_response` turns a handler panic caught by tower-http's
//! `CatchPanicLayer` into the usual 500 error body.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ApiError;

pub async fn request_log_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("No Origin")
        .to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        duration_ms = tracing::field::Empty,
    );

    async move {
        tracing::info!("Request: {method} {uri} - Origin: {origin}");
        let start = Instant::now();

        let response = next.run(request).await;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Response: {method} {uri} - Status: {}",
            response.status().as_u16()
        );
        response
    }
    .instrument(span)
    .await
}

/// Response for a panicking handler, for use with `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(message).into_response()
}

/// CORS policy from configuration. `*` allows any origin; otherwise only the
/// listed origins are allowed. Unparseable origins are skipped with a warning.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = if config.cors_allows_any() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.cors_allow_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(%origin, "ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use tower_http::catch_panic::CatchPanicLayer;
    use tracing_subscriber::{fmt, layer::SubscriberExt};

    use super::*;

    /// In-memory log sink shared with the fmt layer.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    async fn pong() -> &'static str {
        "pong"
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    fn test_server() -> TestServer {
        let router = Router::new()
            .route("/ping", get(pong))
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(axum::middleware::from_fn(request_log_layer));
        TestServer::new(router).expect("create test server")
    }

    #[tokio::test]
    async fn logs_request_and_response_lines() {
        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(move || sink.clone())),
        );
        let server = test_server();

        server
            .get("/ping")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
            .await
            .assert_status_ok();
        server.get("/ping").await.assert_status_ok();

        let output = logs.contents();
        let requests: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("Request: GET "))
            .collect();
        assert_eq!(requests.len(), 2, "{output}");
        assert!(requests[0].ends_with("/ping - Origin: https://example.com"));
        assert!(requests[1].ends_with("/ping - Origin: No Origin"));

        let responses: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("Response: GET "))
            .collect();
        assert_eq!(responses.len(), 2, "{output}");
        assert!(responses.iter().all(|line| line.contains("/ping - Status: 200")));
        assert!(responses.iter().all(|line| line.contains("request_id=")));
    }

    #[tokio::test]
    async fn handler_panic_becomes_server_error() {
        let server = test_server();

        let response = server.get("/boom").await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "server_error");
        assert!(body.get("error_description").is_none());
    }

    #[test]
    fn panic_payloads_are_reported_as_internal_errors() {
        let response = panic_response(Box::new(String::from("owned message")));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(42_u8));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
