//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, dispatching and access logging.

use crate::config::AppState;
use crate::handler::{docs, schedule};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
///
/// Generic over the request body: no route reads it.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();

    let mut response = if let Some(resp) = check_http_method(method, state.config.http.enable_cors)
    {
        resp
    } else if let Some(resp) = check_body_size(req.headers(), state.config.http.max_body_size) {
        resp
    } else {
        let ctx = RequestContext {
            path,
            is_head: *method == Method::HEAD,
        };
        route_request(&ctx, &state).await
    };

    http::apply_common_headers(&mut response, &state.config.http);

    if state.access_log_enabled() {
        log_access(&req, &response, &state, peer_addr, started);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get(CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let routes = &state.config.routes;

    // Health checks first, they must stay cheap
    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return http::build_health_response(ctx.is_head);
    }

    if ctx.path == routes.groups_path {
        return schedule::serve_groups(ctx, state).await;
    }

    if let Some(parity) = ctx.path.strip_prefix(routes.schedule_prefix.as_str()) {
        return schedule::serve_schedule(ctx, state, parity).await;
    }

    if routes.docs_paths.iter().any(|p| p == ctx.path) {
        return http::build_html_response(docs::render_docs_page(routes), ctx.is_head);
    }

    schedule::error_response(
        ctx,
        StatusCode::NOT_FOUND,
        &format!("No route for {}", ctx.path),
    )
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    state: &AppState,
    peer_addr: SocketAddr,
    started: Instant,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_string(req.headers(), REFERER.as_str());
    entry.user_agent = header_string(req.headers(), USER_AGENT.as_str());
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::schedule::WeekParity;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    const PEER: ([u8; 4], u16) = ([127, 0, 0, 1], 40000);

    fn test_state(dir: &TempDir, envelope: bool) -> Arc<AppState> {
        let mut cfg = Config::load_from("/nonexistent/schedule-server-config").unwrap();
        cfg.schedule.data_dir = dir.path().to_string_lossy().into_owned();
        cfg.http.envelope = envelope;
        cfg.logging.access_log = false;
        Arc::new(AppState::new(cfg))
    }

    fn seed(dir: &TempDir) {
        std::fs::write(
            dir.path().join(WeekParity::Numerator.file_name()),
            r#"{"G1-1":[{"day":"Mon"}],"G2-2":[]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(WeekParity::Denominator.file_name()),
            r#"{"G3-3":[],"G2-2":[{"day":"Tue"}]}"#,
        )
        .unwrap();
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        let response = handle_request(req, Arc::clone(state), PEER.into())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn get_json(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(state, Method::GET, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_schedule_in_envelope() {
        let dir = TempDir::new().unwrap();
        seed(&dir);
        let state = test_state(&dir, true);

        let (status, body) = get_json(&state, "/api/schedule/numerator").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!({"G1-1":[{"day":"Mon"}],"G2-2":[]}));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_schedule_raw() {
        let dir = TempDir::new().unwrap();
        seed(&dir);
        let state = test_state(&dir, false);

        let (status, body) = get_json(&state, "/api/schedule/denominator").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"G3-3":[],"G2-2":[{"day":"Tue"}]}));
    }

    #[tokio::test]
    async fn test_raw_schedule_keeps_file_key_order() {
        let dir = TempDir::new().unwrap();
        let content = r#"{"G2-2":[{"time":"08:30","day":"Mon","room":"214"}],"G1-1":[]}"#;
        std::fs::write(dir.path().join(WeekParity::Numerator.file_name()), content).unwrap();
        let state = test_state(&dir, false);

        let (status, _, body) = send(&state, Method::GET, "/api/schedule/numerator").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8_lossy(&body), content);
    }

    #[tokio::test]
    async fn test_invalid_parity_is_logged() {
        let log_dir = TempDir::new().unwrap();
        let error_log = log_dir.path().join("error.log");
        logger::writer::init(logger::Level::Warn, None, error_log.to_str()).unwrap();

        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);
        let (status, _) = get_json(&state, "/api/schedule/autumn-term").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let logged = std::fs::read_to_string(&error_log).unwrap();
        assert!(
            logged.contains("[WARN] Invalid week parity 'autumn-term'"),
            "error log was: {logged}"
        );
    }

    #[tokio::test]
    async fn test_invalid_parity_is_bad_request() {
        let dir = TempDir::new().unwrap();
        seed(&dir);
        let state = test_state(&dir, true);

        let (status, body) = get_json(&state, "/api/schedule/spring").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("spring"));
    }

    #[tokio::test]
    async fn test_missing_schedule_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);

        let (status, body) = get_json(&state, "/api/schedule/numerator").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_groups() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        let (status, body) = get_json(&test_state(&dir, true), "/api/groups").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["G1-1", "G2-2", "G3-3"]));

        let (_, body) = get_json(&test_state(&dir, false), "/api/groups").await;
        assert_eq!(body, json!(["G1-1", "G2-2", "G3-3"]));
    }

    #[tokio::test]
    async fn test_groups_without_data_is_empty_list() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_json(&test_state(&dir, false), "/api/groups").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);
        for path in ["/healthz", "/readyz"] {
            let (status, body) = get_json(&state, path).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
        }
    }

    #[tokio::test]
    async fn test_docs_page() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);
        let (status, headers, body) = send(&state, Method::GET, "/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["Content-Type"], "text/html; charset=utf-8");
        assert!(String::from_utf8_lossy(&body).contains("/api/groups"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_json(&test_state(&dir, true), "/api/rooms").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let dir = TempDir::new().unwrap();
        seed(&dir);
        let state = test_state(&dir, true);
        let (status, headers, body) = send(&state, Method::HEAD, "/api/groups").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_ne!(headers["Content-Length"], "0");
    }

    #[tokio::test]
    async fn test_method_checks() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);

        let (status, headers, _) = send(&state, Method::POST, "/api/groups").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers["Allow"], "GET, HEAD, OPTIONS");

        let (status, headers, _) = send(&state, Method::OPTIONS, "/api/groups").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);
        let req = Request::builder()
            .uri("/api/groups")
            .header("Content-Length", "99999999")
            .body(())
            .unwrap();
        let response = handle_request(req, state, PEER.into()).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_server_header() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, true);
        let (_, headers, _) = send(&state, Method::GET, "/healthz").await;
        assert!(headers["Server"]
            .to_str()
            .unwrap()
            .starts_with("schedule-server/"));
    }
}
