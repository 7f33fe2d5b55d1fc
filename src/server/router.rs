use crate::db::DbActorHandle;
use crate::pages::ErrorPage;
use crate::server::routes::{category_router, pages, pages_router};

use axum::{
    Router,
    extract::Request,
    http::{
        HeaderName, HeaderValue, Version,
        header::{CONTENT_TYPE, USER_AGENT},
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use futures::FutureExt;
use rand::RngCore;
use std::{any::Any, panic::AssertUnwindSafe, time::Instant};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct WikiState {
    pub db: DbActorHandle,
}

impl WikiState {
    pub fn new(db: DbActorHandle) -> Self {
        Self { db }
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis();
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Renders the HTML error page for error responses that carry neither JSON
/// nor HTML, and turns a panicking handler into the 500 page.
pub async fn error_pages(req: Request, next: Next) -> Response {
    let resp = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(resp) => resp,
        Err(payload) => {
            error!(panic = panic_message(payload.as_ref()), "Handler panicked");
            return ErrorPage::InternalServerError.into_response();
        }
    };

    let has_body_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json") || ct.starts_with("text/html"));
    if has_body_type {
        return resp;
    }

    match ErrorPage::from_status(resp.status()) {
        Some(page) => page.into_response(),
        None => resp,
    }
}

pub fn wiki_router(state: WikiState) -> Router {
    Router::new()
        .merge(pages_router())
        .merge(category_router())
        .fallback(pages::not_found)
        .with_state(state)
        .layer(middleware::from_fn(error_pages))
        .layer(middleware::from_fn(access_log))
}
