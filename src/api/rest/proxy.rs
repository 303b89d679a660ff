//! Remote passthrough
//!
//! When the remote target is selected, the mock routers are not mounted and
//! every `/api` request lands here. The request is forwarded almost verbatim:
//! method, path, query, body, and headers minus the hop-by-hop set.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap};
use axum::http::Method;
use axum::response::Response;

use crate::api::AppState;

use super::error::ApiError;

const HOP_BY_HOP_REQUEST_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
    "host",
];

const HOP_BY_HOP_RESPONSE_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

pub async fn forward(State(state): State<AppState>, req: Request) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();

    let path = parts.uri.path();
    let path = path.strip_prefix("/api").unwrap_or(path);
    let mut url = state.config.remote_url(path);
    if let Some(query) = parts.uri.query() {
        url.push('?');
        url.push_str(query);
    }

    tracing::debug!(method = %parts.method, %url, "forwarding to remote api");

    let mut outbound = state
        .http
        .request(parts.method.clone(), &url)
        .headers(forward_headers(&parts.headers));

    if parts.method != Method::GET && parts.method != Method::HEAD {
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|err| ApiError::Internal(format!("failed to read request body: {err}")))?;
        outbound = outbound.body(bytes);
    }

    let remote = outbound
        .send()
        .await
        .map_err(|err| ApiError::Internal(format!("remote api request failed: {err}")))?;

    let status = remote.status();
    let headers = remote.headers().clone();
    let bytes = remote
        .bytes()
        .await
        .map_err(|err| ApiError::Internal(format!("failed to read remote response: {err}")))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    apply_response_headers(&headers, response.headers_mut());

    Ok(response)
}

fn forward_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in incoming {
        if HOP_BY_HOP_REQUEST_HEADERS.contains(&name.as_str()) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn apply_response_headers(source: &HeaderMap, target: &mut HeaderMap) {
    for (name, value) in source {
        if HOP_BY_HOP_RESPONSE_HEADERS.contains(&name.as_str()) {
            continue;
        }
        if name == header::SET_COOKIE {
            target.append(name.clone(), value.clone());
        } else {
            target.insert(name.clone(), value.clone());
        }
    }
}
