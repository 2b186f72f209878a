//! Response cache middleware.
//!
//! Serves GET requests from the [`ResponseCache`] and stores fresh 200
//! responses for the cache's TTL. Bodies over [`MAX_CACHED_BODY_SIZE`] and
//! responses rendered across a purge are served without being stored.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::cache::{CachedResponse, ResponseCache, MAX_CACHED_BODY_SIZE};

/// Header reporting whether the response was replayed.
pub const X_CACHE: &str = "x-cache";

pub async fn response_cache_layer(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request_key(&request);

    if let Some((cached, remaining)) = cache.get(&key).await {
        debug!(cache = "response", outcome = "hit", %key, "serving cached response");
        return build_response(cached, "HIT", remaining);
    }

    debug!(cache = "response", outcome = "miss", %key, "executing handler");
    let generation = cache.generation().await;
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, %key, "failed to read response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if bytes.len() > MAX_CACHED_BODY_SIZE {
        debug!(cache = "response", %key, size = bytes.len(), "body too large to cache");
        return Response::from_parts(parts, Body::from(bytes));
    }

    let cached = CachedResponse {
        status: parts.status.as_u16(),
        headers: parts
            .headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect(),
        body: bytes,
    };
    if !cache.insert(key.clone(), cached.clone(), generation).await {
        debug!(cache = "response", %key, "purged while rendering, not stored");
    }

    build_response(cached, "MISS", cache.ttl())
}

/// Request identity: method, path and query string.
fn request_key(request: &Request) -> String {
    let uri = request.uri();
    match uri.query() {
        Some(query) => format!("{} {}?{}", request.method(), uri.path(), query),
        None => format!("{} {}", request.method(), uri.path()),
    }
}

fn build_response(cached: CachedResponse, outcome: &'static str, max_age: u64) -> Response {
    let mut builder = Response::builder().status(cached.status);

    for (name, value) in cached.headers {
        if let Ok(header_value) = HeaderValue::from_str(&value) {
            builder = builder.header(name, header_value);
        }
    }

    builder
        .header(X_CACHE, outcome)
        .header(header::CACHE_CONTROL, format!("max-age={}", max_age))
        .body(Body::from(cached.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
