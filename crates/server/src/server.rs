use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, header::ACCEPT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::trace::TraceLayer;

use std::{future::Future, sync::Arc};

use crate::{ServerError, transactions};
use engine::Store;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
}

/// Reject requests that cannot take a JSON response.
///
/// A missing `Accept` header counts as `*/*`.
async fn require_json(request: Request, next: Next) -> Result<Response, ServerError> {
    if !accepts_json(request.headers()) {
        return Err(ServerError::NotAcceptable);
    }

    Ok(next.run(request).await)
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let values: Vec<&str> = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if values.is_empty() {
        return true;
    }

    values
        .iter()
        .flat_map(|value| value.split(','))
        .any(media_range_accepts_json)
}

fn media_range_accepts_json(range: &str) -> bool {
    let mut parts = range.split(';');
    let media = parts
        .next()
        .map(|media| media.trim().to_ascii_lowercase())
        .unwrap_or_default();
    let refused = parts.any(|param| {
        param
            .trim()
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            == Some(0.0)
    });

    !refused
        && (media == "*/*"
            || media == "application/*"
            || media == "application/json"
            || media.ends_with("+json"))
}

pub fn router(store: Store) -> Router {
    let state = ServerState {
        store: Arc::new(store),
    };

    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .route_layer(middleware::from_fn(require_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run_with_listener<F>(
    store: Store,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(accept: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in accept {
            headers.append(ACCEPT, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn missing_accept_is_json() {
        assert!(accepts_json(&headers(&[])));
    }

    #[test]
    fn json_ranges_are_accepted() {
        for accept in [
            "application/json",
            "*/*",
            "application/*",
            "text/html, application/json;q=0.9",
            "application/vnd.api+json",
            "Application/JSON",
        ] {
            assert!(accepts_json(&headers(&[accept])), "{accept}");
        }
        assert!(accepts_json(&headers(&["text/html", "application/json"])));
    }

    #[test]
    fn other_ranges_are_refused() {
        for accept in ["text/html", "text/plain, image/png", "application/json;q=0"] {
            assert!(!accepts_json(&headers(&[accept])), "{accept}");
        }
    }
}
