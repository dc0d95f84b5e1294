use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
};

use crate::error::ApiError;
use crate::handlers::public::username::is_numeric_id;
use crate::handlers::{request_host, AppState};

/// Any request whose path matches no route
pub async fn not_found(method: Method, uri: Uri, headers: HeaderMap) -> ApiError {
    tracing::info!(
        "default: {} is not supported ({} from {})",
        uri.path(),
        method,
        request_host(&headers)
    );
    ApiError::RouteUnmatched(uri.path().to_string())
}

/// A known path requested with a method it does not serve
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> ApiError {
    tracing::info!(
        "method not allowed: {} {} from {}",
        method,
        uri.path(),
        request_host(&headers)
    );
    ApiError::MethodMismatch {
        strict: state.strict_method_status,
    }
}

/// Wrong method on `/username/:id`. A non-digit id never matched the route
/// in the first place, so it gets the default fallback instead.
pub async fn id_method_not_allowed(
    state: State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> ApiError {
    let id = uri.path().strip_prefix("/username/").unwrap_or_default();
    if !is_numeric_id(id) {
        return not_found(method, uri, headers).await;
    }
    method_not_allowed(state, method, uri, headers).await
}
