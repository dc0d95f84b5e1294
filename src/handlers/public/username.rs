use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri},
    Json,
};

use crate::error::{ApiError, ApiResult};
use crate::handlers::{request_host, AppState};
use crate::store::User;

/// The id segment only matches when it is all ASCII digits.
pub(crate) fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// GET /username/:id - Show one user by numeric id
///
/// Only all-digit ids are routed here; anything else is treated as an
/// unknown path. An id that overflows or names no user answers 400, not
/// 404, which is what existing clients expect from this endpoint.
pub async fn user_get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    if !is_numeric_id(&id) {
        return Err(ApiError::RouteUnmatched(uri.path().to_string()));
    }

    tracing::info!("username: serving /username/{} from {}", id, request_host(&headers));

    let id: i64 = id
        .parse()
        .map_err(|e| ApiError::invalid_id(format!("Invalid id '{}': {}", id, e)))?;

    match state.store.find_by_id(id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            tracing::info!("username: no user with id {}", id);
            Err(ApiError::invalid_id(format!("User {} not found", id)))
        }
    }
}
