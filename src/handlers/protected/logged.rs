use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    Json,
};

use crate::api::{parse_user, read_body};
use crate::auth::{authorize, Predicate};
use crate::error::ApiResult;
use crate::handlers::{request_host, AppState};
use crate::store::User;

/// GET /logged - List users currently marked as logged in
///
/// Any existing user may ask, admin or not.
pub async fn user_list_logged(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Vec<User>>> {
    tracing::info!("logged: serving /logged from {}", request_host(&headers));

    let body = read_body(body)?;
    let actor = parse_user(&body)?;
    authorize(state.store.as_ref(), &actor, Predicate::IsValid).await?;

    Ok(Json(state.store.list_logged_in().await?))
}
