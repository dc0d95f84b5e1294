// handlers/elevated/users/getall.rs - GET /getall handler

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

/// GET /getall - List every user
///
/// Body is the admin actor as a single user object. The listing is only
/// requested from the store after the actor passes the gate.
pub async fn user_list_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Vec<User>>> {
    tracing::info!("getall: serving /getall from {}", request_host(&headers));

    let body = read_body(body)?;
    let actor = parse_user(&body)?;
    authorize(state.store.as_ref(), &actor, Predicate::IsAdmin).await?;

    let users = state.store.list_all().await?;
    Ok(Json(users))
}
