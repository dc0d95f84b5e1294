use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::{parse_user, read_body};
use crate::auth::{authorize, Predicate};
use crate::error::ApiResult;
use crate::handlers::{request_host, AppState};

/// POST /login - Mark the user in the body as logged in
///
/// No token is issued; this only changes what GET /logged reports.
pub async fn session_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<StatusCode> {
    set_logged_in(state, &headers, body, true).await
}

/// POST /logout - Clear the logged-in mark for the user in the body
pub async fn session_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<StatusCode> {
    set_logged_in(state, &headers, body, false).await
}

async fn set_logged_in(
    state: AppState,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
    logged_in: bool,
) -> ApiResult<StatusCode> {
    let action = if logged_in { "login" } else { "logout" };
    tracing::info!("{}: serving /{} from {}", action, action, request_host(headers));

    let body = read_body(body)?;
    let user = parse_user(&body)?;
    authorize(state.store.as_ref(), &user, Predicate::IsValid).await?;

    let previous = state.store.last_login(&user.username).await?;
    state.store.set_logged_in(&user.username, logged_in).await?;
    match previous {
        Some(at) => tracing::info!("{}: '{}' done, last login {}", action, user.username, at),
        None => tracing::info!("{}: '{}' done, no previous login", action, user.username),
    }

    Ok(StatusCode::OK)
}
