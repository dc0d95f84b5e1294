// handlers/elevated/users/add.rs - POST /add handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::{parse_envelope, read_body};
use crate::auth::{authorize, Predicate};
use crate::error::ApiResult;
use crate::handlers::{request_host, AppState};

/// POST /add - Create a user
///
/// Body is `[actor, target]`. The actor must be an admin; the target is
/// inserted as a new account and its `id` is ignored.
///
/// ```json
/// [
///   {"username": "admin", "password": "admin", "admin": true},
///   {"username": "alice", "password": "pw", "admin": false}
/// ]
/// ```
///
/// Answers 200 with no body on success, 400 otherwise.
pub async fn user_add(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<StatusCode> {
    tracing::info!("add: serving /add from {}", request_host(&headers));

    let body = read_body(body)?;
    let envelope = parse_envelope(&body)?;
    authorize(state.store.as_ref(), &envelope.actor, Predicate::IsAdmin).await?;

    let created = state.store.insert(&envelope.target).await?;
    tracing::info!("add: created user '{}' with id {}", created.username, created.id);

    Ok(StatusCode::OK)
}
