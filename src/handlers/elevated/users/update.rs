// handlers/elevated/users/update.rs - PUT /update handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::{parse_envelope, read_body};
use crate::auth::{authorize, Predicate};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{request_host, AppState};

/// PUT /update - Overwrite a user's password and admin flag
///
/// Body is `[actor, target]`. The existing record is located by
/// `target.username`, so a rename cannot be expressed: the new name has to
/// exist already. Username, password and admin are copied from the target
/// onto the stored record, which keeps its id.
pub async fn user_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<StatusCode> {
    tracing::info!("update: serving /update from {}", request_host(&headers));

    let body = read_body(body)?;
    let envelope = parse_envelope(&body)?;
    authorize(state.store.as_ref(), &envelope.actor, Predicate::IsAdmin).await?;

    let target = envelope.target;
    let mut record = state
        .store
        .find_by_username(&target.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("update: no user named '{}'", target.username);
            ApiError::store_failed(format!("User '{}' not found", target.username))
        })?;

    record.username = target.username;
    record.password = target.password;
    record.admin = target.admin;

    state.store.update(&record).await?;
    tracing::info!("update: updated user {} ('{}')", record.id, record.username);

    Ok(StatusCode::OK)
}
