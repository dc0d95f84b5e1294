// handlers/elevated/users/getid.rs - GET /getid/:username handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::HeaderMap,
    Json,
};

use crate::api::{parse_user, read_body};
use crate::auth::{authorize, Predicate};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{request_host, AppState};
use crate::store::User;

/// GET /getid/:username - Show one user by username
///
/// Body is the admin actor. Unknown usernames answer 404.
pub async fn user_get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<User>> {
    tracing::info!("getid: serving /getid/{} from {}", username, request_host(&headers));

    let body = read_body(body)?;
    let actor = parse_user(&body)?;
    authorize(state.store.as_ref(), &actor, Predicate::IsAdmin).await?;

    match state.store.find_by_username(&username).await? {
        Some(user) => Ok(Json(user)),
        None => {
            tracing::info!("getid: user '{}' not found", username);
            Err(ApiError::not_found(format!("User '{}' not found", username)))
        }
    }
}
