use axum::{body::Bytes, extract::rejection::BytesRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::store::User;

/// Number of users a command envelope must carry: actor then target.
pub const ENVELOPE_LEN: usize = 2;

/// A two-role request: `actor` is authorized first, `target` is what the
/// operation creates or applies.
///
/// On the wire this is a JSON array `[actor, target]`; anything past the
/// second element is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEnvelope {
    pub actor: User,
    pub target: User,
}

impl TryFrom<Vec<User>> for CommandEnvelope {
    type Error = ApiError;

    fn try_from(users: Vec<User>) -> Result<Self, Self::Error> {
        let actual = users.len();
        let mut users = users.into_iter();
        match (users.next(), users.next()) {
            (Some(actor), Some(target)) => Ok(Self { actor, target }),
            _ => Err(ApiError::EnvelopeTooShort {
                required: ENVELOPE_LEN,
                actual,
            }),
        }
    }
}

/// Unwrap the raw body extractor, turning a failed read into a 400.
pub fn read_body(body: Result<Bytes, BytesRejection>) -> ApiResult<Bytes> {
    body.map_err(|rejection| ApiError::body_read(rejection.body_text()))
}

fn decode<T: DeserializeOwned + std::fmt::Debug>(bytes: &[u8]) -> ApiResult<T> {
    if bytes.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    let value: T =
        serde_json::from_slice(bytes).map_err(|e| ApiError::malformed_json(e.to_string()))?;
    tracing::debug!("Parsed request body: {:?}", value);
    Ok(value)
}

/// Only a JSON object is a user. Without this check serde would also
/// accept a positional array such as `[0, "root", "x", true]`.
fn user_from_value(value: Value) -> ApiResult<User> {
    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::malformed_json(e.to_string()))
        }
        other => Err(ApiError::malformed_json(format!(
            "expected a user object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a body holding a single user, typically the actor of a query.
pub fn parse_user(bytes: &[u8]) -> ApiResult<User> {
    user_from_value(decode(bytes)?)
}

/// Decode a body holding `[actor, target]`.
pub fn parse_envelope(bytes: &[u8]) -> ApiResult<CommandEnvelope> {
    let users = decode::<Vec<Value>>(bytes)?
        .into_iter()
        .take(ENVELOPE_LEN)
        .map(user_from_value)
        .collect::<ApiResult<Vec<User>>>()?;
    users.try_into()
}
