//! Unwrapping of the identity service's inconsistently nested envelopes.
//!
//! Depending on deployment, a login response carries `{user, token}` at
//! the top level or one level deeper under a `data` key. Exactly one
//! level of nesting is tolerated; deeper shapes are rejected.

use serde_json::Value;

use super::domain::UserRecord;
use super::errors::SessionError;

/// Credentials extracted from a login envelope.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: UserRecord,
    pub token: String,
}

/// Locate and decode `{user, token}` in a login envelope.
pub fn unwrap_credentials(envelope: &Value) -> Result<Credentials, SessionError> {
    let node = if has_credentials(envelope) {
        envelope
    } else {
        match envelope.get("data") {
            Some(inner) if inner.is_object() && has_credentials(inner) => inner,
            _ => return Err(SessionError::InvalidResponseShape),
        }
    };

    let user: UserRecord = serde_json::from_value(node["user"].clone())
        .map_err(|_| SessionError::InvalidResponseShape)?;
    let token = node["token"]
        .as_str()
        .ok_or(SessionError::InvalidResponseShape)?
        .to_string();

    Ok(Credentials { user, token })
}

fn has_credentials(node: &Value) -> bool {
    node.get("user").is_some_and(|u| !u.is_null())
        && node.get("token").is_some_and(|t| !t.is_null())
}

/// Extract the remote failure message from an error body: a top-level
/// `message` or the legacy `details.message`.
pub fn remote_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("details").and_then(|d| d.get("message")))
        .and_then(Value::as_str)
        .map(str::to_string)
}
