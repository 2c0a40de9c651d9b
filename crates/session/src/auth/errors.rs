use thiserror::Error;

/// Failures surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("response missing user or token")]
    InvalidResponseShape,
    #[error("rejected by identity service: {0}")]
    RemoteRejected(String),
    #[error("transport failure: {message}")]
    Transport {
        message: String,
        /// Structured message extracted from the remote error body, if any.
        detail: Option<String>,
    },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Unknown(String),
}

impl SessionError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SessionError::InvalidResponseShape => 2001,
            SessionError::RemoteRejected(_) => 2002,
            SessionError::Transport { .. } => 2101,
            SessionError::Storage(_) => 2102,
            SessionError::Unknown(_) => 2200,
        }
    }

    /// Best human-readable message for presentation: the structured
    /// remote detail wins, then the error's own message, then `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            SessionError::Transport { detail: Some(detail), .. } => detail.clone(),
            SessionError::Transport { message, .. } => message.clone(),
            SessionError::RemoteRejected(message) => message.clone(),
            SessionError::InvalidResponseShape => self.to_string(),
            SessionError::Storage(message) => message.clone(),
            SessionError::Unknown(_) => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_detail_wins_over_message() {
        let err = SessionError::Transport {
            message: "identity service returned 401".into(),
            detail: Some("Invalid phone or password".into()),
        };
        assert_eq!(err.display_message("Authentication failed"), "Invalid phone or password");

        let bare = SessionError::Transport { message: "connection refused".into(), detail: None };
        assert_eq!(bare.display_message("Authentication failed"), "connection refused");
    }

    #[test]
    fn unknown_uses_the_fallback() {
        let err = SessionError::Unknown("panic in caller".into());
        assert_eq!(err.display_message("Registration failed"), "Registration failed");
    }

    #[test]
    fn codes_are_distinct() {
        let errs = [
            SessionError::InvalidResponseShape,
            SessionError::RemoteRejected("x".into()),
            SessionError::Transport { message: "x".into(), detail: None },
            SessionError::Storage("x".into()),
            SessionError::Unknown("x".into()),
        ];
        let mut codes: Vec<u16> = errs.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }
}
