use thiserror::Error;

/// Failure taxonomy for the session slice.
///
/// Bootstrap converts every one of these into the logged-out outcome instead
/// of propagating; they surface in logs, never to the host UI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed token")]
    MalformedToken,
    #[error("Token expired")]
    ExpiredToken,
    #[error("Incomplete session")]
    IncompleteSession,
    #[error("Internal error")]
    ClaimsDecode { message: String },
    #[error("Profile hydration failed: {0}")]
    HydrationFailure(String),
    #[error("Internal error")]
    SessionParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Internal error")]
    ConfigurationError {
        message: String,
        #[source]
        source: figment::Error,
    },
}

impl AppError {
    pub fn claims_decode(message: impl Into<String>) -> Self {
        Self::ClaimsDecode {
            message: message.into(),
        }
    }

    pub fn session_parse(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::SessionParse {
            message: message.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::session_parse("Failed to serialize session record", e)
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::ConfigurationError {
            message: "Failed to read configuration".to_string(),
            source: e,
        }
    }
}
