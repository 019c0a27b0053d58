#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API key is not set")]
    MissingApiKey,

    #[error("API key cannot be used as an HTTP header value")]
    InvalidApiKey,

    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("conversation must contain at least one message")]
    EmptyConversation,

    #[error("API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Whether the failure happened while talking to the endpoint, as opposed
    /// to before a request was sent or after a body was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Http(_))
    }

    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code_and_body() {
        let err = Error::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".into(),
        };
        assert_eq!(err.to_string(), "API error (429 Too Many Requests): slow down");
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
    }

    #[test]
    fn caller_errors_are_not_transport() {
        assert!(!Error::MissingApiKey.is_transport());
        assert!(!Error::EmptyPrompt.is_transport());
        assert_eq!(Error::EmptyConversation.status(), None);
    }
}
