use reqwest::StatusCode;

/// Message used when an error response carries no `error` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Errors surfaced by the pricebook client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("Network error occurred")]
    Network(#[from] reqwest::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx body that does not match the envelope.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx envelope without `data`.
    #[error("Response contained no data")]
    MissingData,

    /// Local form validation failed; nothing was sent.
    #[error("{0}")]
    Form(String),
}

impl ClientError {
    /// HTTP status of an API error, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message() {
        let err = ClientError::Api {
            status: 400,
            message: "SKUs not found: ZZZ999".into(),
        };
        assert_eq!(err.to_string(), "SKUs not found: ZZZ999");
        assert!(!err.is_not_found());
    }

    #[test]
    fn only_404_is_not_found() {
        let err = ClientError::Api {
            status: 404,
            message: "User not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!ClientError::MissingData.is_not_found());
    }
}
