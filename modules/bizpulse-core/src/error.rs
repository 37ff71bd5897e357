use socrata_client::SocrataError;
use thiserror::Error;

/// Notice shown to the user for any failed load, whatever the cause.
pub const LOAD_FAILURE_NOTICE: &str = "Failed to load business data. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the expected JSON array of records.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_NOTICE
    }
}

impl From<SocrataError> for FetchError {
    fn from(err: SocrataError) -> Self {
        match err {
            SocrataError::Network(msg) => FetchError::Transport(msg),
            SocrataError::Api {
                status,
                code: Some(code),
                message,
            } => FetchError::Transport(format!("status {status} ({code}): {message}")),
            SocrataError::Api { status, message, .. } => {
                FetchError::Transport(format!("status {status}: {message}"))
            }
            SocrataError::Parse(msg) => FetchError::Deserialization(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_transport_errors() {
        let err: FetchError = SocrataError::Api {
            status: 503,
            code: None,
            message: "Service Unavailable".into(),
        }
        .into();
        assert_eq!(
            err,
            FetchError::Transport("status 503: Service Unavailable".into())
        );
    }

    #[test]
    fn socrata_error_code_is_kept_in_transport_detail() {
        let err: FetchError = SocrataError::Api {
            status: 400,
            code: Some("query.soql.no-such-column".into()),
            message: "No such column: zip".into(),
        }
        .into();
        assert_eq!(
            err,
            FetchError::Transport("status 400 (query.soql.no-such-column): No such column: zip".into())
        );
    }

    #[test]
    fn parse_errors_are_deserialization_errors() {
        let err: FetchError = SocrataError::Parse("eof".into()).into();
        assert!(matches!(err, FetchError::Deserialization(_)));
        assert_eq!(err.user_message(), LOAD_FAILURE_NOTICE);
    }
}
