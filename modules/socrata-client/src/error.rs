use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SocrataError>;

#[derive(Debug, Error)]
pub enum SocrataError {
    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("Socrata unreachable: {0}")]
    Network(String),

    /// The resource answered with a non-success status. `code` is the
    /// machine-readable error code from a Socrata JSON error body, when present.
    #[error(
        "Socrata returned {status}{}: {message}",
        .code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
    )]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A success response whose body was not the expected JSON rows.
    #[error("Unexpected Socrata response body: {0}")]
    Parse(String),
}

/// Error body Socrata sends with 4xx/5xx answers, e.g.
/// `{"code":"query.soql.no-such-column","error":true,"message":"No such column: foo"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl SocrataError {
    /// Build an `Api` error from a failed response. Prefers the message of a
    /// Socrata error body, then the raw body, then the status reason.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.clone());
        let message = parsed
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());

        SocrataError::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

impl From<reqwest::Error> for SocrataError {
    fn from(err: reqwest::Error) -> Self {
        SocrataError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SocrataError {
    fn from(err: serde_json::Error) -> Self {
        SocrataError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socrata_error_body_supplies_code_and_message() {
        let body = r#"{"code":"query.soql.no-such-column","error":true,"message":"No such column: zip"}"#;
        let err = SocrataError::from_response(StatusCode::BAD_REQUEST, body);
        match &err {
            SocrataError::Api { status, code, message } => {
                assert_eq!(*status, 400);
                assert_eq!(code.as_deref(), Some("query.soql.no-such-column"));
                assert_eq!(message, "No such column: zip");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Socrata returned 400 (query.soql.no-such-column): No such column: zip"
        );
    }

    #[test]
    fn plain_body_is_kept_verbatim() {
        let err = SocrataError::from_response(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.to_string(), "Socrata returned 502: upstream down");
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        let err = SocrataError::from_response(StatusCode::SERVICE_UNAVAILABLE, "  ");
        assert!(matches!(
            err,
            SocrataError::Api { status: 503, code: None, ref message } if message == "Service Unavailable"
        ));
    }
}
