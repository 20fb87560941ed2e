//! Error taxonomy for the SDK
//!
//! Every failure a caller can observe is one of the variants below. Backend
//! responses are mapped from their HTTP status code; local validation and
//! configuration problems never touch the network.

use reqwest::StatusCode;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, AipolabsError>;

/// Closed set of SDK errors.
///
/// Variants carrying a status code also carry the raw response body so
/// callers can diagnose backend failures without re-issuing the request.
#[derive(Debug, thiserror::Error)]
pub enum AipolabsError {
    /// No API key was supplied and none was found in the environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// 401 from the backend.
    #[error("authentication error: {message}")]
    Authentication {
        message: String,
        status: u16,
        body: String,
    },

    /// 403 from the backend.
    #[error("permission error: {message}")]
    Permission {
        message: String,
        status: u16,
        body: String,
    },

    /// 404 from the backend.
    #[error("not found: {message}")]
    NotFound {
        message: String,
        status: u16,
        body: String,
    },

    /// 400 from the backend, or a local parameter-validation failure
    /// (in which case `status` and `body` are absent).
    #[error("validation error: {message}")]
    Validation {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// 429 from the backend. Retryable.
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        status: u16,
        body: String,
    },

    /// Any 5xx from the backend. Retryable.
    #[error("server error: {message}")]
    Server {
        message: String,
        status: u16,
        body: String,
    },

    /// A non-2xx status outside the mapped set (e.g. 418). Retryable.
    #[error("unknown error (status {status}): {message}")]
    Unknown {
        message: String,
        status: u16,
        body: String,
    },

    /// The transport timed out before a response arrived. Retryable.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection or other transport-level failure. Retryable.
    #[error("network error: {0}")]
    Network(String),

    /// Function execution was requested without a linked account owner.
    #[error(
        "linked_account_owner_id is required for function execution, \
         please provide it when calling handle_function_call or execute"
    )]
    MissingLinkedAccountOwnerId,
}

impl AipolabsError {
    /// Local validation failure, raised before any request is built.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Map a non-2xx response to its error variant.
    ///
    /// `message` is the text extracted from the error body (`message` or
    /// `error` field, falling back to the raw text); `body` is the raw
    /// response text kept verbatim for diagnosis.
    pub fn from_status(status: StatusCode, message: String, body: String) -> Self {
        let code = status.as_u16();
        match code {
            400 => Self::Validation {
                message,
                status: Some(code),
                body: Some(body),
            },
            401 => Self::Authentication {
                message,
                status: code,
                body,
            },
            403 => Self::Permission {
                message,
                status: code,
                body,
            },
            404 => Self::NotFound {
                message,
                status: code,
                body,
            },
            429 => Self::RateLimit {
                message,
                status: code,
                body,
            },
            500..=599 => Self::Server {
                message,
                status: code,
                body,
            },
            _ => Self::Unknown {
                message,
                status: code,
                body,
            },
        }
    }

    /// Whether the retry policy may re-attempt the request after this error.
    ///
    /// Terminal errors (auth, permission, not-found, validation) are
    /// surfaced on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. }
                | Self::Server { .. }
                | Self::Unknown { .. }
                | Self::Timeout(_)
                | Self::Network(_)
        )
    }
}

impl From<reqwest::Error> for AipolabsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// Prefers the `message` then `error` field of a JSON object body, falling
/// back to the raw text when the body is not structured or lacks both.
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            match map.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(code: u16) -> AipolabsError {
        AipolabsError::from_status(
            StatusCode::from_u16(code).unwrap(),
            "boom".to_string(),
            "{}".to_string(),
        )
    }

    #[test]
    fn test_status_mapping_is_total_and_exact() {
        assert!(matches!(mapped(400), AipolabsError::Validation { .. }));
        assert!(matches!(mapped(401), AipolabsError::Authentication { .. }));
        assert!(matches!(mapped(403), AipolabsError::Permission { .. }));
        assert!(matches!(mapped(404), AipolabsError::NotFound { .. }));
        assert!(matches!(mapped(429), AipolabsError::RateLimit { .. }));
        for code in [500, 502, 503, 599] {
            assert!(matches!(mapped(code), AipolabsError::Server { .. }));
        }
        // Unmapped non-2xx codes fall through to Unknown.
        assert!(matches!(mapped(418), AipolabsError::Unknown { .. }));
        assert!(matches!(mapped(302), AipolabsError::Unknown { .. }));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(mapped(429).is_retryable());
        assert!(mapped(500).is_retryable());
        assert!(mapped(418).is_retryable());
        assert!(AipolabsError::Timeout("t".into()).is_retryable());
        assert!(AipolabsError::Network("n".into()).is_retryable());

        assert!(!mapped(400).is_retryable());
        assert!(!mapped(401).is_retryable());
        assert!(!mapped(403).is_retryable());
        assert!(!mapped(404).is_retryable());
        assert!(!AipolabsError::validation("bad").is_retryable());
        assert!(!AipolabsError::MissingLinkedAccountOwnerId.is_retryable());
    }

    #[test]
    fn test_extract_error_message_prefers_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message": "Unauthorized"}"#),
            "Unauthorized"
        );
        assert_eq!(
            extract_error_message(r#"{"error": "Forbidden"}"#),
            "Forbidden"
        );
        assert_eq!(
            extract_error_message(r#"{"message": "first", "error": "second"}"#),
            "first"
        );
        // Unstructured bodies pass through verbatim.
        assert_eq!(extract_error_message("plain text"), "plain text");
        assert_eq!(extract_error_message(r#"{"detail": "x"}"#), r#"{"detail": "x"}"#);
    }
}
