//! Error types for video generation.

use std::time::Duration;

/// Errors that can end a generation.
///
/// Every variant is terminal for the invocation that produced it. Nothing in
/// this crate retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Neither a prompt nor a reference image was supplied.
    #[error("Please provide at least a text prompt or an image.")]
    Validation,

    /// The reference image could not be read or decoded.
    #[error("failed to read reference image: {0}")]
    ImageRead(String),

    /// The remote service rejected the submission or was unreachable.
    #[error("submission failed: {message}")]
    Submission {
        /// HTTP status, when the service answered at all.
        status: Option<u16>,
        /// Human-readable reason.
        message: String,
    },

    /// The operation finished without a usable video reference.
    #[error("No video URI returned from the API.")]
    MissingResult,

    /// Fetching the video bytes returned a non-success status.
    #[error("Failed to download video: {reason}")]
    Download {
        /// HTTP status code.
        status: u16,
        /// HTTP reason phrase.
        reason: String,
    },

    /// The remote operation finished with an error of its own.
    #[error("video generation failed: {0}")]
    Generation(String),

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// The poll policy's wait or attempt budget ran out.
    #[error("operation still running after {waited:?} ({attempts} polls)")]
    Timeout {
        /// Time spent since submission.
        waited: Duration,
        /// Number of status checks performed.
        attempts: u32,
    },

    /// The caller cancelled the generation.
    #[error("generation cancelled")]
    Cancelled,

    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Non-success response while checking an operation.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// The result URI uses a scheme that cannot be fetched over HTTP.
    #[error("cannot download {0}: only http(s) result URIs are supported")]
    UnsupportedUri(String),

    /// No registry entry exists for the given generation id.
    #[error("unknown generation: {0}")]
    UnknownJob(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g., saving a video).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse error category, for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input.
    Validation,
    /// Local image could not be used.
    ImageRead,
    /// Submission was rejected.
    Submission,
    /// Job finished with nothing to fetch, or the remote job failed.
    MissingResult,
    /// Byte fetch failed.
    Download,
    /// Poll budget exhausted or cancelled.
    Aborted,
    /// Anything else (transport, auth, local I/O).
    Other,
}

impl StudioError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation => ErrorKind::Validation,
            Self::ImageRead(_) => ErrorKind::ImageRead,
            Self::Submission { .. } => ErrorKind::Submission,
            Self::MissingResult | Self::Generation(_) | Self::ContentBlocked(_) => {
                ErrorKind::MissingResult
            }
            Self::Download { .. } | Self::UnsupportedUri(_) => ErrorKind::Download,
            Self::Timeout { .. } | Self::Cancelled => ErrorKind::Aborted,
            _ => ErrorKind::Other,
        }
    }

    /// Builds a transport error with the request URL stripped.
    ///
    /// Download URLs carry the API key as a query parameter.
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

/// Result type alias for video generation operations.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Longest error body kept in a message.
const MAX_ERROR_BODY: usize = 500;

/// Reduces an API error body to something fit for display.
///
/// Google APIs wrap errors as `{"error": {"message": "..."}}`; that message is
/// used when present. Other bodies are trimmed and truncated.
pub(crate) fn sanitize_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value
            .pointer("/error/message")
            .and_then(serde_json::Value::as_str)
        {
            return msg.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".into();
    }
    if trimmed.chars().count() > MAX_ERROR_BODY {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(StudioError::Validation.kind(), ErrorKind::Validation);
        assert_eq!(StudioError::ImageRead("x".into()).kind(), ErrorKind::ImageRead);
        assert_eq!(
            StudioError::Submission {
                status: Some(400),
                message: "bad".into()
            }
            .kind(),
            ErrorKind::Submission
        );
        assert_eq!(StudioError::MissingResult.kind(), ErrorKind::MissingResult);
        assert_eq!(
            StudioError::Download {
                status: 404,
                reason: "Not Found".into()
            }
            .kind(),
            ErrorKind::Download
        );
        assert_eq!(StudioError::Cancelled.kind(), ErrorKind::Aborted);
        assert_eq!(StudioError::Auth("bad key".into()).kind(), ErrorKind::Other);
    }

    #[test]
    fn test_error_display() {
        let err = StudioError::Download {
            status: 403,
            reason: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "Failed to download video: Forbidden");

        assert_eq!(
            StudioError::MissingResult.to_string(),
            "No video URI returned from the API."
        );

        let err = StudioError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_sanitize_extracts_google_message() {
        let body = r#"{"error": {"code": 400, "message": "Invalid aspect ratio", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(sanitize_error_message(body), "Invalid aspect ratio");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let msg = sanitize_error_message(&body);
        assert_eq!(msg.len(), MAX_ERROR_BODY + 3);
        assert!(msg.ends_with("..."));
    }

    #[test]
    fn test_sanitize_empty_body() {
        assert_eq!(sanitize_error_message("  \n"), "empty response body");
    }
}
