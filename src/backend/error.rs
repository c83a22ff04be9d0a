//! Error types for backend operations
//!
//! Every variant is shown to the worker as an inline status message; none of
//! them stop the application.

use thiserror::Error;

/// Result type alias for form backend operations.
pub type FormResult<T> = Result<T, FormError>;

/// Errors surfaced by loading options or submitting the form.
#[derive(Debug, Error)]
pub enum FormError {
    /// No backend URL in the form and no default configured.
    #[error("Enter Backend URL first.")]
    MissingBackend,

    /// Neither the task field nor the launch link carries a task id.
    #[error("Missing Task ID. Put it in the box or use ?task=xxxx in the URL.")]
    MissingTaskId,

    /// `GET /config` answered with a non-success status.
    #[error("Config load failed: HTTP {status} — {body}")]
    ConfigHttp {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// `GET /config` could not be completed or its body was not valid JSON.
    #[error("Fetch failed: {reason}. If the form is served over https, the backend likely needs an https tunnel.")]
    ConfigFetch {
        /// Transport or parse error description
        reason: String,
    },

    /// `POST /submit` answered with a non-success status.
    #[error("Submit failed: HTTP {status} — {body}")]
    SubmitHttp {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// `POST /submit` could not be completed.
    #[error("Submit failed: {reason}")]
    SubmitNetwork {
        /// Transport error description
        reason: String,
    },

    /// The attached photo could not be read from disk.
    #[error("Photo read failed: {reason}")]
    PhotoRead {
        /// IO error description
        reason: String,
    },
}

impl FormError {
    /// True for errors raised before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            FormError::MissingBackend | FormError::MissingTaskId | FormError::PhotoRead { .. }
        )
    }
}
