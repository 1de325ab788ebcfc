//! Error types used throughout the client

use std::time::Duration;

use thiserror::Error;

/// Step of the attachment upload sequence in which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    /// Creating the attachment item stub.
    CreateAttachment,
    /// Requesting upload authorization from the API.
    Authorize,
    /// Sending the file bytes to the storage host.
    Upload,
    /// Registering the finished upload with the API.
    Register,
    /// Re-fetching the attachment item.
    Fetch,
}

crate::impl_domain_status_conversions!(UploadStep {
    CreateAttachment => "create-attachment",
    Authorize => "authorize",
    Upload => "upload",
    Register => "register",
    Fetch => "fetch",
});

/// Main error type for every client operation
#[derive(Error, Debug)]
pub enum ZoteroError {
    /// A precondition failed before any network call was made.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// The configured HTTP timeout elapsed.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Building, sending, or reading an HTTP exchange failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a status of 400 or above.
    #[error("API error: {body} (status {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The API answered with a status the operation does not accept.
    #[error("Unexpected status code: {status}, body: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A required response header was absent.
    #[error("{0} header not found")]
    MissingHeader(&'static str),

    /// A response header could not be parsed as a number.
    #[error("Invalid {name} header value: {value:?}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Raw header value.
        value: String,
    },

    /// A batch write reported the entry as failed.
    #[error("Write rejected (code {code}): {message}")]
    Rejected {
        /// Per-entry failure code reported by the API.
        code: u16,
        /// Per-entry failure message reported by the API.
        message: String,
    },

    /// The response violated the remote protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A step of the attachment upload sequence failed.
    #[error("Attachment upload failed during {step}: {source}")]
    Upload {
        /// Step that failed.
        step: UploadStep,
        /// Underlying failure.
        #[source]
        source: Box<ZoteroError>,
    },
}

impl ZoteroError {
    /// Wrap this error with the upload step it occurred in.
    pub fn during(self, step: UploadStep) -> Self {
        Self::Upload { step, source: Box::new(self) }
    }

    /// HTTP status carried by this error, looking through upload wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Upload { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True when the server rejected a stale version (412 Precondition Failed).
    pub fn is_version_conflict(&self) -> bool {
        self.status() == Some(412)
    }

    /// True when the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for caller cancellation and for the HTTP timeout.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Self::Cancelled | Self::Timeout(_) => true,
            Self::Upload { source, .. } => source.is_cancellation(),
            _ => false,
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Cancelled => "cancelled",
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Decode(_) => "decode",
            Self::MissingHeader(_) | Self::InvalidHeader { .. } => "header",
            Self::Rejected { .. } => "rejected",
            Self::Protocol(_) => "protocol",
            Self::Upload { .. } => "upload",
        }
    }
}

impl From<serde_json::Error> for ZoteroError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ZoteroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_visible_through_upload_wrapper() {
        let err = ZoteroError::Api { status: 412, body: "conflict".into() }
            .during(UploadStep::Authorize);

        assert_eq!(err.status(), Some(412));
        assert!(err.is_version_conflict());
        assert!(err.to_string().contains("authorize"));
    }

    #[test]
    fn cancellation_covers_timeout() {
        assert!(ZoteroError::Cancelled.is_cancellation());
        assert!(ZoteroError::Timeout(Duration::from_secs(1)).is_cancellation());
        assert!(!ZoteroError::Config("x".into()).is_cancellation());
    }

    #[test]
    fn api_error_keeps_raw_body() {
        let err = ZoteroError::Api { status: 400, body: "{\"error\":\"bad\"}".into() };
        assert_eq!(err.to_string(), "API error: {\"error\":\"bad\"} (status 400)");
        assert_eq!(err.label(), "api");
        assert!(!err.is_not_found());
    }

    #[test]
    fn upload_step_round_trips_through_strings() {
        assert_eq!(UploadStep::CreateAttachment.to_string(), "create-attachment");
        assert_eq!("REGISTER".parse::<UploadStep>().unwrap(), UploadStep::Register);
    }
}
