//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use reqwest::Error as HttpError;
use zotero_domain::ZoteroError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ZoteroError);

impl From<InfraError> for ZoteroError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ZoteroError> for InfraError {
    fn from(value: ZoteroError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoZoteroError {
    fn into_zotero(self) -> ZoteroError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ZoteroError */
/* -------------------------------------------------------------------------- */

/// Map a reqwest failure, reporting timeouts with the configured `timeout`.
pub fn http_error(err: HttpError, timeout: Duration) -> ZoteroError {
    if err.is_timeout() {
        return ZoteroError::Timeout(timeout);
    }
    err.into_zotero()
}

impl IntoZoteroError for HttpError {
    fn into_zotero(self) -> ZoteroError {
        if self.is_builder() {
            return ZoteroError::Transport(format!("invalid request: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ZoteroError::Transport(format!("connection failure: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return ZoteroError::Transport(format!("failed to read response body: {self}"));
        }

        ZoteroError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_zotero())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ZoteroError */
/* -------------------------------------------------------------------------- */

impl IntoZoteroError for std::io::Error {
    fn into_zotero(self) -> ZoteroError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => ZoteroError::Config(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                ZoteroError::Config(format!("permission denied: {self}"))
            }
            _ => ZoteroError::Transport(format!("file system error: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_zotero())
    }
}

/// Map a file system failure, naming the path involved.
pub fn io_error(err: std::io::Error, path: &std::path::Path) -> ZoteroError {
    match err.into_zotero() {
        ZoteroError::Config(message) => {
            ZoteroError::Config(format!("{}: {message}", path.display()))
        }
        ZoteroError::Transport(message) => {
            ZoteroError::Transport(format!("{}: {message}", path.display()))
        }
        other => other,
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
