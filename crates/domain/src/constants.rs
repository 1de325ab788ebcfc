//! Protocol constants
//!
//! Header names, defaults, and fixed limits of the remote API.

use std::time::Duration;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.zotero.org";
/// Default locale for schema calls.
pub const DEFAULT_LOCALE: &str = "en-US";
/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default minimum spacing between outbound requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(1);
/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("zotero-rs/", env!("CARGO_PKG_VERSION"));

/// Protocol version sent on every call.
pub const API_VERSION: &str = "3";

/// Maximum number of entries in one write batch.
pub const MAX_BATCH_SIZE: usize = 50;

/// Separator for OR-joined filters (`tag`, `itemType`).
pub const OR_SEPARATOR: &str = " || ";

/// Link mode of attachments whose file is stored on the server.
pub const LINK_MODE_IMPORTED_FILE: &str = "imported_file";

/// Multipart field carrying the file bytes of an upload.
pub const UPLOAD_FILE_FIELD: &str = "file";

// Request headers
pub const HEADER_API_KEY: &str = "Zotero-API-Key";
pub const HEADER_API_VERSION: &str = "Zotero-API-Version";
pub const HEADER_IF_UNMODIFIED_SINCE_VERSION: &str = "If-Unmodified-Since-Version";
pub const HEADER_IF_NONE_MATCH: &str = "If-None-Match";
pub const HEADER_IF_MATCH: &str = "If-Match";

// Response headers
pub const HEADER_TOTAL_RESULTS: &str = "Total-Results";
pub const HEADER_LAST_MODIFIED_VERSION: &str = "Last-Modified-Version";

// Content types
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
