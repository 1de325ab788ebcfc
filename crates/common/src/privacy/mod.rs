//! Redaction helpers for values that must not reach logs in full.

/// Number of leading characters kept by [`redact_secret`].
pub const VISIBLE_PREFIX: usize = 4;

/// Keep a short prefix of `secret` and mask the rest.
///
/// Secrets of up to twice the visible prefix are masked entirely so short
/// values cannot be reconstructed from the log line.
pub fn redact_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len == 0 {
        return String::new();
    }
    if len <= VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}****")
}

/// Redact an optional secret, rendering `None` as `<none>`.
pub fn redact_optional(secret: Option<&str>) -> String {
    match secret {
        Some(value) if !value.is_empty() => redact_secret(value),
        _ => "<none>".to_string(),
    }
}
