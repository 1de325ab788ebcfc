//! Shared test helpers for `zotero-core` integration tests.

pub mod port;
