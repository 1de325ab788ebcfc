//! # Zotero Core
//!
//! Protocol logic of the Zotero Web API client, free of I/O.
//!
//! This crate contains:
//! - Request targets and query-string encoding
//! - Versioned write rules (batch limits, key/version resolution, payloads)
//! - The attachment upload sequence, written against a port trait
//!
//! ## Architecture Principles
//! - Only depends on `zotero-domain`
//! - No HTTP or file system code
//! - Remote calls go through traits

pub mod attachment;
pub mod request;
pub mod write;

pub use attachment::{AttachmentFile, AttachmentPort, AttachmentUploader};
pub use write::Resource;
