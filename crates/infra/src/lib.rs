//! # Zotero Infrastructure
//!
//! HTTP implementation of the Zotero Web API client.
//!
//! This crate contains:
//! - The reqwest client and the rate-limited, cancellable transport
//! - Read, write and schema operations on [`ZoteroClient`]
//! - Attachment upload (the HTTP side of `AttachmentPort`) and download
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `zotero-core`
//! - Depends on `zotero-common`, `zotero-domain` and `zotero-core`
//! - Contains all "impure" code (network, file system)

pub mod client;
pub mod config;
pub mod download;
pub mod errors;
pub mod http;
pub mod read;
pub mod schema;
pub mod upload;
pub mod write;

// Re-export commonly used items
pub use client::ZoteroClient;
pub use config::ClientSettings;
pub use download::derive_filename;
pub use http::{Exchange, HttpClient, HttpClientBuilder, Transport};
