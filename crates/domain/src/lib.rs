//! # Zotero Domain
//!
//! Wire model and error taxonomy of the Zotero Web API client.
//!
//! This crate contains:
//! - Items, collections, searches, groups and write responses
//! - `ZoteroError` and the crate-wide `Result`
//! - Client configuration
//! - Protocol constants and item/creator type catalogs
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod item_types;
pub mod macros;
pub mod types;

pub use config::{ClientConfig, ClientConfigBuilder, RetryConfig};
pub use errors::{Result, UploadStep, ZoteroError};
pub use types::*;
