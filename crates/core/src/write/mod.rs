//! Versioned write protocol
//!
//! Batches are capped at 50 entries. Updates and deletes carry the version
//! the caller last observed; the server answers 412 when it is stale.

pub mod payload;
pub mod resource;
pub mod tags;

pub use payload::{
    batch_update_body, create_body, resolve_versioned_key, update_body, validate_batch_size,
    validate_delete, VersionedKey,
};
pub use resource::Resource;
pub use tags::merge_tags;
