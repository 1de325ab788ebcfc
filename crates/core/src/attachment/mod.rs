//! Attachment upload orchestration

pub mod file;
pub mod ports;
pub mod protocol;
pub mod service;

pub use file::AttachmentFile;
pub use ports::AttachmentPort;
pub use protocol::{
    extract_created_key, registration_body, AuthorizationReply, Precondition, UploadAuthorization,
    UploadGrant,
};
pub use service::AttachmentUploader;
