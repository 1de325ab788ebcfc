//! In-memory mock for `AttachmentPort`
//!
//! Replies are scripted per step; every call is recorded so tests can assert
//! which exchanges happened and in what order.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use zotero_core::attachment::{
    AttachmentFile, AttachmentPort, AuthorizationReply, Precondition, UploadGrant,
};
use zotero_domain::{Item, ItemData, Result as DomainResult, WriteResponse, ZoteroError};

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { title: String, parent: Option<String> },
    Authorize { key: String, form: String, precondition: Precondition },
    Upload { url: String, fields: Vec<(String, String)>, bytes: usize },
    Register { key: String, upload_key: String, version: u64 },
    Fetch { key: String },
}

#[derive(Default)]
struct Script {
    create: Option<DomainResult<WriteResponse>>,
    authorize: VecDeque<DomainResult<AuthorizationReply>>,
    upload: Option<DomainResult<()>>,
    register: Option<DomainResult<()>>,
}

/// Scripted port shared between the test and the uploader.
#[derive(Clone, Default)]
pub struct MockAttachmentPort {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockAttachmentPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub creation succeeds with `key`.
    pub fn with_created_key(self, key: &str) -> Self {
        let response: WriteResponse =
            serde_json::from_value(json!({ "success": { "0": key } })).expect("write response");
        self.script.lock().create = Some(Ok(response));
        self
    }

    pub fn with_create_response(self, response: DomainResult<WriteResponse>) -> Self {
        self.script.lock().create = Some(response);
        self
    }

    /// Queue one authorization reply.
    pub fn with_authorization(self, reply: DomainResult<AuthorizationReply>) -> Self {
        self.script.lock().authorize.push_back(reply);
        self
    }

    pub fn with_upload_result(self, result: DomainResult<()>) -> Self {
        self.script.lock().upload = Some(result);
        self
    }

    pub fn with_register_result(self, result: DomainResult<()>) -> Self {
        self.script.lock().register = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

/// Authorization reply granting an upload.
pub fn grant_reply(version: Option<&str>) -> AuthorizationReply {
    AuthorizationReply {
        body: json!({
            "url": "https://storage.example/upload",
            "params": { "key": "attachments/abc", "policy": "p0l1cy" },
            "uploadKey": "UPLOAD01"
        })
        .to_string()
        .into_bytes(),
        last_modified_version: version.map(str::to_string),
    }
}

/// Authorization reply reporting the file as already stored.
pub fn exists_reply() -> AuthorizationReply {
    AuthorizationReply { body: br#"{"exists":1}"#.to_vec(), last_modified_version: None }
}

pub fn api_error(status: u16, body: &str) -> ZoteroError {
    ZoteroError::Api { status, body: body.to_string() }
}

#[async_trait]
impl AttachmentPort for MockAttachmentPort {
    async fn create_items(&self, items: &[Item]) -> DomainResult<WriteResponse> {
        let stub = &items[0].data;
        self.record(Call::Create { title: stub.title.clone(), parent: stub.parent_item.clone() });
        self.script
            .lock()
            .create
            .take()
            .unwrap_or_else(|| Err(ZoteroError::Protocol("create not scripted".into())))
    }

    async fn authorize_upload(
        &self,
        item_key: &str,
        form: &str,
        precondition: &Precondition,
    ) -> DomainResult<AuthorizationReply> {
        self.record(Call::Authorize {
            key: item_key.to_string(),
            form: form.to_string(),
            precondition: precondition.clone(),
        });
        self.script
            .lock()
            .authorize
            .pop_front()
            .unwrap_or_else(|| Err(ZoteroError::Protocol("authorize not scripted".into())))
    }

    async fn upload_file(&self, grant: &UploadGrant, file: &AttachmentFile) -> DomainResult<()> {
        self.record(Call::Upload {
            url: grant.url.clone(),
            fields: grant.params.clone(),
            bytes: file.size(),
        });
        self.script.lock().upload.take().unwrap_or(Ok(()))
    }

    async fn register_upload(
        &self,
        item_key: &str,
        upload_key: &str,
        version: u64,
    ) -> DomainResult<()> {
        self.record(Call::Register {
            key: item_key.to_string(),
            upload_key: upload_key.to_string(),
            version,
        });
        self.script.lock().register.take().unwrap_or(Ok(()))
    }

    async fn item(&self, item_key: &str) -> DomainResult<Item> {
        self.record(Call::Fetch { key: item_key.to_string() });
        Ok(Item {
            key: item_key.to_string(),
            version: 9,
            ..Item::new(ItemData::new("attachment").with_title("stored"))
        })
    }
}
