//! Wire rules of the upload sequence

use serde_json::{json, Value};
use zotero_domain::constants::{HEADER_IF_MATCH, HEADER_IF_NONE_MATCH};
use zotero_domain::{Result, WriteResponse, ZoteroError};

/// Conditional header of an authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// `If-None-Match: *`, asserting no file is stored yet.
    NoneMatch,
    /// `If-Match: <md5>`, replacing the stored file.
    Match(String),
}

impl Precondition {
    /// Header name and value to send.
    pub fn header(&self) -> (&'static str, &str) {
        match self {
            Self::NoneMatch => (HEADER_IF_NONE_MATCH, "*"),
            Self::Match(md5) => (HEADER_IF_MATCH, md5.as_str()),
        }
    }
}

/// Raw answer to an authorization request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationReply {
    pub body: Vec<u8>,
    /// Raw `Last-Modified-Version` header, if present.
    pub last_modified_version: Option<String>,
}

impl AuthorizationReply {
    /// Version to register the upload with, when the header is numeric.
    pub fn registration_version(&self) -> Option<u64> {
        self.last_modified_version.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

/// Storage grant issued by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadGrant {
    pub url: String,
    /// Extra form fields, sorted by name.
    pub params: Vec<(String, String)>,
    pub upload_key: String,
}

/// Decoded authorization outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadAuthorization {
    /// The server already holds this exact file.
    Exists,
    /// Bytes must be sent to storage.
    Upload(UploadGrant),
}

impl UploadAuthorization {
    /// Decode the JSON body of an authorization reply.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let object = value
            .as_object()
            .ok_or_else(|| ZoteroError::Decode("authorization reply is not an object".into()))?;

        if object.get("exists").and_then(Value::as_f64) == Some(1.0) {
            return Ok(Self::Exists);
        }

        let url = object
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| missing_field("upload URL"))?;
        let params = object
            .get("params")
            .and_then(Value::as_object)
            .ok_or_else(|| missing_field("upload params"))?
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
            .collect();
        let upload_key = object
            .get("uploadKey")
            .and_then(Value::as_str)
            .ok_or_else(|| missing_field("uploadKey"))?;

        Ok(Self::Upload(UploadGrant {
            url: url.to_string(),
            params,
            upload_key: upload_key.to_string(),
        }))
    }
}

fn missing_field(field: &str) -> ZoteroError {
    ZoteroError::Protocol(format!("missing {field} in authorization reply"))
}

/// Key assigned to the single stub of a create batch.
///
/// Fails with the reported failure, or with a protocol error when the reply
/// lists neither outcome.
pub fn extract_created_key(response: &WriteResponse) -> Result<String> {
    if let Some(key) = response.success_key(0) {
        return Ok(key.to_string());
    }
    if let Some(key) = response.success.values().find_map(Value::as_str) {
        return Ok(key.to_string());
    }

    let failure = response.failure(0).or_else(|| response.failed.values().next());
    match failure {
        Some(failed) => {
            Err(ZoteroError::Rejected { code: failed.code, message: failed.message.clone() })
        }
        None => Err(ZoteroError::Protocol("attachment creation reported no outcome".into())),
    }
}

/// JSON body registering a finished upload.
pub fn registration_body(upload_key: &str) -> Vec<u8> {
    json!({ "upload": upload_key }).to_string().into_bytes()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use zotero_domain::FailedWrite;

    use super::*;

    #[test]
    fn exists_flag_short_circuits() {
        assert_eq!(
            UploadAuthorization::parse(br#"{"exists":1}"#).unwrap(),
            UploadAuthorization::Exists
        );
    }

    #[test]
    fn grant_carries_url_params_and_key() {
        let body = br#"{
            "url": "https://storage.example/upload",
            "params": { "key": "abc", "policy": "xyz", "ignored": 5 },
            "uploadKey": "UPKEY123"
        }"#;

        let UploadAuthorization::Upload(grant) = UploadAuthorization::parse(body).unwrap() else {
            panic!("expected an upload grant");
        };
        assert_eq!(grant.url, "https://storage.example/upload");
        assert_eq!(grant.upload_key, "UPKEY123");
        assert_eq!(
            grant.params,
            vec![("key".into(), "abc".into()), ("policy".into(), "xyz".into())]
        );
    }

    #[test]
    fn grant_without_url_is_a_protocol_error() {
        let err = UploadAuthorization::parse(br#"{"params":{}, "uploadKey":"k"}"#).unwrap_err();
        assert!(matches!(err, ZoteroError::Protocol(_)));
        assert!(matches!(UploadAuthorization::parse(b"not json"), Err(ZoteroError::Decode(_))));
    }

    #[test]
    fn created_key_prefers_first_entry() {
        let response = WriteResponse {
            success: BTreeMap::from([("0".to_string(), json!("ATTACH01"))]),
            ..WriteResponse::default()
        };
        assert_eq!(extract_created_key(&response).unwrap(), "ATTACH01");
    }

    #[test]
    fn failed_creation_surfaces_message() {
        let response = WriteResponse {
            failed: BTreeMap::from([(
                "0".to_string(),
                FailedWrite { code: 400, message: "Invalid contentType".into() },
            )]),
            ..WriteResponse::default()
        };

        let err = extract_created_key(&response).unwrap_err();
        assert!(matches!(
            err,
            ZoteroError::Rejected { code: 400, ref message } if message == "Invalid contentType"
        ));
        assert!(matches!(
            extract_created_key(&WriteResponse::default()),
            Err(ZoteroError::Protocol(_))
        ));
    }

    #[test]
    fn registration_version_requires_numeric_header() {
        let reply = |raw: Option<&str>| AuthorizationReply {
            body: Vec::new(),
            last_modified_version: raw.map(str::to_string),
        };
        assert_eq!(reply(Some("42")).registration_version(), Some(42));
        assert_eq!(reply(Some("abc")).registration_version(), None);
        assert_eq!(reply(None).registration_version(), None);
    }

    #[test]
    fn precondition_headers() {
        assert_eq!(Precondition::NoneMatch.header(), ("If-None-Match", "*"));
        assert_eq!(Precondition::Match("abc".into()).header(), ("If-Match", "abc"));
        assert_eq!(registration_body("UP1"), br#"{"upload":"UP1"}"#.to_vec());
    }
}
