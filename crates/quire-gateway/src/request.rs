use serde::{Deserialize, Serialize};
use serde_json::Value;
use quire_store::Version;
use quire_types::Metadata;

use crate::resolve::Resolved;

/// Decoded body of a create request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Document content; empty when omitted.
    pub data: Option<String>,
    /// File extension; the configured default when omitted.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Untrusted client metadata. `meta.name` selects an explicit base name.
    pub meta: Option<Value>,
}

impl CreateRequest {
    /// Explicit base name requested by the client, if any.
    pub fn base_name(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Decoded body of an update request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// New content; empty when omitted.
    pub data: Option<String>,
    /// `"meta-data"` keeps the current content and replaces only metadata.
    pub update: Option<String>,
    pub meta: Option<Value>,
}

impl UpdateRequest {
    /// Value of `update` that marks a metadata-only update.
    pub const METADATA_ONLY: &'static str = "meta-data";

    pub fn is_metadata_only(&self) -> bool {
        self.update.as_deref() == Some(Self::METADATA_ONLY)
    }
}

/// Where a document lives and what is recorded about it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub url: String,
    pub file: String,
    pub meta: Metadata,
}

/// Result of a create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(DocumentInfo),
    /// The explicitly requested name is taken; nothing was written.
    FileExists { file: String },
}

/// A version fetched for a read request.
#[derive(Clone, Debug)]
pub struct Document {
    /// How the request path was interpreted.
    pub id: Resolved,
    pub version: Version,
}
