use quire_store::VersionedStore;
use quire_types::ContentHash;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};

/// What a request path refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// An existing, mutable document.
    File(String),
    /// An immutable stored version.
    Hash(ContentHash),
}

impl Resolved {
    /// Textual identifier as it appeared in the request.
    pub fn id(&self) -> String {
        match self {
            Self::File(name) => name.clone(),
            Self::Hash(hash) => hash.to_hex(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Strip one leading `/` from a request path.
pub fn candidate(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Decide whether `path` names a document or a content hash.
///
/// An existing document name always wins, even when it is hash-shaped.
/// Otherwise a 40-character lowercase hex string is taken as a hash; any
/// other shape is [`GatewayError::NotFound`]. A hash result says nothing
/// about whether that version exists.
pub fn resolve(store: &dyn VersionedStore, path: &str) -> GatewayResult<Resolved> {
    let id = candidate(path);
    if store.exists(id)? {
        debug!(id, "resolved as document");
        return Ok(Resolved::File(id.to_string()));
    }
    if ContentHash::is_hash_shaped(id) {
        let hash = id
            .parse::<ContentHash>()
            .map_err(|_| GatewayError::NotFound(id.to_string()))?;
        debug!(id, "resolved as content hash");
        return Ok(Resolved::Hash(hash));
    }
    Err(GatewayError::NotFound(id.to_string()))
}

/// Resolve `path` to an existing document; hashes are never accepted.
pub fn resolve_file(store: &dyn VersionedStore, path: &str) -> GatewayResult<String> {
    match resolve(store, path)? {
        Resolved::File(name) => Ok(name),
        Resolved::Hash(hash) => Err(GatewayError::NotFound(hash.to_hex())),
    }
}
