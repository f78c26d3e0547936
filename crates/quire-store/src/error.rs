use quire_types::ContentHash;

/// Errors from versioned store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Neither a document nor a commit exists under this identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// `create` was called for a name that already has a document.
    #[error("file exists: {0}")]
    FileExists(String),

    /// The document name is not acceptable to the store.
    #[error("invalid document name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {id}: computed {computed}")]
    HashMismatch { id: ContentHash, computed: ContentHash },

    /// A stored object or head could not be decoded.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: String, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
