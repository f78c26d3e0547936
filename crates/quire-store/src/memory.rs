use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use quire_types::{ContentHash, Metadata};

use crate::commit::{Commit, CommitRecord};
use crate::error::{StoreError, StoreResult};
use crate::names::validate_name;
use crate::traits::VersionedStore;

#[derive(Default)]
struct Inner {
    blobs: HashMap<ContentHash, Vec<u8>>,
    commits: HashMap<ContentHash, Commit>,
    heads: BTreeMap<String, ContentHash>,
}

impl Inner {
    fn append(&mut self, commit: Commit, content: &[u8]) {
        self.blobs
            .entry(commit.data)
            .or_insert_with(|| content.to_vec());
        self.heads.insert(commit.name.clone(), commit.commit);
        self.commits.insert(commit.commit, commit);
    }
}

/// In-memory versioned store.
///
/// Intended for tests and embedding. All state lives behind a single
/// `RwLock`, which makes `create` and `update` atomic. Data is lost when the
/// store is dropped.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.read_inner().map(|inner| inner.heads.len()).unwrap_or(0)
    }

    /// Returns `true` if no document has been created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_inner(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_inner(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionedStore for InMemoryStore {
    fn create(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit> {
        validate_name(name)?;
        let mut inner = self.write_inner()?;
        if inner.heads.contains_key(name) {
            return Err(StoreError::FileExists(name.to_string()));
        }
        let commit = Commit::seal(CommitRecord::new(None, name, content, meta))?;
        inner.append(commit.clone(), content);
        Ok(commit)
    }

    fn update(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit> {
        let mut inner = self.write_inner()?;
        let previous = *inner
            .heads
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let commit = Commit::seal(CommitRecord::new(Some(previous), name, content, meta))?;
        inner.append(commit.clone(), content);
        Ok(commit)
    }

    fn head(&self, name: &str) -> StoreResult<Option<ContentHash>> {
        Ok(self.read_inner()?.heads.get(name).copied())
    }

    fn commit(&self, hash: &ContentHash) -> StoreResult<Option<Commit>> {
        Ok(self.read_inner()?.commits.get(hash).cloned())
    }

    fn blob(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read_inner()?.blobs.get(hash).cloned())
    }

    fn documents(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_inner()?.heads.keys().cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("document_count", &self.len())
            .finish()
    }
}
