//! Filesystem-backed versioned store.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/
//! ├── objects/
//! │   └── ab/
//! │       └── cdef...      # blob bytes or commit record JSON, 38 hex chars
//! └── heads/
//!     └── <hash(name)>     # {"name": .., "commit": ..} of the latest version
//! ```
//!
//! Head files are keyed by the 40-hex `quire-name-v1` hash of the document
//! name, so every valid name maps to a fixed-length file name.
//!
//! Objects are immutable and addressed by hash, so writing one that already
//! exists is a no-op. Head files are replaced through a temporary file and a
//! rename; a new head is linked with no-clobber semantics, which makes
//! `create` atomic even across processes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use quire_crypto::ContentHasher;
use quire_types::{ContentHash, Metadata};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::commit::{Commit, CommitRecord};
use crate::error::{StoreError, StoreResult};
use crate::names::validate_name;
use crate::traits::VersionedStore;

const OBJECTS_DIR: &str = "objects";
const HEADS_DIR: &str = "heads";

/// Contents of a head file.
#[derive(Debug, Serialize, Deserialize)]
struct HeadRecord {
    name: String,
    commit: ContentHash,
}

/// Versioned store persisted as plain files under a root directory.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
    writer: Mutex<()>,
}

impl FsStore {
    /// Open (and if necessary initialize) a store rooted at `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(OBJECTS_DIR))?;
        fs::create_dir_all(root.join(HEADS_DIR))?;
        debug!(root = %root.display(), "opened filesystem store");
        Ok(Self {
            root,
            writer: Mutex::new(()),
        })
    }

    /// The storage root this store was opened at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock_writer(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn object_path(&self, hash: &ContentHash) -> PathBuf {
        let hex = hash.to_hex();
        let (fan, rest) = hex.split_at(2);
        self.root.join(OBJECTS_DIR).join(fan).join(rest)
    }

    fn head_path(&self, name: &str) -> PathBuf {
        let key = ContentHasher::NAME.hash(name.as_bytes());
        self.root.join(HEADS_DIR).join(key.to_hex())
    }

    fn read_head(&self, path: &Path) -> StoreResult<Option<HeadRecord>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::CorruptObject {
                id: path.display().to_string(),
                reason: format!("bad head: {e}"),
            })
    }

    fn temp_file(&self) -> StoreResult<NamedTempFile> {
        Ok(NamedTempFile::new_in(&self.root)?)
    }

    fn write_object(&self, hash: &ContentHash, bytes: &[u8]) -> StoreResult<()> {
        let path = self.object_path(hash);
        if path.exists() {
            return Ok(());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut tmp = self.temp_file()?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn read_object(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(hash)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the blob and commit record of `commit`, in that order.
    fn write_version(&self, commit: &Commit, content: &[u8]) -> StoreResult<()> {
        self.write_object(&commit.data, content)?;
        self.write_object(&commit.commit, &commit.record().to_bytes()?)
    }

    fn head_file(&self, commit: &Commit) -> StoreResult<NamedTempFile> {
        let head = HeadRecord {
            name: commit.name.clone(),
            commit: commit.commit,
        };
        let bytes = serde_json::to_vec(&head).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut tmp = self.temp_file()?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        Ok(tmp)
    }
}

impl VersionedStore for FsStore {
    fn create(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit> {
        validate_name(name)?;
        let _guard = self.lock_writer()?;
        let head = self.head_path(name);
        if head.exists() {
            return Err(StoreError::FileExists(name.to_string()));
        }
        let commit = Commit::seal(CommitRecord::new(None, name, content, meta))?;
        self.write_version(&commit, content)?;
        self.head_file(&commit)?
            .persist_noclobber(&head)
            .map_err(|e| match e.error.kind() {
                io::ErrorKind::AlreadyExists => StoreError::FileExists(name.to_string()),
                _ => StoreError::Io(e.error),
            })?;
        Ok(commit)
    }

    fn update(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit> {
        validate_name(name)?;
        let _guard = self.lock_writer()?;
        let previous = self
            .head(name)?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let commit = Commit::seal(CommitRecord::new(Some(previous), name, content, meta))?;
        self.write_version(&commit, content)?;
        self.head_file(&commit)?
            .persist(self.head_path(name))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(commit)
    }

    fn head(&self, name: &str) -> StoreResult<Option<ContentHash>> {
        if validate_name(name).is_err() {
            return Ok(None);
        }
        let path = self.head_path(name);
        match self.read_head(&path)? {
            Some(head) if head.name == name => Ok(Some(head.commit)),
            Some(head) => Err(StoreError::CorruptObject {
                id: path.display().to_string(),
                reason: format!("head of {name:?} names {:?}", head.name),
            }),
            None => Ok(None),
        }
    }

    fn commit(&self, hash: &ContentHash) -> StoreResult<Option<Commit>> {
        let Some(bytes) = self.read_object(hash)? else {
            return Ok(None);
        };
        let computed = ContentHasher::COMMIT.hash(&bytes);
        if computed != *hash {
            // Either a blob was asked for by hash or the record is damaged.
            if ContentHasher::BLOB.verify(&bytes, hash) {
                return Ok(None);
            }
            return Err(StoreError::HashMismatch { id: *hash, computed });
        }
        let record: CommitRecord = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::CorruptObject {
                id: hash.to_hex(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(Commit::from_parts(*hash, record)))
    }

    fn blob(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>> {
        let Some(bytes) = self.read_object(hash)? else {
            return Ok(None);
        };
        let computed = ContentHasher::BLOB.hash(&bytes);
        if computed != *hash {
            return Err(StoreError::HashMismatch { id: *hash, computed });
        }
        Ok(Some(bytes))
    }

    fn documents(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.join(HEADS_DIR))? {
            let path = entry?.path();
            let is_head = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(ContentHash::is_hash_shaped);
            if !is_head {
                debug!(entry = %path.display(), "skipping foreign file in heads");
                continue;
            }
            if let Some(head) = self.read_head(&path)? {
                names.push(head.name);
            }
        }
        names.sort();
        Ok(names)
    }
}
