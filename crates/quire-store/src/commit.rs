use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use quire_crypto::ContentHasher;
use quire_types::{ContentHash, Metadata};

use crate::error::{StoreError, StoreResult};

/// The hashed body of a commit.
///
/// The commit hash is the domain-separated hash of this record's JSON
/// encoding, so every field here is covered by the hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit this one supersedes, `None` for the first version.
    pub previous: Option<ContentHash>,
    /// Document name the version was written under.
    pub name: String,
    /// Hash of the content blob.
    pub data: ContentHash,
    /// Content size in bytes.
    pub size: u64,
    pub time: DateTime<Utc>,
    pub meta: Metadata,
}

impl CommitRecord {
    /// Describe a new version of `name` holding `content`.
    pub fn new(
        previous: Option<ContentHash>,
        name: &str,
        content: &[u8],
        meta: &Metadata,
    ) -> Self {
        Self {
            previous,
            name: name.to_string(),
            data: ContentHasher::BLOB.hash(content),
            size: content.len() as u64,
            time: Utc::now(),
            meta: meta.clone(),
        }
    }

    /// Canonical bytes of this record; the commit hash is computed over them.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Descriptor of one persisted version of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Hash of the commit record; the immutable identifier of this version.
    pub commit: ContentHash,
    pub previous: Option<ContentHash>,
    pub name: String,
    pub data: ContentHash,
    pub size: u64,
    pub time: DateTime<Utc>,
    pub meta: Metadata,
}

impl Commit {
    /// Hash a record and turn it into a commit.
    pub fn seal(record: CommitRecord) -> StoreResult<Self> {
        let bytes = record.to_bytes()?;
        let commit = ContentHasher::COMMIT.hash(&bytes);
        Ok(Self::from_parts(commit, record))
    }

    /// Reassemble a commit from a hash already verified against `record`.
    pub fn from_parts(commit: ContentHash, record: CommitRecord) -> Self {
        Self {
            commit,
            previous: record.previous,
            name: record.name,
            data: record.data,
            size: record.size,
            time: record.time,
            meta: record.meta,
        }
    }

    /// The hashed body of this commit.
    pub fn record(&self) -> CommitRecord {
        CommitRecord {
            previous: self.previous,
            name: self.name.clone(),
            data: self.data,
            size: self.size,
            time: self.time,
            meta: self.meta.clone(),
        }
    }

    /// Whether this version carries empty content (a logical delete).
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// One version read back from the store: its descriptor plus content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub commit: Commit,
    pub content: Vec<u8>,
}

impl Version {
    /// Metadata recorded with this version.
    pub fn meta(&self) -> &Metadata {
        &self.commit.meta
    }

    /// Document name recorded with this version.
    pub fn name(&self) -> &str {
        &self.commit.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_hashes_the_record() {
        let record = CommitRecord::new(None, "test.pl", b"foo.", &Metadata::new());
        let bytes = record.to_bytes().unwrap();
        let commit = Commit::seal(record.clone()).unwrap();
        assert_eq!(commit.commit, ContentHasher::COMMIT.hash(&bytes));
        assert_eq!(commit.record(), record);
    }

    #[test]
    fn record_tracks_content() {
        let record = CommitRecord::new(None, "a.pl", b"abc", &Metadata::new());
        assert_eq!(record.size, 3);
        assert_eq!(record.data, ContentHasher::BLOB.hash(b"abc"));
    }

    #[test]
    fn different_parents_give_different_commits() {
        let first = Commit::seal(CommitRecord::new(None, "a.pl", b"x", &Metadata::new())).unwrap();
        let mut record = first.record();
        record.previous = Some(first.commit);
        let second = Commit::seal(record).unwrap();
        assert_ne!(first.commit, second.commit);
    }

    #[test]
    fn empty_content_is_a_delete_marker() {
        let commit = Commit::seal(CommitRecord::new(None, "a.pl", b"", &Metadata::new())).unwrap();
        assert!(commit.is_empty());
    }
}
