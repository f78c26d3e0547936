use quire_types::{ContentHash, Metadata};

use crate::commit::{Commit, Version};
use crate::error::{StoreError, StoreResult};

/// Versioned, content-addressed document store.
///
/// All implementations must satisfy these invariants:
/// - `create` is atomic with respect to name existence: two concurrent
///   creates for the same name never both succeed.
/// - `update` always appends a new version; history is never rewritten.
/// - Commits and blobs are immutable once written and addressed by hash.
/// - All I/O errors are propagated, never silently ignored.
pub trait VersionedStore: Send + Sync {
    /// Create a new document. Fails with [`StoreError::FileExists`] if a
    /// document named `name` already exists.
    fn create(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit>;

    /// Append a new version to an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    fn update(&self, name: &str, content: &[u8], meta: &Metadata) -> StoreResult<Commit>;

    /// Hash of the latest commit of `name`, or `None` if no such document.
    fn head(&self, name: &str) -> StoreResult<Option<ContentHash>>;

    /// Read a commit descriptor by hash.
    fn commit(&self, hash: &ContentHash) -> StoreResult<Option<Commit>>;

    /// Read a content blob by hash.
    fn blob(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>>;

    /// Names of all documents, sorted.
    fn documents(&self) -> StoreResult<Vec<String>>;

    /// Whether a document named `name` exists.
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.head(name)?.is_some())
    }

    /// Read a version by document name (latest version) or by commit hash.
    ///
    /// A document name always takes precedence over a hash interpretation.
    fn read(&self, name_or_hash: &str) -> StoreResult<Version> {
        let hash = match self.head(name_or_hash)? {
            Some(head) => head,
            None => name_or_hash
                .parse::<ContentHash>()
                .map_err(|_| StoreError::NotFound(name_or_hash.to_string()))?,
        };
        self.read_commit(&hash)
    }

    /// Read the version recorded by commit `hash`.
    fn read_commit(&self, hash: &ContentHash) -> StoreResult<Version> {
        let commit = self
            .commit(hash)?
            .ok_or_else(|| StoreError::NotFound(hash.to_hex()))?;
        let content = self.blob(&commit.data)?.ok_or_else(|| StoreError::CorruptObject {
            id: commit.commit.to_hex(),
            reason: format!("missing content blob {}", commit.data),
        })?;
        Ok(Version { commit, content })
    }

    /// Up to `depth` commits of `name`, newest first.
    fn history(&self, name: &str, depth: usize) -> StoreResult<Vec<Commit>> {
        let mut next = self.head(name)?;
        if next.is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let mut commits = Vec::new();
        while let Some(hash) = next {
            if commits.len() >= depth {
                break;
            }
            let commit = self.commit(&hash)?.ok_or_else(|| StoreError::CorruptObject {
                id: hash.to_hex(),
                reason: format!("history of {name} references a missing commit"),
            })?;
            next = commit.previous;
            commits.push(commit);
        }
        Ok(commits)
    }

    /// Metadata of the latest version of `name`.
    fn latest_metadata(&self, name: &str) -> StoreResult<Metadata> {
        let head = self
            .head(name)?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let commit = self
            .commit(&head)?
            .ok_or_else(|| StoreError::NotFound(head.to_hex()))?;
        Ok(commit.meta)
    }
}

/// Behaviour every backend must share, run against each implementation.
#[cfg(test)]
pub(crate) mod conformance {
    use super::*;
    use crate::names::MAX_NAME_LEN;

    fn meta_with_title(title: &str) -> Metadata {
        Metadata {
            title: Some(title.into()),
            ..Metadata::default()
        }
    }

    pub(crate) fn create_then_read(store: &dyn VersionedStore) {
        let commit = store.create("test.pl", b"foo.", &meta_with_title("t")).unwrap();
        assert!(commit.previous.is_none());
        assert_eq!(commit.name, "test.pl");

        let version = store.read("test.pl").unwrap();
        assert_eq!(version.content, b"foo.");
        assert_eq!(version.meta().title.as_deref(), Some("t"));
        assert_eq!(version.commit, commit);
    }

    pub(crate) fn create_rejects_existing_name(store: &dyn VersionedStore) {
        store.create("dup.pl", b"a", &Metadata::new()).unwrap();
        let err = store.create("dup.pl", b"b", &Metadata::new()).unwrap_err();
        assert!(matches!(err, StoreError::FileExists(name) if name == "dup.pl"));
        assert_eq!(store.read("dup.pl").unwrap().content, b"a");
    }

    pub(crate) fn create_validates_names(store: &dyn VersionedStore) {
        let err = store.create("../x.pl", b"a", &Metadata::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidName { .. }));
    }

    pub(crate) fn update_appends_version(store: &dyn VersionedStore) {
        let first = store.create("doc.pl", b"v1", &Metadata::new()).unwrap();
        let second = store.update("doc.pl", b"v2", &meta_with_title("2")).unwrap();
        assert_eq!(second.previous, Some(first.commit));
        assert_eq!(store.read("doc.pl").unwrap().content, b"v2");
        assert_eq!(store.head("doc.pl").unwrap(), Some(second.commit));
    }

    pub(crate) fn update_missing_document_fails(store: &dyn VersionedStore) {
        let err = store.update("missing.pl", b"x", &Metadata::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    pub(crate) fn read_by_hash_returns_exact_version(store: &dyn VersionedStore) {
        let first = store.create("h.pl", b"old", &meta_with_title("old")).unwrap();
        store.update("h.pl", b"new", &meta_with_title("new")).unwrap();
        let version = store.read(&first.commit.to_hex()).unwrap();
        assert_eq!(version.content, b"old");
        assert_eq!(version.meta().title.as_deref(), Some("old"));
        assert_eq!(version.name(), "h.pl");
    }

    pub(crate) fn read_unknown_is_not_found(store: &dyn VersionedStore) {
        assert!(matches!(store.read("nope.pl"), Err(StoreError::NotFound(_))));
        let unknown = "0".repeat(40);
        assert!(matches!(store.read(&unknown), Err(StoreError::NotFound(_))));
    }

    pub(crate) fn history_is_newest_first_and_bounded(store: &dyn VersionedStore) {
        store.create("hist.pl", b"1", &Metadata::new()).unwrap();
        store.update("hist.pl", b"2", &Metadata::new()).unwrap();
        store.update("hist.pl", b"", &Metadata::new()).unwrap();

        let all = store.history("hist.pl", 10).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].is_empty());
        assert_eq!(all[0].previous, Some(all[1].commit));
        assert_eq!(store.read_commit(&all[2].commit).unwrap().content, b"1");

        let bounded = store.history("hist.pl", 2).unwrap();
        assert_eq!(bounded.len(), 2);
        assert!(matches!(store.history("missing.pl", 5), Err(StoreError::NotFound(_))));
    }

    pub(crate) fn documents_and_latest_metadata(store: &dyn VersionedStore) {
        store.create("b.pl", b"", &meta_with_title("b")).unwrap();
        store.create("a.pl", b"", &meta_with_title("a")).unwrap();
        store.update("a.pl", b"", &meta_with_title("a2")).unwrap();
        assert_eq!(store.documents().unwrap(), vec!["a.pl".to_string(), "b.pl".to_string()]);
        assert_eq!(store.latest_metadata("a.pl").unwrap().title.as_deref(), Some("a2"));
        assert!(store.exists("b.pl").unwrap());
        assert!(!store.exists("c.pl").unwrap());
    }

    pub(crate) fn long_names_are_stored(store: &dyn VersionedStore) {
        let name = format!("{}.pl", "a".repeat(200));
        assert!(!store.exists(&name).unwrap());
        store.create(&name, b"long", &Metadata::new()).unwrap();
        assert_eq!(store.read(&name).unwrap().content, b"long");
        assert_eq!(store.documents().unwrap(), vec![name.clone()]);

        let longest = "b".repeat(MAX_NAME_LEN);
        store.create(&longest, b"", &Metadata::new()).unwrap();
        store.update(&longest, b"v2", &Metadata::new()).unwrap();
        assert_eq!(store.history(&longest, 5).unwrap().len(), 2);

        let too_long = "c".repeat(MAX_NAME_LEN + 40);
        assert!(!store.exists(&too_long).unwrap());
        assert!(matches!(store.read(&too_long), Err(StoreError::NotFound(_))));
    }

    pub(crate) fn run_all(make: impl Fn() -> Box<dyn VersionedStore>) {
        create_then_read(make().as_ref());
        create_rejects_existing_name(make().as_ref());
        create_validates_names(make().as_ref());
        update_appends_version(make().as_ref());
        update_missing_document_fails(make().as_ref());
        read_by_hash_returns_exact_version(make().as_ref());
        read_unknown_is_not_found(make().as_ref());
        history_is_newest_first_and_bounded(make().as_ref());
        documents_and_latest_metadata(make().as_ref());
        long_names_are_stored(make().as_ref());
    }
}
