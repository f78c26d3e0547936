use quire_types::ContentHash;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g. `"quire-blob-v1"`) that is
/// prepended to every hash computation, so a blob and a commit record with
/// identical bytes never share a hash.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for content blobs.
    pub const BLOB: Self = Self {
        domain: "quire-blob-v1",
    };
    /// Hasher for commit records.
    pub const COMMIT: Self = Self {
        domain: "quire-commit-v1",
    };
    /// Hasher for document names; keys head files of the filesystem store.
    pub const NAME: Self = Self {
        domain: "quire-name-v1",
    };

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentHash::from_digest(hasher.finalize().as_bytes())
    }

    /// Verify that data produces the expected hash.
    pub fn verify(&self, data: &[u8], expected: &ContentHash) -> bool {
        self.hash(data) == *expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::BLOB.hash(data), ContentHasher::BLOB.hash(data));
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        assert_ne!(ContentHasher::BLOB.hash(data), ContentHasher::COMMIT.hash(data));
    }

    #[test]
    fn hashes_are_hash_shaped() {
        let id = ContentHasher::BLOB.hash(b"foo.");
        assert!(ContentHash::is_hash_shaped(&id.to_hex()));
    }

    #[test]
    fn verify_detects_tampering() {
        let id = ContentHasher::BLOB.hash(b"original");
        assert!(ContentHasher::BLOB.verify(b"original", &id));
        assert!(!ContentHasher::BLOB.verify(b"tampered", &id));
    }

    #[test]
    fn name_domain_is_separate() {
        assert_ne!(ContentHasher::NAME.hash(b"test.pl"), ContentHasher::BLOB.hash(b"test.pl"));
        assert_ne!(ContentHasher::NAME.hash(b"test.pl"), ContentHasher::COMMIT.hash(b"test.pl"));
    }
}
