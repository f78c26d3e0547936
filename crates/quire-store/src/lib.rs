//! Versioned, content-addressed document store for quire.
//!
//! Documents are mutable names; every write appends an immutable commit
//! whose hash identifies that exact version forever. Content blobs and
//! commit records are addressed by domain-separated BLAKE3 hashes.
//!
//! # Storage Backends
//!
//! All backends implement the [`VersionedStore`] trait:
//!
//! - [`InMemoryStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsStore`] -- plain files under a storage root
//!
//! # Design Rules
//!
//! 1. Commits and blobs are immutable once written.
//! 2. `create` is atomic with respect to name existence.
//! 3. Deleting a document means writing an empty version; history is kept.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod commit;
pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use commit::{Commit, CommitRecord, Version};
pub use error::{StoreError, StoreResult};
pub use fs::FsStore;
pub use memory::InMemoryStore;
pub use traits::VersionedStore;
