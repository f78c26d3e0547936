//! Hashing primitives for quire.
//!
//! Provides the domain-separated BLAKE3 hasher used to address content blobs
//! and commit records.

pub mod hasher;

pub use hasher::ContentHasher;
