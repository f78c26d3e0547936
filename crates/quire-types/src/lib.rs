//! Foundation types for quire.
//!
//! Every other quire crate depends on `quire-types`.
//!
//! # Key Types
//!
//! - [`ContentHash`] -- 40-hex identifier of one immutable stored version
//! - [`Metadata`] -- the fixed-schema metadata record attached to a version

pub mod error;
pub mod hash;
pub mod metadata;

pub use error::TypeError;
pub use hash::{ContentHash, HASH_HEX_LEN, HASH_LEN};
pub use metadata::Metadata;
