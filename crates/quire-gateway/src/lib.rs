//! Storage gateway for quire.
//!
//! Turns decoded create/read/update/delete/history/search requests into
//! operations on a [`VersionedStore`](quire_store::VersionedStore):
//!
//! - [`filter`] whitelists untrusted client metadata.
//! - [`authenticity`] derives server-trusted metadata (`user`, `peer`).
//! - [`resolve`] decides whether a path names a document or a content hash.
//! - [`allocate`] picks collision-free random names for anonymous uploads.
//! - [`Gateway`] combines them into the request operations.

pub mod allocate;
pub mod auth;
pub mod authenticity;
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod request;
pub mod resolve;
pub mod search;

pub use auth::{AuthProvider, Credentials, NoAuth, RequestContext, StaticTokenAuth};
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use filter::filter_metadata;
pub use gateway::Gateway;
pub use request::{CreateOutcome, CreateRequest, Document, DocumentInfo, UpdateRequest};
pub use resolve::Resolved;
pub use search::Search;
