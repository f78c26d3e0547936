//! HTTP server for quire.
//!
//! Exposes the storage gateway over HTTP: documents live under `/p/`,
//! `format=raw|history|swish` selects how a read is presented, and
//! `/typeahead` serves incremental search.
//!
//! The recorded `peer` of a write is the socket address of the connection.
//! Set [`ServerConfig::trust_forwarded_for`] when running behind a reverse
//! proxy to take it from the first `X-Forwarded-For` hop instead.

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod mime;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use context::Ctx;
pub use error::{ServerError, ServerResult};
pub use render::{HtmlRenderer, Renderer};
pub use server::QuireServer;
pub use state::AppState;
