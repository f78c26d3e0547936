use std::sync::Arc;

use quire_store::{Commit, StoreError, VersionedStore};
use quire_types::Metadata;
use serde_json::Value;
use tracing::{debug, info};

use crate::allocate::allocate;
use crate::auth::{AuthProvider, RequestContext};
use crate::authenticity::{collect, merge};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::filter::filter_metadata;
use crate::request::{CreateOutcome, CreateRequest, Document, DocumentInfo, UpdateRequest};
use crate::resolve::{candidate, resolve, resolve_file, Resolved};
use crate::search::Search;

/// Maps decoded requests onto versioned-store operations.
///
/// Holds no per-request state; one instance serves all requests
/// concurrently.
pub struct Gateway {
    config: GatewayConfig,
    store: Arc<dyn VersionedStore>,
    auth: Arc<dyn AuthProvider>,
}

impl Gateway {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn VersionedStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self { config, store, auth }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn VersionedStore {
        self.store.as_ref()
    }

    /// Authoritative metadata for a write: authenticity fields with the
    /// filtered client fields on top.
    async fn write_metadata(&self, ctx: &RequestContext, raw: Option<&Value>) -> Metadata {
        let authenticity = collect(self.auth.as_ref(), ctx).await;
        merge(authenticity, filter_metadata(raw))
    }

    fn info(&self, file: String, meta: Metadata) -> DocumentInfo {
        DocumentInfo {
            url: self.config.url_for(&file),
            file,
            meta,
        }
    }

    /// Create a new document.
    ///
    /// With an explicit base name the document is created as
    /// `<base>.<type>` or, if that name is taken, reported as
    /// [`CreateOutcome::FileExists`] without retrying. Without one a random
    /// name is allocated.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateRequest,
    ) -> GatewayResult<CreateOutcome> {
        let meta = self.write_metadata(ctx, req.meta.as_ref()).await;
        let kind = req.kind.as_deref().unwrap_or(&self.config.default_type);
        let content = req.data.as_deref().unwrap_or_default().as_bytes();

        let (file, commit) = match req.base_name() {
            Some(base) => {
                let file = format!("{base}.{kind}");
                match self.store.create(&file, content, &meta) {
                    Ok(commit) => (file, commit),
                    Err(StoreError::FileExists(file)) => {
                        debug!(file = %file, "explicit name already taken");
                        return Ok(CreateOutcome::FileExists { file });
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => allocate(
                self.store.as_ref(),
                kind,
                content,
                &meta,
                self.config.max_allocation_attempts,
            )?,
        };
        log_write("created", &file, &commit);
        Ok(CreateOutcome::Created(self.info(file, meta)))
    }

    /// Write a new version of an existing document.
    ///
    /// Metadata is always recomputed from the request. A metadata-only update
    /// carries the current content forward unchanged.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        path: &str,
        req: UpdateRequest,
    ) -> GatewayResult<DocumentInfo> {
        let file = resolve_file(self.store.as_ref(), path)?;
        let content = if req.is_metadata_only() {
            self.store.read(&file)?.content
        } else {
            req.data.unwrap_or_default().into_bytes()
        };
        let meta = self.write_metadata(ctx, req.meta.as_ref()).await;
        let commit = self.store.update(&file, &content, &meta)?;
        log_write("updated", &file, &commit);
        Ok(self.info(file, meta))
    }

    /// Logically delete a document by writing an empty version that carries
    /// only authenticity metadata. Earlier versions stay in history.
    pub async fn delete(&self, ctx: &RequestContext, path: &str) -> GatewayResult<DocumentInfo> {
        let file = resolve_file(self.store.as_ref(), path)?;
        let meta = collect(self.auth.as_ref(), ctx).await;
        let commit = self.store.update(&file, b"", &meta)?;
        log_write("deleted", &file, &commit);
        Ok(self.info(file, meta))
    }

    /// Interpret a request path as a document name or content hash.
    pub fn resolve(&self, path: &str) -> GatewayResult<Resolved> {
        resolve(self.store.as_ref(), path)
    }

    /// Fetch content and metadata for a document name or content hash.
    pub fn read(&self, path: &str) -> GatewayResult<Document> {
        let id = self.resolve(path)?;
        let version = match &id {
            Resolved::File(name) => self.store.read(name)?,
            Resolved::Hash(hash) => self.store.read_commit(hash)?,
        };
        Ok(Document { id, version })
    }

    /// Up to `depth` commits of a document, newest first.
    ///
    /// Only document names are accepted; a content hash has no history.
    pub fn history(&self, path: &str, depth: Option<usize>) -> GatewayResult<Vec<Commit>> {
        let file = candidate(path);
        if !self.store.exists(file)? {
            return Err(GatewayError::NotFound(file.to_string()));
        }
        let depth = depth.unwrap_or(self.config.history_depth);
        Ok(self.store.history(file, depth)?)
    }

    /// Typeahead search: documents whose name or any tag starts with `query`.
    pub fn search(&self, query: &str) -> GatewayResult<Search<'_>> {
        Search::new(self.store.as_ref(), &self.config, query)
    }
}

fn log_write(action: &str, file: &str, commit: &Commit) {
    info!(file, commit = %commit.commit, size = commit.size, "{action} document");
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
