use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Json, Response};
use quire_gateway::{CreateOutcome, CreateRequest, DocumentInfo, UpdateRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::context::Ctx;
use crate::error::ServerResult;
use crate::mime::content_type_for;
use crate::state::AppState;

/// Health check body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<Health> {
    Json(Health::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.gateway.config();
    Json(json!({
        "name": "quire-server",
        "version": env!("CARGO_PKG_VERSION"),
        "url_prefix": config.url_prefix,
        "default_type": config.default_type,
    }))
}

/// How a read request wants the document presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFormat {
    /// Rendered page for the embedded editor.
    #[default]
    Swish,
    Raw,
    History,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub format: ReadFormat,
    pub depth: Option<usize>,
}

/// `GET /p/{name-or-hash}`
pub async fn read_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<ReadQuery>,
) -> ServerResult<Response> {
    let gateway = &state.gateway;
    let response = match query.format {
        ReadFormat::History => Json(gateway.history(&path, query.depth)?).into_response(),
        ReadFormat::Raw => {
            let doc = gateway.read(&path)?;
            let mime = content_type_for(doc.version.name());
            ([(CONTENT_TYPE, mime)], doc.version.content).into_response()
        }
        ReadFormat::Swish => {
            let doc = gateway.read(&path)?;
            Html(state.renderer.render(&doc)).into_response()
        }
    };
    Ok(response)
}

/// `POST /p/`
///
/// A taken explicit name is answered with a `file_exists` body and a
/// success status so clients can offer a different name.
pub async fn create_document(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<CreateRequest>,
) -> ServerResult<Response> {
    let response = match state.gateway.create(&ctx, req).await? {
        CreateOutcome::Created(info) => Json(info).into_response(),
        CreateOutcome::FileExists { file } => {
            Json(json!({"error": "file_exists", "file": file})).into_response()
        }
    };
    Ok(response)
}

/// `PUT /p/{name}`
pub async fn update_document(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(path): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> ServerResult<Json<DocumentInfo>> {
    Ok(Json(state.gateway.update(&ctx, &path, req).await?))
}

/// `DELETE /p/{name}`
pub async fn delete_document(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Path(path): Path<String>,
) -> ServerResult<Json<DocumentInfo>> {
    Ok(Json(state.gateway.delete(&ctx, &path).await?))
}

fn default_limit() -> usize {
    10
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeaheadQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// `GET /typeahead?q=...`
pub async fn typeahead(
    State(state): State<AppState>,
    Query(query): Query<TypeaheadQuery>,
) -> ServerResult<Json<Vec<DocumentInfo>>> {
    let matches = state
        .gateway
        .search(&query.q)?
        .take(query.limit)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(matches))
}
