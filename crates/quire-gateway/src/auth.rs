use std::collections::HashMap;
use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::{GatewayError, GatewayResult};

/// Credentials presented with a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    #[default]
    Anonymous,
}

/// What the transport knows about the request being served.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Originating network address, if known.
    pub peer: Option<IpAddr>,
    pub credentials: Credentials,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_peer(mut self, peer: IpAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::Bearer(token.into());
        self
    }
}

/// Pluggable authentication hook.
///
/// The gateway asks it who is making the current request but never
/// implements authentication itself.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the user behind `ctx`; `Ok(None)` when there is none.
    async fn current_user(&self, ctx: &RequestContext) -> GatewayResult<Option<String>>;
}

/// Provider that never identifies a user.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthProvider for NoAuth {
    async fn current_user(&self, _ctx: &RequestContext) -> GatewayResult<Option<String>> {
        Ok(None)
    }
}

/// Provider mapping fixed bearer tokens to user names.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn current_user(&self, ctx: &RequestContext) -> GatewayResult<Option<String>> {
        match &ctx.credentials {
            Credentials::Anonymous => Ok(None),
            Credentials::Bearer(token) => self
                .tokens
                .get(token)
                .cloned()
                .map(Some)
                .ok_or_else(|| {
                    GatewayError::AuthFailed(format!(
                        "unknown bearer token {}…",
                        token.chars().take(4).collect::<String>()
                    ))
                }),
        }
    }
}
