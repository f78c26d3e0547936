use std::sync::Arc;

use quire_gateway::Gateway;

use crate::render::{HtmlRenderer, Renderer};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub renderer: Arc<dyn Renderer>,
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// State with the default HTML renderer, ignoring `X-Forwarded-For`.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            renderer: Arc::new(HtmlRenderer),
            trust_forwarded_for: false,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gateway", &self.gateway)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish_non_exhaustive()
    }
}
