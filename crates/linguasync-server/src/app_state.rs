//! Shared application state for the relay server.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::registry::Registry;
use crate::relay::Router;
use crate::translate::Translator;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Arc<Registry>,
    relay: Router,
}

impl AppState {
    pub fn new(cfg: ServerConfig, translator: Arc<dyn Translator>) -> Self {
        let registry = Arc::new(Registry::new());
        let relay = Router::new(
            Arc::clone(&registry),
            translator,
            Duration::from_millis(cfg.translator.request_timeout_ms),
        );
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                relay,
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn relay(&self) -> &Router {
        &self.inner.relay
    }
}
