use std::sync::Arc;

use chrono::{DateTime, Utc};

use recomtree_core::{Authenticator, CatalogService, CommandDispatcher, Config};

/// Shared server state
pub struct ServerState {
    config: Config,
    service: Arc<CatalogService>,
    dispatcher: CommandDispatcher,
    authenticator: Arc<dyn Authenticator>,
    started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(
        config: Config,
        service: Arc<CatalogService>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            config,
            dispatcher: CommandDispatcher::new(Arc::clone(&service)),
            service,
            authenticator,
            started_at: Utc::now(),
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
