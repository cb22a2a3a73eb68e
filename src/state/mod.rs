//! Shared application state
//!
//! Handed to every axum handler and middleware through `State`.

use std::sync::Arc;
use crate::config::Settings;
use crate::database::DatabasePool;
use crate::services::ServiceFactory;

#[derive(Clone, Debug)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    pub fn new(pool: DatabasePool, settings: Settings) -> Self {
        Self {
            services: Arc::new(ServiceFactory::new(pool, settings)),
        }
    }
}
