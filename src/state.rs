//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::AliasService;

/// Basic-auth credentials guarding the alias management routes.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// State cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AliasService>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(alias_service: Arc<AliasService>, credentials: Credentials) -> Self {
        Self {
            alias_service,
            credentials: Arc::new(credentials),
        }
    }
}
