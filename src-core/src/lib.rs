// FICHIER : src-core/src/lib.rs

pub mod utils;

pub mod models;
pub mod schema;

pub mod auth;
pub mod backend;
pub mod editor;
pub mod table;
pub mod tickets;
pub mod views;

use crate::auth::SessionStore;
use crate::backend::{ContentBackend, HttpBackend};
use crate::models::User;
use crate::tickets::TicketClient;
use crate::utils::config::EndpointsConfig;
use crate::utils::i18n::Translator;
use crate::utils::{AppConfig, VitrineResult};
use std::sync::Arc;

/// Contexte partagé par toutes les vues : session, langue et backend.
/// Clonable à bas coût ; chaque vue garde sa propre copie.
#[derive(Clone)]
pub struct AppContext {
    pub endpoints: EndpointsConfig,
    pub session: Arc<SessionStore>,
    pub translator: Arc<Translator>,
    pub backend: Arc<dyn ContentBackend>,
}

impl AppContext {
    pub fn new(
        endpoints: EndpointsConfig,
        session: Arc<SessionStore>,
        translator: Arc<Translator>,
        backend: Arc<dyn ContentBackend>,
    ) -> Self {
        Self {
            endpoints,
            session,
            translator,
            backend,
        }
    }

    /// Assemblage standard : jar de cookies sur disque + backend HTTP.
    pub async fn from_config(config: &AppConfig, translator: Arc<Translator>) -> VitrineResult<Self> {
        let session = Arc::new(
            SessionStore::open(config.cookie_jar_path(), config.session.clone()).await?,
        );
        let backend = HttpBackend::from_config(&config.endpoints, Arc::clone(&session))?;
        Ok(Self::new(
            config.endpoints.clone(),
            session,
            translator,
            Arc::new(backend),
        ))
    }

    pub fn tr(&self) -> &Translator {
        &self.translator
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn tickets(&self) -> VitrineResult<TicketClient> {
        TicketClient::from_config(&self.endpoints)
    }
}
