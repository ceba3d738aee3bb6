// FICHIER : src-core/src/tickets/mod.rs

//! Client du service de ticketing (signalements d'utilisateurs).

pub mod model;

pub use model::{total_pages, Priority, Ticket, TicketDraft, TicketPage, PAGE_SIZE};

use crate::backend::ResourceQuery;
use crate::models::User;
use crate::utils::config::EndpointsConfig;
use crate::utils::i18n::Translator;
use crate::utils::net::{get_client, send_json};
use crate::utils::{AppError, VitrineResult};
use model::{start_at, CreatedIssue, IssuePage};
use serde::Serialize;
use tracing::{info, instrument, warn};
use url::Url;

#[derive(Serialize)]
struct CreateTicketBody<'a> {
    summary: &'a str,
    priority: Priority,
    link: &'a str,
    collection: &'a str,
    user: &'a User,
}

pub struct TicketClient {
    base_url: String,
    browse_url: Option<String>,
}

impl TicketClient {
    pub fn new(base_url: &str, browse_url: Option<&str>) -> VitrineResult<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            browse_url: browse_url.map(str::to_string),
        })
    }

    /// Erreur de configuration si `backend_url` est absent.
    pub fn from_config(endpoints: &EndpointsConfig) -> VitrineResult<Self> {
        let base = endpoints.backend_url.as_deref().ok_or_else(|| {
            AppError::Config("endpoints.backend_url absent (service de tickets)".to_string())
        })?;
        Self::new(base, endpoints.ticket_browse_url.as_deref())
    }

    /// Crée le ticket et renvoie l'URL de l'issue. Le formulaire est validé avant tout envoi.
    #[instrument(skip(self, draft, user, tr), fields(user_id = user.id))]
    pub async fn create(&self, draft: &TicketDraft, user: &User, tr: &Translator) -> VitrineResult<String> {
        draft.validate(tr)?;

        let query = ResourceQuery::new("create-ticket");
        let url = query.to_url(&self.base_url)?;
        let body = CreateTicketBody {
            summary: &draft.summary,
            priority: draft.priority,
            link: &draft.link,
            collection: &draft.collection,
            user,
        };

        match send_json::<CreatedIssue>(get_client().post(url).json(&body), &query.to_string()).await {
            Ok(created) => {
                info!(issue = %created.issue_url, "🎫 Ticket créé");
                Ok(created.issue_url)
            }
            Err(e) => {
                warn!("❌ Échec de création du ticket : {}", e);
                Err(e)
            }
        }
    }

    /// Tickets signalés par `reported_by` (email), page `page` (à partir de 1).
    #[instrument(skip(self))]
    pub async fn list(&self, reported_by: &str, page: u64) -> VitrineResult<TicketPage> {
        let page = page.max(1);
        let query = ResourceQuery::new("tickets")
            .param("reportedBy", reported_by)
            .param("startAt", start_at(page)?)
            .param("maxResults", PAGE_SIZE);
        let url = query.to_url(&self.base_url)?;

        let raw: IssuePage = send_json(get_client().get(url), &query.to_string()).await?;
        let browse = self.browse_url.as_deref();
        Ok(TicketPage {
            tickets: raw
                .issues
                .into_iter()
                .map(|issue| Ticket::from_raw(issue, browse))
                .collect(),
            page,
            total: raw.total,
            total_pages: total_pages(raw.total),
        })
    }
}
