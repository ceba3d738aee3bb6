// FICHIER : src-core/src/tickets/model.rs

use crate::utils::data::Value;
use crate::utils::i18n::Translator;
use crate::utils::{AppError, VitrineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tickets par page dans la liste "mes tickets".
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Priorité inconnue : '{}'", s)))
    }
}

/// Formulaire de signalement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub summary: String,
    pub priority: Priority,
    /// Page d'où le signalement est émis.
    pub link: String,
    /// Nom de la collection concernée.
    pub collection: String,
}

impl TicketDraft {
    /// Résumé et collection obligatoires.
    pub fn validate(&self, tr: &Translator) -> VitrineResult<()> {
        if self.summary.trim().is_empty() || self.collection.trim().is_empty() {
            return Err(AppError::Validation(tr.t("please_fill_in_all_fields")));
        }
        Ok(())
    }
}

/// Réponse de `/create-ticket`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedIssue {
    #[serde(rename = "issueUrl")]
    pub issue_url: String,
}

// --- FORME BRUTE DU SERVICE (issues de suivi) ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssuePage {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawIssue {
    pub id: Value,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub priority: Option<Named>,
    /// Statut du ticket.
    #[serde(default, rename = "customfield_10044")]
    pub status: Option<Valued>,
    /// Collection concernée.
    #[serde(default, rename = "customfield_10035")]
    pub collection: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Valued {
    pub value: Option<String>,
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Ticket aplati pour l'affichage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub collection: Option<String>,
    /// `{browse}/{key}` si l'URL de consultation est configurée.
    pub link: Option<String>,
}

impl Ticket {
    pub(crate) fn from_raw(raw: RawIssue, browse_url: Option<&str>) -> Self {
        let link = browse_url.map(|b| format!("{}/{}", b.trim_end_matches('/'), raw.key));
        Self {
            id: scalar_text(&raw.id),
            summary: raw.fields.summary.unwrap_or_default(),
            status: raw.fields.status.and_then(|s| s.value),
            priority: raw.fields.priority.and_then(|p| p.name),
            collection: raw.fields.collection.as_ref().map(scalar_text),
            key: raw.key,
            link,
        }
    }
}

/// Page de la liste "mes tickets" (pages numérotées à partir de 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
}

pub fn total_pages(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// Décalage `startAt` d'une page (la page 0 est traitée comme la 1).
pub fn start_at(page: u64) -> VitrineResult<u64> {
    page.saturating_sub(1)
        .checked_mul(PAGE_SIZE)
        .ok_or_else(|| AppError::Validation(format!("Page hors limites : {}", page)))
}
