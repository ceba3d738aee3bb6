// FICHIER : src-core/src/models/social.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Auteur résolu d'un commentaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: u64,
    pub text: String,
    pub author: Option<Author>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn author_id(&self) -> Option<u64> {
        self.author.as_ref().map(|a| a.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Like {
    pub id: u64,
    /// UUID applicatif de l'utilisateur qui aime.
    pub user_liked_id: Option<String>,
    pub item_id: Option<u64>,
}

/// Entrée du vocabulaire global de tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: u64,
    pub label: String,
}
