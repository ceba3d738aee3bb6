// FICHIER : src-core/src/models/mod.rs

//! Modèles métier, aplatis depuis les enveloppes du backend par `backend::adapter`.

pub mod collection;
pub mod item;
pub mod social;
pub mod user;

pub use collection::{Category, Collection, CollectionRef};
pub use item::Item;
pub use social::{Author, Comment, Like, Tag};
pub use user::{Role, User, UserCollection};

use serde::{Deserialize, Serialize};

/// Média téléversé, URL déjà absolue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    pub name: Option<String>,
}

/// Propriétaire d'une collection ou d'un item.
/// `user_id` est l'UUID applicatif, `account_id` l'id numérique du compte.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OwnerRef {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub account_id: Option<u64>,
}

impl OwnerRef {
    pub fn of(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            user_name: Some(user.username.clone()),
            account_id: Some(user.id),
        }
    }

    /// Vrai si `user` est ce propriétaire (UUID applicatif ou id de compte).
    pub fn is(&self, user: &User) -> bool {
        let by_uuid = matches!((&self.user_id, &user.user_id), (Some(a), Some(b)) if a == b);
        by_uuid || self.account_id == Some(user.id)
    }
}
