// FICHIER : src-core/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type de rôle des administrateurs.
pub const ADMIN_ROLE: &str = "admin";
/// Type de rôle des comptes ordinaires.
pub const AUTHENTICATED_ROLE: &str = "authenticated";
/// Identifiants numériques des rôles côté backend.
pub const ADMIN_ROLE_ID: u64 = 3;
pub const AUTHENTICATED_ROLE_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub role_type: String,
}

impl Role {
    pub fn of_type(role_type: &str) -> Self {
        Self {
            id: None,
            name: None,
            role_type: role_type.to_lowercase(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role_type.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

/// Collection listée dans `/users?populate=*` (forme plate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCollection {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Compte utilisateur. Même forme que la réponse `users-permissions`,
/// réutilisée telle quelle pour l'instantané de session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Identifiant applicatif (UUID) posé à l'inscription, distinct de l'id numérique.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<UserCollection>,
}

impl User {
    pub fn role_type(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.role_type.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }
}
