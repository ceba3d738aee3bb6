// FICHIER : src-core/src/auth/cookies.rs

use crate::utils::io::{exists, read_json, remove_file, write_json_atomic, Path};
use crate::utils::VitrineResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Noms des cookies persistés.
pub const JWT_COOKIE: &str = "JWT";
pub const USER_COOKIE: &str = "me";
pub const THEME_COOKIE: &str = "theme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

/// Jar de cookies à expiration individuelle, persisté en JSON.
/// Un cookie expiré est ignoré à la lecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: BTreeMap<String, StoredCookie>,
}

impl CookieJar {
    /// Jar absent = jar vide.
    pub async fn load(path: &Path) -> VitrineResult<Self> {
        if !exists(path).await {
            return Ok(Self::default());
        }
        read_json(path).await
    }

    pub async fn save(&self, path: &Path) -> VitrineResult<()> {
        if self.cookies.is_empty() {
            return remove_file(path).await;
        }
        write_json_atomic(path, self).await
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_at(name, Utc::now())
    }

    pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|c| c.expires_at > now)
            .map(|c| c.value.as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>, days: i64) {
        self.cookies.insert(
            name.to_string(),
            StoredCookie {
                value: value.into(),
                expires_at: Utc::now() + Duration::days(days),
            },
        );
    }

    pub fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    /// Retire les cookies expirés (appelé avant écriture).
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.cookies.retain(|_, c| c.expires_at > now);
    }
}
