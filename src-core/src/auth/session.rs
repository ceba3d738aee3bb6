// FICHIER : src-core/src/auth/session.rs

use super::cookies::{CookieJar, JWT_COOKIE, THEME_COOKIE, USER_COOKIE};
use crate::models::{Role, User};
use crate::utils::config::SessionConfig;
use crate::utils::{json, VitrineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    jar: CookieJar,
    user: Option<User>,
}

/// Session persistée : jeton porteur, instantané utilisateur (avec rôle) et thème.
/// Les accesseurs sont en lecture seule ; seules les opérations ci-dessous écrivent.
#[derive(Debug)]
pub struct SessionStore {
    jar_path: Option<PathBuf>,
    lifetimes: SessionConfig,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Session non persistée (tests, usage éphémère).
    pub fn in_memory(lifetimes: SessionConfig) -> Self {
        Self {
            jar_path: None,
            lifetimes,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Ouvre le jar de cookies. L'utilisateur n'est restauré que si le jeton ET
    /// l'instantané sont présents et lisibles.
    pub async fn open(jar_path: PathBuf, lifetimes: SessionConfig) -> VitrineResult<Self> {
        let jar = CookieJar::load(&jar_path).await?;

        let user = match (jar.get(JWT_COOKIE), jar.get(USER_COOKIE)) {
            (Some(_), Some(snapshot)) => match json::parse::<User>(snapshot) {
                Ok(u) => Some(u),
                Err(e) => {
                    warn!("⚠️ Instantané utilisateur illisible, session ignorée : {}", e);
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            jar_path: Some(jar_path),
            lifetimes,
            state: RwLock::new(SessionState { jar, user }),
        })
    }

    // --- LECTURE ---

    pub fn token(&self) -> Option<String> {
        self.read(|s| s.jar.get(JWT_COOKIE).map(str::to_string))
    }

    pub fn user(&self) -> Option<User> {
        self.read(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|s| s.user.is_some())
    }

    /// Type de rôle normalisé en minuscules.
    pub fn role(&self) -> Option<String> {
        self.read(|s| {
            s.user
                .as_ref()
                .and_then(|u| u.role_type())
                .map(str::to_lowercase)
        })
    }

    pub fn is_admin(&self) -> bool {
        self.read(|s| s.user.as_ref().is_some_and(User::is_admin))
    }

    pub fn theme(&self) -> Theme {
        self.read(|s| s.jar.get(THEME_COOKIE).map(Theme::parse).unwrap_or_default())
    }

    // --- ÉCRITURE ---

    pub async fn set_token(&self, jwt: &str) -> VitrineResult<()> {
        let days = self.lifetimes.token_days;
        self.write(|s| s.jar.set(JWT_COOKIE, jwt, days));
        self.persist().await
    }

    /// Enregistre l'instantané utilisateur (cookie `me`).
    pub async fn start(&self, user: User) -> VitrineResult<()> {
        let snapshot = json::stringify(&user)?;
        let days = self.lifetimes.user_days;
        info!(user = user.id, "🔐 Session ouverte");
        self.write(|s| {
            s.jar.set(USER_COOKIE, snapshot, days);
            s.user = Some(user);
        });
        self.persist().await
    }

    pub async fn logout(&self) -> VitrineResult<()> {
        self.write(|s| {
            s.jar.remove(JWT_COOKIE);
            s.jar.remove(USER_COOKIE);
            s.user = None;
        });
        info!("🔓 Session fermée");
        self.persist().await
    }

    /// Remplace le type de rôle de l'instantané (après une action admin sur soi-même).
    pub async fn update_role(&self, role_type: &str) -> VitrineResult<()> {
        let Some(mut user) = self.user() else {
            return Ok(());
        };
        let role = match user.role.take() {
            Some(mut r) => {
                r.role_type = role_type.to_lowercase();
                r
            }
            None => Role::of_type(role_type),
        };
        user.role = Some(role);
        self.start(user).await
    }

    pub async fn toggle_theme(&self) -> VitrineResult<Theme> {
        let next = self.theme().toggled();
        let days = self.lifetimes.theme_days;
        self.write(|s| s.jar.set(THEME_COOKIE, next.as_str(), days));
        self.persist().await?;
        Ok(next)
    }

    // --- INTERNE ---

    fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        match self.state.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        match self.state.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }

    /// Copie du jar écrite hors verrou.
    async fn persist(&self) -> VitrineResult<()> {
        let Some(path) = &self.jar_path else {
            return Ok(());
        };
        let mut jar = self.read(|s| s.jar.clone());
        jar.purge_expired();
        jar.save(path).await
    }
}
