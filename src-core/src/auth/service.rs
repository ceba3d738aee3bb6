// FICHIER : src-core/src/auth/service.rs

use super::session::SessionStore;
use crate::backend::{AuthGateway, AuthResponse, Credentials, Registration, UserStore};
use crate::models::User;
use crate::utils::VitrineResult;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Connexion / inscription / restauration de session.
pub struct AuthService<'a, B: ?Sized> {
    backend: &'a B,
    session: &'a SessionStore,
}

impl<'a, B> AuthService<'a, B>
where
    B: AuthGateway + UserStore + ?Sized,
{
    pub fn new(backend: &'a B, session: &'a SessionStore) -> Self {
        Self { backend, session }
    }

    /// Identifiants refusés : aucun cookie n'est posé et l'erreur du backend
    /// remonte telle quelle (`AppError::Backend`).
    #[instrument(skip(self, password))]
    pub async fn login(&self, identifier: &str, password: &str) -> VitrineResult<User> {
        let credentials = Credentials {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self.backend.login(&credentials).await?;
        self.open_session(response).await
    }

    /// Inscription avec un `user_id` UUID généré côté client.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, email: &str, password: &str) -> VitrineResult<User> {
        let registration = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            user_id: Uuid::new_v4().to_string(),
        };
        let response = self.backend.register(&registration).await?;
        self.open_session(response).await
    }

    /// Session restaurée sans rôle : on le redemande au backend.
    pub async fn restore(&self) -> VitrineResult<Option<User>> {
        let Some(user) = self.session.user() else {
            return Ok(None);
        };
        if user.role.is_some() {
            return Ok(Some(user));
        }
        match self.backend.me().await {
            Ok(me) if me.role.is_some() => {
                self.session.start(me.clone()).await?;
                Ok(Some(me))
            }
            Ok(_) => Ok(Some(user)),
            Err(e) => {
                warn!("⚠️ Rôle introuvable pour la session restaurée : {}", e);
                Ok(Some(user))
            }
        }
    }

    pub async fn logout(&self) -> VitrineResult<()> {
        self.session.logout().await
    }

    /// Jeton d'abord (pour que `/users/me` soit authentifié), puis instantané avec rôle.
    async fn open_session(&self, response: AuthResponse) -> VitrineResult<User> {
        self.session.set_token(&response.jwt).await?;

        let mut user = response.user;
        match self.backend.me().await {
            Ok(me) => {
                if me.role.is_some() {
                    user.role = me.role;
                }
            }
            Err(e) => warn!("⚠️ Impossible de charger le rôle : {}", e),
        }

        self.session.start(user.clone()).await?;
        info!(user = user.id, role = ?user.role_type(), "✅ Connecté");
        Ok(user)
    }
}
