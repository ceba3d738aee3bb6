// FICHIER : src-core/src/views/likes.rs

use crate::auth::require_session;
use crate::models::User;
use crate::utils::VitrineResult;
use crate::AppContext;
use tracing::info;

/// État du bouton "j'aime" pour l'utilisateur courant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub like_id: Option<u64>,
}

pub struct LikeToggle {
    ctx: AppContext,
    item_id: u64,
    /// `None` tant que l'état n'a pas été lu sur le backend.
    state: Option<LikeState>,
}

/// Clé de recherche des likes : UUID applicatif, à défaut l'id de compte.
fn liker_key(user: &User) -> String {
    user.user_id.clone().unwrap_or_else(|| user.id.to_string())
}

impl LikeToggle {
    pub fn new(ctx: &AppContext, item_id: u64) -> Self {
        Self {
            ctx: ctx.clone(),
            item_id,
            state: None,
        }
    }

    /// État connu ; "pas aimé" tant que rien n'a été lu.
    pub fn state(&self) -> LikeState {
        self.state.unwrap_or_default()
    }

    /// Sans session : "pas aimé", sans requête (et rien n'est mémorisé).
    pub async fn refresh(&mut self) -> VitrineResult<LikeState> {
        let Some(user) = self.ctx.current_user() else {
            self.state = None;
            return Ok(LikeState::default());
        };
        let like = self
            .ctx
            .backend
            .find_like(self.item_id, &liker_key(&user))
            .await?;
        let state = LikeState {
            liked: like.is_some(),
            like_id: like.map(|l| l.id),
        };
        self.state = Some(state);
        Ok(state)
    }

    /// Crée ou supprime le like. Sans session : erreur `like_rule`.
    /// L'état est lu sur le backend avant le premier basculement.
    pub async fn toggle(&mut self) -> VitrineResult<LikeState> {
        let user = require_session(&self.ctx.session, "like_rule", self.ctx.tr())?;

        let current = match self.state {
            Some(state) if !(state.liked && state.like_id.is_none()) => state,
            _ => self.refresh().await?,
        };

        let next = match (current.liked, current.like_id) {
            (true, Some(like_id)) => {
                self.ctx.backend.delete_like(like_id).await?;
                info!(item = self.item_id, "💔 Like retiré");
                LikeState::default()
            }
            _ => {
                let like = self.ctx.backend.create_like(self.item_id, &user).await?;
                info!(item = self.item_id, "❤️ Item aimé");
                LikeState {
                    liked: true,
                    like_id: Some(like.id),
                }
            }
        };
        self.state = Some(next);
        Ok(next)
    }
}
