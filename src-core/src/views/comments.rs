// FICHIER : src-core/src/views/comments.rs

use super::state::{ViewSlot, ViewState};
use crate::auth::require_session;
use crate::models::Comment;
use crate::utils::{AppError, VitrineResult};
use crate::AppContext;
use tracing::{info, warn};

/// Fil de commentaires d'un item.
pub struct CommentsView {
    ctx: AppContext,
    item_id: u64,
    slot: ViewSlot<Vec<Comment>>,
    last_error: Option<String>,
}

impl CommentsView {
    pub fn open(ctx: &AppContext, item_id: u64) -> Self {
        let view = Self {
            ctx: ctx.clone(),
            item_id,
            slot: ViewSlot::new(),
            last_error: None,
        };
        view.reload();
        view
    }

    pub fn reload(&self) {
        let backend = self.ctx.backend.clone();
        let item_id = self.item_id;
        self.slot
            .spawn(async move { backend.list_comments(item_id).await });
    }

    pub async fn settled(&self) -> ViewState<Vec<Comment>> {
        self.slot.settled().await;
        self.slot.snapshot()
    }

    pub fn state(&self) -> ViewState<Vec<Comment>> {
        self.slot.snapshot()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Auteur du commentaire ou administrateur.
    pub fn can_edit(&self, comment: &Comment) -> bool {
        match self.ctx.current_user() {
            Some(user) => self.ctx.session.is_admin() || comment.author_id() == Some(user.id),
            None => false,
        }
    }

    fn find(&self, id: u64) -> Option<Comment> {
        self.slot
            .with(|state| state.data().and_then(|list| list.iter().find(|c| c.id == id).cloned()))
    }

    fn check_edit(&mut self, id: u64) -> VitrineResult<()> {
        let allowed = match self.find(id) {
            Some(comment) => self.can_edit(&comment),
            None => self.ctx.session.is_admin(),
        };
        if allowed {
            return Ok(());
        }
        let err = AppError::AuthRequired(self.ctx.tr().t("access_denied"));
        self.last_error = Some(err.user_message());
        Err(err)
    }

    fn record(&mut self, result: &VitrineResult<()>) {
        self.last_error = match result {
            Ok(()) => None,
            Err(e) => {
                warn!(item = self.item_id, "❌ Action sur commentaire refusée : {}", e);
                Some(e.user_message())
            }
        };
    }

    /// Sans session : erreur `comment_rule`, aucune requête. Liste rechargée après l'envoi.
    pub async fn post(&mut self, text: &str) -> VitrineResult<Comment> {
        let user = require_session(&self.ctx.session, "comment_rule", self.ctx.tr())?;
        match self
            .ctx
            .backend
            .create_comment(self.item_id, user.id, text)
            .await
        {
            Ok(comment) => {
                info!(item = self.item_id, comment = comment.id, "💬 Commentaire publié");
                self.last_error = None;
                self.reload();
                self.slot.settled().await;
                Ok(comment)
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn edit(&mut self, id: u64, text: &str) -> VitrineResult<()> {
        self.check_edit(id)?;
        let result = self.ctx.backend.update_comment(id, text).await;
        if result.is_ok() {
            self.slot.update(|list| {
                if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                    c.text = text.to_string();
                }
            });
        }
        self.record(&result);
        result
    }

    pub async fn delete(&mut self, id: u64) -> VitrineResult<()> {
        self.check_edit(id)?;
        let result = self.ctx.backend.delete_comment(id).await;
        if result.is_ok() {
            self.slot.update(|list| list.retain(|c| c.id != id));
        }
        self.record(&result);
        result
    }
}
