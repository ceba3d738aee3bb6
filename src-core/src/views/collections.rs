// FICHIER : src-core/src/views/collections.rs

use super::state::{ViewSlot, ViewState};
use crate::models::Collection;
use crate::table::RecordTable;
use crate::utils::{AppError, VitrineResult};
use crate::AppContext;
use tracing::{info, warn};

const HEADERS: [&str; 8] = [
    "id",
    "image",
    "name",
    "description",
    "category",
    "items_count",
    "publication_date",
    "last_modified_date",
];

/// Liste des collections (toutes, ou celles d'un propriétaire).
pub struct CollectionsView {
    ctx: AppContext,
    owner_user_id: Option<String>,
    slot: ViewSlot<Vec<Collection>>,
    last_error: Option<String>,
}

impl CollectionsView {
    pub fn open(ctx: &AppContext, owner_user_id: Option<String>) -> Self {
        let view = Self {
            ctx: ctx.clone(),
            owner_user_id,
            slot: ViewSlot::new(),
            last_error: None,
        };
        view.reload();
        view
    }

    /// Collections de l'utilisateur connecté (UUID applicatif).
    pub fn mine(ctx: &AppContext) -> VitrineResult<Self> {
        let user = ctx
            .current_user()
            .ok_or_else(|| AppError::AuthRequired(ctx.tr().t("login_required")))?;
        let owner = user.user_id.unwrap_or_else(|| user.id.to_string());
        Ok(Self::open(ctx, Some(owner)))
    }

    pub fn reload(&self) {
        let backend = self.ctx.backend.clone();
        let owner = self.owner_user_id.clone();
        self.slot
            .spawn(async move { backend.list_collections(owner.as_deref()).await });
    }

    pub async fn settled(&self) -> ViewState<Vec<Collection>> {
        self.slot.settled().await;
        self.slot.snapshot()
    }

    pub fn state(&self) -> ViewState<Vec<Collection>> {
        self.slot.snapshot()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_manage(&self, collection: &Collection) -> bool {
        match self.ctx.current_user() {
            Some(user) => self.ctx.session.is_admin() || collection.owner.is(&user),
            None => false,
        }
    }

    /// Retirée localement seulement après le succès distant.
    pub async fn delete(&mut self, id: u64) -> VitrineResult<()> {
        let target = self
            .slot
            .with(|state| state.data().and_then(|list| list.iter().find(|c| c.id == id).cloned()));
        // Hors liste chargée : le backend tranche, mais une session reste requise.
        let allowed = match &target {
            Some(collection) => self.can_manage(collection),
            None => self.ctx.current_user().is_some(),
        };
        if !allowed {
            let err = AppError::AuthRequired(self.ctx.tr().t("access_denied"));
            self.last_error = Some(err.user_message());
            return Err(err);
        }

        match self.ctx.backend.delete_collection(id).await {
            Ok(()) => {
                self.slot.update(|list| list.retain(|c| c.id != id));
                self.last_error = None;
                info!(collection = id, "🗑️ Collection supprimée");
                Ok(())
            }
            Err(e) => {
                warn!(collection = id, "❌ Suppression refusée : {}", e);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn table(&self) -> Option<RecordTable> {
        let tr = self.ctx.tr();
        self.slot.with(|state| {
            state.data().map(|list| {
                let mut table = RecordTable::translated(&HEADERS, tr);
                for c in list {
                    table.push_row(vec![
                        c.id.to_string(),
                        c.image
                            .as_ref()
                            .map(|m| m.url.clone())
                            .unwrap_or_else(|| tr.t("no_image")),
                        c.name.clone(),
                        c.description.clone(),
                        c.category.to_string(),
                        c.item_count.to_string(),
                        c.published_at.map(|t| tr.format_timestamp(t)).unwrap_or_default(),
                        c.updated_at.map(|t| tr.format_timestamp(t)).unwrap_or_default(),
                    ]);
                }
                table
            })
        })
    }
}
