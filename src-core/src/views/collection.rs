// FICHIER : src-core/src/views/collection.rs

use super::state::{ViewSlot, ViewState};
use crate::backend::ItemFilter;
use crate::models::{Collection, Item};
use crate::table::{sort_records, RecordTable, SortDirection};
use crate::utils::{AppError, VitrineResult};
use crate::AppContext;
use tracing::{info, instrument, warn};

/// Champs de tri toujours proposés, avant ceux du schéma.
pub const FIXED_SORT_FIELDS: [&str; 5] = ["id", "name", "user_name", "publishedAt", "updatedAt"];

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionData {
    pub collection: Collection,
    pub items: Vec<Item>,
}

/// Détail d'une collection : ses items triables, sélection et suppression.
pub struct CollectionView {
    ctx: AppContext,
    id: u64,
    slot: ViewSlot<CollectionData>,
    sort_field: String,
    direction: SortDirection,
    selected: Option<u64>,
    last_error: Option<String>,
}

impl CollectionView {
    /// Monte la vue et lance le chargement (collection + items en parallèle).
    pub fn open(ctx: &AppContext, id: u64) -> Self {
        let view = Self {
            ctx: ctx.clone(),
            id,
            slot: ViewSlot::new(),
            sort_field: "id".to_string(),
            direction: SortDirection::Ascending,
            selected: None,
            last_error: None,
        };
        view.reload();
        view
    }

    pub fn reload(&self) {
        let backend = self.ctx.backend.clone();
        let (id, field, direction) = (self.id, self.sort_field.clone(), self.direction);
        self.slot.spawn(async move {
            let (collection, mut items) = tokio::try_join!(
                backend.get_collection(id),
                backend.list_items(ItemFilter::in_collection(id))
            )?;
            sort_records(&mut items, &field, direction);
            VitrineResult::Ok(CollectionData { collection, items })
        });
    }

    pub async fn settled(&self) -> ViewState<CollectionData> {
        self.slot.settled().await;
        self.slot.snapshot()
    }

    pub fn state(&self) -> ViewState<CollectionData> {
        self.slot.snapshot()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // --- TRI ---

    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Champs fixes puis champs tabulaires du schéma.
    pub fn sort_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = FIXED_SORT_FIELDS.iter().map(|f| f.to_string()).collect();
        self.slot.with(|state| {
            if let Some(data) = state.data() {
                fields.extend(
                    data.collection
                        .schema
                        .iter()
                        .filter(|def| def.field_type.is_tabular())
                        .map(|def| def.name.clone()),
                );
            }
        });
        fields
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        self.sort_field = field.to_string();
        self.direction = direction;
        self.slot
            .update(|data| sort_records(&mut data.items, field, direction));
    }

    // --- SÉLECTION & DROITS ---

    pub fn select(&mut self, item_id: Option<u64>) {
        self.selected = item_id;
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    /// Propriétaire de la collection ou administrateur.
    pub fn can_manage(&self) -> bool {
        let Some(user) = self.ctx.current_user() else {
            return false;
        };
        self.ctx.session.is_admin()
            || self
                .slot
                .with(|state| state.data().is_some_and(|d| d.collection.owner.is(&user)))
    }

    /// La liste locale n'est modifiée qu'après le succès de l'appel distant ;
    /// en cas d'échec liste et sélection restent intactes.
    #[instrument(skip(self), fields(collection = self.id))]
    pub async fn delete_item(&mut self, item_id: u64) -> VitrineResult<()> {
        if !self.can_manage() {
            let err = AppError::AuthRequired(self.ctx.tr().t("access_denied"));
            self.last_error = Some(err.user_message());
            return Err(err);
        }

        match self.ctx.backend.delete_item(item_id).await {
            Ok(()) => {
                self.slot.update(|data| {
                    data.items.retain(|item| item.id != item_id);
                    data.collection.item_count = data.items.len();
                });
                if self.selected == Some(item_id) {
                    self.selected = None;
                }
                self.last_error = None;
                info!(item = item_id, "🗑️ Item supprimé");
                Ok(())
            }
            Err(e) => {
                warn!(item = item_id, "❌ Suppression refusée : {}", e);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Suppression de l'item sélectionné.
    pub async fn delete_selected(&mut self) -> VitrineResult<()> {
        match self.selected {
            Some(id) => self.delete_item(id).await,
            None => Err(AppError::Validation("Aucun item sélectionné".to_string())),
        }
    }

    /// Table rendue (colonnes fixes + schéma), dans l'ordre de tri courant.
    pub fn table(&self) -> Option<RecordTable> {
        self.slot.with(|state| {
            state
                .data()
                .map(|d| RecordTable::for_items(&d.collection, &d.items, self.ctx.tr()))
        })
    }
}
