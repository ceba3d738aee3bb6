// FICHIER : src-core/src/views/item.rs

use super::state::{ViewSlot, ViewState};
use crate::models::{Collection, Item};
use crate::schema::{resolve, FieldType};
use crate::utils::VitrineResult;
use crate::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemData {
    pub item: Item,
    /// Collection parente (schéma d'interprétation), si l'item en a une.
    pub collection: Option<Collection>,
}

/// Ligne `libellé : valeur` de la fiche d'un item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

/// Fiche d'un item : attributs de base puis tous ses champs personnalisés.
pub struct ItemView {
    ctx: AppContext,
    id: u64,
    slot: ViewSlot<ItemData>,
}

impl ItemView {
    pub fn open(ctx: &AppContext, id: u64) -> Self {
        let view = Self {
            ctx: ctx.clone(),
            id,
            slot: ViewSlot::new(),
        };
        view.reload();
        view
    }

    pub fn reload(&self) {
        let backend = self.ctx.backend.clone();
        let id = self.id;
        self.slot.spawn(async move {
            let item = backend.get_item(id).await?;
            let collection = match &item.collection {
                Some(parent) => Some(backend.get_collection(parent.id).await?),
                None => None,
            };
            VitrineResult::Ok(ItemData { item, collection })
        });
    }

    pub async fn settled(&self) -> ViewState<ItemData> {
        self.slot.settled().await;
        self.slot.snapshot()
    }

    pub fn state(&self) -> ViewState<ItemData> {
        self.slot.snapshot()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Les champs `text` figurent ici (contrairement à la table). Sans schéma,
    /// les valeurs brutes sont affichées comme des chaînes.
    pub fn details(&self) -> Vec<DetailLine> {
        let tr = self.ctx.tr();
        self.slot.with(|state| {
            let Some(ItemData { item, collection }) = state.data() else {
                return Vec::new();
            };

            let mut lines = vec![
                DetailLine {
                    label: tr.t("name"),
                    value: item.name.clone(),
                },
                DetailLine {
                    label: tr.t("collection"),
                    value: item
                        .collection
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| tr.t("no_collection")),
                },
                DetailLine {
                    label: tr.t("created_by"),
                    value: item
                        .owner
                        .user_name
                        .clone()
                        .unwrap_or_else(|| tr.t("unknown_author")),
                },
                DetailLine {
                    label: tr.t("tags"),
                    value: item.tag_list().join(", "),
                },
            ];

            match collection {
                Some(collection) => lines.extend(collection.schema.iter().map(|def| DetailLine {
                    label: def.name.clone(),
                    value: resolve(def.field_type).format(item.fields.get(&def.name), tr),
                })),
                None => lines.extend(item.fields.iter().map(|(name, raw)| DetailLine {
                    label: name.clone(),
                    value: resolve(FieldType::String).format(Some(raw), tr),
                })),
            }
            lines
        })
    }
}
