// FICHIER : src-core/src/models/item.rs

use super::{CollectionRef, Media, OwnerRef};
use crate::editor::tags::split_tags;
use crate::table::Sortable;
use crate::utils::data::{json, Map, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Item d'une collection. `fields` garde les valeurs brutes ; l'interprétation
/// typée se fait à la lecture à partir du schéma de la collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    /// Chaîne délimitée telle que saisie (`"red, blue"`).
    pub tags: String,
    pub fields: Map<String, Value>,
    pub image: Option<Media>,
    pub owner: OwnerRef,
    pub collection: Option<CollectionRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn tag_list(&self) -> Vec<String> {
        split_tags(&self.tags)
    }
}

fn timestamp(at: &Option<DateTime<Utc>>) -> Option<Value> {
    at.map(|t| Value::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

impl Sortable for Item {
    /// Champs fixes d'abord, puis les champs personnalisés bruts.
    fn sort_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            "user_name" => self.owner.user_name.clone().map(Value::String),
            "tags" => Some(json!(self.tags)),
            "createdAt" => timestamp(&self.created_at),
            "publishedAt" => timestamp(&self.published_at),
            "updatedAt" => timestamp(&self.updated_at),
            other => self.fields.get(other).cloned(),
        }
    }
}
