// FICHIER : src-core/src/models/collection.rs

use super::{Media, OwnerRef};
use crate::schema::FieldSchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Catégorie d'une collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Category {
    Books,
    Signs,
    Silverware,
    Music,
    Movies,
    Series,
    Recipes,
    Coins,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Books,
        Category::Signs,
        Category::Silverware,
        Category::Music,
        Category::Movies,
        Category::Series,
        Category::Recipes,
        Category::Coins,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Books => "Books",
            Category::Signs => "Signs",
            Category::Silverware => "Silverware",
            Category::Music => "Music",
            Category::Movies => "Movies",
            Category::Series => "Series",
            Category::Recipes => "Recipes",
            Category::Coins => "Coins",
            Category::Other => "Other",
        }
    }

    /// Insensible à la casse ; une catégorie inconnue vaut `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| Category::parse_lenient(&s)).unwrap_or_default())
    }
}

/// Référence légère vers une collection (relation d'un item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: u64,
    pub name: String,
}

/// Collection typée : ses items suivent `schema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub schema: FieldSchema,
    pub image: Option<Media>,
    pub owner: OwnerRef,
    pub item_count: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Collection {
    pub fn to_ref(&self) -> CollectionRef {
        CollectionRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}
