// FICHIER : src-core/src/backend/envelope.rs

//! DTOs du format d'échange du backend : `{ data: { id, attributes }, meta }`.
//! Ces types ne sortent pas du module `backend` : `adapter` les aplatit une fois.

use crate::models::{Category, User};
use crate::schema::FieldSchema;
use crate::utils::data::{Map, Value};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Value,
}

#[derive(Debug, Deserialize)]
pub struct Entity<A> {
    pub id: u64,
    pub attributes: A,
}

/// Relation simple ; absente quand elle n'est pas peuplée.
#[derive(Debug, Deserialize)]
pub struct Relation<A> {
    #[serde(default = "Option::default")]
    pub data: Option<Entity<A>>,
}

impl<A> Default for Relation<A> {
    fn default() -> Self {
        Self { data: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct RelationMany<A> {
    #[serde(default = "Option::default")]
    pub data: Option<Vec<Entity<A>>>,
}

impl<A> Default for RelationMany<A> {
    fn default() -> Self {
        Self { data: None }
    }
}

impl<A> RelationMany<A> {
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

/// Horodatages communs à toutes les entités.
#[derive(Debug, Default, Deserialize)]
pub struct Timestamps {
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MediaAttrs {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserRefAttrs {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NamedAttrs {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionAttrs {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub fields: FieldSchema,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub image_url: Relation<MediaAttrs>,
    #[serde(default)]
    pub user: Relation<UserRefAttrs>,
    #[serde(default)]
    pub items: RelationMany<Value>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Deserialize)]
pub struct ItemAttrs {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, rename = "additionalFields")]
    pub additional_fields: Option<Map<String, Value>>,
    #[serde(default)]
    pub image_url: Relation<MediaAttrs>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Relation<UserRefAttrs>,
    #[serde(default)]
    pub collection: Relation<NamedAttrs>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Deserialize)]
pub struct CommentAttrs {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: Relation<UserRefAttrs>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LikeAttrs {
    #[serde(default)]
    pub user_liked_id: Option<String>,
    #[serde(default)]
    pub item: Relation<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TagAttrs {
    pub tags: String,
}

/// Réponse de `/auth/local` et `/auth/local/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: User,
}
