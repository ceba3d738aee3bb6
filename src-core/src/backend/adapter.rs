// FICHIER : src-core/src/backend/adapter.rs

use super::envelope::{
    CollectionAttrs, CommentAttrs, Entity, ItemAttrs, LikeAttrs, MediaAttrs, Relation, TagAttrs,
};
use crate::models::{
    Author, Collection, CollectionRef, Comment, Item, Like, Media, OwnerRef, Tag,
};

/// Aplatit les entités du backend en modèles métier.
/// Les URLs relatives de médias sont préfixées par la racine des téléversements.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeAdapter {
    upload_base: Option<String>,
}

impl EnvelopeAdapter {
    pub fn new(upload_base: Option<&str>) -> Self {
        Self {
            upload_base: upload_base.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    pub fn media_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        match &self.upload_base {
            Some(base) => format!("{}/{}", base, url.trim_start_matches('/')),
            None => url.to_string(),
        }
    }

    fn media(&self, rel: Relation<MediaAttrs>) -> Option<Media> {
        rel.data.map(|e| Media {
            url: self.media_url(&e.attributes.url),
            name: e.attributes.name,
        })
    }

    pub fn collection(&self, entity: Entity<CollectionAttrs>) -> Collection {
        let a = entity.attributes;
        Collection {
            id: entity.id,
            item_count: a.items.len(),
            owner: OwnerRef {
                user_id: a.user_id,
                user_name: a
                    .user_name
                    .or_else(|| a.user.data.as_ref().and_then(|u| u.attributes.username.clone())),
                account_id: a.user.data.as_ref().map(|u| u.id),
            },
            image: self.media(a.image_url),
            name: a.name,
            description: a.description.unwrap_or_default(),
            category: a.category,
            schema: a.fields,
            created_at: a.timestamps.created_at,
            published_at: a.timestamps.published_at,
            updated_at: a.timestamps.updated_at,
        }
    }

    pub fn item(&self, entity: Entity<ItemAttrs>) -> Item {
        let a = entity.attributes;
        Item {
            id: entity.id,
            owner: OwnerRef {
                user_id: a.user_id,
                user_name: a
                    .user_name
                    .or_else(|| a.user.data.as_ref().and_then(|u| u.attributes.username.clone())),
                account_id: a.user.data.as_ref().map(|u| u.id),
            },
            collection: a.collection.data.map(|c| CollectionRef {
                id: c.id,
                name: c.attributes.name.unwrap_or_default(),
            }),
            image: self.media(a.image_url),
            name: a.name,
            tags: a.tags.unwrap_or_default(),
            fields: a.additional_fields.unwrap_or_default(),
            created_at: a.timestamps.created_at,
            published_at: a.timestamps.published_at,
            updated_at: a.timestamps.updated_at,
        }
    }

    pub fn comment(&self, entity: Entity<CommentAttrs>) -> Comment {
        let a = entity.attributes;
        Comment {
            id: entity.id,
            text: a.text,
            author: a.user.data.map(|u| Author {
                id: u.id,
                username: u.attributes.username.unwrap_or_default(),
            }),
            published_at: a.published_at,
        }
    }

    pub fn like(&self, entity: Entity<LikeAttrs>) -> Like {
        Like {
            id: entity.id,
            user_liked_id: entity.attributes.user_liked_id,
            item_id: entity.attributes.item.data.map(|i| i.id),
        }
    }

    pub fn tag(&self, entity: Entity<TagAttrs>) -> Tag {
        Tag {
            id: entity.id,
            label: entity.attributes.tags,
        }
    }
}
