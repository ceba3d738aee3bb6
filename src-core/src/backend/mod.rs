// FICHIER : src-core/src/backend/mod.rs

//! Accès au backend de contenu headless.
//! Les vues ne dépendent que des traits ci-dessous ; `HttpBackend` les implémente tous.

pub mod adapter;
pub mod client;
pub mod envelope;
pub mod payload;
pub mod query;

pub use adapter::EnvelopeAdapter;
pub use client::HttpBackend;
pub use envelope::AuthResponse;
pub use payload::{
    CollectionPayload, Credentials, ImageUpload, ItemFilter, ItemPayload, Registration, UserPatch,
};
pub use query::{ResourceQuery, SortOrder};

use crate::models::{Collection, Comment, Item, Like, Tag, User};
use crate::utils::VitrineResult;
use async_trait::async_trait;

#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Toutes les collections, ou celles d'un propriétaire (UUID applicatif).
    async fn list_collections(&self, owner_user_id: Option<&str>) -> VitrineResult<Vec<Collection>>;
    async fn get_collection(&self, id: u64) -> VitrineResult<Collection>;
    /// Création si `id` est `None`, mise à jour sinon.
    async fn save_collection(
        &self,
        id: Option<u64>,
        payload: &CollectionPayload,
        image: Option<&ImageUpload>,
    ) -> VitrineResult<Collection>;
    async fn delete_collection(&self, id: u64) -> VitrineResult<()>;
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list_items(&self, filter: ItemFilter) -> VitrineResult<Vec<Item>>;
    async fn get_item(&self, id: u64) -> VitrineResult<Item>;
    async fn save_item(
        &self,
        id: Option<u64>,
        payload: &ItemPayload,
        image: Option<&ImageUpload>,
    ) -> VitrineResult<Item>;
    async fn delete_item(&self, id: u64) -> VitrineResult<()>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list_tags(&self) -> VitrineResult<Vec<Tag>>;
    async fn create_tag(&self, label: &str) -> VitrineResult<Tag>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list_comments(&self, item_id: u64) -> VitrineResult<Vec<Comment>>;
    async fn create_comment(&self, item_id: u64, author_id: u64, text: &str) -> VitrineResult<Comment>;
    async fn update_comment(&self, id: u64, text: &str) -> VitrineResult<()>;
    async fn delete_comment(&self, id: u64) -> VitrineResult<()>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn find_like(&self, item_id: u64, user_liked_id: &str) -> VitrineResult<Option<Like>>;
    async fn create_like(&self, item_id: u64, user: &User) -> VitrineResult<Like>;
    async fn delete_like(&self, id: u64) -> VitrineResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> VitrineResult<Vec<User>>;
    /// Compte courant avec son rôle (`/users/me?populate=*`).
    async fn me(&self) -> VitrineResult<User>;
    async fn update_user(&self, id: u64, patch: UserPatch) -> VitrineResult<()>;
    async fn delete_user(&self, id: u64) -> VitrineResult<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> VitrineResult<AuthResponse>;
    async fn register(&self, registration: &Registration) -> VitrineResult<AuthResponse>;
}

/// Ensemble des collaborateurs du backend, tel que porté par `AppContext`.
pub trait ContentBackend:
    CollectionStore + ItemStore + TagStore + CommentStore + LikeStore + UserStore + AuthGateway
{
}

impl<T> ContentBackend for T where
    T: CollectionStore + ItemStore + TagStore + CommentStore + LikeStore + UserStore + AuthGateway
{
}
