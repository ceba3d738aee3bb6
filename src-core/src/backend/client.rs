// FICHIER : src-core/src/backend/client.rs

use super::adapter::EnvelopeAdapter;
use super::envelope::{
    AuthResponse, CollectionAttrs, CommentAttrs, Entity, Envelope, ItemAttrs, LikeAttrs, TagAttrs,
};
use super::payload::{
    CollectionPayload, Credentials, ImageUpload, ItemFilter, ItemPayload, Registration, UserPatch,
};
use super::query::{ResourceQuery, SortOrder};
use super::{AuthGateway, CollectionStore, CommentStore, ItemStore, LikeStore, TagStore, UserStore};
use crate::auth::SessionStore;
use crate::models::{Collection, Comment, Item, Like, Tag, User};
use crate::utils::config::EndpointsConfig;
use crate::utils::data::json;
use crate::utils::json::stringify;
use crate::utils::net::{get_client, send_empty, send_json, with_bearer};
use crate::utils::VitrineResult;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use url::Url;

/// Client REST du backend de contenu. Le jeton porteur est relu dans la session
/// à chaque requête.
pub struct HttpBackend {
    api_base: String,
    session: Arc<SessionStore>,
    adapter: EnvelopeAdapter,
}

impl HttpBackend {
    pub fn new(
        api_base: &str,
        upload_base: Option<&str>,
        session: Arc<SessionStore>,
    ) -> VitrineResult<Self> {
        Url::parse(api_base)?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            session,
            adapter: EnvelopeAdapter::new(upload_base),
        })
    }

    pub fn from_config(endpoints: &EndpointsConfig, session: Arc<SessionStore>) -> VitrineResult<Self> {
        Self::new(&endpoints.api_url, endpoints.upload_url.as_deref(), session)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request(&self, method: Method, query: &ResourceQuery) -> VitrineResult<RequestBuilder> {
        let url = query.to_url(&self.api_base)?;
        let token = self.session.token();
        Ok(with_bearer(get_client().request(method, url), token.as_deref()))
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &ResourceQuery) -> VitrineResult<T> {
        send_json(self.request(Method::GET, query)?, &query.to_string()).await
    }

    /// Corps JSON `{ "data": ... }` (convention des types de contenu).
    async fn send_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        query: &ResourceQuery,
        body: &B,
    ) -> VitrineResult<T> {
        let request = self
            .request(method, query)?
            .json(&json!({ "data": body }));
        send_json(request, &query.to_string()).await
    }

    async fn remove(&self, query: &ResourceQuery) -> VitrineResult<()> {
        send_empty(self.request(Method::DELETE, query)?, &query.to_string()).await
    }

    /// `data` (JSON sérialisé) + `files.image_url` optionnel.
    fn multipart<P: Serialize>(payload: &P, image: Option<&ImageUpload>) -> VitrineResult<Form> {
        let mut form = Form::new().text("data", stringify(payload)?);
        if let Some(img) = image {
            let part = Part::bytes(img.bytes.clone())
                .file_name(img.file_name.clone())
                .mime_str(&img.mime)?;
            form = form.part("files.image_url", part);
        }
        Ok(form)
    }

    async fn save_multipart<P: Serialize, A: DeserializeOwned>(
        &self,
        resource: &str,
        id: Option<u64>,
        payload: &P,
        image: Option<&ImageUpload>,
    ) -> VitrineResult<Entity<A>> {
        let (method, query) = match id {
            Some(id) => (Method::PUT, ResourceQuery::entry(resource, id)),
            None => (Method::POST, ResourceQuery::new(resource)),
        };
        let request = self
            .request(method, &query)?
            .multipart(Self::multipart(payload, image)?);
        let envelope: Envelope<Entity<A>> = send_json(request, &query.to_string()).await?;
        Ok(envelope.data)
    }

    /// Endpoints d'authentification : jamais de jeton porteur.
    async fn auth_post<B: Serialize>(&self, path: &str, body: &B) -> VitrineResult<AuthResponse> {
        let query = ResourceQuery::new(path);
        let url = query.to_url(&self.api_base)?;
        send_json(get_client().post(url).json(body), &query.to_string()).await
    }
}

#[async_trait]
impl CollectionStore for HttpBackend {
    #[instrument(skip(self))]
    async fn list_collections(&self, owner_user_id: Option<&str>) -> VitrineResult<Vec<Collection>> {
        let mut query = ResourceQuery::new("collections");
        if let Some(owner) = owner_user_id {
            query = query.filter_eq(&["user_id"], owner);
        }
        let envelope: Envelope<Vec<Entity<CollectionAttrs>>> =
            self.fetch(&query.populate_all()).await?;
        Ok(envelope
            .data
            .into_iter()
            .map(|e| self.adapter.collection(e))
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_collection(&self, id: u64) -> VitrineResult<Collection> {
        let query = ResourceQuery::entry("collections", id).populate_all();
        let envelope: Envelope<Entity<CollectionAttrs>> = self.fetch(&query).await?;
        Ok(self.adapter.collection(envelope.data))
    }

    #[instrument(skip(self, payload, image))]
    async fn save_collection(
        &self,
        id: Option<u64>,
        payload: &CollectionPayload,
        image: Option<&ImageUpload>,
    ) -> VitrineResult<Collection> {
        let entity = self.save_multipart("collections", id, payload, image).await?;
        Ok(self.adapter.collection(entity))
    }

    #[instrument(skip(self))]
    async fn delete_collection(&self, id: u64) -> VitrineResult<()> {
        self.remove(&ResourceQuery::entry("collections", id)).await
    }
}

#[async_trait]
impl ItemStore for HttpBackend {
    #[instrument(skip(self))]
    async fn list_items(&self, filter: ItemFilter) -> VitrineResult<Vec<Item>> {
        let mut query = ResourceQuery::new("items");
        if let Some(collection) = filter.collection {
            query = query.filter_eq(&["collection", "id"], collection);
        }
        if filter.latest_first {
            query = query.sort("createdAt", SortOrder::Desc);
        }
        let envelope: Envelope<Vec<Entity<ItemAttrs>>> = self.fetch(&query.populate_all()).await?;
        Ok(envelope.data.into_iter().map(|e| self.adapter.item(e)).collect())
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: u64) -> VitrineResult<Item> {
        let query = ResourceQuery::entry("items", id).populate_all();
        let envelope: Envelope<Entity<ItemAttrs>> = self.fetch(&query).await?;
        Ok(self.adapter.item(envelope.data))
    }

    #[instrument(skip(self, payload, image))]
    async fn save_item(
        &self,
        id: Option<u64>,
        payload: &ItemPayload,
        image: Option<&ImageUpload>,
    ) -> VitrineResult<Item> {
        let entity = self.save_multipart("items", id, payload, image).await?;
        Ok(self.adapter.item(entity))
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: u64) -> VitrineResult<()> {
        self.remove(&ResourceQuery::entry("items", id)).await
    }
}

#[async_trait]
impl TagStore for HttpBackend {
    async fn list_tags(&self) -> VitrineResult<Vec<Tag>> {
        let envelope: Envelope<Vec<Entity<TagAttrs>>> =
            self.fetch(&ResourceQuery::new("tags")).await?;
        Ok(envelope.data.into_iter().map(|e| self.adapter.tag(e)).collect())
    }

    #[instrument(skip(self))]
    async fn create_tag(&self, label: &str) -> VitrineResult<Tag> {
        let envelope: Envelope<Entity<TagAttrs>> = self
            .send_data(Method::POST, &ResourceQuery::new("tags"), &json!({ "tags": label }))
            .await?;
        Ok(self.adapter.tag(envelope.data))
    }
}

#[async_trait]
impl CommentStore for HttpBackend {
    async fn list_comments(&self, item_id: u64) -> VitrineResult<Vec<Comment>> {
        let query = ResourceQuery::new("comments")
            .filter_eq(&["item", "id"], item_id)
            .populate("user");
        let envelope: Envelope<Vec<Entity<CommentAttrs>>> = self.fetch(&query).await?;
        Ok(envelope
            .data
            .into_iter()
            .map(|e| self.adapter.comment(e))
            .collect())
    }

    #[instrument(skip(self, text))]
    async fn create_comment(&self, item_id: u64, author_id: u64, text: &str) -> VitrineResult<Comment> {
        let body = json!({ "text": text, "user": author_id, "item": item_id });
        let envelope: Envelope<Entity<CommentAttrs>> = self
            .send_data(Method::POST, &ResourceQuery::new("comments"), &body)
            .await?;
        Ok(self.adapter.comment(envelope.data))
    }

    #[instrument(skip(self, text))]
    async fn update_comment(&self, id: u64, text: &str) -> VitrineResult<()> {
        let _: Envelope<Entity<CommentAttrs>> = self
            .send_data(
                Method::PUT,
                &ResourceQuery::entry("comments", id),
                &json!({ "text": text }),
            )
            .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: u64) -> VitrineResult<()> {
        self.remove(&ResourceQuery::entry("comments", id)).await
    }
}

#[async_trait]
impl LikeStore for HttpBackend {
    async fn find_like(&self, item_id: u64, user_liked_id: &str) -> VitrineResult<Option<Like>> {
        let query = ResourceQuery::new("likes")
            .filter_eq(&["item", "id"], item_id)
            .filter_eq(&["user_liked_id"], user_liked_id);
        let envelope: Envelope<Vec<Entity<LikeAttrs>>> = self.fetch(&query).await?;
        Ok(envelope
            .data
            .into_iter()
            .next()
            .map(|e| self.adapter.like(e)))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn create_like(&self, item_id: u64, user: &User) -> VitrineResult<Like> {
        let body = json!({
            "user_liked_id": user.user_id,
            "user": user.id,
            "item": item_id,
            "user_favorite_item": { "user_liked_id": user.user_id, "item": item_id }
        });
        let envelope: Envelope<Entity<LikeAttrs>> = self
            .send_data(Method::POST, &ResourceQuery::new("likes"), &body)
            .await?;
        Ok(self.adapter.like(envelope.data))
    }

    async fn delete_like(&self, id: u64) -> VitrineResult<()> {
        self.remove(&ResourceQuery::entry("likes", id)).await
    }
}

// Les routes `users` renvoient des objets plats (pas d'enveloppe `data`).
#[async_trait]
impl UserStore for HttpBackend {
    async fn list_users(&self) -> VitrineResult<Vec<User>> {
        self.fetch(&ResourceQuery::new("users").populate_all()).await
    }

    async fn me(&self) -> VitrineResult<User> {
        self.fetch(&ResourceQuery::new("users/me").populate_all())
            .await
    }

    #[instrument(skip(self))]
    async fn update_user(&self, id: u64, patch: UserPatch) -> VitrineResult<()> {
        let query = ResourceQuery::entry("users", id);
        let request = self.request(Method::PUT, &query)?.json(&patch);
        send_empty(request, &query.to_string()).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: u64) -> VitrineResult<()> {
        self.remove(&ResourceQuery::entry("users", id)).await
    }
}

#[async_trait]
impl AuthGateway for HttpBackend {
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier))]
    async fn login(&self, credentials: &Credentials) -> VitrineResult<AuthResponse> {
        self.auth_post("auth/local", credentials).await
    }

    #[instrument(skip(self, registration), fields(username = %registration.username))]
    async fn register(&self, registration: &Registration) -> VitrineResult<AuthResponse> {
        self.auth_post("auth/local/register", registration).await
    }
}
