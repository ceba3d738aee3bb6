// FICHIER : src-core/src/backend/payload.rs

use crate::models::Category;
use crate::schema::FieldSchema;
use crate::utils::data::{Map, Value};
use crate::utils::{fs, VitrineResult};
use serde::Serialize;
use std::path::Path;

/// Partie `data` du formulaire multipart d'enregistrement d'une collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPayload {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub fields: FieldSchema,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Partie `data` du formulaire multipart d'enregistrement d'un item.
/// `additionalFields` ne contient que les clés du schéma.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub tags: String,
    #[serde(rename = "additionalFields")]
    pub additional_fields: Map<String, Value>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub collection: Option<u64>,
}

/// Fichier image joint (`files.image_url`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub async fn from_path(path: impl AsRef<Path>) -> VitrineResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let mime = guess_mime(path).to_string();
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Modification partielle d'un compte (`PUT /users/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_id: String,
}

/// Filtre de liste d'items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub collection: Option<u64>,
    /// Tri `createdAt:desc` (derniers ajouts d'abord).
    pub latest_first: bool,
}

impl ItemFilter {
    pub fn in_collection(id: u64) -> Self {
        Self {
            collection: Some(id),
            latest_first: false,
        }
    }

    pub fn latest() -> Self {
        Self {
            collection: None,
            latest_first: true,
        }
    }
}
