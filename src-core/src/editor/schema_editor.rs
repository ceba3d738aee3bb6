// FICHIER : src-core/src/editor/schema_editor.rs

use crate::backend::{CollectionPayload, CollectionStore, ImageUpload};
use crate::models::{Category, Collection, OwnerRef, User};
use crate::schema::{FieldSchema, FieldType};
use crate::utils::{AppError, VitrineResult};
use tracing::{info, instrument, warn};

/// Ligne de l'éditeur de schéma (nom libre, pas de validation).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDraft {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDraft {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Modification partielle d'une ligne.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
}

impl FieldPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            field_type: None,
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            name: None,
            field_type: Some(field_type),
        }
    }
}

/// Attributs de base de la collection en cours d'édition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionDraft {
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Nouvelle image à téléverser.
    pub image: Option<ImageUpload>,
    /// Image actuelle (lecture seule).
    pub image_url: Option<String>,
}

/// `nom -> type` ; en cas de doublon le dernier type gagne, la position du premier est gardée.
pub fn build_schema(fields: &[FieldDraft]) -> FieldSchema {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.field_type))
        .collect()
}

/// Éditeur de collection : attributs de base + liste ordonnée de champs.
#[derive(Debug, Clone, Default)]
pub struct SchemaEditor {
    id: Option<u64>,
    owner: Option<OwnerRef>,
    pub draft: CollectionDraft,
    fields: Vec<FieldDraft>,
    last_error: Option<String>,
}

impl SchemaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge une collection existante ; son schéma devient la liste de lignes.
    pub fn from_collection(collection: &Collection) -> Self {
        Self {
            id: Some(collection.id),
            owner: Some(collection.owner.clone()),
            draft: CollectionDraft {
                name: collection.name.clone(),
                description: collection.description.clone(),
                category: collection.category,
                image: None,
                image_url: collection.image.as_ref().map(|m| m.url.clone()),
            },
            fields: collection
                .schema
                .iter()
                .map(|def| FieldDraft::new(def.name.clone(), def.field_type))
                .collect(),
            last_error: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn fields(&self) -> &[FieldDraft] {
        &self.fields
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Ajoute `{ name: "", type: string }` et renvoie son index.
    pub fn add_field(&mut self) -> usize {
        self.fields.push(FieldDraft::default());
        self.fields.len() - 1
    }

    /// Retire la ligne sans confirmation. Index hors bornes : rien.
    pub fn remove_field(&mut self, index: usize) -> Option<FieldDraft> {
        (index < self.fields.len()).then(|| self.fields.remove(index))
    }

    pub fn change_field(&mut self, index: usize, patch: FieldPatch) -> VitrineResult<()> {
        let len = self.fields.len();
        let field = self.fields.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!("Champ #{} inexistant ({} champs)", index, len))
        })?;
        if let Some(name) = patch.name {
            field.name = name;
        }
        if let Some(ft) = patch.field_type {
            field.field_type = ft;
        }
        Ok(())
    }

    pub fn schema(&self) -> FieldSchema {
        build_schema(&self.fields)
    }

    /// Le propriétaire d'une collection existante est conservé ; sinon c'est `current_user`.
    pub fn payload(&self, current_user: &User) -> CollectionPayload {
        let owner = self
            .owner
            .clone()
            .unwrap_or_else(|| OwnerRef::of(current_user));
        CollectionPayload {
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            category: self.draft.category,
            fields: self.schema(),
            user_id: owner.user_id,
            user_name: owner.user_name,
        }
    }

    /// Création ou mise à jour. En cas d'échec l'état de l'éditeur reste intact
    /// pour une nouvelle tentative, et `last_error` porte le message.
    #[instrument(skip_all, fields(collection = ?self.id))]
    pub async fn submit<S>(&mut self, store: &S, current_user: &User) -> VitrineResult<Collection>
    where
        S: CollectionStore + ?Sized,
    {
        let payload = self.payload(current_user);
        match store
            .save_collection(self.id, &payload, self.draft.image.as_ref())
            .await
        {
            Ok(saved) => {
                info!(id = saved.id, fields = payload.fields.len(), "💾 Collection enregistrée");
                // Les envois suivants mettent à jour la même collection
                self.id = Some(saved.id);
                if saved.owner != OwnerRef::default() {
                    self.owner = Some(saved.owner.clone());
                } else if self.owner.is_none() {
                    self.owner = Some(OwnerRef::of(current_user));
                }
                self.last_error = None;
                Ok(saved)
            }
            Err(e) => {
                warn!("❌ Échec d'enregistrement de la collection : {}", e);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
