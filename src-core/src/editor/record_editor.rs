// FICHIER : src-core/src/editor/record_editor.rs

use super::tags::{apply_suggestion, split_tags, suggestions, TagPlan};
use crate::backend::{ImageUpload, ItemPayload, ItemStore, TagStore};
use crate::models::{Collection, Item, OwnerRef, User};
use crate::schema::{resolve, FieldSchema, FieldType, FieldValue, InputValue, Widget};
use crate::utils::data::{Map, Value};
use crate::utils::{AppError, VitrineResult};
use tracing::{info, instrument, warn};

/// Contrôle de saisie rendu pour un champ du schéma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWidget {
    pub name: String,
    pub field_type: FieldType,
    pub widget: Widget,
    pub value: InputValue,
}

/// Résultat d'un enregistrement réussi.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRecord {
    pub item: Item,
    /// Tags ajoutés au vocabulaire global pendant l'enregistrement.
    pub created_tags: Vec<String>,
}

/// Formulaire d'item piloté par le schéma de sa collection.
#[derive(Debug, Clone)]
pub struct RecordEditor {
    id: Option<u64>,
    collection_id: u64,
    schema: FieldSchema,
    owner: Option<OwnerRef>,
    pub name: String,
    tags: String,
    values: Map<String, Value>,
    pub image: Option<ImageUpload>,
    vocabulary: Vec<String>,
    last_error: Option<String>,
    orphan_tags: Vec<String>,
}

impl RecordEditor {
    /// Nouvel item dans `collection`.
    pub fn new(collection: &Collection) -> Self {
        Self {
            id: None,
            collection_id: collection.id,
            schema: collection.schema.clone(),
            owner: None,
            name: String::new(),
            tags: String::new(),
            values: Map::new(),
            image: None,
            vocabulary: Vec::new(),
            last_error: None,
            orphan_tags: Vec::new(),
        }
    }

    /// Édition d'un item existant. Les valeurs brutes sont reprises telles quelles.
    pub fn for_item(collection: &Collection, item: &Item) -> Self {
        Self {
            id: Some(item.id),
            owner: Some(item.owner.clone()),
            name: item.name.clone(),
            tags: item.tags.clone(),
            values: item.fields.clone(),
            ..Self::new(collection)
        }
    }

    /// Vocabulaire global des tags (pour la création et les suggestions).
    pub fn with_vocabulary<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Tags créés avant un échec d'enregistrement (jamais supprimés après coup).
    pub fn orphan_tags(&self) -> &[String] {
        &self.orphan_tags
    }

    // --- CHAMPS ---

    pub fn render_field(&self, name: &str) -> Option<FieldWidget> {
        let field_type = self.schema.get(name)?;
        let behavior = resolve(field_type);
        Some(FieldWidget {
            name: name.to_string(),
            field_type,
            widget: behavior.widget(),
            value: behavior.to_input_value(self.values.get(name)),
        })
    }

    /// Un contrôle par champ, dans l'ordre du schéma.
    pub fn render_fields(&self) -> Vec<FieldWidget> {
        self.schema
            .names()
            .filter_map(|name| self.render_field(name))
            .collect()
    }

    pub fn value(&self, name: &str) -> FieldValue {
        match self.schema.get(name) {
            Some(ft) => FieldValue::from_raw(ft, self.values.get(name)),
            None => FieldValue::Empty,
        }
    }

    /// Met à jour ce seul champ. Une saisie invalide ne modifie rien.
    pub fn input(&mut self, name: &str, input: InputValue) -> VitrineResult<()> {
        let field_type = self
            .schema
            .get(name)
            .ok_or_else(|| AppError::Validation(format!("Champ '{}' absent du schéma", name)))?;

        match resolve(field_type).from_input_value(&input)? {
            FieldValue::Empty => {
                self.values.remove(name);
            }
            value => {
                self.values.insert(name.to_string(), value.to_raw());
            }
        }
        Ok(())
    }

    // --- TAGS ---

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn set_tags(&mut self, input: impl Into<String>) {
        self.tags = input.into();
    }

    pub fn tag_suggestions(&self) -> Vec<String> {
        suggestions(&self.tags, &self.vocabulary)
    }

    pub fn choose_suggestion(&mut self, chosen: &str) {
        self.tags = apply_suggestion(&self.tags, chosen);
    }

    // --- ENREGISTREMENT ---

    /// Seules les clés du schéma sont envoyées ; une valeur incompatible est abandonnée.
    pub fn payload(&self, current_user: &User) -> ItemPayload {
        let additional_fields = self
            .schema
            .iter()
            .filter_map(|def| {
                let value = FieldValue::from_raw(def.field_type, self.values.get(&def.name));
                (!value.is_empty()).then(|| (def.name.clone(), value.to_raw()))
            })
            .collect();

        let owner = self
            .owner
            .clone()
            .unwrap_or_else(|| OwnerRef::of(current_user));

        ItemPayload {
            name: self.name.clone(),
            tags: split_tags(&self.tags).join(", "),
            additional_fields,
            user_name: owner.user_name,
            user_id: owner.user_id,
            collection: Some(self.collection_id),
        }
    }

    /// Crée d'abord les tags inconnus (un appel chacun), puis enregistre l'item.
    /// Un échec de l'item n'annule pas les tags déjà créés : ils restent dans
    /// `orphan_tags` pour être signalés.
    #[instrument(skip_all, fields(item = ?self.id, collection = self.collection_id))]
    pub async fn submit<B>(&mut self, backend: &B, current_user: &User) -> VitrineResult<SavedRecord>
    where
        B: TagStore + ItemStore + ?Sized,
    {
        let plan = TagPlan::new(&self.tags, &self.vocabulary);
        let mut created = Vec::with_capacity(plan.to_create.len());

        for label in &plan.to_create {
            match backend.create_tag(label).await {
                Ok(tag) => created.push(tag.label),
                Err(e) => return Err(self.fail(e, created)),
            }
        }

        let payload = self.payload(current_user);
        match backend.save_item(self.id, &payload, self.image.as_ref()).await {
            Ok(item) => {
                info!(id = item.id, new_tags = created.len(), "💾 Item enregistré");
                self.vocabulary.extend(created.iter().cloned());
                self.orphan_tags.clear();
                self.last_error = None;
                self.id = Some(item.id);
                self.owner = Some(item.owner.clone());
                Ok(SavedRecord {
                    item,
                    created_tags: created,
                })
            }
            Err(e) => Err(self.fail(e, created)),
        }
    }

    fn fail(&mut self, error: AppError, created: Vec<String>) -> AppError {
        if !created.is_empty() {
            warn!(tags = ?created, "⚠️ Tags créés mais item non enregistré");
        }
        warn!("❌ Échec d'enregistrement de l'item : {}", error);
        self.vocabulary.extend(created.iter().cloned());
        self.orphan_tags = created;
        self.last_error = Some(error.user_message());
        error
    }
}
