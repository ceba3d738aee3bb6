// FICHIER : src-core/src/editor/mod.rs

//! Formulaires : éditeur de schéma de collection et éditeur d'item.

pub mod record_editor;
pub mod schema_editor;
pub mod tags;

pub use record_editor::{FieldWidget, RecordEditor, SavedRecord};
pub use schema_editor::{build_schema, CollectionDraft, FieldDraft, FieldPatch, SchemaEditor};
pub use tags::{split_tags, TagPlan};
