// FICHIER : src-core/src/schema/mod.rs

//! Schémas de champs personnalisés : types déclarés, registre de comportements,
//! valeurs typées validées à la frontière.

pub mod field_schema;
pub mod field_type;
pub mod registry;
pub mod value;

pub use field_schema::{FieldDef, FieldSchema};
pub use field_type::{FieldType, Widget};
pub use registry::{resolve, resolve_tag, FieldBehavior};
pub use value::{interpret, FieldValue, InputValue};
