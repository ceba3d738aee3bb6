// FICHIER : src-core/src/schema/field_schema.rs

use super::field_type::FieldType;
use crate::utils::data::{Map, Value};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Déclaration d'un champ : nom unique + type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Schéma ordonné `nom -> type` d'une collection.
/// Sérialisé comme un objet JSON dont l'ordre des clés est l'ordre des champs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSchema {
    fields: Vec<FieldDef>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Un nom déjà présent garde sa position et prend le nouveau type.
    pub fn insert(&mut self, name: impl Into<String>, field_type: FieldType) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.field_type = field_type,
            None => self.fields.push(FieldDef { name, field_type }),
        }
    }

    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.field_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, FieldType)> for FieldSchema {
    fn from_iter<I: IntoIterator<Item = (N, FieldType)>>(iter: I) -> Self {
        let mut schema = FieldSchema::new();
        for (name, ft) in iter {
            schema.insert(name, ft);
        }
        schema
    }
}

impl<'a> IntoIterator for &'a FieldSchema {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for FieldSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for f in &self.fields {
            map.serialize_entry(&f.name, f.field_type.as_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` (collection sans champs) vaut schéma vide
        let raw: Option<Map<String, Value>> = Option::deserialize(deserializer)?;
        let mut schema = FieldSchema::new();
        for (name, tag) in raw.unwrap_or_default() {
            let ft = match tag.as_str() {
                Some(t) => FieldType::parse_lenient(t),
                None => {
                    tracing::warn!(field = %name, "⚠️ Tag de type non textuel, repli sur 'string'");
                    FieldType::String
                }
            };
            schema.insert(name, ft);
        }
        Ok(schema)
    }
}
