// FICHIER : src-core/src/schema/field_type.rs

use crate::utils::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type déclaré d'un champ personnalisé de collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Text,
    Boolean,
    Date,
}

/// Nature du contrôle de saisie associé à un type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    SingleLineText,
    MultiLineText,
    Numeric,
    YesNo,
    DatePicker,
}

impl FieldType {
    /// Ordre de présentation dans l'éditeur de schéma.
    pub const ALL: [FieldType; 5] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Text,
        FieldType::Boolean,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }

    /// Clé de traduction du libellé (`field_type_*`).
    pub fn label_key(&self) -> &'static str {
        match self {
            FieldType::String => "field_type_string",
            FieldType::Number => "field_type_number",
            FieldType::Text => "field_type_text",
            FieldType::Boolean => "field_type_boolean",
            FieldType::Date => "field_type_date",
        }
    }

    pub fn widget(&self) -> Widget {
        match self {
            FieldType::String => Widget::SingleLineText,
            FieldType::Text => Widget::MultiLineText,
            FieldType::Number => Widget::Numeric,
            FieldType::Boolean => Widget::YesNo,
            FieldType::Date => Widget::DatePicker,
        }
    }

    /// Les champs `text` n'ont pas de colonne dans le tableau des items.
    pub fn is_tabular(&self) -> bool {
        !matches!(self, FieldType::Text)
    }

    /// Lecture tolérante d'un tag venu du backend : un tag inconnu se comporte comme `string`.
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.parse() {
            Ok(ft) => ft,
            Err(_) => {
                tracing::warn!(tag = %tag, "⚠️ Type de champ inconnu, repli sur 'string'");
                FieldType::String
            }
        }
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|ft| ft.as_str() == s.trim())
            .ok_or_else(|| AppError::Validation(format!("Type de champ inconnu : '{}'", s)))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldType::parse_lenient(&tag))
    }
}
