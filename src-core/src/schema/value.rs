// FICHIER : src-core/src/schema/value.rs

use super::field_schema::{FieldDef, FieldSchema};
use super::field_type::FieldType;
use crate::utils::data::{Map, Value};
use chrono::{DateTime, NaiveDate};
use serde_json::Number;

/// Format de stockage des dates de champs personnalisés.
pub const DATE_STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Valeur d'un champ, validée contre son type déclaré.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absente, nulle, ou de forme incompatible avec le type.
    Empty,
    String(String),
    Text(String),
    Number(Number),
    Boolean(bool),
    Date(NaiveDate),
}

/// Valeur manipulée par un contrôle de saisie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    /// Choix oui/non (un seul booléen, pas deux cases indépendantes).
    Choice(bool),
}

impl InputValue {
    pub fn text(s: impl Into<String>) -> Self {
        InputValue::Text(s.into())
    }
}

impl FieldValue {
    /// Interprète une valeur brute du backend selon le type déclaré.
    pub fn from_raw(field_type: FieldType, raw: Option<&Value>) -> Self {
        let raw = match raw {
            None | Some(Value::Null) => return FieldValue::Empty,
            Some(v) => v,
        };

        let value = match (field_type, raw) {
            (FieldType::String, Value::String(s)) => Some(FieldValue::String(s.clone())),
            (FieldType::Text, Value::String(s)) => Some(FieldValue::Text(s.clone())),
            // Les anciennes saisies numériques sont stockées en chaîne
            (FieldType::Number, Value::Number(n)) => Some(FieldValue::Number(n.clone())),
            (FieldType::Number, Value::String(s)) if s.trim().is_empty() => {
                Some(FieldValue::Empty)
            }
            (FieldType::Number, Value::String(s)) => parse_number(s).map(FieldValue::Number),
            (FieldType::Boolean, Value::Bool(b)) => Some(FieldValue::Boolean(*b)),
            (FieldType::Date, Value::String(s)) if s.trim().is_empty() => Some(FieldValue::Empty),
            (FieldType::Date, Value::String(s)) => parse_date(s).map(FieldValue::Date),
            _ => None,
        };

        value.unwrap_or_else(|| {
            tracing::warn!(
                field_type = %field_type,
                raw = %raw,
                "⚠️ Valeur incompatible avec le type déclaré, traitée comme vide"
            );
            FieldValue::Empty
        })
    }

    /// Forme stockée (JSON) de la valeur.
    pub fn to_raw(&self) -> Value {
        match self {
            FieldValue::Empty => Value::Null,
            FieldValue::String(s) | FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Date(d) => Value::String(d.format(DATE_STORAGE_FORMAT).to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Vrai seulement pour `Boolean(true)` (les clés absentes sont "fausses").
    pub fn is_truthy(&self) -> bool {
        matches!(self, FieldValue::Boolean(true))
    }
}

/// Nombre JSON depuis une saisie textuelle (`"12"` reste entier, `"1.5"` devient flottant).
pub fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Date `YYYY-MM-DD`, ou horodatage RFC 3339 dont on garde la partie date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_STORAGE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Vue typée d'un enregistrement : une entrée par champ du schéma, dans l'ordre du schéma.
/// Les clés brutes hors schéma sont ignorées.
pub fn interpret<'a>(schema: &'a FieldSchema, raw: &Map<String, Value>) -> Vec<(&'a FieldDef, FieldValue)> {
    schema
        .iter()
        .map(|def| (def, FieldValue::from_raw(def.field_type, raw.get(&def.name))))
        .collect()
}
