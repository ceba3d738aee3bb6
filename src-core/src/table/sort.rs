// FICHIER : src-core/src/table/sort.rs

use crate::utils::data::{Map, Value};
use crate::utils::AppError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Enregistrement triable par nom de champ (valeur brute).
pub trait Sortable {
    fn sort_value(&self, field: &str) -> Option<Value>;
}

impl Sortable for Map<String, Value> {
    fn sort_value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(AppError::Validation(format!(
                "Direction de tri inconnue : '{}'",
                other
            ))),
        }
    }
}

/// Rang de nature : absent < booléen < nombre < chaîne < composite.
fn kind_rank(v: Option<&Value>) -> u8 {
    match v {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

/// Ordre naturel sur valeurs brutes : nombres numériquement, chaînes
/// lexicographiquement. Natures différentes : ordre des rangs, pour rester total.
pub fn compare_raw(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y @ (Value::Array(_) | Value::Object(_)))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Tri stable en place. `Descending` inverse exactement l'ordre ascendant.
pub fn sort_records<T: Sortable>(records: &mut [T], field: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord = compare_raw(a.sort_value(field).as_ref(), b.sort_value(field).as_ref());
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
