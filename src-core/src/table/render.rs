// FICHIER : src-core/src/table/render.rs

use crate::editor::tags::split_tags;
use crate::models::{Collection, Item};
use crate::schema::{resolve, FieldSchema, FieldType};
use crate::utils::data::{Map, Value};
use crate::utils::i18n::Translator;
use chrono::{DateTime, Utc};

/// Colonne issue du schéma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub field_type: FieldType,
}

/// Une colonne par champ, dans l'ordre du schéma, sauf les champs `text`.
pub fn columns(schema: &FieldSchema) -> Vec<Column> {
    schema
        .iter()
        .filter(|def| def.field_type.is_tabular())
        .map(|def| Column {
            name: def.name.clone(),
            field_type: def.field_type,
        })
        .collect()
}

/// Texte d'une cellule, via le comportement du type.
pub fn cell(fields: &Map<String, Value>, column: &Column, tr: &Translator) -> String {
    resolve(column.field_type).format(fields.get(&column.name), tr)
}

/// Clés de traduction des colonnes fixes d'une table d'items.
pub const ITEM_FIXED_HEADERS: [&str; 7] = [
    "id",
    "image",
    "name",
    "created_by",
    "publication_date",
    "last_modified_date",
    "tags",
];

/// Table de texte prête à afficher ou exporter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn timestamp_cell(at: Option<DateTime<Utc>>, tr: &Translator) -> String {
    at.map(|t| tr.format_timestamp(t)).unwrap_or_default()
}

impl RecordTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// En-têtes traduits depuis leurs clés.
    pub fn translated(keys: &[&str], tr: &Translator) -> Self {
        Self::new(keys.iter().map(|k| tr.t(k)))
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Table des items d'une collection : colonnes fixes puis colonnes du schéma.
    pub fn for_items(collection: &Collection, items: &[Item], tr: &Translator) -> Self {
        let schema_columns = columns(&collection.schema);

        let mut table = Self::translated(&ITEM_FIXED_HEADERS, tr);
        table
            .headers
            .extend(schema_columns.iter().map(|c| c.name.clone()));

        for item in items {
            let mut row = vec![
                item.id.to_string(),
                item.image
                    .as_ref()
                    .map(|m| m.url.clone())
                    .unwrap_or_else(|| tr.t("no_image")),
                item.name.clone(),
                item.owner
                    .user_name
                    .clone()
                    .unwrap_or_else(|| tr.t("unknown_author")),
                timestamp_cell(item.published_at, tr),
                timestamp_cell(item.updated_at, tr),
                split_tags(&item.tags).join(", "),
            ];
            row.extend(schema_columns.iter().map(|c| cell(&item.fields, c, tr)));
            table.push_row(row);
        }
        table
    }

    /// Rendu texte aligné (largeur en caractères).
    pub fn render_text(&self) -> String {
        let width = |s: &str| s.chars().count();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (i, c) in row.iter().enumerate() {
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width(c)),
                    None => widths.push(width(c)),
                }
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(width(c));
                    format!("{}{}", c, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out.push('\n');
        out
    }

    /// Export CSV (RFC 4180, fins de ligne CRLF).
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for record in std::iter::once(&self.headers).chain(self.rows.iter()) {
            let line = record
                .iter()
                .map(|field| csv_field(field))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&line);
            out.push_str("\r\n");
        }
        out
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
