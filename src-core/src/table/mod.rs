// FICHIER : src-core/src/table/mod.rs

//! Rendu tabulaire des enregistrements : colonnes dérivées du schéma, tri, export.

pub mod render;
pub mod sort;

pub use render::{cell, columns, Column, RecordTable, ITEM_FIXED_HEADERS};
pub use sort::{compare_raw, sort_records, SortDirection, Sortable};
