// FICHIER : src-core/src/editor/tags.rs

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static TAG_SEPARATOR: OnceLock<Regex> = OnceLock::new();

fn separator() -> &'static Regex {
    TAG_SEPARATOR.get_or_init(|| Regex::new(r"[,\s]+").expect("motif de séparateur de tags"))
}

/// Découpe une saisie de tags : virgules et blancs, sans vides, sans doublons
/// (la première occurrence fixe l'ordre).
pub fn split_tags(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    separator()
        .split(input)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

/// Répartition des tags saisis entre vocabulaire connu et tags à créer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPlan {
    pub existing: Vec<String>,
    pub to_create: Vec<String>,
}

impl TagPlan {
    /// Comparaison exacte (sensible à la casse) avec le vocabulaire global.
    pub fn new<S: AsRef<str>>(input: &str, vocabulary: &[S]) -> Self {
        let known: HashSet<&str> = vocabulary.iter().map(AsRef::as_ref).collect();
        let (existing, to_create) = split_tags(input)
            .into_iter()
            .partition(|t| known.contains(t.as_str()));
        Self {
            existing,
            to_create,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.existing.iter().chain(self.to_create.iter())
    }
}

fn fragments(input: &str) -> Vec<&str> {
    input.split(',').map(str::trim).collect()
}

/// Suggestions pour le dernier fragment saisi : tags du vocabulaire qui commencent
/// par ce fragment (casse ignorée) et ne sont pas déjà saisis.
pub fn suggestions<S: AsRef<str>>(input: &str, vocabulary: &[S]) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    let entered = fragments(input);
    let current = entered.last().copied().unwrap_or_default().to_lowercase();

    vocabulary
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| !entered.contains(tag))
        .filter(|tag| tag.to_lowercase().starts_with(&current))
        .map(str::to_string)
        .collect()
}

/// Remplace le dernier fragment par la suggestion choisie et prépare le suivant.
pub fn apply_suggestion(input: &str, chosen: &str) -> String {
    let mut entered = fragments(input);
    match entered.last_mut() {
        Some(last) => *last = chosen,
        None => entered.push(chosen),
    }
    format!("{}, ", entered.join(", "))
}
