// FICHIER : src-core/src/utils/env.rs

use std::env;

/// Préfixe commun des variables d'environnement de l'application.
pub const ENV_PREFIX: &str = "VITRINE_";

/// Récupère une variable d'environnement (Optionnel). Une valeur vide vaut absence.
pub fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `VITRINE_` + clé : `prefixed("API_URL")` lit `VITRINE_API_URL`.
pub fn prefixed(key: &str) -> Option<String> {
    get_optional(&format!("{}{}", ENV_PREFIX, key))
}
