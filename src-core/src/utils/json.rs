// FICHIER : src-core/src/utils/json.rs

use crate::utils::error::VitrineResult;
use crate::vitrine_error;
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
/// Capture l'erreur de parsing avec un extrait du contenu en cas d'échec.
pub fn parse<T: DeserializeOwned>(s: &str) -> VitrineResult<T> {
    match serde_json::from_str(s) {
        Ok(val) => Ok(val),
        Err(e) => {
            let snippet: String = s.chars().take(100).collect();
            vitrine_error!(
                "ERR_JSON_PARSE",
                error = e,
                context = json!({ "snippet": snippet })
            );
        }
    }
}

/// Convertit un type T en chaîne JSON compacte.
pub fn stringify<T: Serialize>(v: &T) -> VitrineResult<String> {
    match serde_json::to_string(v) {
        Ok(s) => Ok(s),
        Err(e) => vitrine_error!("ERR_JSON_STRINGIFY", error = e),
    }
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> VitrineResult<String> {
    match serde_json::to_string_pretty(v) {
        Ok(s) => Ok(s),
        Err(e) => vitrine_error!("ERR_JSON_STRINGIFY_PRETTY", error = e),
    }
}

/// Lit un chemin `a.b.c` dans un objet JSON.
pub fn get_path<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(root, |node, segment| node.get(segment))
}
