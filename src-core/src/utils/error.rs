// FICHIER : src-core/src/utils/error.rs

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité du CLI) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

/// Type de résultat standard pour Vitrine.
pub type Result<T> = std::result::Result<T, AppError>;

/// Alias utilisé par le code qui lève des erreurs structurées (`vitrine_error!`).
pub type VitrineResult<T> = Result<T>;

/// Erreur enrichie : code stable, composant déduit du code, contexte JSON.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StructuredError {
    pub code: String,
    pub component: String,
    pub message: String,
    pub context: Value,
}

impl StructuredError {
    pub fn new(code: &str, message: impl Into<String>, context: Value) -> Self {
        Self {
            code: code.to_string(),
            component: component_from_code(code),
            message: message.into(),
            context,
        }
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// `ERR_NET_GET_SEND` -> `NET`
fn component_from_code(code: &str) -> String {
    code.strip_prefix("ERR_")
        .and_then(|rest| rest.split('_').next())
        .filter(|seg| !seg.is_empty())
        .unwrap_or("CORE")
        .to_string()
}

/// Enumération centrale des erreurs de l'application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Réseau : {0}")]
    Network(#[from] reqwest::Error),

    /// Réponse non-2xx du backend. `message` est le texte littéral renvoyé par le serveur.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Authentification requise : {0}")]
    AuthRequired(String),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Donnée invalide : {0}")]
    Validation(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("{0}")]
    Structured(StructuredError),
}

impl AppError {
    /// Construit une erreur structurée sans la lever (voir `vitrine_error!` pour la levée).
    pub fn structured(code: &str, message: impl Into<String>, context: Value) -> Self {
        AppError::Structured(StructuredError::new(code, message, context))
    }

    /// Message destiné à l'utilisateur final (le texte du backend tel quel quand il existe).
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend { message, .. } => message.clone(),
            AppError::AuthRequired(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Structured(data) => data.message.clone(),
            other => other.to_string(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Structured(data) => Some(data.code.as_str()),
            _ => None,
        }
    }
}

// Sérialisation en simple chaîne : les vues et le CLI affichent l'erreur telle quelle.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}

impl From<url::ParseError> for AppError {
    fn from(e: url::ParseError) -> Self {
        AppError::Config(format!("URL invalide : {}", e))
    }
}
