// FICHIER : src-core/src/utils/mod.rs

// =========================================================================
//  VITRINE UTILS - Foundation Layer
// =========================================================================

// --- 1. MODULES INTERNES ---

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod i18n;
pub mod json;
pub mod logger;
pub mod macros;
pub mod net;

// --- 2. FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result, StructuredError, VitrineResult};
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use uuid::Uuid;
}

/// **Physical Layer (I/O)** : Accès disque (écritures atomiques).
pub mod io {
    pub use super::fs::{
        create_dir_all, exists, read, read_json, remove_file, write, write_json_atomic, Path,
        PathBuf,
    };
}

/// **Data Abstraction** : Manipulation JSON.
pub mod data {
    pub use super::json::{get_path, json, parse, stringify, stringify_pretty, Map, Value};
    pub use serde::{Deserialize, Serialize};
    pub use std::collections::{HashMap, HashSet};
}

/// **Application Context** : Accès global Config/Log/Env/Langue.
pub mod context {
    pub use super::config::AppConfig;
    pub use super::env::{get_optional, prefixed};
    pub use super::i18n::{init_i18n, t, Translator};
    pub use super::logger::init_logging;
}

/// **Connectivity** : Client HTTP partagé et classification des réponses.
pub mod net_client {
    pub use super::net::{
        backend_error_message, get_client, send, send_empty, send_json, with_bearer,
    };
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::context::{AppConfig, Translator};
    pub use super::core::{AppError, DateTime, NaiveDate, Result, Utc, Uuid, VitrineResult};
    pub use super::data::{json, Deserialize, HashMap, HashSet, Serialize, Value};
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use tracing::{debug, error, info, instrument, warn};
}

// =========================================================================
// 3. EXPORTS DIRECTS
// =========================================================================

pub use config::AppConfig;
pub use error::{AppError, Result, VitrineResult};
pub use logger::init_logging;
