// FICHIER : src-core/src/utils/config.rs

use crate::utils::env;
use crate::utils::error::Result;
use crate::vitrine_error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Singleton global pour la configuration (lue par le CLI au démarrage).
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Clés des chemins connus dans `paths`.
pub const PATH_DATA: &str = "PATH_VITRINE_DATA";
pub const PATH_LOGS: &str = "PATH_LOGS";

/// Nom du dossier applicatif (config et données).
pub const APP_DIR: &str = "vitrine";

/// Configuration globale structurée par niveaux de responsabilité
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub core: CoreConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    // Gestion transparente de la conversion Liste -> Map via Serde
    #[serde(default, deserialize_with = "deserialize_paths_flexible")]
    pub paths: HashMap<String, String>,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    pub env_mode: String,
    pub log_level: String,
    pub language: String,
}

/// Adresses des collaborateurs externes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointsConfig {
    /// Racine REST du backend de contenu (ex: `http://localhost:1337/api`).
    pub api_url: String,
    /// Racine des médias téléversés, préfixée aux URLs relatives d'images.
    #[serde(default)]
    pub upload_url: Option<String>,
    /// Service de ticketing (`/create-ticket`, `/tickets`).
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Préfixe des liens vers un ticket (`{browse}/{key}`).
    #[serde(default)]
    pub ticket_browse_url: Option<String>,
}

/// Durées de vie des cookies de session, en jours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_token_days")]
    pub token_days: i64,
    #[serde(default = "default_token_days")]
    pub user_days: i64,
    #[serde(default = "default_theme_days")]
    pub theme_days: i64,
}

// --- HELPERS SERDE ---

fn default_token_days() -> i64 {
    30
}
fn default_theme_days() -> i64 {
    365
}

fn deserialize_paths_flexible<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;

    if let Some(map) = v.as_object() {
        let mut paths = HashMap::new();
        for (key, val) in map {
            if let Some(s) = val.as_str() {
                paths.insert(key.clone(), s.to_string());
            }
        }
        Ok(paths)
    } else if let Some(arr) = v.as_array() {
        let mut paths = HashMap::new();
        for item in arr {
            let id = item.get("id").and_then(|v| v.as_str());
            let val = item.get("value").and_then(|v| v.as_str());
            if let (Some(k), Some(v)) = (id, val) {
                paths.insert(k.to_string(), v.to_string());
            }
        }
        Ok(paths)
    } else if v.is_null() {
        Ok(HashMap::new())
    } else {
        Err(serde::de::Error::custom(
            "Format de 'paths' invalide : attendu Map ou Liste",
        ))
    }
}

// --- IMPLÉMENTATIONS PAR DÉFAUT ---

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:1337/api".to_string(),
            upload_url: None,
            backend_url: None,
            ticket_browse_url: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_days: default_token_days(),
            user_days: default_token_days(),
            theme_days: default_theme_days(),
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            return Ok(());
        }

        let target_env = Self::resolve_env_mode();

        let mut config = if target_env == "test" {
            Self::load_test_sandbox()
        } else {
            Self::load_user_config(&target_env)?
        };
        config.apply_env_overrides();

        if CONFIG.set(config).is_err() {
            vitrine_error!(
                "ERR_CONFIG_INIT_ONCE",
                error = "La configuration est déjà initialisée"
            );
        }

        Ok(())
    }

    pub fn get() -> &'static AppConfig {
        CONFIG
            .get()
            .expect("❌ AppConfig non initialisé ! Appelez AppConfig::init() au démarrage.")
    }

    pub fn try_get() -> Option<&'static AppConfig> {
        CONFIG.get()
    }

    pub fn get_path(&self, id: &str) -> Option<PathBuf> {
        self.paths.get(id).map(PathBuf::from)
    }

    /// Dossier des données locales (jar de cookies, logs).
    pub fn data_dir(&self) -> PathBuf {
        self.get_path(PATH_DATA).unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
        })
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.get_path(PATH_LOGS)
            .unwrap_or_else(|| self.data_dir().join("logs"))
    }

    pub fn cookie_jar_path(&self) -> PathBuf {
        self.data_dir().join("cookies.json")
    }

    fn resolve_env_mode() -> String {
        if cfg!(test) || env::prefixed("ENV_MODE").as_deref() == Some("test") {
            "test".to_string()
        } else if let Some(env_override) = env::prefixed("ENV_MODE") {
            env_override
        } else if cfg!(debug_assertions) {
            "development".to_string()
        } else {
            "production".to_string()
        }
    }

    /// Fichier `config.json` : `VITRINE_CONFIG` ou `{config_dir}/vitrine/config.json`.
    fn config_file_path() -> Option<PathBuf> {
        if let Some(explicit) = env::prefixed("CONFIG") {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.json"))
    }

    fn load_user_config(env_mode: &str) -> Result<Self> {
        let Some(path) = Self::config_file_path().filter(|p| p.exists()) else {
            return Ok(Self::defaults(env_mode));
        };

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => vitrine_error!(
                "ERR_CONFIG_FS_READ",
                error = e,
                context = serde_json::json!({ "path": path.to_string_lossy() })
            ),
        };

        let mut config: AppConfig = match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => vitrine_error!(
                "ERR_CONFIG_PARSE",
                error = e,
                context = serde_json::json!({ "path": path.to_string_lossy() })
            ),
        };
        config.core.env_mode = env_mode.to_string();
        Ok(config)
    }

    fn defaults(env_mode: &str) -> Self {
        AppConfig {
            core: CoreConfig {
                env_mode: env_mode.to_string(),
                log_level: "warn".to_string(),
                language: "en".to_string(),
            },
            endpoints: EndpointsConfig::default(),
            paths: HashMap::new(),
            session: SessionConfig::default(),
        }
    }

    /// Variables `VITRINE_*` prioritaires sur le fichier.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env::prefixed("API_URL") {
            self.endpoints.api_url = v;
        }
        if let Some(v) = env::prefixed("UPLOAD_URL") {
            self.endpoints.upload_url = Some(v);
        }
        if let Some(v) = env::prefixed("BACKEND_URL") {
            self.endpoints.backend_url = Some(v);
        }
        if let Some(v) = env::prefixed("TICKET_BROWSE_URL") {
            self.endpoints.ticket_browse_url = Some(v);
        }
        if let Some(v) = env::prefixed("LANG") {
            self.core.language = v;
        }
        if let Some(v) = env::prefixed("DATA_DIR") {
            self.paths.insert(PATH_DATA.to_string(), v);
        }
    }

    fn load_test_sandbox() -> Self {
        let unique_id = format!(
            "{}_{}",
            std::process::id(),
            chrono::Utc::now().timestamp_micros()
        );
        let root = std::env::temp_dir().join(format!("vitrine_test_{}", unique_id));
        let _ = fs::create_dir_all(&root);

        let mut config = Self::defaults("test");
        config.core.log_level = "debug".to_string();
        config.paths.insert(
            PATH_DATA.to_string(),
            root.to_string_lossy().to_string(),
        );
        config.paths.insert(
            PATH_LOGS.to_string(),
            root.join("logs").to_string_lossy().to_string(),
        );
        config
    }
}

// --- TESTS UNITAIRES ---


// --- MODULE MOCKS PUBLIC ---

pub mod test_mocks {
    use super::*;

    /// Installe la configuration bac à sable si rien n'est encore initialisé.
    pub fn inject_mock_config() {
        if CONFIG.get().is_some() {
            return;
        }

        let config = AppConfig::load_test_sandbox();
        let _ = fs::create_dir_all(config.data_dir());
        let _ = CONFIG.set(config);
    }
}
