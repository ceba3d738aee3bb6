// FICHIER : src-core/src/utils/i18n.rs

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

// EMBARQUEMENT DES RESSOURCES (Compilation)
const LOCALE_EN: &str = include_str!("../../locales/en.json");
const LOCALE_RU: &str = include_str!("../../locales/ru.json");

/// Langues embarquées dans le binaire.
pub const SUPPORTED_LANGS: [&str; 2] = ["en", "ru"];

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";
const FALLBACK_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// Instance globale (lue par les macros user_*). Les vues reçoivent leur Translator explicitement.
static TRANSLATOR: OnceLock<RwLock<Arc<Translator>>> = OnceLock::new();

/// Table de traduction d'une langue.
#[derive(Debug, Clone)]
pub struct Translator {
    translations: HashMap<String, String>,
    pub current_lang: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Traducteur vide : chaque clé se traduit par elle-même.
    pub fn new() -> Self {
        Self {
            translations: HashMap::new(),
            current_lang: "en".to_string(),
        }
    }

    /// Charge une langue embarquée (repli sur l'anglais si la langue est inconnue).
    pub fn embedded(lang: &str) -> Self {
        let (lang, content) = match lang {
            "ru" => ("ru", LOCALE_RU),
            _ => ("en", LOCALE_EN),
        };
        let mut translator = Self::new();
        match serde_json::from_str::<HashMap<String, String>>(content) {
            Ok(map) => {
                translator.translations = map;
                translator.current_lang = lang.to_string();
            }
            Err(e) => tracing::error!("❌ Locale embarquée illisible ({}): {}", lang, e),
        }
        translator
    }

    /// Surcharge les clés depuis `{dir}/{lang}.json` si le fichier existe.
    pub fn load_overrides(&mut self, dir: &Path) {
        let path = dir.join(format!("{}.json", self.current_lang));
        if !path.exists() {
            return;
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => {
                    self.translations.extend(map);
                    tracing::info!("🌍 Surcharges de langue chargées depuis {:?}", path);
                }
                Err(e) => tracing::error!("❌ Erreur parsing JSON langue ({:?}): {}", path, e),
            },
            Err(e) => tracing::error!("❌ Impossible de lire le fichier langue ({:?}): {}", path, e),
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Jeton localisé "oui"/"non".
    pub fn yes_no(&self, value: bool) -> String {
        self.t(if value { "yes" } else { "no" })
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let pattern = self
            .translations
            .get("date_format")
            .map(String::as_str)
            .unwrap_or(FALLBACK_DATE_FORMAT);
        date.format(pattern).to_string()
    }

    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        let pattern = self
            .translations
            .get("datetime_format")
            .map(String::as_str)
            .unwrap_or(FALLBACK_DATETIME_FORMAT);
        at.format(pattern).to_string()
    }
}

/// Initialise le système global avec une langue cible
pub fn init_i18n(lang: &str) {
    let translator = Arc::new(Translator::embedded(lang));
    let slot = TRANSLATOR.get_or_init(|| RwLock::new(translator.clone()));
    if let Ok(mut write_guard) = slot.write() {
        *write_guard = translator;
    }
}

/// Instance globale courante (un traducteur vide si rien n'est initialisé).
pub fn current() -> Arc<Translator> {
    TRANSLATOR
        .get()
        .and_then(|slot| slot.read().ok().map(|guard| guard.clone()))
        .unwrap_or_else(|| Arc::new(Translator::new()))
}

/// Helper public : Traduit une clé via l'instance globale
pub fn t(key: &str) -> String {
    if let Some(slot) = TRANSLATOR.get() {
        if let Ok(read_guard) = slot.read() {
            return read_guard.t(key);
        }
    }
    key.to_string()
}
