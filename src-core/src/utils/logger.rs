// FICHIER : src-core/src/utils/logger.rs

use crate::utils::config::AppConfig;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

/// Cibles tracées en détail dans le fichier : appels au backend et session.
const TRACED_TARGETS: [&str; 3] = ["vitrine::backend", "vitrine::auth", "vitrine::tickets"];

/// Pile HTTP tenue à `warn` quel que soit le niveau demandé.
const QUIET_TARGETS: [&str; 3] = ["hyper", "hyper_util", "reqwest"];

/// Directives console : niveau configuré pour le crate, dépendances HTTP au silence.
pub fn console_directives(level: &str) -> String {
    let mut directives = vec![format!("warn,vitrine={}", level)];
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    directives.join(",")
}

/// Directives fichier : `debug` pour le backend, la session et les tickets.
pub fn file_directives(level: &str) -> String {
    let mut directives = vec![console_directives(level)];
    directives.extend(TRACED_TARGETS.iter().map(|t| format!("{}=debug", t)));
    directives.join(",")
}

pub fn init_logging() {
    INIT.call_once(|| {
        let (log_dir, default_level) = match AppConfig::try_get() {
            Some(config) => (config.logs_dir(), config.core.log_level.clone()),
            None => (std::env::temp_dir().join("vitrine_logs"), "warn".to_string()),
        };

        std::fs::create_dir_all(&log_dir).ok();

        // =========================================================================
        // LAYER 1 : FICHIER (JSON, rotation quotidienne, requêtes et session détaillées)
        // =========================================================================
        let file_appender = rolling::daily(&log_dir, "vitrine.log");

        let file_layer = fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(file_directives(&default_level)));

        // =========================================================================
        // LAYER 2 : CONSOLE (Pour l'Humain)
        // =========================================================================
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(console_directives(&default_level)));

        // Les macros user_* affichent déjà leur message : pas de doublon en console
        let anti_double_filter =
            filter_fn(|metadata| !metadata.fields().iter().any(|f| f.name() == "event"));

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .with_filter(anti_double_filter);

        // =========================================================================
        // ASSEMBLAGE ET INITIALISATION
        // =========================================================================
        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        if registry.try_init().is_err() {
            tracing::warn!("⚠️ [Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        tracing::info!("🚀 Logger initialisé. Logs disponibles dans : {:?}", log_dir);
    });
}
