// FICHIER : src-core/tools/vitrine-cli/src/commands/mod.rs

// Un fichier par famille de sous-commandes

pub mod admin;
pub mod browse;
pub mod collection;
pub mod comment;
pub mod item;
pub mod session;
pub mod ticket;

use vitrine::auth::{guard, RouteAccess};
use vitrine::table::RecordTable;
use vitrine::utils::prelude::*;
use vitrine::views::ViewState;
use vitrine::{user_info, AppContext};

/// Données prêtes, ou `None` (ressource absente) ; l'état d'erreur devient une erreur.
pub fn ready<T>(state: ViewState<T>) -> Result<Option<T>> {
    match state {
        ViewState::Ready(data) => Ok(Some(data)),
        ViewState::Empty | ViewState::Loading => Ok(None),
        ViewState::Error(msg) => Err(AppError::structured("ERR_VIEW_LOAD", msg, Value::Null)),
    }
}

/// Table alignée, ou le message `empty_key` si elle n'a aucune ligne.
pub fn print_table(table: &RecordTable, empty_key: &str) {
    if table.is_empty() {
        user_info!(empty_key);
    } else {
        println!("{}", table.render_text());
    }
}

/// Sortie JSON indentée (`--json`).
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Garde de route : refuse la commande sans session, ou sans le rôle requis.
pub fn require_route(ctx: &AppContext, role: Option<&str>) -> Result<()> {
    match guard(&ctx.session, role, ctx.tr()) {
        RouteAccess::Allow => Ok(()),
        RouteAccess::RedirectLogin => Err(AppError::AuthRequired(ctx.tr().t("login_required"))),
        RouteAccess::RedirectHome { warning } => Err(AppError::AuthRequired(warning)),
    }
}
