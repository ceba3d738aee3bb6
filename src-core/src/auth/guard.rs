// FICHIER : src-core/src/auth/guard.rs

use super::session::SessionStore;
use crate::models::User;
use crate::utils::i18n::Translator;
use crate::utils::{AppError, VitrineResult};

/// Décision d'accès à une route protégée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    /// Pas de session : vers la connexion.
    RedirectLogin,
    /// Mauvais rôle : vers l'accueil, avec un avertissement à afficher.
    RedirectHome { warning: String },
}

/// `required_role` à `None` : une session suffit.
pub fn guard(session: &SessionStore, required_role: Option<&str>, tr: &Translator) -> RouteAccess {
    if !session.is_authenticated() {
        return RouteAccess::RedirectLogin;
    }
    match required_role {
        None => RouteAccess::Allow,
        Some(required) => match session.role() {
            Some(role) if role.eq_ignore_ascii_case(required) => RouteAccess::Allow,
            _ => RouteAccess::RedirectHome {
                warning: tr.t("access_denied"),
            },
        },
    }
}

/// Garde client des actions réservées aux connectés : aucune requête n'est émise
/// sans session, l'erreur porte le message traduit de `rule_key`.
pub fn require_session(session: &SessionStore, rule_key: &str, tr: &Translator) -> VitrineResult<User> {
    session
        .user()
        .ok_or_else(|| AppError::AuthRequired(tr.t(rule_key)))
}
