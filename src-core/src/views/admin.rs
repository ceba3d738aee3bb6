// FICHIER : src-core/src/views/admin.rs

use super::state::{ViewSlot, ViewState};
use crate::backend::UserPatch;
use crate::models::user::{ADMIN_ROLE, ADMIN_ROLE_ID, AUTHENTICATED_ROLE, AUTHENTICATED_ROLE_ID};
use crate::models::User;
use crate::table::RecordTable;
use crate::utils::{AppError, VitrineResult};
use crate::AppContext;
use futures::future::join_all;
use serde_json::json;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

const HEADERS: [&str; 9] = [
    "id",
    "username",
    "email",
    "registration_date",
    "last_update_date",
    "status",
    "confirmed",
    "role",
    "collections_list",
];

/// Action groupée sur les comptes sélectionnés.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Block,
    Unblock,
    GrantAdmin,
    RevokeAdmin,
    Delete,
}

impl BulkAction {
    fn patch(self) -> Option<UserPatch> {
        match self {
            BulkAction::Block => Some(UserPatch {
                blocked: Some(true),
                role: None,
            }),
            BulkAction::Unblock => Some(UserPatch {
                blocked: Some(false),
                role: None,
            }),
            BulkAction::GrantAdmin => Some(UserPatch {
                blocked: None,
                role: Some(ADMIN_ROLE_ID),
            }),
            BulkAction::RevokeAdmin => Some(UserPatch {
                blocked: None,
                role: Some(AUTHENTICATED_ROLE_ID),
            }),
            BulkAction::Delete => None,
        }
    }

    fn new_role(self) -> Option<&'static str> {
        match self {
            BulkAction::GrantAdmin => Some(ADMIN_ROLE),
            BulkAction::RevokeAdmin => Some(AUTHENTICATED_ROLE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Block => "block",
            BulkAction::Unblock => "unblock",
            BulkAction::GrantAdmin => "grant-admin",
            BulkAction::RevokeAdmin => "revoke-admin",
            BulkAction::Delete => "delete",
        }
    }
}

/// Panneau d'administration des comptes.
pub struct AdminView {
    ctx: AppContext,
    slot: ViewSlot<Vec<User>>,
    selected: BTreeSet<u64>,
    last_error: Option<String>,
}

impl AdminView {
    pub fn open(ctx: &AppContext) -> Self {
        let view = Self {
            ctx: ctx.clone(),
            slot: ViewSlot::new(),
            selected: BTreeSet::new(),
            last_error: None,
        };
        view.reload();
        view
    }

    pub fn reload(&self) {
        let backend = self.ctx.backend.clone();
        self.slot.spawn(async move { backend.list_users().await });
    }

    pub async fn settled(&self) -> ViewState<Vec<User>> {
        self.slot.settled().await;
        self.slot.snapshot()
    }

    pub fn state(&self) -> ViewState<Vec<User>> {
        self.slot.snapshot()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // --- SÉLECTION ---

    pub fn selected(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn toggle(&mut self, id: u64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn select(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.selected.extend(ids);
    }

    /// Tout sélectionné -> rien ; sinon -> tout.
    pub fn toggle_all(&mut self) {
        let all: BTreeSet<u64> = self
            .slot
            .with(|state| state.data().map(|users| users.iter().map(|u| u.id).collect()))
            .unwrap_or_default();
        self.selected = if !all.is_empty() && self.selected == all {
            BTreeSet::new()
        } else {
            all
        };
    }

    // --- ACTIONS ---

    /// Une requête par compte, en parallèle, sans annulation des succès.
    /// Les échecs sont regroupés en une seule erreur listant les ids concernés.
    #[instrument(skip(self), fields(count = self.selected.len()))]
    pub async fn apply(&mut self, action: BulkAction) -> VitrineResult<()> {
        let ids = self.selected();
        if ids.is_empty() {
            return Ok(());
        }

        let backend = &self.ctx.backend;
        let calls = ids.iter().map(|&id| async move {
            let result = match action.patch() {
                Some(patch) => backend.update_user(id, patch).await,
                None => backend.delete_user(id).await,
            };
            (id, result)
        });
        let outcomes = join_all(calls).await;

        let failures: Vec<(u64, AppError)> = outcomes
            .into_iter()
            .filter_map(|(id, r)| r.err().map(|e| (id, e)))
            .collect();

        if action == BulkAction::Delete {
            self.selected.clear();
        }
        self.reload();
        self.slot.settled().await;

        // Rôle propre modifié avec succès : la session suit
        let mut session_error = None;
        if let (Some(role), Some(me)) = (action.new_role(), self.ctx.current_user()) {
            let own_ok = ids.contains(&me.id) && !failures.iter().any(|(id, _)| *id == me.id);
            if own_ok {
                if let Err(e) = self.ctx.session.update_role(role).await {
                    warn!("❌ Rôle de session non mis à jour : {}", e);
                    session_error = Some(e);
                }
            }
        }

        if failures.is_empty() {
            if let Some(e) = session_error {
                self.last_error = Some(e.user_message());
                return Err(e);
            }
            info!(action = action.as_str(), users = ?ids, "👥 Action groupée appliquée");
            self.last_error = None;
            return Ok(());
        }

        let failed_ids: Vec<u64> = failures.iter().map(|(id, _)| *id).collect();
        let mut parts: Vec<String> = failures
            .iter()
            .map(|(id, e)| format!("#{}: {}", id, e.user_message()))
            .collect();
        if let Some(e) = &session_error {
            parts.push(format!("session: {}", e.user_message()));
        }
        let message = parts.join("; ");
        let err = AppError::structured(
            "ERR_ADMIN_BULK_PARTIAL",
            message,
            json!({ "action": action.as_str(), "failed_ids": failed_ids }),
        );
        self.last_error = Some(err.user_message());
        tracing::error!(action = action.as_str(), failed = ?failed_ids, "❌ Action groupée partielle");
        Err(err)
    }

    pub fn table(&self) -> Option<RecordTable> {
        let tr = self.ctx.tr();
        self.slot.with(|state| {
            state.data().map(|users| {
                let mut table = RecordTable::translated(&HEADERS, tr);
                for u in users {
                    let role = match u.is_admin() {
                        true => tr.t("admin"),
                        false => tr.t("authenticated"),
                    };
                    table.push_row(vec![
                        u.id.to_string(),
                        u.username.clone(),
                        u.email.clone(),
                        u.created_at.map(|t| tr.format_timestamp(t)).unwrap_or_default(),
                        u.updated_at.map(|t| tr.format_timestamp(t)).unwrap_or_default(),
                        tr.t(if u.blocked { "blocked" } else { "active" }),
                        tr.yes_no(u.confirmed),
                        role,
                        u.collections
                            .iter()
                            .map(|c| c.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ]);
                }
                table
            })
        })
    }
}
