// FICHIER : src-core/tools/vitrine-cli/src/commands/admin.rs

use super::{print_table, ready, require_route};
use clap::{Args, Subcommand};
use vitrine::models::user::ADMIN_ROLE;
use vitrine::utils::prelude::*;
use vitrine::views::{AdminView, BulkAction};
use vitrine::{user_success, AppContext};

#[derive(Args, Debug, Clone)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Ids des comptes visés
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommands {
    /// Table de tous les comptes
    List,
    Block(Selection),
    Unblock(Selection),
    GrantAdmin(Selection),
    RevokeAdmin(Selection),
    Delete(Selection),
}

impl AdminCommands {
    fn action(&self) -> Option<(BulkAction, &[u64])> {
        match self {
            AdminCommands::List => None,
            AdminCommands::Block(s) => Some((BulkAction::Block, &s.ids)),
            AdminCommands::Unblock(s) => Some((BulkAction::Unblock, &s.ids)),
            AdminCommands::GrantAdmin(s) => Some((BulkAction::GrantAdmin, &s.ids)),
            AdminCommands::RevokeAdmin(s) => Some((BulkAction::RevokeAdmin, &s.ids)),
            AdminCommands::Delete(s) => Some((BulkAction::Delete, &s.ids)),
        }
    }
}

pub async fn handle(args: AdminArgs, ctx: &AppContext) -> Result<()> {
    require_route(ctx, Some(ADMIN_ROLE))?;

    let mut view = AdminView::open(ctx);
    ready(view.settled().await)?;

    if let Some((action, ids)) = args.command.action() {
        view.select(ids.iter().copied());
        view.apply(action).await?;
        user_success!("users_updated", "{} ({:?})", action.as_str(), ids);
    }

    // Après un retrait de son propre rôle, le panneau n'est plus accessible
    if require_route(ctx, Some(ADMIN_ROLE)).is_ok() {
        if let Some(table) = view.table() {
            print_table(&table, "no_results");
        }
    }
    Ok(())
}
