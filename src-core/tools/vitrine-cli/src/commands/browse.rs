// FICHIER : src-core/tools/vitrine-cli/src/commands/browse.rs

use super::{print_json, print_table, ready};
use clap::Args;
use vitrine::utils::prelude::*;
use vitrine::views::{CollectionsView, HomeView, ViewState};
use vitrine::{user_info, user_warn, AppContext};

#[derive(Args, Debug, Clone)]
pub struct HomeArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CollectionsArgs {
    /// Seulement mes collections
    #[arg(long, conflicts_with = "owner")]
    pub mine: bool,
    /// Collections d'un propriétaire (UUID applicatif)
    #[arg(long)]
    pub owner: Option<String>,
}

/// Affiche une section ; une section en erreur n'empêche pas les autres.
fn section<T>(title_key: &str, state: ViewState<Vec<T>>, line: impl Fn(&T) -> String) {
    user_info!(title_key);
    match state {
        ViewState::Ready(rows) if !rows.is_empty() => {
            for row in &rows {
                println!("  {}", line(row));
            }
        }
        ViewState::Error(msg) => user_warn!("unexpected_error", "{}", msg),
        _ => user_info!("no_results"),
    }
}

pub async fn home(args: HomeArgs, ctx: &AppContext) -> Result<()> {
    let view = HomeView::open(ctx);
    view.settled().await;
    let (tags, latest, largest) = view.snapshot();

    if args.json {
        return print_json(&json!({
            "popular_tags": tags.data(),
            "latest_items": latest.data(),
            "largest_collections": largest.data(),
        }));
    }

    section("popular_tags", tags, |t| format!("#{} (item {})", t.tag, t.item_id));
    section("latest_items", latest, |i| {
        format!("{} · {} · {}", i.name, i.collection, i.author)
    });
    section("largest_collections", largest, |c| {
        format!("{} ({})", c.name, c.item_count)
    });
    Ok(())
}

pub async fn collections(args: CollectionsArgs, ctx: &AppContext) -> Result<()> {
    let view = if args.mine {
        CollectionsView::mine(ctx)?
    } else {
        CollectionsView::open(ctx, args.owner)
    };
    ready(view.settled().await)?;

    match view.table() {
        Some(table) => print_table(&table, "no_collections"),
        None => user_info!("no_collections"),
    }
    Ok(())
}
