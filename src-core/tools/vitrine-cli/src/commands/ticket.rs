// FICHIER : src-core/tools/vitrine-cli/src/commands/ticket.rs

use super::{print_json, print_table};
use clap::{Args, Subcommand};
use vitrine::auth::require_session;
use vitrine::table::RecordTable;
use vitrine::tickets::{Priority, TicketDraft, TicketPage};
use vitrine::utils::prelude::*;
use vitrine::{user_info, user_success, AppContext};

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TicketCommands {
    /// Signale un problème au support
    Create {
        #[arg(long)]
        summary: String,
        /// High, Medium ou Low
        #[arg(long, default_value = "Low")]
        priority: Priority,
        /// Page concernée
        #[arg(long)]
        link: Option<String>,
        /// Nom de la collection concernée
        #[arg(long)]
        collection: String,
    },
    /// Mes tickets, par pages de 10
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(args: TicketArgs, ctx: &AppContext) -> Result<()> {
    let user = require_session(&ctx.session, "ticket_rule", ctx.tr())?;
    let client = ctx.tickets()?;

    match args.command {
        TicketCommands::Create {
            summary,
            priority,
            link,
            collection,
        } => {
            let draft = TicketDraft {
                summary,
                priority,
                link: link.unwrap_or_default(),
                collection,
            };
            let url = client.create(&draft, &user, ctx.tr()).await?;
            user_success!("ticket_created", "{}", url);
        }
        TicketCommands::List { page, json } => {
            let listing = client.list(&user.email, page).await?;
            if json {
                return print_json(&listing);
            }
            print_table(&ticket_table(&listing, ctx), "no_tickets_found");
            if listing.total_pages > 1 {
                user_info!("page", "{}/{}", listing.page, listing.total_pages);
            }
        }
    }
    Ok(())
}

fn ticket_table(listing: &TicketPage, ctx: &AppContext) -> RecordTable {
    let tr = ctx.tr();
    let mut table = RecordTable::translated(
        &["id", "summary", "status", "priority", "collection", "jira_link"],
        tr,
    );
    for t in &listing.tickets {
        let priority = t
            .priority
            .as_deref()
            .and_then(|p| p.parse::<Priority>().ok())
            .map(|p| tr.t(p.label_key()))
            .or_else(|| t.priority.clone())
            .unwrap_or_default();
        table.push_row(vec![
            t.key.clone(),
            t.summary.clone(),
            t.status.clone().unwrap_or_default(),
            priority,
            t.collection.clone().unwrap_or_default(),
            t.link.clone().unwrap_or_default(),
        ]);
    }
    table
}
