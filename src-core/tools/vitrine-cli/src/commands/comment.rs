// FICHIER : src-core/tools/vitrine-cli/src/commands/comment.rs

use super::ready;
use clap::{Args, Subcommand};
use vitrine::utils::prelude::*;
use vitrine::views::CommentsView;
use vitrine::{user_success, AppContext};

#[derive(Args, Debug, Clone)]
pub struct CommentArgs {
    #[command(subcommand)]
    pub command: CommentCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CommentCommands {
    /// Publie un commentaire sur un item
    Add { item: u64, text: String },
    /// Réservé à l'auteur ou à un administrateur
    Edit { item: u64, id: u64, text: String },
    Delete { item: u64, id: u64 },
}

pub async fn handle(args: CommentArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        CommentCommands::Add { item, text } => {
            let mut view = CommentsView::open(ctx, item);
            ready(view.settled().await)?;
            let comment = view.post(&text).await?;
            user_success!("comment_saved", "#{}", comment.id);
        }
        CommentCommands::Edit { item, id, text } => {
            let mut view = CommentsView::open(ctx, item);
            ready(view.settled().await)?;
            view.edit(id, &text).await?;
            user_success!("comment_saved", "#{}", id);
        }
        CommentCommands::Delete { item, id } => {
            let mut view = CommentsView::open(ctx, item);
            ready(view.settled().await)?;
            view.delete(id).await?;
            user_success!("comment_deleted", "#{}", id);
        }
    }
    Ok(())
}
