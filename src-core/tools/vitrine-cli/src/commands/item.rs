// FICHIER : src-core/tools/vitrine-cli/src/commands/item.rs

use super::{print_json, ready, require_route};
use clap::{Args, Subcommand};
use vitrine::backend::{CollectionStore, ImageUpload, ItemStore, TagStore};
use vitrine::editor::RecordEditor;
use vitrine::schema::{FieldType, InputValue};
use vitrine::utils::io::PathBuf;
use vitrine::utils::prelude::*;
use vitrine::views::{CollectionView, CommentsView, ItemView, LikeToggle, ViewState};
use vitrine::{user_info, user_success, user_warn, AppContext};

#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ItemCommands {
    /// Fiche d'un item, ses commentaires et l'état du like
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Crée (sans --id) ou modifie un item
    Edit {
        /// Collection cible (obligatoire à la création)
        #[arg(long, required_unless_present = "id")]
        collection: Option<u64>,
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        name: Option<String>,
        /// Tags séparés par des virgules ou des espaces
        #[arg(long)]
        tags: Option<String>,
        /// `champ=valeur`, répétable ; une valeur vide efface le champ
        #[arg(long = "set")]
        values: Vec<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: u64,
    },
    /// Bascule le like de l'utilisateur courant
    Like {
        id: u64,
    },
}

pub async fn handle(args: ItemArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        ItemCommands::Show { id, json } => show(ctx, id, json).await,
        ItemCommands::Edit {
            collection,
            id,
            name,
            tags,
            values,
            image,
        } => {
            require_route(ctx, None)?;
            let user = ctx
                .current_user()
                .ok_or_else(|| AppError::AuthRequired(ctx.tr().t("login_required")))?;

            let mut editor = match id {
                Some(id) => {
                    let item = ctx.backend.get_item(id).await?;
                    let parent = item.collection.as_ref().map(|c| c.id).or(collection).ok_or_else(
                        || AppError::Validation(format!("Item #{} sans collection", id)),
                    )?;
                    let collection = ctx.backend.get_collection(parent).await?;
                    if !ctx.session.is_admin() && !item.owner.is(&user) {
                        return Err(AppError::AuthRequired(ctx.tr().t("access_denied")));
                    }
                    RecordEditor::for_item(&collection, &item)
                }
                None => {
                    let parent = collection.ok_or_else(|| {
                        AppError::Validation("--collection est requis".to_string())
                    })?;
                    RecordEditor::new(&ctx.backend.get_collection(parent).await?)
                }
            };

            let vocabulary = ctx.backend.list_tags().await?;
            editor = editor.with_vocabulary(vocabulary.into_iter().map(|t| t.label));

            if let Some(name) = name {
                editor.name = name;
            }
            if let Some(tags) = tags {
                editor.set_tags(tags);
            }
            if let Some(path) = image {
                editor.image = Some(ImageUpload::from_path(&path).await?);
            }
            for assignment in &values {
                apply_value(&mut editor, assignment)?;
            }
            if editor.name.trim().is_empty() {
                return Err(AppError::Validation(ctx.tr().t("please_fill_in_all_fields")));
            }

            match editor.submit(&*ctx.backend, &user).await {
                Ok(saved) => {
                    if !saved.created_tags.is_empty() {
                        user_info!("tags_created", "{}", saved.created_tags.join(", "));
                    }
                    user_success!("item_saved", "#{} {}", saved.item.id, saved.item.name);
                    Ok(())
                }
                Err(e) => {
                    if !editor.orphan_tags().is_empty() {
                        user_warn!("orphan_tags", "{}", editor.orphan_tags().join(", "));
                    }
                    Err(e)
                }
            }
        }
        ItemCommands::Delete { id } => {
            require_route(ctx, None)?;
            let item = ctx.backend.get_item(id).await?;
            let parent = item
                .collection
                .as_ref()
                .ok_or_else(|| AppError::Validation(format!("Item #{} sans collection", id)))?;

            let mut view = CollectionView::open(ctx, parent.id);
            ready(view.settled().await)?;
            view.delete_item(id).await?;
            user_success!("item_deleted", "#{} {}", id, item.name);
            Ok(())
        }
        ItemCommands::Like { id } => {
            let mut toggle = LikeToggle::new(ctx, id);
            toggle.refresh().await?;
            let state = toggle.toggle().await?;
            if state.liked {
                user_success!("liked", "#{}", id);
            } else {
                user_success!("unliked", "#{}", id);
            }
            Ok(())
        }
    }
}

async fn show(ctx: &AppContext, id: u64, json: bool) -> Result<()> {
    let view = ItemView::open(ctx, id);
    let comments = CommentsView::open(ctx, id);
    let (state, thread) = tokio::join!(view.settled(), comments.settled());

    let Some(data) = ready(state)? else {
        user_warn!("no_results");
        return Ok(());
    };
    let mut like = LikeToggle::new(ctx, id);
    let like_state = like.refresh().await?;

    if json {
        return print_json(&json!({
            "item": data.item,
            "liked": like_state.liked,
            "comments": thread.data(),
        }));
    }

    for line in view.details() {
        println!("{:<20} {}", format!("{} :", line.label), line.value);
    }
    if like_state.liked {
        user_info!("liked");
    }

    println!();
    match thread {
        ViewState::Ready(list) if !list.is_empty() => {
            for c in list {
                let author = c
                    .author
                    .map(|a| a.username)
                    .unwrap_or_else(|| ctx.tr().t("unknown_author"));
                println!("  [{}] {} : {}", c.id, author, c.text);
            }
        }
        ViewState::Error(msg) => user_warn!("unexpected_error", "{}", msg),
        _ => user_info!("no_comments_yet"),
    }
    Ok(())
}

/// `champ=valeur` : oui/non pour les booléens, texte libre sinon.
fn apply_value(editor: &mut RecordEditor, assignment: &str) -> Result<()> {
    let (name, raw) = assignment.split_once('=').ok_or_else(|| {
        AppError::Validation(format!("Affectation attendue 'champ=valeur' : '{}'", assignment))
    })?;
    let name = name.trim();
    let input = match editor.schema().get(name) {
        Some(FieldType::Boolean) => InputValue::Choice(parse_choice(raw)?),
        _ => InputValue::text(raw),
    };
    editor.input(name, input)
}

fn parse_choice(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "oui" | "да" => Ok(true),
        "no" | "n" | "false" | "0" | "non" | "нет" => Ok(false),
        other => Err(AppError::Validation(format!("Valeur oui/non attendue : '{}'", other))),
    }
}
