// FICHIER : src-core/tools/vitrine-cli/src/commands/collection.rs

use super::{print_table, ready, require_route};
use clap::{Args, Subcommand};
use vitrine::backend::{CollectionStore, ImageUpload};
use vitrine::editor::{FieldPatch, SchemaEditor};
use vitrine::models::{Category, Collection};
use vitrine::schema::FieldType;
use vitrine::table::SortDirection;
use vitrine::utils::io::{self, PathBuf};
use vitrine::utils::prelude::*;
use vitrine::views::{CollectionView, CollectionsView};
use vitrine::{user_info, user_success, user_warn, AppContext};

#[derive(Args, Debug, Clone)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub command: CollectionCommands,
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// Champ de tri (fixe ou du schéma)
    #[arg(long, default_value = "id")]
    pub sort: String,
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CollectionCommands {
    /// Détail d'une collection et table de ses items
    Show {
        id: u64,
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Crée (sans id) ou modifie une collection
    Edit {
        id: Option<u64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// `nom:type` (string, number, text, boolean, date), répétable
        #[arg(long = "field")]
        fields: Vec<String>,
        #[arg(long = "remove-field")]
        remove_fields: Vec<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: u64,
    },
    /// Export CSV de la table des items
    Export {
        id: u64,
        #[arg(long, short)]
        output: PathBuf,
        #[command(flatten)]
        sort: SortArgs,
    },
}

pub async fn handle(args: CollectionArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        CollectionCommands::Show { id, sort } => {
            let view = sorted_view(ctx, id, &sort).await?;
            let Some(data) = ready(view.state())? else {
                user_warn!("no_results");
                return Ok(());
            };
            let c = &data.collection;
            println!("#{} {} [{}]", c.id, c.name, c.category);
            if !c.description.is_empty() {
                println!("{}", c.description);
            }
            println!(
                "{} {}",
                ctx.tr().t("created_by"),
                c.owner
                    .user_name
                    .clone()
                    .unwrap_or_else(|| ctx.tr().t("unknown_author"))
            );
            if let Some(table) = view.table() {
                print_table(&table, "no_items");
            }
        }
        CollectionCommands::Edit {
            id,
            name,
            description,
            category,
            fields,
            remove_fields,
            image,
        } => {
            require_route(ctx, None)?;
            let mut editor = match id {
                Some(id) => {
                    let existing = ctx.backend.get_collection(id).await?;
                    ensure_manager(ctx, &existing)?;
                    SchemaEditor::from_collection(&existing)
                }
                None => SchemaEditor::new(),
            };

            if let Some(name) = name {
                editor.draft.name = name;
            }
            if let Some(description) = description {
                editor.draft.description = description;
            }
            if let Some(category) = category {
                editor.draft.category = Category::parse_lenient(&category);
            }
            if let Some(path) = image {
                editor.draft.image = Some(ImageUpload::from_path(&path).await?);
            }
            for name in &remove_fields {
                if let Some(index) = editor.fields().iter().position(|f| &f.name == name) {
                    editor.remove_field(index);
                }
            }
            for spec in &fields {
                apply_field(&mut editor, spec)?;
            }
            if editor.draft.name.trim().is_empty() {
                return Err(AppError::Validation(ctx.tr().t("please_fill_in_all_fields")));
            }

            let user = ctx
                .current_user()
                .ok_or_else(|| AppError::AuthRequired(ctx.tr().t("login_required")))?;
            let saved = editor.submit(&*ctx.backend, &user).await?;
            user_success!("collection_saved", "#{} {}", saved.id, saved.name);
        }
        CollectionCommands::Delete { id } => {
            require_route(ctx, None)?;
            let mut view = CollectionsView::open(ctx, None);
            ready(view.settled().await)?;
            view.delete(id).await?;
            user_success!("collection_deleted", "#{}", id);
        }
        CollectionCommands::Export { id, output, sort } => {
            let view = sorted_view(ctx, id, &sort).await?;
            ready(view.state())?;
            let Some(table) = view.table() else {
                user_warn!("no_results");
                return Ok(());
            };
            io::write(&output, table.to_csv()).await?;
            user_info!("export_written", "{}", output.display());
        }
    }
    Ok(())
}

async fn sorted_view(ctx: &AppContext, id: u64, sort: &SortArgs) -> Result<CollectionView> {
    let mut view = CollectionView::open(ctx, id);
    view.settled().await;
    if !view.sort_fields().contains(&sort.sort) {
        return Err(AppError::Validation(format!(
            "Champ de tri inconnu '{}' (disponibles : {})",
            sort.sort,
            view.sort_fields().join(", ")
        )));
    }
    view.set_sort(&sort.sort, sort.direction);
    Ok(view)
}

fn ensure_manager(ctx: &AppContext, collection: &Collection) -> Result<()> {
    let allowed = ctx
        .current_user()
        .is_some_and(|user| ctx.session.is_admin() || collection.owner.is(&user));
    if allowed {
        Ok(())
    } else {
        Err(AppError::AuthRequired(ctx.tr().t("access_denied")))
    }
}

/// `nom:type` : modifie le champ existant ou en ajoute un en fin de liste.
fn apply_field(editor: &mut SchemaEditor, spec: &str) -> Result<()> {
    let (name, tag) = spec.split_once(':').unwrap_or((spec, "string"));
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(format!("Champ sans nom : '{}'", spec)));
    }
    let field_type: FieldType = tag.trim().parse()?;

    let index = match editor.fields().iter().position(|f| f.name == name) {
        Some(index) => index,
        None => {
            let index = editor.add_field();
            editor.change_field(index, FieldPatch::name(name))?;
            index
        }
    };
    editor.change_field(index, FieldPatch::field_type(field_type))
}
