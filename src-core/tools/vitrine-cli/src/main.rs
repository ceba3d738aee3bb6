// FICHIER : src-core/tools/vitrine-cli/src/main.rs

use clap::{Parser, Subcommand};

mod commands;

use vitrine::auth::AuthService;
use vitrine::utils::context::{self, AppConfig};
use vitrine::utils::i18n;
use vitrine::utils::error::AnyResult;
use vitrine::utils::prelude::*;
use vitrine::{user_error, AppContext};

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Gestion de collections typées sur le backend de contenu", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Ouvre une session
    Login(commands::session::LoginArgs),
    /// Crée un compte puis ouvre la session
    Register(commands::session::RegisterArgs),
    Logout,
    /// Utilisateur connecté et rôle
    Whoami,
    /// Bascule clair / sombre
    Theme,

    /// Tableau de bord (tags populaires, derniers items, plus grosses collections)
    Home(commands::browse::HomeArgs),
    /// Liste des collections
    Collections(commands::browse::CollectionsArgs),

    Collection(commands::collection::CollectionArgs),
    Item(commands::item::ItemArgs),
    Comment(commands::comment::CommentArgs),

    /// Panneau d'administration des comptes
    Admin(commands::admin::AdminArgs),

    Ticket(commands::ticket::TicketArgs),
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    // 1. Configuration (CRITIQUE)
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ CRITICAL ERROR: Impossible d'initialiser la configuration.");
        eprintln!("   Détails : {}", e);
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 2. Logger puis langue
    context::init_logging();
    context::init_i18n(&config.core.language);

    // 3. Parsing
    let cli = Cli::parse();

    // 4. Contexte + session restaurée
    let ctx = AppContext::from_config(config, i18n::current()).await?;
    if let Err(e) = AuthService::new(&*ctx.backend, &ctx.session).restore().await {
        tracing::warn!("Session non restaurée : {}", e);
    }

    if let Err(e) = execute_command(cli.command, &ctx).await {
        user_error!("CMD_FAIL", "{}", e.user_message());
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
    Ok(())
}

async fn execute_command(cmd: Commands, ctx: &AppContext) -> Result<()> {
    match cmd {
        Commands::Login(args) => commands::session::login(args, ctx).await,
        Commands::Register(args) => commands::session::register(args, ctx).await,
        Commands::Logout => commands::session::logout(ctx).await,
        Commands::Whoami => commands::session::whoami(ctx),
        Commands::Theme => commands::session::theme(ctx).await,
        Commands::Home(args) => commands::browse::home(args, ctx).await,
        Commands::Collections(args) => commands::browse::collections(args, ctx).await,
        Commands::Collection(args) => commands::collection::handle(args, ctx).await,
        Commands::Item(args) => commands::item::handle(args, ctx).await,
        Commands::Comment(args) => commands::comment::handle(args, ctx).await,
        Commands::Admin(args) => commands::admin::handle(args, ctx).await,
        Commands::Ticket(args) => commands::ticket::handle(args, ctx).await,
    }
}
