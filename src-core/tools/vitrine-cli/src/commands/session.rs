// FICHIER : src-core/tools/vitrine-cli/src/commands/session.rs

use clap::Args;
use vitrine::auth::AuthService;
use vitrine::utils::prelude::*;
use vitrine::{user_info, user_success, AppContext};

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Nom d'utilisateur ou email
    pub identifier: String,
    #[arg(long, env = "VITRINE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    #[arg(long, env = "VITRINE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(args: LoginArgs, ctx: &AppContext) -> Result<()> {
    let user = AuthService::new(&*ctx.backend, &ctx.session)
        .login(&args.identifier, &args.password)
        .await?;
    user_success!(
        "login_success",
        "{} ({})",
        user.username,
        user.role_type().unwrap_or("-")
    );
    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &AppContext) -> Result<()> {
    let user = AuthService::new(&*ctx.backend, &ctx.session)
        .register(&args.username, &args.email, &args.password)
        .await?;
    user_success!("register_success", "{}", user.username);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    AuthService::new(&*ctx.backend, &ctx.session).logout().await?;
    user_success!("logout_success");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.current_user() {
        Some(user) => {
            let role = user.role_type().map(|r| ctx.tr().t(r)).unwrap_or_default();
            user_info!("login_success", "{} <{}> ({})", user.username, user.email, role);
        }
        None => user_info!("not_logged_in"),
    }
    Ok(())
}

pub async fn theme(ctx: &AppContext) -> Result<()> {
    let theme = ctx.session.toggle_theme().await?;
    user_success!("theme_changed", "{}", theme);
    Ok(())
}
