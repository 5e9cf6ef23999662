use anyhow::Context;
use anyhow::Result;
use illustra_backend_client::get_auth_file;
use serde_json::json;

use crate::AppContext;
use crate::output::print_json;
use crate::output::success;

#[derive(Debug, clap::Parser)]
pub struct AuthCli {
    #[command(subcommand)]
    pub subcommand: AuthSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum AuthSubcommand {
    /// Exchange email and password for a token pair stored in auth.json.
    Login(LoginArgs),

    /// Trade the stored refresh token for a new access token.
    Refresh,

    /// Delete stored credentials.
    Logout,

    /// Show whether a session is stored.
    Status,
}

#[derive(Debug, clap::Parser)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "ILLUSTRA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AuthCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self.subcommand {
            AuthSubcommand::Login(args) => run_login(ctx, args).await,
            AuthSubcommand::Refresh => run_refresh(ctx).await,
            AuthSubcommand::Logout => run_logout(ctx),
            AuthSubcommand::Status => run_status(ctx),
        }
    }
}

async fn run_login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let LoginArgs { email, password } = args;
    ctx.client
        .login(&email, &password)
        .await
        .context("login failed")?;

    if ctx.json {
        return print_json(&json!({ "email": email, "signed_in": true }));
    }
    success(format!("Signed in as {email}"));
    Ok(())
}

async fn run_refresh(ctx: &AppContext) -> Result<()> {
    ctx.client
        .refresh_access_token()
        .await
        .context("token refresh failed")?;

    if ctx.json {
        return print_json(&json!({ "refreshed": true }));
    }
    success("Access token refreshed");
    Ok(())
}

fn run_logout(ctx: &AppContext) -> Result<()> {
    let removed = ctx.client.logout().context("logout failed")?;
    if ctx.json {
        return print_json(&json!({ "removed": removed }));
    }
    if removed {
        success("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

fn run_status(ctx: &AppContext) -> Result<()> {
    let session = ctx.client.session();
    let credentials = session.credentials();
    let email = credentials.as_ref().and_then(|c| c.email.clone());
    let last_refresh = credentials.as_ref().and_then(|c| c.last_refresh);
    let auth_file = get_auth_file(&ctx.home);

    if ctx.json {
        return print_json(&json!({
            "signed_in": session.is_signed_in(),
            "email": email,
            "last_refresh": last_refresh,
            "auth_file": auth_file,
        }));
    }

    if session.is_signed_in() {
        match email {
            Some(email) => println!("Signed in as {email}"),
            None => println!("Signed in with an access token"),
        }
        if let Some(last_refresh) = last_refresh {
            println!("Last refresh: {}", last_refresh.to_rfc3339());
        }
    } else {
        println!("Not signed in");
    }
    println!("Credentials file: {}", auth_file.display());
    Ok(())
}
