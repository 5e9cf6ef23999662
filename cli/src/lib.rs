//! Command line client for the Illustra illustration catalog.

pub mod auth_cmd;
pub mod browse_cmd;
pub mod comments_cmd;
pub mod config;
pub mod config_cmd;
pub mod favorites_cmd;
pub mod illustrations_cmd;
pub mod logging;
pub mod output;
pub mod resolve_cmd;

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::ArgAction;
use clap::Parser;
use illustra_backend_client::Client;
use illustra_backend_client::Session;
use tracing::debug;

use crate::auth_cmd::AuthCli;
use crate::browse_cmd::BrowseCli;
use crate::comments_cmd::CommentsCli;
use crate::config::CliConfig;
use crate::config::find_illustra_home;
use crate::config::load_config;
use crate::config_cmd::ConfigCli;
use crate::favorites_cmd::FavoritesCli;
use crate::illustrations_cmd::IllustrationsCli;
use crate::resolve_cmd::ResolveArgs;
use crate::resolve_cmd::RouteArgs;

/// Browse and manage the illustration catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "illustra", version, about)]
pub struct Cli {
    /// Backend base URL including the API prefix. Overrides config.toml
    /// and ILLUSTRA_BASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Raise log verbosity; repeat for more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print machine readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Sign in, refresh the access token or sign out.
    Auth(AuthCli),

    /// List and inspect manufacturers, vehicles and the part taxonomy.
    Browse(BrowseCli),

    /// Narrow the catalog one level at a time, as the filter panel does.
    Resolve(ResolveArgs),

    /// Open a navigation page path and print its breadcrumbs and listing.
    Route(RouteArgs),

    /// List, inspect, upload and delete illustrations and their files.
    #[command(alias = "ill")]
    Illustrations(IllustrationsCli),

    /// Toggle and list favorite illustrations.
    Favorites(FavoritesCli),

    /// Read and post feedback comments.
    Comments(CommentsCli),

    /// Show the effective configuration.
    Config(ConfigCli),
}

/// Everything a subcommand needs: where state lives, the effective
/// configuration and a client bound to the stored session.
pub struct AppContext {
    pub home: PathBuf,
    pub config: CliConfig,
    pub client: Client,
    pub json: bool,
}

impl AppContext {
    pub fn load(base_url: Option<&str>, json: bool) -> Result<Self> {
        let home = find_illustra_home()?;
        let config = load_config(&home, base_url)?;
        let session = Session::from_env_or_home(&home)
            .with_context(|| format!("failed to read credentials from {}", home.display()))?;
        let client = Client::new(&config.client, session).context("failed to build HTTP client")?;
        debug!(home = %home.display(), base_url = client.base_url(), "context loaded");
        Ok(Self {
            home,
            config,
            client,
            json,
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            base_url,
            json,
            command,
            ..
        } = self;
        let ctx = AppContext::load(base_url.as_deref(), json)?;

        match command {
            Command::Auth(cli) => cli.run(&ctx).await,
            Command::Browse(cli) => cli.run(&ctx).await,
            Command::Resolve(args) => resolve_cmd::run_resolve(&ctx, args).await,
            Command::Route(args) => resolve_cmd::run_route(&ctx, args).await,
            Command::Illustrations(cli) => cli.run(&ctx).await,
            Command::Favorites(cli) => cli.run(&ctx).await,
            Command::Comments(cli) => cli.run(&ctx).await,
            Command::Config(cli) => cli.run(&ctx),
        }
    }
}
