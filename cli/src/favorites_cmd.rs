use anyhow::Result;
use illustra_backend_client::models::FavoriteTarget;
use illustra_backend_client::models::Id;
use illustra_navigator::FavoritesCache;
use illustra_navigator::FavoritesToggle;
use serde_json::json;

use crate::AppContext;
use crate::output::or_dash;
use crate::output::print_json;
use crate::output::print_table;

#[derive(Debug, clap::Parser)]
pub struct FavoritesCli {
    #[command(subcommand)]
    pub subcommand: FavoritesSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum FavoritesSubcommand {
    /// List the signed-in user's favorites.
    List,

    /// Flip the favorite flag of an illustration.
    Toggle {
        id: Id,

        /// State before the toggle as last seen. Defaults to the locally
        /// cached state, or "not favorited" when nothing is cached.
        #[arg(long)]
        current: Option<bool>,
    },

    /// Ask the backend whether an illustration is a favorite.
    Check { id: Id },
}

impl FavoritesCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let cache = FavoritesCache::new(&ctx.home);
        let mut favorites = FavoritesToggle::new(ctx.client.clone(), Some(cache));

        match self.subcommand {
            FavoritesSubcommand::List => {
                let listed = favorites.list().await?;
                if ctx.json {
                    return print_json(&listed);
                }
                if listed.is_empty() {
                    println!("No favorites yet.");
                    return Ok(());
                }
                let rows: Vec<[String; 2]> = listed
                    .iter()
                    .map(|favorite| {
                        let title = match &favorite.illustration {
                            FavoriteTarget::Expanded(illustration) => {
                                Some(illustration.title.clone())
                            }
                            FavoriteTarget::Id(_) => None,
                        };
                        [favorite.illustration_id().to_string(), or_dash(title)]
                    })
                    .collect();
                print_table(["Illustration", "Title"], &rows);
                Ok(())
            }
            FavoritesSubcommand::Toggle { id, current } => {
                let current = current.or(favorites.cached(id)).unwrap_or(false);
                let favorited = favorites.toggle(id, current).await;
                print_state(ctx, id, favorited, favorited == current)
            }
            FavoritesSubcommand::Check { id } => {
                let favorited = favorites.check(id).await;
                print_state(ctx, id, favorited, false)
            }
        }
    }
}

fn print_state(ctx: &AppContext, id: Id, favorited: bool, unchanged: bool) -> Result<()> {
    if ctx.json {
        return print_json(&json!({ "illustration": id, "is_favorited": favorited }));
    }
    let state = if favorited {
        "a favorite"
    } else {
        "not a favorite"
    };
    println!("Illustration {id} is {state}");
    if unchanged {
        println!("The toggle did not go through; see the log for details (-v).");
    }
    Ok(())
}
