use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::AppContext;
use crate::config::config_path;
use crate::output::print_json;

#[derive(Debug, clap::Parser)]
pub struct ConfigCli {
    #[command(subcommand)]
    pub subcommand: ConfigSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum ConfigSubcommand {
    /// Print the configuration after file, environment and flag overrides.
    Show,

    /// Print the path of config.toml.
    Path,
}

impl ConfigCli {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        match self.subcommand {
            ConfigSubcommand::Show => run_show(ctx),
            ConfigSubcommand::Path => {
                println!("{}", config_path(&ctx.home).display());
                Ok(())
            }
        }
    }
}

fn run_show(ctx: &AppContext) -> Result<()> {
    if ctx.json {
        return print_json(&json!({
            "home": ctx.home,
            "config_file": config_path(&ctx.home),
            "config": ctx.config,
        }));
    }

    println!("{} {}", "home:".bold(), ctx.home.display());
    println!("{} {}", "config file:".bold(), config_path(&ctx.home).display());
    println!();
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
