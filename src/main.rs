mod commands;
mod config;
mod output;
mod providers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orgcal")]
#[command(about = "Fetch Google Calendar events and render them as an org-mode agenda")]
struct Cli {
    /// Config file (defaults to ~/.config/orgcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a profile's calendars and write its org agenda
    Fetch {
        /// Profile (top-level table) in the config file
        profile: String,
    },
    /// List the profiles in the config file
    Profiles,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Fetch { profile } => commands::fetch::run(cli.config.as_deref(), &profile).await,
        Commands::Profiles => commands::profiles::run(cli.config.as_deref()),
    }
}

/// Logs go to stderr; stdout is reserved for the agenda.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from(["orgcal", "--config", "/tmp/c.toml", "fetch", "work"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Fetch { ref profile } if profile == "work"));
    }

    #[test]
    fn test_fetch_requires_profile() {
        assert!(Cli::try_parse_from(["orgcal", "fetch"]).is_err());
    }
}
