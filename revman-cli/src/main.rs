//! Revman CLI - Command line interface for the Review Manager
//!
//! Track code review requests, act on them and check review rewards.

mod commands;
mod prompt;
mod render;

use clap::{Parser, Subcommand};
use revman_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AuthArgs, CreateArgs, ManageArgs, RewardsArgs, TodoArgs};

/// Review Manager: code review requests, assignments and rewards
#[derive(Parser, Debug)]
#[command(name = "revman")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend URL (overrides config and env)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    assume_yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Reviews assigned to me
    #[command(visible_alias = "t")]
    Todo(TodoArgs),

    /// Review requests I created
    #[command(visible_alias = "m")]
    Manage(ManageArgs),

    /// Create a review request
    #[command(visible_alias = "new")]
    Create(CreateArgs),

    /// Rewards earned per cycle
    Rewards(RewardsArgs),

    /// List users
    Users,

    /// Log in, log out and inspect the session
    Auth(AuthArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::load_with_overrides(cli.base_url.clone())?;

    tracing::debug!(
        base_url = %config.server.base_url,
        timeout = ?config.server.timeout,
        dev_login = config.features.dev_login,
        "Configuration loaded"
    );

    match cli.command {
        Some(Commands::Version) => {
            println!("revman {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Todo(args)) => {
            args.execute(&config, cli.assume_yes).await?;
        }
        Some(Commands::Manage(args)) => {
            args.execute(&config, cli.assume_yes).await?;
        }
        Some(Commands::Create(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Rewards(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Users) => {
            commands::users::execute(&config).await?;
        }
        Some(Commands::Auth(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Revman Configuration");
            println!("====================");
            println!();
            println!("Server:");
            println!("  base_url: {}", config.server.base_url);
            println!("  timeout: {:?}", config.server.timeout);
            println!();
            println!("Features:");
            println!("  dev_login: {}", config.features.dev_login);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Review Manager - code review requests and rewards");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["revman", "manage", "--tab", "approved", "-y", "--base-url", "http://x"]);
        assert!(cli.assume_yes);
        assert_eq!(cli.base_url.as_deref(), Some("http://x"));
        assert!(matches!(cli.command, Some(Commands::Manage(_))));
    }
}
