mod app;
mod commands;
mod logging;
mod prompts;
mod render;
mod utils;
mod views;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mycal_core::config::MycalConfig;
use mycal_core::guard::Route;
use mycal_core::identity::{IdentityGateway, IdentityProvider, MemoryProvider};
use mycal_core::picker::YearRange;
use mycal_provider_firebase::FirebaseProvider;

#[derive(Parser)]
#[command(name = "mycal")]
#[command(about = "A month calendar with per-day events, behind Firebase sign-in")]
struct Cli {
    /// Keep accounts in memory instead of using Firebase
    #[arg(long, global = true)]
    offline: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Open the login screen
    Login,
    /// Open the sign up screen
    Signup,
    /// Sign out of the saved session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Show where config and session files live
    ConfigPath,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Some(Commands::ConfigPath) = cli.command {
        return commands::config_path::run();
    }

    let config = MycalConfig::load().context("Failed to load config")?;
    let years = config.year_range()?;

    if cli.offline {
        tracing::info!("offline mode, accounts are kept in memory");
        return dispatch(cli.command, MemoryProvider::new(), years).await;
    }

    let provider = FirebaseProvider::from_config(&config).with_context(|| {
        format!(
            "Firebase is not set up. Edit {} or run with --offline",
            MycalConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".into())
        )
    })?;
    dispatch(cli.command, provider, years).await
}

async fn dispatch<P: IdentityProvider>(
    command: Option<Commands>,
    provider: P,
    years: YearRange,
) -> Result<()> {
    let gateway = IdentityGateway::new(provider);

    match command {
        None => app::run(&gateway, years, Route::Root).await,
        Some(Commands::Login) => app::run(&gateway, years, Route::Login).await,
        Some(Commands::Signup) => app::run(&gateway, years, Route::Signup).await,
        Some(Commands::Logout) => commands::logout::run(&gateway).await,
        Some(Commands::Whoami) => commands::whoami::run(&gateway).await,
        Some(Commands::ConfigPath) => commands::config_path::run(),
    }
}
