//! Paddock CLI - manage your car photo catalog from the command line.

use clap::Parser;

mod cli;
mod commands;
mod error;


use cli::{Cli, Commands};
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paddock_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let base_url = cli.base_url.as_deref();
    let prefs_path = cli.prefs_path.as_deref();

    match cli.command {
        Commands::Login {
            name,
            email,
            photo_url,
        } => commands::profile::run_login(&name, &email, &photo_url, prefs_path).await,
        Commands::Logout => commands::profile::run_logout(prefs_path).await,
        Commands::Whoami { json } => commands::profile::run_whoami(json, prefs_path),
        Commands::List { json } => commands::list::run_list(json, base_url, prefs_path).await,
        Commands::Add {
            name,
            category,
            location,
            image,
        } => commands::add::run_add(&name, &category, &location, &image, base_url, prefs_path).await,
        Commands::Delete { id } => commands::delete::run_delete(&id, base_url, prefs_path).await,
        Commands::Layout { mode } => {
            commands::layout::run_layout(mode.map(Into::into), prefs_path).await
        }
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
    }
}
