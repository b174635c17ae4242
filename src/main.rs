//! apkstash CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use apkstash::cmd;
use apkstash::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            url,
            name,
            max_size,
            force,
        } => cmd::fetch::fetch(&url, name.as_deref(), max_size, force).await,
        Commands::Share { name, via } => cmd::share::share(name.as_deref(), via.as_deref()),
        Commands::Export { name, out } => cmd::export::export(name.as_deref(), out.as_deref()),
        Commands::List { json } => cmd::list::list(json),
        Commands::History { json } => cmd::history::history(json),
        Commands::Info { name } => cmd::info::info(&name),
        Commands::Verify { name } => cmd::verify::verify(name.as_deref()),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
