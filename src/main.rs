use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{init_tracing, load_config, Settings, StorageBackend};
use database::{connect, run_migrations, Repositories};
use std::sync::Arc;
use web_server::AppState;

/// The main entry point for the Campus school administration service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments use the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = load_config().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&settings.logging).context("Failed to initialize logging")?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            handle_serve(settings).await
        }
        Commands::Migrate => handle_migrate(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// REST backend for students, teachers, courses and departments.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (the default when no command is given).
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
}

#[derive(Parser, Default)]
struct ServeArgs {
    /// Overrides `server.host` from the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(settings: Settings) -> anyhow::Result<()> {
    match settings.storage {
        StorageBackend::Postgres => {
            let pool = connect(&settings.database)
                .await
                .context("Failed to connect to the database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            let state = Arc::new(AppState::new(Repositories::postgres(pool.clone())));
            let result = web_server::run_server(&settings.server, state).await;

            pool.close().await;
            tracing::info!("Database pool closed.");
            result
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on exit.");
            let state = Arc::new(AppState::new(Repositories::in_memory()));
            web_server::run_server(&settings.server, state).await
        }
    }
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    if settings.storage == StorageBackend::Memory {
        anyhow::bail!("The in-memory storage backend has no migrations to run");
    }
    let pool = connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    pool.close().await;
    Ok(())
}
