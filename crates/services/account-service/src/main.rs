//! Account Service - HTTP server for account registration and lookup.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "account-service")]
#[command(about = "Account registration and lookup service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Defaults to ACCOUNT_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Defaults to ACCOUNT_SERVICE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = AccountServiceConfig::from_env();
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            account_service_lib::run_with_config(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            account_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
