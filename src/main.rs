use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, ServerOverrides, DEFAULT_CONFIG_FILE};
use database::{connect, run_migrations, StudentRepository};

mod logging;

/// The main entry point for the Roster student-records application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = configuration::load_config(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;

    let _log_guard = logging::init(&config.logging);

    // Execute the appropriate command
    match cli.command.unwrap_or_default() {
        Commands::Serve(overrides) => {
            overrides.apply(&mut config)?;
            web_server::run_server(&config).await
        }
        Commands::Migrate => handle_migrate(&config).await,
        Commands::List => handle_list(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small web application for managing student records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web application (the default).
    Serve(ServerOverrides),
    /// Apply the database schema and exit.
    Migrate,
    /// Print every student as a table.
    List,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve(ServerOverrides::default())
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database schema is up to date.");
    pool.close().await;
    Ok(())
}

async fn handle_list(config: &Config) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    run_migrations(&pool).await?;
    let students = StudentRepository::new(pool.clone()).list_all().await?;
    pool.close().await;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Roll No", "Email", "Age"]);
    for student in &students {
        table.add_row(vec![
            student.id.to_string(),
            student.name.clone(),
            student.roll_no.clone(),
            student.email.clone(),
            student.age.to_string(),
        ]);
    }
    println!("{table}");
    println!("{} student(s)", students.len());
    Ok(())
}
