pub mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "news")]
#[command(about = "News CLI - fixture loading and health checks for the News API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Drop, recreate and load the four tables from JSON fixtures")]
    Seed {
        #[arg(long, help = "Directory holding topics/users/articles/comments.json", default_value = "data/test-data")]
        data_dir: PathBuf,
        #[arg(long, help = "Database URL override (defaults to DATABASE_URL)")]
        database_url: Option<String>,
    },

    #[command(about = "List tables in the connected database")]
    Tables {
        #[arg(long, help = "Database URL override (defaults to DATABASE_URL)")]
        database_url: Option<String>,
    },

    #[command(about = "Verify the database is reachable")]
    Check {
        #[arg(long, help = "Database URL override (defaults to DATABASE_URL)")]
        database_url: Option<String>,
    },

    #[command(about = "Call GET /health on a running server")]
    Ping {
        #[arg(long, help = "Server base URL (defaults to the configured host and port)")]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins when both flags are given
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Seed { data_dir, database_url } => {
            commands::seed::handle(data_dir, database_url, output_format).await
        }
        Commands::Tables { database_url } => commands::tables::handle(database_url, output_format).await,
        Commands::Check { database_url } => commands::check::handle(database_url, output_format).await,
        Commands::Ping { url } => commands::ping::handle(url, output_format).await,
    }
}
