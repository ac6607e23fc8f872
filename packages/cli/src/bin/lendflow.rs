use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use lendflow_config::Config;

#[derive(Parser)]
#[command(name = "lendflow")]
#[command(about = "Lendflow - deal ingestion service for lending workflows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(long, help = "API server port (overrides LENDFLOW_API_PORT)")]
        port: Option<u16>,
    },
    /// Run one submission through the ingestion pipeline and print the result
    Ingest {
        #[arg(long, help = "Read deal text from this file instead of stdin")]
        file: Option<PathBuf>,
        #[arg(
            long,
            env = "LENDFLOW_API_TOKEN",
            help = "Bearer token forwarded to the lending API"
        )]
        token: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    lendflow_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;

    match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            lendflow_cli::run_server(config).await
        }
        Commands::Ingest { file, token } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read stdin")?;
                    buffer
                }
            };

            let outcome = lendflow_cli::ingest_once(&config, &content, &token).await?;
            let marker = if outcome.used_fallback() {
                "⚠".yellow()
            } else {
                "✓".green()
            };
            eprintln!("{} {}", marker, outcome.message);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
    }
}
