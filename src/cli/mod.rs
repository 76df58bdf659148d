pub mod client;
pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "restaurant")]
#[command(about = "Restaurant CLI - manage reservations and tables over the HTTP API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "RESTAURANT_API_URL",
        default_value = "http://localhost:5001",
        help = "Base URL of the restaurant API"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server health status from the /health endpoint")]
    Health,

    #[command(about = "Reservation booking and lifecycle")]
    Reservations {
        #[command(subcommand)]
        cmd: commands::reservations::ReservationCommands,
    },

    #[command(about = "Table seating")]
    Tables {
        #[command(subcommand)]
        cmd: commands::tables::TableCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(cli.server);

    match cli.command {
        Commands::Health => {
            let health = client.get("/health").await?;
            output::print_value(&output_format, &health)
        }
        Commands::Reservations { cmd } => commands::reservations::handle(cmd, &client, output_format).await,
        Commands::Tables { cmd } => commands::tables::handle(cmd, &client, output_format).await,
    }
}
