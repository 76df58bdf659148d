use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::output::print_value;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TableCommands {
    #[command(about = "List tables by name")]
    List,

    #[command(about = "Show one table")]
    Show {
        #[arg(help = "Table ID")]
        id: String,
    },

    #[command(about = "Add a table")]
    Create {
        #[arg(help = "Table name (at least 2 characters)")]
        name: String,
        #[arg(help = "Seats at the table")]
        capacity: u32,
    },

    #[command(about = "Seat a reservation at a table")]
    Seat {
        #[arg(help = "Table ID")]
        table_id: String,
        #[arg(help = "Reservation ID")]
        reservation_id: String,
    },

    #[command(about = "Clear a table and finish its reservation")]
    Clear {
        #[arg(help = "Table ID")]
        table_id: String,
    },
}

pub async fn handle(cmd: TableCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = match cmd {
        TableCommands::List => client.get("/tables").await?,
        TableCommands::Show { id } => client.get(&format!("/tables/{}", id)).await?,
        TableCommands::Create { name, capacity } => {
            client
                .post("/tables", json!({ "table_name": name, "capacity": capacity }))
                .await?
        }
        TableCommands::Seat { table_id, reservation_id } => {
            client
                .put(
                    &format!("/tables/{}/seat", table_id),
                    json!({ "reservation_id": reservation_id }),
                )
                .await?
        }
        TableCommands::Clear { table_id } => client.delete(&format!("/tables/{}/seat", table_id)).await?,
    };

    print_value(&output_format, &result)
}
