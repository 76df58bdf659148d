use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::output::print_value;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ReservationCommands {
    #[command(about = "List reservations for a date or matching a phone number")]
    List {
        #[arg(long, help = "Reservation date (YYYY-MM-DD)")]
        date: Option<String>,
        #[arg(long, help = "Partial mobile number, punctuation ignored")]
        mobile: Option<String>,
    },

    #[command(about = "Show one reservation")]
    Show {
        #[arg(help = "Reservation ID")]
        id: String,
    },

    #[command(about = "Book a new reservation")]
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long, help = "Reservation date (YYYY-MM-DD)")]
        date: String,
        #[arg(long, help = "Reservation time (HH:MM)")]
        time: String,
        #[arg(long, help = "Party size")]
        people: u32,
    },

    #[command(about = "Change a reservation's status")]
    Status {
        #[arg(help = "Reservation ID")]
        id: String,
        #[arg(help = "booked, seated, finished or cancelled")]
        status: String,
    },

    #[command(about = "Cancel a reservation")]
    Cancel {
        #[arg(help = "Reservation ID")]
        id: String,
    },
}

pub async fn handle(cmd: ReservationCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = match cmd {
        ReservationCommands::List { date, mobile } => {
            let mut query = Vec::new();
            if let Some(date) = date {
                query.push(("date", date));
            }
            if let Some(mobile) = mobile {
                query.push(("mobile_number", mobile));
            }
            client.get_with_query("/reservations", &query).await?
        }
        ReservationCommands::Show { id } => client.get(&format!("/reservations/{}", id)).await?,
        ReservationCommands::Create {
            first_name,
            last_name,
            mobile,
            date,
            time,
            people,
        } => {
            client
                .post(
                    "/reservations",
                    json!({
                        "first_name": first_name,
                        "last_name": last_name,
                        "mobile_number": mobile,
                        "reservation_date": date,
                        "reservation_time": time,
                        "people": people,
                    }),
                )
                .await?
        }
        ReservationCommands::Status { id, status } => set_status(client, &id, &status).await?,
        ReservationCommands::Cancel { id } => set_status(client, &id, "cancelled").await?,
    };

    print_value(&output_format, &result)
}

async fn set_status(client: &ApiClient, id: &str, status: &str) -> anyhow::Result<serde_json::Value> {
    client
        .put(&format!("/reservations/{}/status", id), json!({ "status": status }))
        .await
}
