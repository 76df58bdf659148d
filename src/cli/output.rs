use serde_json::Value;

use crate::cli::OutputFormat;

/// Print an API payload in the selected format
pub fn print_value(format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => match value {
            Value::Array(rows) if rows.is_empty() => println!("(none)"),
            Value::Array(rows) => {
                for row in rows {
                    println!("{}", summarize(row));
                }
            }
            other => println!("{}", summarize(other)),
        },
    }
    Ok(())
}

/// One-line description of a reservation or table row
pub fn summarize(row: &Value) -> String {
    let field = |name: &str| match row.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    };

    if row.get("table_id").is_some() {
        let state = if row.get("occupied").and_then(Value::as_bool).unwrap_or(false) {
            format!("occupied by #{}", field("reservation_id"))
        } else {
            "free".to_string()
        };
        format!("#{} {} (seats {}) {}", field("table_id"), field("table_name"), field("capacity"), state)
    } else if row.get("reservation_id").is_some() {
        format!(
            "#{} {} {} {} {} party of {} [{}] {}",
            field("reservation_id"),
            field("reservation_date"),
            field("reservation_time"),
            field("first_name"),
            field("last_name"),
            field("people"),
            field("status"),
            field("mobile_number")
        )
    } else {
        row.to_string()
    }
}
