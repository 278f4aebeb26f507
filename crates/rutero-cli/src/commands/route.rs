//! Route batch commands
//!
//! Usage: rutero route <create|toggle|reorder|remove-stop|delete|show> ...

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rutero_core::errors::{CoreError, Result};
use rutero_core::ops::route_ops;

use super::{open_store, print_json};

#[derive(Debug, Args)]
pub struct RouteArgs {
    #[command(subcommand)]
    pub command: RouteCommand,

    /// SQLite database path
    #[arg(long, global = true, env = "RUTERO_DB", default_value = ".rutero/store.db")]
    pub db: String,
}

#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// Assign orders into a new route batch
    Create(CreateArgs),
    /// Flip a stop's delivered flag
    Toggle(StopArgs),
    /// Swap two stops' positions
    Reorder(ReorderArgs),
    /// Remove a stop and clear its order's assignment
    RemoveStop(StopArgs),
    /// Delete a batch and release all its orders
    Delete(BatchArgs),
    /// Print one batch
    Show(BatchArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Batch date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Responsible agent
    #[arg(long)]
    pub responsible: String,

    /// Source order ids, in stop order
    #[arg(required = true)]
    pub order_ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Batch id
    pub batch_id: String,

    /// Order id identifying the stop
    pub order_id: String,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Batch id
    pub batch_id: String,

    /// Position to move from (0-based)
    pub from: usize,

    /// Position to move to (0-based)
    pub to: usize,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Batch id
    pub batch_id: String,
}

/// Execute route command
pub fn execute(args: RouteArgs) -> Result<()> {
    let store = open_store(&args.db)?;

    match args.command {
        RouteCommand::Create(create) => {
            let date = parse_date(&create.date)?;
            let batch =
                route_ops::create_batch(&store, date, &create.responsible, &create.order_ids)?;
            print_json(&batch)
        }
        RouteCommand::Toggle(stop) => {
            let batch = route_ops::toggle_delivered(&store, &stop.batch_id, &stop.order_id)?;
            print_json(&batch)
        }
        RouteCommand::Reorder(reorder) => {
            let batch =
                route_ops::reorder_stops(&store, &reorder.batch_id, reorder.from, reorder.to)?;
            print_json(&batch)
        }
        RouteCommand::RemoveStop(stop) => {
            let batch = route_ops::remove_stop(&store, &stop.batch_id, &stop.order_id)?;
            print_json(&batch)
        }
        RouteCommand::Delete(batch) => {
            route_ops::delete_batch(&store, &batch.batch_id)?;
            println!("deleted {}", batch.batch_id);
            Ok(())
        }
        RouteCommand::Show(batch) => {
            let batch = route_ops::load_batch(&store, &batch.batch_id)?;
            print_json(&batch)
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse()
        .map_err(|_| CoreError::validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert!(parse_date("05/03/2024").is_err());
    }
}
