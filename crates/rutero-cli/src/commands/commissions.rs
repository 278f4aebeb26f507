//! Commission ledger commands
//!
//! Usage: rutero commissions <compute|get|list> ...

use clap::{Args, Subcommand};
use rutero_core::errors::Result;
use rutero_core::ops::commission_ops;
use rutero_core_types::Period;

use super::{open_store, print_json};

#[derive(Debug, Args)]
pub struct CommissionsArgs {
    #[command(subcommand)]
    pub command: CommissionsCommand,

    /// SQLite database path
    #[arg(long, global = true, env = "RUTERO_DB", default_value = ".rutero/store.db")]
    pub db: String,
}

#[derive(Debug, Subcommand)]
pub enum CommissionsCommand {
    /// Recompute and persist the ledger for one calendar month
    Compute(ComputeArgs),
    /// Print one agent's record for one period
    Get(GetArgs),
    /// Print all computed periods for one agent, newest first
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Calendar month (YYYY-MM)
    pub period: String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Agent name
    pub agent: String,

    /// Calendar month (YYYY-MM)
    pub period: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Agent name
    pub agent: String,
}

/// Execute commissions command
pub fn execute(args: CommissionsArgs) -> Result<()> {
    let store = open_store(&args.db)?;

    match args.command {
        CommissionsCommand::Compute(compute) => {
            let period: Period = compute.period.parse()?;
            let records = commission_ops::compute_monthly(&store, period)?;
            print_json(&records)
        }
        CommissionsCommand::Get(get) => {
            let period: Period = get.period.parse()?;
            let record = commission_ops::get_record(&store, &get.agent, period)?;
            print_json(&record)
        }
        CommissionsCommand::List(list) => {
            let records = commission_ops::list_records(&store, &list.agent)?;
            print_json(&records)
        }
    }
}
