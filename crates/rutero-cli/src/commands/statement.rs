//! Account statement commands
//!
//! Usage: rutero statement <read|refresh> ...

use clap::{Args, Subcommand};
use rutero_core::errors::Result;
use rutero_core::ops::statement_ops;
use rutero_gateway::HttpInvoicingGateway;

use super::{open_store, print_json};

#[derive(Debug, Args)]
pub struct StatementArgs {
    #[command(subcommand)]
    pub command: StatementCommand,

    /// SQLite database path
    #[arg(long, global = true, env = "RUTERO_DB", default_value = ".rutero/store.db")]
    pub db: String,
}

#[derive(Debug, Subcommand)]
pub enum StatementCommand {
    /// Print the cached statement without touching the invoicing system
    Read(ReadArgs),
    /// Pull the invoicing system if the cached statement is stale
    Refresh(RefreshArgs),
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Client id
    pub client_id: String,
}

#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Client id
    pub client_id: String,

    /// Pull even when the cached statement is still fresh
    #[arg(long)]
    pub forced: bool,

    /// Invoicing system base URL
    #[arg(long, env = "RUTERO_GATEWAY_URL")]
    pub gateway_url: String,
}

/// Execute statement command
pub fn execute(args: StatementArgs) -> Result<()> {
    let store = open_store(&args.db)?;

    match args.command {
        StatementCommand::Read(read) => {
            let view = statement_ops::read_statement(&store, &read.client_id)?;
            print_json(&view)
        }
        StatementCommand::Refresh(refresh) => {
            let gateway = HttpInvoicingGateway::new(&refresh.gateway_url)?;
            let outcome = statement_ops::refresh_statement(
                &store,
                &gateway,
                &refresh.client_id,
                refresh.forced,
            )?;
            print_json(&outcome)
        }
    }
}
