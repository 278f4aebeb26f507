//! Rutero CLI
//!
//! Command-line interface for the distribution dashboard core

use clap::{Parser, Subcommand};
use rutero_core::logging::{self, Profile};
use rutero_core_types::RequestId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "rutero")]
#[command(about = "Rutero - delivery routes, commissions and client statements", long_about = None)]
struct Cli {
    /// Emit JSON structured logs instead of human-readable ones
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Route batch operations
    Route(commands::route::RouteArgs),
    /// Commission ledger operations
    Commissions(commands::commissions::CommissionsArgs),
    /// Client account statement operations
    Statement(commands::statement::StatementArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let request_id = RequestId::new();
    let span = tracing::info_span!("request", id = %request_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Route(args) => commands::route::execute(args),
        Commands::Commissions(args) => commands::commissions::execute(args),
        Commands::Statement(args) => commands::statement::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
