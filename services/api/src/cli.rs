use clap::{Args, Parser, Subcommand};
use huizen_tracker::error::AppError;

use crate::demo::{run_board, run_demo};
use crate::ingest::{run_ingest, IngestArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Huizen Tracker",
    about = "Track housing listings from scrape to offer from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the dashboard HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch listings from the source and track the ones that pass the filters
    Ingest(IngestArgs),
    /// Print the triage board from the store
    Board,
    /// Run an offline end-to-end walkthrough against an in-memory store
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ingest(args) => run_ingest(args).await,
        Command::Board => run_board().await,
        Command::Demo => run_demo().await,
    }
}
