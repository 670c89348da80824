mod cli;
mod demo;
mod infra;
mod ingest;
mod routes;
mod server;

use huizen_tracker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
