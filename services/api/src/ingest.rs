use std::sync::Arc;

use clap::Args;

use huizen_tracker::config::AppConfig;
use huizen_tracker::error::AppError;
use huizen_tracker::listings::{FundaClient, IngestionError, IngestionRunner, RestHouseStore};
use huizen_tracker::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct IngestArgs {
    /// Override the number of result pages to fetch
    #[arg(long)]
    pub(crate) pages: Option<u32>,
    /// Fetch and filter, but insert nothing
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub(crate) async fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let source = Arc::new(FundaClient::new(&config.source.origin).map_err(IngestionError::from)?);
    let store = Arc::new(RestHouseStore::new(&config.store)?);
    let pages = args.pages.unwrap_or(config.source.pages);

    let runner = IngestionRunner::new(
        source,
        store,
        config.source.search_query(),
        config.ingest_config(),
        pages,
    );

    if args.dry_run {
        let outcome = runner.preview().await?;
        println!(
            "dry run: {} would be tracked, {} rejected",
            outcome.accepted.len(),
            outcome.rejected.len()
        );
        for house in &outcome.accepted {
            println!("  would track {} ({})", house.address, house.id);
        }
        for rejection in &outcome.rejected {
            println!(
                "  skipped {}: {}",
                rejection.listing.id.as_deref().unwrap_or("<no id>"),
                rejection.reason
            );
        }
        return Ok(());
    }

    let report = runner.run().await?;
    println!(
        "fetched {} listings, tracking {} new houses ({} rejected)",
        report.fetched, report.inserted, report.rejected
    );
    for (reason, count) in &report.rejected_by_reason {
        println!("  {reason}: {count}");
    }

    Ok(())
}
