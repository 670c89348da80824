use std::sync::Arc;

use async_trait::async_trait;

use huizen_tracker::config::{AppConfig, DEFAULT_RING_BANDS};
use huizen_tracker::error::AppError;
use huizen_tracker::listings::{
    BoardColumnView, HouseService, InMemoryHouseStore, IngestConfig, IngestionRunner,
    ListingSource, OfferingType, PostcodeRing, RawListing, RestHouseStore, SearchQuery,
    SourceError, TriageError,
};

/// Print the triage board from the configured store.
pub(crate) async fn run_board() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    huizen_tracker::telemetry::init(&config.telemetry)?;

    let store = Arc::new(RestHouseStore::new(&config.store)?);
    let service = HouseService::new(store);
    let board = service.board().await.map_err(AppError::Store)?;
    print_board(&board);
    Ok(())
}

/// Offline walkthrough: ingest canned listings into an in-memory store,
/// triage a few of them, and print the resulting board.
pub(crate) async fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(InMemoryHouseStore::default());
    let runner = IngestionRunner::new(
        Arc::new(CannedSource),
        store.clone(),
        demo_query(),
        demo_config(),
        1,
    );

    let report = runner.run().await?;
    println!(
        "ingestion: fetched {}, tracking {}, rejected {}",
        report.fetched, report.inserted, report.rejected
    );
    for (reason, count) in &report.rejected_by_reason {
        println!("  {reason}: {count}");
    }

    println!();
    println!("triage:");
    let service = HouseService::new(store);
    triage(&service, "43210987", "bezichtiging gepland").await?;
    triage(&service, "43210991", "niet geïnteresseerd").await?;
    triage(&service, "43210991", "on hold").await?;

    println!();
    print_board(&service.board().await.map_err(AppError::Store)?);
    Ok(())
}

async fn triage(
    service: &HouseService<InMemoryHouseStore>,
    id: &str,
    label: &str,
) -> Result<(), AppError> {
    match service.set_status(id, label).await {
        Ok(house) => {
            println!("  {} -> {}", house.address, house.status.label());
            Ok(())
        }
        Err(TriageError::Store(err)) => Err(AppError::Store(err)),
        Err(rejected) => {
            println!("  rejected: {rejected}");
            Ok(())
        }
    }
}

fn print_board(columns: &[BoardColumnView]) {
    for view in columns {
        println!("{} ({})", view.column.label(), view.count);
        for house in &view.houses {
            println!(
                "  [{}] {} | EUR {} | {} m2 | {}",
                house.status.label(),
                house.address,
                house.price,
                house.surface_m2,
                house.url
            );
        }
    }
}

/// One canned result page exercising every filter once.
struct CannedSource;

#[async_trait]
impl ListingSource for CannedSource {
    async fn search(&self, _query: &SearchQuery, page: u32) -> Result<Vec<RawListing>, SourceError> {
        if page > 0 {
            return Ok(Vec::new());
        }
        Ok(vec![
            listing("43210987", "Lindengracht 5", 525_000, 62, "1015 KK"),
            listing("43210988", "Herengracht 210", 615_000, 74, "1016 BS"),
            listing("43210989", "Bellamystraat 41", 450_000, 48, "1053 BK"),
            listing("43210990", "Bijlmerdreef 100", 430_000, 72, "1102 CT"),
            listing("43210991", "Czaar Peterstraat 8", 455_000, 58, "1018 PW"),
        ])
    }
}

fn listing(id: &str, address: &str, price: i64, area: u32, postcode: &str) -> RawListing {
    RawListing {
        id: Some(id.to_string()),
        title: Some(address.to_string()),
        city: Some("Amsterdam".to_string()),
        price: Some(price),
        living_area: Some(area),
        bedrooms: Some(2),
        postcode: Some(postcode.to_string()),
        detail_url: Some(format!("/detail/koop/amsterdam/{id}/")),
        availability: Some("beschikbaar".to_string()),
        ..RawListing::default()
    }
}

fn demo_query() -> SearchQuery {
    SearchQuery {
        location: "amsterdam".to_string(),
        offering_type: OfferingType::Buy,
        price_min: Some(400_000),
        price_max: Some(570_000),
        area_min: Some(55),
        area_max: None,
        plot_min: None,
        plot_max: None,
        object_type: None,
        energy_label: None,
        sort: "newest".to_string(),
    }
}

fn demo_config() -> IngestConfig {
    IngestConfig {
        price_ceiling: 570_000,
        area_floor: 55,
        ring: PostcodeRing::from_bands(DEFAULT_RING_BANDS),
        listing_origin: "https://www.funda.nl".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huizen_tracker::listings::HouseStore;

    #[tokio::test]
    async fn demo_data_exercises_every_filter_once() {
        let store = Arc::new(InMemoryHouseStore::default());
        let runner = IngestionRunner::new(
            Arc::new(CannedSource),
            store.clone(),
            demo_query(),
            demo_config(),
            1,
        );

        let report = runner.run().await.expect("demo run");
        assert_eq!(report.fetched, 5);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.rejected_by_reason.get("price"), Some(&1));
        assert_eq!(report.rejected_by_reason.get("area"), Some(&1));
        assert_eq!(report.rejected_by_reason.get("ring"), Some(&1));

        let ids = store.ids().await.expect("ids");
        assert!(ids.contains("43210987"));
        assert!(ids.contains("43210991"));
    }
}
