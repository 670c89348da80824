use std::sync::Arc;

use async_trait::async_trait;
use huizen_tracker::listings::{
    HouseStore, InMemoryHouseStore, IngestConfig, IngestionError, IngestionRunner, ListingSource,
    OfferingType, PostcodeRing, RawListing, SearchQuery, SourceError, Status,
};

/// Serves canned result pages instead of hitting the listing source.
struct StaticSource {
    pages: Vec<Vec<RawListing>>,
}

#[async_trait]
impl ListingSource for StaticSource {
    async fn search(&self, _query: &SearchQuery, page: u32) -> Result<Vec<RawListing>, SourceError> {
        Ok(self
            .pages
            .get(page as usize)
            .cloned()
            .unwrap_or_default())
    }
}

/// Fails every request, standing in for a source outage.
struct BrokenSource;

#[async_trait]
impl ListingSource for BrokenSource {
    async fn search(&self, _query: &SearchQuery, _page: u32) -> Result<Vec<RawListing>, SourceError> {
        Err(SourceError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

fn listing(id: &str, price: i64, area: u32, postcode: &str) -> RawListing {
    RawListing {
        id: Some(id.to_string()),
        title: Some(format!("Teststraat {id}")),
        price: Some(price),
        living_area: Some(area),
        postcode: Some(postcode.to_string()),
        detail_url: Some(format!("/detail/koop/amsterdam/{id}/")),
        ..RawListing::default()
    }
}

fn query() -> SearchQuery {
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

fn config() -> IngestConfig {
    IngestConfig {
        price_ceiling: 570_000,
        area_floor: 55,
        ring: PostcodeRing::from_bands(&[(1011, 1019)]),
        listing_origin: "https://www.funda.nl".to_string(),
    }
}

fn runner<S: ListingSource>(
    source: S,
    store: Arc<InMemoryHouseStore>,
    pages: u32,
) -> IngestionRunner<S, InMemoryHouseStore> {
    IngestionRunner::new(Arc::new(source), store, query(), config(), pages)
}

#[tokio::test]
async fn a_run_inserts_only_listings_that_clear_every_filter() {
    let store = Arc::new(InMemoryHouseStore::default());
    let source = StaticSource {
        pages: vec![
            vec![
                listing("X1", 500_000, 60, "1013 AA"),
                listing("X2", 700_000, 90, "1013 AA"),
            ],
            vec![
                listing("X3", 450_000, 40, "1013 AA"),
                listing("X4", 520_000, 65, "2000 AB"),
            ],
        ],
    };

    let report = runner(source, store.clone(), 2).run().await.expect("run");

    assert_eq!(report.fetched, 4);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.rejected, 3);
    assert_eq!(report.rejected_by_reason.get("price"), Some(&1));
    assert_eq!(report.rejected_by_reason.get("area"), Some(&1));
    assert_eq!(report.rejected_by_reason.get("ring"), Some(&1));

    let stored = store.fetch("X1").await.expect("fetch").expect("present");
    assert_eq!(stored.status, Status::New);
    assert!(stored.last_updated.is_none());
    assert_eq!(
        stored.url,
        "https://www.funda.nl/detail/koop/amsterdam/X1/"
    );
}

#[tokio::test]
async fn a_second_run_over_the_same_pages_inserts_nothing() {
    let store = Arc::new(InMemoryHouseStore::default());
    let pages = vec![vec![
        listing("X1", 500_000, 60, "1013 AA"),
        listing("X2", 450_000, 70, "1015 BX"),
    ]];

    let first = runner(StaticSource { pages: pages.clone() }, store.clone(), 1)
        .run()
        .await
        .expect("first run");
    assert_eq!(first.inserted, 2);

    let second = runner(StaticSource { pages }, store.clone(), 1)
        .run()
        .await
        .expect("second run");
    assert_eq!(second.inserted, 0);
    assert_eq!(second.rejected_by_reason.get("duplicate"), Some(&2));

    assert_eq!(store.ids().await.expect("ids").len(), 2);
}

#[tokio::test]
async fn preview_filters_without_writing() {
    let store = Arc::new(InMemoryHouseStore::default());
    let source = StaticSource {
        pages: vec![vec![listing("X1", 500_000, 60, "1013 AA")]],
    };

    let outcome = runner(source, store.clone(), 1)
        .preview()
        .await
        .expect("preview");

    assert_eq!(outcome.accepted.len(), 1);
    assert!(store.ids().await.expect("ids").is_empty());
}

#[tokio::test]
async fn a_source_outage_aborts_the_run() {
    let store = Arc::new(InMemoryHouseStore::default());

    let error = runner(BrokenSource, store.clone(), 1)
        .run()
        .await
        .expect_err("run fails");

    match error {
        IngestionError::Source(SourceError::Status(status)) => {
            assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
        }
        other => panic!("expected source error, got {other:?}"),
    }
    assert!(store.ids().await.expect("ids").is_empty());
}

#[tokio::test]
async fn incomplete_listings_are_counted_but_not_fatal() {
    let store = Arc::new(InMemoryHouseStore::default());
    let mut broken = listing("X9", 500_000, 60, "1013 AA");
    broken.living_area = None;

    let source = StaticSource {
        pages: vec![vec![broken, listing("X1", 500_000, 60, "1013 AA")]],
    };

    let report = runner(source, store, 1).run().await.expect("run");
    assert_eq!(report.inserted, 1);
    assert_eq!(report.rejected_by_reason.get("incomplete"), Some(&1));
}
