use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use huizen_tracker::listings::{
    BoardColumn, Clock, House, HouseService, HouseStore, InMemoryHouseStore, Status, TriageError,
};

/// Hands out a strictly increasing instant per call.
struct StepClock {
    ticks: Mutex<u32>,
}

impl StepClock {
    fn new() -> Self {
        Self {
            ticks: Mutex::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut ticks = self.ticks.lock().expect("clock mutex poisoned");
        *ticks += 1;
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, *ticks).unwrap()
    }
}

fn house(id: &str, status: Status) -> House {
    House {
        id: id.to_string(),
        address: format!("Teststraat {id}"),
        neighbourhood: None,
        city: Some("Amsterdam".to_string()),
        price: 500_000,
        surface_m2: 60,
        bedrooms: 2,
        url: format!("https://www.funda.nl/{id}"),
        status,
        last_updated: None,
    }
}

async fn seeded() -> (Arc<InMemoryHouseStore>, HouseService<InMemoryHouseStore>) {
    let store = Arc::new(InMemoryHouseStore::default());
    store.insert(house("X1", Status::New)).await.expect("seed");
    let service = HouseService::with_clock(store.clone(), Arc::new(StepClock::new()));
    (store, service)
}

#[tokio::test]
async fn a_status_change_is_persisted_with_its_timestamp() {
    let (store, service) = seeded().await;

    let updated = service
        .set_status("X1", "bericht gestuurd")
        .await
        .expect("mutation applies");
    assert_eq!(updated.status, Status::MessageSent);
    assert!(updated.last_updated.is_some());

    let stored = store.fetch("X1").await.expect("fetch").expect("present");
    assert_eq!(stored.status, Status::MessageSent);
    assert_eq!(stored.last_updated, updated.last_updated);
}

#[tokio::test]
async fn a_same_status_save_writes_nothing() {
    let (store, service) = seeded().await;

    let unchanged = service
        .set_status("X1", "nieuw")
        .await
        .expect("no-op succeeds");
    assert_eq!(unchanged.status, Status::New);
    assert!(unchanged.last_updated.is_none());

    let stored = store.fetch("X1").await.expect("fetch").expect("present");
    assert!(stored.last_updated.is_none());
}

#[tokio::test]
async fn unknown_labels_leave_the_house_untouched() {
    let (store, service) = seeded().await;

    match service.set_status("X1", "on hold").await {
        Err(TriageError::UnknownStatus(label)) => assert_eq!(label, "on hold"),
        other => panic!("expected unknown status, got {other:?}"),
    }

    let stored = store.fetch("X1").await.expect("fetch").expect("present");
    assert_eq!(stored.status, Status::New);
    assert!(stored.last_updated.is_none());
}

#[tokio::test]
async fn mutating_a_missing_house_fails() {
    let (_, service) = seeded().await;

    match service.set_status("nope", "bod gedaan").await {
        Err(TriageError::UnknownHouse) => {}
        other => panic!("expected unknown house, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_triage_keeps_timestamps_monotonic() {
    let (store, service) = seeded().await;

    let first = service
        .set_status("X1", "bod gedaan")
        .await
        .expect("first change");
    let second = service
        .set_status("X1", "niet geboden")
        .await
        .expect("second change");
    let third = service
        .set_status("X1", "bod gedaan")
        .await
        .expect("third change");

    let (t1, t2, t3) = (
        first.last_updated.unwrap(),
        second.last_updated.unwrap(),
        third.last_updated.unwrap(),
    );
    assert!(t1 < t2 && t2 < t3);

    let stored = store.fetch("X1").await.expect("fetch").expect("present");
    assert_eq!(stored.status, Status::OfferMade);
    assert_eq!(stored.last_updated, Some(t3));
}

#[tokio::test]
async fn the_board_reflects_the_store_directly() {
    let store = Arc::new(InMemoryHouseStore::default());
    for (id, status) in [
        ("A", Status::ViewingDone),
        ("B", Status::MessageSent),
        ("C", Status::ViewingPlanned),
        ("D", Status::OfferAccepted),
    ] {
        store.insert(house(id, status)).await.expect("seed");
    }
    let service = HouseService::new(store);

    let board = service.board().await.expect("board");
    let viewing = board
        .iter()
        .find(|view| view.column == BoardColumn::Viewing)
        .expect("viewing column");
    let ids: Vec<&str> = viewing.houses.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["C", "B", "A"]);

    let won = board
        .iter()
        .find(|view| view.column == BoardColumn::Won)
        .expect("won column");
    assert_eq!(won.count, 1);
    assert_eq!(won.houses[0].id, "D");
}
