use axum::http::StatusCode;
use chrono::NaiveDate;
use gigledger::api::{self, AppState};
use gigledger::{
    Config, Event, EventId, LedgerCache, MockSnapshotSource, Money, Orchestrator, Participation,
    Payment, PaymentId, PaymentMethod, StaffCategory, StaffId, StaffMember,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tower::util::ServiceExt;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn setup_test_app(source: MockSnapshotSource) -> axum::Router {
    let config = Config {
        port: 0,
        bind_addr: Ipv4Addr::LOCALHOST,
        snapshot_path: "unused.json".to_string(),
        default_payment_method: PaymentMethod::Cash,
        ledger_cache: true,
    };
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(source),
        Arc::new(LedgerCache::new(config.ledger_cache)),
    ));
    api::create_router(AppState::new(config, orchestrator))
}

fn seeded_source() -> MockSnapshotSource {
    MockSnapshotSource::new()
        .with_staff(StaffMember::new(StaffId::from("m1"), "Ana", StaffCategory::Musician))
        .with_staff(StaffMember::new(StaffId::from("d1"), "Beto", StaffCategory::Driver))
        .with_event(
            Event::new(EventId::from("e1"), "Gala", day(1))
                .with_participation(Participation::new(
                    StaffId::from("m1"),
                    true,
                    Money::from_units(100),
                ))
                .with_participation(Participation::new(
                    StaffId::from("d1"),
                    true,
                    Money::from_units(40),
                )),
        )
        .with_event(Event::new(EventId::from("e2"), "Wedding", day(2)).with_participation(
            Participation::new(StaffId::from("m1"), true, Money::from_units(150)),
        ))
        .with_payment(Payment::new(
            PaymentId::from("p1"),
            StaffId::from("m1"),
            Money::from_str_canonical("120.5").unwrap(),
            day(3),
        ))
        .with_payment(Payment::new(
            PaymentId::from("p2"),
            StaffId::from("d1"),
            Money::from_units(40),
            day(3),
        ))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_ledgers_sorted_by_balance() {
    let app = setup_test_app(seeded_source());
    let (status, body) = get_json(app, "/v1/ledgers").await;

    assert_eq!(status, StatusCode::OK);
    let ledgers = body["ledgers"].as_array().unwrap();
    assert_eq!(ledgers.len(), 2);
    assert_eq!(ledgers[0]["staffId"], "m1");
    assert_eq!(ledgers[0]["balance"], "129.5");
    assert_eq!(ledgers[0]["totalEarned"], "250");
    assert_eq!(ledgers[0]["totalPaid"], "120.5");
    assert_eq!(ledgers[1]["staffId"], "d1");
    assert_eq!(ledgers[1]["balance"], "0");
    assert_eq!(ledgers[1]["category"], "driver");
    assert_eq!(body["snapshotKey"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_debtors_only_filter() {
    let app = setup_test_app(seeded_source());
    let (status, body) = get_json(app, "/v1/ledgers?debtorsOnly=true").await;

    assert_eq!(status, StatusCode::OK);
    let ledgers = body["ledgers"].as_array().unwrap();
    assert_eq!(ledgers.len(), 1);
    assert_eq!(ledgers[0]["staffId"], "m1");
}

#[tokio::test]
async fn test_single_ledger_history() {
    let app = setup_test_app(seeded_source());
    let (status, body) = get_json(app, "/v1/ledgers/m1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana");

    let history = body["history"].as_array().unwrap();
    let types: Vec<&str> = history.iter().map(|h| h["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["payment", "earning", "earning"]);

    let payment = &history[0];
    assert_eq!(payment["id"], "p1");
    assert_eq!(payment["title"], "Payment: event");
    let covered = payment["coveredEvents"].as_array().unwrap();
    assert_eq!(covered.len(), 2);
    assert_eq!(covered[0]["earningId"], "e1");
    assert_eq!(covered[0]["coveredAmount"], "100");
    assert_eq!(covered[1]["earningId"], "e2");
    assert_eq!(covered[1]["coveredAmount"], "20.5");

    assert_eq!(history[1]["id"], "e2");
    assert_eq!(history[1]["status"], "partial");
    assert_eq!(history[1]["paidAmount"], "20.5");
    assert_eq!(history[2]["status"], "paid");
    assert_eq!(history[2]["date"], "2024-03-01");
}

#[tokio::test]
async fn test_unknown_staff_is_404() {
    let app = setup_test_app(seeded_source());
    let (status, body) = get_json(app, "/v1/ledgers/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nobody"));
}

#[tokio::test]
async fn test_store_edits_show_up_on_next_request() {
    let source = seeded_source();
    let app = setup_test_app(source.clone());

    let (_, before) = get_json(app.clone(), "/v1/ledgers/m1").await;
    assert_eq!(before["balance"], "129.5");

    // Correct the Wedding fee; earnings always follow the current event data.
    source.update(|s| {
        s.events[1].participations[0].amount_due = Money::from_units(200);
    });

    let (_, after) = get_json(app, "/v1/ledgers/m1").await;
    assert_eq!(after["balance"], "179.5");
    assert_eq!(after["history"][1]["status"], "partial");
}
