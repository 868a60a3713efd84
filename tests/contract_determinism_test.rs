//! Contract and determinism tests for all API endpoints.
//!
//! - Contract validation: every JSON key is camelCase, money is a string
//! - Determinism: same request twice = identical bytes, including when the
//!   store hands back its records in a different order

use axum::http::StatusCode;
use chrono::NaiveDate;
use gigledger::api::{self, AppState};
use gigledger::domain::{ExpenseCategory, ExpenseId};
use gigledger::{
    Config, Event, EventId, Expense, LedgerCache, MockSnapshotSource, Money, Orchestrator,
    Participation, Payment, PaymentId, PaymentKind, PaymentMethod, Snapshot, StaffCategory,
    StaffId, StaffMember,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tower::util::ServiceExt;

// =============================================================================
// Test Infrastructure
// =============================================================================

const GET_ENDPOINTS: &[&str] = &[
    "/v1/ledgers",
    "/v1/ledgers?debtorsOnly=true",
    "/v1/ledgers/m1",
    "/v1/stats",
    "/v1/events/e1/financials",
    "/v1/transactions",
    "/v1/transactions?format=csv",
];

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

fn m(s: &str) -> Money {
    Money::from_str_canonical(s).unwrap()
}

fn fixture() -> Snapshot {
    Snapshot {
        staff: vec![
            StaffMember::new(StaffId::from("m1"), "Ana", StaffCategory::Musician),
            StaffMember::new(StaffId::from("m2"), "Beto", StaffCategory::Musician),
            StaffMember::new(StaffId::from("a1"), "Cris", StaffCategory::Administrator),
        ],
        events: vec![
            Event::new(EventId::from("e1"), "Gala", day(1))
                .with_price(m("1200"), m("300"))
                .with_participation(Participation::new(StaffId::from("m1"), true, m("100")))
                .with_participation(Participation::new(StaffId::from("m2"), true, m("100"))),
            Event::new(EventId::from("e2"), "Club night", day(1))
                .with_participation(Participation::new(StaffId::from("m1"), true, m("80.5"))),
            Event::new(EventId::from("e3"), "Wedding", day(5))
                .with_price(m("900"), m("450"))
                .with_participation(Participation::new(StaffId::from("m2"), true, m("150")))
                .with_participation(Participation::new(StaffId::from("a1"), false, m("50"))),
        ],
        payments: vec![
            Payment::new(PaymentId::from("p1"), StaffId::from("m1"), m("50"), day(2))
                .with_method(PaymentMethod::Transfer),
            Payment::new(PaymentId::from("p2"), StaffId::from("m1"), m("60.25"), day(2))
                .with_kind(PaymentKind::Advance)
                .with_note("Fuel"),
            Payment::new(PaymentId::from("p3"), StaffId::from("m2"), m("300"), day(6)),
        ],
        expenses: vec![Expense::new(
            ExpenseId::from("x1"),
            "Strings",
            m("19.99"),
            ExpenseCategory::Equipment,
            day(3),
        )],
    }
}

fn reordered(mut snapshot: Snapshot) -> Snapshot {
    snapshot.staff.reverse();
    snapshot.events.reverse();
    snapshot.payments.reverse();
    snapshot.expenses.reverse();
    snapshot
}

fn setup_test_app(snapshot: Snapshot, ledger_cache: bool) -> axum::Router {
    let config = Config {
        port: 0,
        bind_addr: Ipv4Addr::LOCALHOST,
        snapshot_path: "unused.json".to_string(),
        default_payment_method: PaymentMethod::Cash,
        ledger_cache,
    };
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(MockSnapshotSource::from_snapshot(snapshot)),
        Arc::new(LedgerCache::new(ledger_cache)),
    ));
    api::create_router(AppState::new(config, orchestrator))
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

fn assert_all_keys_camel_case(value: &serde_json::Value, path: &str) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                // camelCase: starts with lowercase, no underscores
                assert!(
                    key.chars().next().map_or(true, |c| c.is_lowercase()),
                    "Key '{}' at path '{}' should start with lowercase (camelCase)",
                    key,
                    path
                );
                assert!(
                    !key.contains('_'),
                    "Key '{}' at path '{}' should not contain underscores (camelCase)",
                    key,
                    path
                );
                assert_all_keys_camel_case(val, &format!("{}.{}", path, key));
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                assert_all_keys_camel_case(val, &format!("{}[{}]", path, i));
            }
        }
        _ => {}
    }
}

/// Money fields are rendered as strings so clients never see float drift.
fn assert_money_is_string(value: &serde_json::Value, fields: &[&str], path: &str) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                if fields.contains(&key.as_str()) {
                    assert!(
                        val.is_string(),
                        "Money field '{}' at path '{}' should be a string",
                        key,
                        path
                    );
                }
                assert_money_is_string(val, fields, &format!("{}.{}", path, key));
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                assert_money_is_string(val, fields, &format!("{}[{}]", path, i));
            }
        }
        _ => {}
    }
}

const MONEY_FIELDS: &[&str] = &[
    "amount",
    "balance",
    "totalEarned",
    "totalPaid",
    "paidAmount",
    "totalAmount",
    "coveredAmount",
    "totalIncome",
    "totalExpense",
    "totalPaidOut",
    "totalDebt",
    "netBalance",
    "price",
    "advance",
    "outstanding",
    "staffCost",
    "netMargin",
];

// =============================================================================
// Contract Tests
// =============================================================================

#[tokio::test]
async fn test_contract_json_endpoints() {
    let app = setup_test_app(fixture(), true);

    for uri in GET_ENDPOINTS.iter().filter(|u| !u.contains("format=csv")) {
        let (status, body) = request(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_all_keys_camel_case(&json, uri);
        assert_money_is_string(&json, MONEY_FIELDS, uri);
    }
}

#[tokio::test]
async fn test_contract_ledger_shape() {
    let app = setup_test_app(fixture(), true);
    let (_, body) = request(app, "/v1/ledgers/m1").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    for field in ["staffId", "name", "category", "totalEarned", "totalPaid", "balance", "history"] {
        assert!(json.get(field).is_some(), "missing {}", field);
    }

    let history = json["history"].as_array().unwrap();
    let advance = history.iter().find(|h| h["id"] == "p2").unwrap();
    assert_eq!(advance["type"], "payment");
    assert_eq!(advance["kind"], "advance");
    assert_eq!(advance["note"], "Fuel");
    assert!(advance.get("method").is_none());

    let transfer = history.iter().find(|h| h["id"] == "p1").unwrap();
    assert_eq!(transfer["method"], "transfer");
    assert!(transfer.get("note").is_none());
}

#[tokio::test]
async fn test_contract_error_body() {
    let app = setup_test_app(fixture(), true);
    let (status, body) = request(app, "/v1/ledgers/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
    assert_eq!(json.as_object().unwrap().len(), 1);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[tokio::test]
async fn test_determinism_repeat_requests() {
    for cache in [true, false] {
        let app = setup_test_app(fixture(), cache);
        for uri in GET_ENDPOINTS {
            let (_s1, b1) = request(app.clone(), uri).await;
            let (_s2, b2) = request(app.clone(), uri).await;
            assert_eq!(b1, b2, "{} responses must be byte-identical (cache={})", uri, cache);
        }
    }
}

#[tokio::test]
async fn test_determinism_across_record_order() {
    let app = setup_test_app(fixture(), true);
    let shuffled = setup_test_app(reordered(fixture()), true);

    for uri in GET_ENDPOINTS {
        let (_s1, b1) = request(app.clone(), uri).await;
        let (_s2, b2) = request(shuffled.clone(), uri).await;
        assert_eq!(b1, b2, "{} must not depend on record order", uri);
    }
}
