pub mod api;
pub mod compile;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use compile::{CompiledLedgers, LedgerCache};
pub use config::Config;
pub use datasource::{DataSourceError, JsonFileSnapshotSource, MockSnapshotSource, SnapshotSource};
pub use domain::{
    Event, EventId, Expense, Money, Participation, Payment, PaymentId, PaymentKind,
    PaymentMethod, Snapshot, SnapshotKey, StaffCategory, StaffId, StaffMember,
};
pub use engine::{compute_all_ledgers, compute_ledger, plan_settlement, LedgerEntry, PaymentDraft};
pub use error::AppError;
pub use orchestration::Orchestrator;
