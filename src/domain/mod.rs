//! Domain types for the staff ledger.
//!
//! This module provides:
//! - Exact money handling via the Money wrapper
//! - Record ids and payment tags
//! - Durable input records: Event, Payment, StaffMember, Expense
//! - The Snapshot bundle and its content key
//! - Stable ordering keys for deterministic allocation

pub mod event;
pub mod expense;
pub mod money;
pub mod ordering;
pub mod payment;
pub mod primitives;
pub mod snapshot;
pub mod staff;

pub use event::{Event, Participation};
pub use expense::{Expense, ExpenseCategory};
pub use money::Money;
pub use ordering::LedgerOrderingKey;
pub use payment::Payment;
pub use primitives::{EventId, ExpenseId, PaymentId, PaymentKind, PaymentMethod, StaffId};
pub use snapshot::{Snapshot, SnapshotKey};
pub use staff::{StaffCategory, StaffMember};
