//! Payments made to staff members.

use crate::domain::{EventId, Money, PaymentId, PaymentKind, PaymentMethod, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted payment. Carries no link to the earnings it covers; that
/// link is derived by the allocator on every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub staff_id: StaffId,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub kind: PaymentKind,
    /// Event the payer had in mind, if any. Never used for allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

impl Payment {
    pub fn new(id: PaymentId, staff_id: StaffId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id,
            staff_id,
            amount,
            date,
            note: None,
            method: None,
            kind: PaymentKind::Event,
            event_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_kind(mut self, kind: PaymentKind) -> Self {
        self.kind = kind;
        self
    }
}
