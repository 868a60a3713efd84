//! Events and the staff participations embedded in them.

use crate::domain::{EventId, Money, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One staff member's assignment to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub staff_id: StaffId,
    /// Only attended participations accrue an obligation.
    pub attended: bool,
    /// Pay owed for this event, as currently recorded on the event.
    pub amount_due: Money,
}

impl Participation {
    pub fn new(staff_id: StaffId, attended: bool, amount_due: Money) -> Self {
        Self {
            staff_id,
            attended,
            amount_due,
        }
    }
}

/// A staffed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub participations: Vec<Participation>,
    /// Total contract price agreed with the client.
    #[serde(default)]
    pub price: Money,
    /// Client down-payment already received.
    #[serde(default)]
    pub advance: Money,
}

impl Event {
    pub fn new(id: EventId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            participations: Vec::new(),
            price: Money::zero(),
            advance: Money::zero(),
        }
    }

    pub fn with_participation(mut self, participation: Participation) -> Self {
        self.participations.push(participation);
        self
    }

    pub fn with_price(mut self, price: Money, advance: Money) -> Self {
        self.price = price;
        self.advance = advance;
        self
    }

    /// The first attended participation of `staff_id`, if any.
    pub fn attended_participation(&self, staff_id: &StaffId) -> Option<&Participation> {
        self.participations
            .iter()
            .find(|p| p.attended && &p.staff_id == staff_id)
    }
}
