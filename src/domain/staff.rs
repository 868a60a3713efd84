//! Roster records.

use crate::domain::StaffId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffCategory {
    Musician,
    Staff,
    Driver,
    Camera,
    Administrator,
}

/// A staff member as owned by the roster. Read, never mutated, by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub category: StaffCategory,
    /// Free-text role label, e.g. "drums".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl StaffMember {
    pub fn new(id: StaffId, name: impl Into<String>, category: StaffCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            role: None,
        }
    }
}
