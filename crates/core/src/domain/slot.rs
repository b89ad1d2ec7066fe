use serde::{Deserialize, Serialize};

/// A candidate booking time for one day. Derived on demand and never
/// persisted; identical inputs must always reproduce identical slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub time: String,
    pub max_party_size: i64,
    pub available: bool,
}
