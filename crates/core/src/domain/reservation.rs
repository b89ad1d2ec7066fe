use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::restaurant::RestaurantId;
use crate::errors::DomainError;

pub const REFUND_POLICY: &str =
    "No charge for cancellations made more than 24 hours in advance";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
}

/// An active booking, owned by the ledger. Callers only ever see
/// cloned snapshots. The restaurant name is denormalized at booking
/// time so the record survives later catalog changes, and `date_time`
/// stays the exact string the guest submitted because it doubles as
/// part of the duplicate-submission key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub date_time: String,
    pub party_size: i64,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub confirmation_code: String,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        restaurant_id: impl Into<String>,
        restaurant_name: impl Into<String>,
        date_time: impl Into<String>,
        party_size: i64,
        guest_name: impl Into<String>,
        guest_phone: impl Into<String>,
        guest_email: impl Into<String>,
        notes: Option<String>,
        confirmation_code: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if party_size < 1 {
            return Err(DomainError::InvalidPartySize { value: party_size });
        }

        Ok(Self {
            id: ReservationId(id.into()),
            restaurant_id: RestaurantId(restaurant_id.into()),
            restaurant_name: restaurant_name.into(),
            date_time: date_time.into(),
            party_size,
            guest_name: guest_name.into(),
            guest_phone: guest_phone.into(),
            guest_email: guest_email.into(),
            notes,
            status: ReservationStatus::Confirmed,
            confirmation_code: confirmation_code.into(),
            created_at: Utc::now(),
        })
    }
}

/// One-shot proof of cancellation. Returned once and never stored, so
/// a lost receipt cannot be reissued.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CancellationReceipt {
    pub reservation_id: ReservationId,
    pub restaurant_name: String,
    pub original_date_time: String,
    pub cancelled_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub refund_policy: String,
}
