pub mod mock;

use async_trait::async_trait;

use crate::catalog::SearchCriteria;
use crate::domain::reservation::{CancellationReceipt, Reservation};
use crate::domain::restaurant::Restaurant;
use crate::domain::slot::AvailabilitySlot;
use crate::errors::DomainError;
use crate::ledger::BookingRequest;

/// The capability set a booking backend has to offer. Callers above
/// this boundary pass plain data and get structured records back, so
/// a real reservation network can replace the mock without any change
/// on their side. Implementations are picked by configuration, one
/// per process.
#[async_trait]
pub trait ReservationProvider: Send + Sync {
    async fn search_restaurants(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Restaurant>, DomainError>;

    async fn check_availability(
        &self,
        restaurant_id: &str,
        date_time: &str,
        party_size: i64,
    ) -> Result<Vec<AvailabilitySlot>, DomainError>;

    async fn place_reservation(
        &self,
        restaurant_id: &str,
        request: BookingRequest,
    ) -> Result<Reservation, DomainError>;

    async fn cancel_reservation(
        &self,
        reservation_id: &str,
        reason: Option<String>,
    ) -> Result<CancellationReceipt, DomainError>;

    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, DomainError>;
}
