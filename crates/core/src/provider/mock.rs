use async_trait::async_trait;

use crate::availability;
use crate::catalog::{Catalog, SearchCriteria};
use crate::domain::reservation::{CancellationReceipt, Reservation};
use crate::domain::restaurant::Restaurant;
use crate::domain::slot::AvailabilitySlot;
use crate::errors::DomainError;
use crate::ledger::{BookingRequest, ReservationLedger};
use crate::provider::ReservationProvider;

/// Self-contained backend for demos and tests: the seeded catalog,
/// the deterministic availability schedule and an in-memory ledger,
/// composed behind the provider boundary.
pub struct MockProvider {
    catalog: Catalog,
    ledger: ReservationLedger,
}

impl MockProvider {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self::with_catalog(Catalog::seeded()?))
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog, ledger: ReservationLedger::new() }
    }

    fn require_restaurant(&self, restaurant_id: &str) -> Result<&Restaurant, DomainError> {
        self.catalog.find(restaurant_id).ok_or_else(|| DomainError::RestaurantNotFound {
            restaurant_id: restaurant_id.to_string(),
        })
    }
}

#[async_trait]
impl ReservationProvider for MockProvider {
    async fn search_restaurants(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.catalog.search(criteria))
    }

    async fn check_availability(
        &self,
        restaurant_id: &str,
        date_time: &str,
        party_size: i64,
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let restaurant = self.require_restaurant(restaurant_id)?;
        availability::generate_slots(restaurant, date_time, party_size)
    }

    async fn place_reservation(
        &self,
        restaurant_id: &str,
        request: BookingRequest,
    ) -> Result<Reservation, DomainError> {
        let restaurant = self.require_restaurant(restaurant_id)?;
        self.ledger.place(restaurant, request)
    }

    async fn cancel_reservation(
        &self,
        reservation_id: &str,
        reason: Option<String>,
    ) -> Result<CancellationReceipt, DomainError> {
        self.ledger.cancel(reservation_id, reason)
    }

    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.ledger.list_for_guest(user_id))
    }
}
