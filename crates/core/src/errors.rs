use thiserror::Error;

/// Failures surfaced by the booking engine. Every variant maps to a
/// structured error payload at the interface boundary; none of them
/// should ever tear down the serving process.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("restaurant {restaurant_id} not found")]
    RestaurantNotFound { restaurant_id: String },
    #[error("reservation {reservation_id} not found")]
    ReservationNotFound { reservation_id: String },
    #[error("invalid date_time format: {value}")]
    InvalidDateTime { value: String },
    #[error("price tier must be in range 1..=4, got {value}")]
    InvalidPriceTier { value: u8 },
    #[error("rating must be in range 0..=5, got {value}")]
    InvalidRating { value: f64 },
    #[error("party size must be at least 1, got {value}")]
    InvalidPartySize { value: i64 },
}

impl DomainError {
    /// True for the absent-record cases, as opposed to bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RestaurantNotFound { .. } | Self::ReservationNotFound { .. })
    }
}
