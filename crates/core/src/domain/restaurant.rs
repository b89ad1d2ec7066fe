use serde::{Deserialize, Serialize};

use crate::domain::location::Location;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestaurantId(pub String);

/// A bookable venue. Built once at catalog initialization and never
/// mutated afterwards; there is no update or delete path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: String,
    pub price_tier: u8,
    pub rating: f64,
    pub location: Location,
    pub phone: String,
    pub description: Option<String>,
    pub accepts_reservations: bool,
}

impl Restaurant {
    /// Range checks reject out-of-bounds values outright rather than
    /// clamping them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price_tier: u8,
        rating: f64,
        location: Location,
        phone: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !(1..=4).contains(&price_tier) {
            return Err(DomainError::InvalidPriceTier { value: price_tier });
        }
        if !(0.0..=5.0).contains(&rating) {
            return Err(DomainError::InvalidRating { value: rating });
        }

        Ok(Self {
            id: RestaurantId(id.into()),
            name: name.into(),
            cuisine: cuisine.into(),
            price_tier,
            rating,
            location,
            phone: phone.into(),
            description: Some(description.into()),
            accepts_reservations: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Restaurant;
    use crate::domain::location::Location;
    use crate::errors::DomainError;

    fn boston_location() -> Location {
        Location::new(42.3656, -71.0534, "123 Hanover St", "Boston", "MA", "02113")
    }

    fn build(price_tier: u8, rating: f64) -> Result<Restaurant, DomainError> {
        Restaurant::new(
            "rest_001",
            "Trattoria di Mare",
            "Italian",
            price_tier,
            rating,
            boston_location(),
            "(617) 555-0101",
            "Authentic Italian seafood in the North End",
        )
    }

    #[test]
    fn accepts_boundary_price_tiers_and_ratings() {
        assert!(build(1, 0.0).is_ok());
        assert!(build(4, 5.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_price_tier() {
        let error = build(0, 4.5).expect_err("tier 0 should be rejected");
        assert_eq!(error, DomainError::InvalidPriceTier { value: 0 });

        let error = build(5, 4.5).expect_err("tier 5 should be rejected");
        assert_eq!(error, DomainError::InvalidPriceTier { value: 5 });
    }

    #[test]
    fn rejects_out_of_range_rating() {
        assert!(matches!(
            build(2, -0.1).expect_err("negative rating should be rejected"),
            DomainError::InvalidRating { .. }
        ));
        assert!(matches!(
            build(2, 5.1).expect_err("rating above five should be rejected"),
            DomainError::InvalidRating { .. }
        ));
    }

    #[test]
    fn new_restaurants_accept_reservations() {
        let restaurant = build(3, 4.5).expect("valid restaurant");
        assert!(restaurant.accepts_reservations);
        assert_eq!(restaurant.id.0, "rest_001");
    }
}
