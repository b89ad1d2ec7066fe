use crate::domain::location::Location;
use crate::domain::restaurant::Restaurant;
use crate::errors::DomainError;

/// Coarse ceiling applied at search time. Per-slot capacity is the
/// real constraint and is computed independently by the availability
/// schedule, so the two limits intentionally stay separate.
pub const MAX_SEARCHABLE_PARTY_SIZE: i64 = 12;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchCriteria {
    pub city: String,
    pub cuisine: Option<String>,
    pub date_time: Option<String>,
    pub party_size: Option<i64>,
    pub price_tier: Option<i64>,
    pub distance_km: Option<f64>,
}

impl SearchCriteria {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self { city: city.into(), ..Self::default() }
    }
}

/// Fixed set of venues, held in insertion order. Built once and never
/// mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    /// The demo data set: ten venues across four US cities.
    pub fn seeded() -> Result<Self, DomainError> {
        Ok(Self::new(vec![
            Restaurant::new(
                "rest_001",
                "Trattoria di Mare",
                "Italian",
                3,
                4.5,
                Location::new(42.3656, -71.0534, "123 Hanover St", "Boston", "MA", "02113"),
                "(617) 555-0101",
                "Authentic Italian seafood in the North End",
            )?,
            Restaurant::new(
                "rest_002",
                "The Steakhouse",
                "American",
                4,
                4.7,
                Location::new(42.3601, -71.0589, "456 Newbury St", "Boston", "MA", "02115"),
                "(617) 555-0102",
                "Premium steaks and fine dining",
            )?,
            Restaurant::new(
                "rest_003",
                "Sakura Sushi",
                "Japanese",
                2,
                4.3,
                Location::new(42.3505, -71.0759, "789 Commonwealth Ave", "Boston", "MA", "02215"),
                "(617) 555-0103",
                "Fresh sushi and traditional Japanese cuisine",
            )?,
            Restaurant::new(
                "rest_004",
                "Le Petit Bistro",
                "French",
                3,
                4.6,
                Location::new(42.3581, -71.0636, "321 Beacon St", "Boston", "MA", "02116"),
                "(617) 555-0104",
                "Classic French bistro fare",
            )?,
            Restaurant::new(
                "rest_005",
                "Taqueria Azteca",
                "Mexican",
                1,
                4.1,
                Location::new(42.3736, -71.1097, "555 Cambridge St", "Boston", "MA", "02134"),
                "(617) 555-0105",
                "Authentic Mexican street food",
            )?,
            Restaurant::new(
                "rest_006",
                "Golden Dragon",
                "Chinese",
                2,
                4.4,
                Location::new(40.7589, -73.9851, "100 Mott St", "New York", "NY", "10013"),
                "(212) 555-0201",
                "Szechuan and Cantonese specialties",
            )?,
            Restaurant::new(
                "rest_007",
                "Bella Napoli",
                "Italian",
                2,
                4.2,
                Location::new(40.7614, -73.9776, "250 Mulberry St", "New York", "NY", "10012"),
                "(212) 555-0202",
                "Wood-fired Neapolitan pizza",
            )?,
            Restaurant::new(
                "rest_008",
                "Spice Route",
                "Indian",
                2,
                4.5,
                Location::new(37.7749, -122.4194, "88 Mission St", "San Francisco", "CA", "94105"),
                "(415) 555-0301",
                "Modern Indian cuisine with California flair",
            )?,
            Restaurant::new(
                "rest_009",
                "The Garden Café",
                "Vegetarian",
                2,
                4.4,
                Location::new(37.7833, -122.4167, "456 Valencia St", "San Francisco", "CA", "94110"),
                "(415) 555-0302",
                "Farm-to-table vegetarian dining",
            )?,
            Restaurant::new(
                "rest_010",
                "BBQ Pit Masters",
                "BBQ",
                2,
                4.6,
                Location::new(30.2672, -97.7431, "123 Sixth St", "Austin", "TX", "78701"),
                "(512) 555-0401",
                "Texas-style smoked meats",
            )?,
        ]))
    }

    pub fn find(&self, restaurant_id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|restaurant| restaurant.id.0 == restaurant_id)
    }

    /// Filtered view of the catalog in insertion order. Filter values
    /// never error; a value nothing matches yields an empty result.
    ///
    /// `date_time` and `distance_km` are accepted but unused here: this
    /// backend has no availability-aware or proximity-aware narrowing.
    /// Real booking networks would apply both.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Restaurant> {
        self.restaurants
            .iter()
            .filter(|restaurant| matches_criteria(restaurant, criteria))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

fn matches_criteria(restaurant: &Restaurant, criteria: &SearchCriteria) -> bool {
    if restaurant.location.city.to_lowercase() != criteria.city.to_lowercase() {
        return false;
    }

    if let Some(cuisine) = &criteria.cuisine {
        if restaurant.cuisine.to_lowercase() != cuisine.to_lowercase() {
            return false;
        }
    }

    if let Some(price_tier) = criteria.price_tier {
        if i64::from(restaurant.price_tier) != price_tier {
            return false;
        }
    }

    if let Some(party_size) = criteria.party_size {
        if party_size > MAX_SEARCHABLE_PARTY_SIZE {
            return false;
        }
    }

    true
}
