use serde::{Deserialize, Serialize};

/// Geographic location attached to a venue. Immutable once the
/// restaurant record is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            country: default_country(),
        }
    }
}

fn default_country() -> String {
    "USA".to_string()
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn country_defaults_to_usa() {
        let location = Location::new(42.3656, -71.0534, "123 Hanover St", "Boston", "MA", "02113");
        assert_eq!(location.country, "USA");
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let location = Location::new(42.3656, -71.0534, "123 Hanover St", "Boston", "MA", "02113");
        let value = serde_json::to_value(&location).expect("location should serialize");

        assert_eq!(value["latitude"], 42.3656);
        assert_eq!(value["postal_code"], "02113");
        assert_eq!(value["country"], "USA");
    }
}
