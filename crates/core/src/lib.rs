pub mod availability;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod provider;

pub use catalog::{Catalog, SearchCriteria, MAX_SEARCHABLE_PARTY_SIZE};
pub use config::{
    AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig,
    ProviderBackend, ProviderConfig, ServerConfig, Transport,
};
pub use domain::location::Location;
pub use domain::reservation::{
    CancellationReceipt, Reservation, ReservationId, ReservationStatus, REFUND_POLICY,
};
pub use domain::restaurant::{Restaurant, RestaurantId};
pub use domain::slot::AvailabilitySlot;
pub use errors::DomainError;
pub use ledger::{BookingRequest, ReservationLedger};
pub use provider::mock::MockProvider;
pub use provider::ReservationProvider;
