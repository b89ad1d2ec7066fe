pub mod location;
pub mod reservation;
pub mod restaurant;
pub mod slot;
