//! `bayline-customers` — customer records and their vehicles.

pub mod customer;
pub mod errors;
pub mod vehicle;

pub use customer::{Customer, CustomerId};
pub use vehicle::{Vehicle, VehicleId};
