//! Read entities definitions.

pub mod lease;
pub mod property;

pub use self::property::Occupancy;
