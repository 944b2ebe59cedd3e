//! Utility modules

pub mod geo;

pub use geo::{distance_meters, Coordinate};
