pub mod controller;
pub mod converter;
pub mod error;
pub mod form;
pub mod geo;
pub mod mission;
pub mod page;
pub mod telemetry;
pub mod units;
pub mod utils;
pub mod waypoints;

#[cfg(test)]
mod tests;

pub use error::Error;
