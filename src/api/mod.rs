//! HTTP collaborators
//!
//! - Geolocation: IP-based or local-server position fixes
//! - KMA: ultra-short-range nowcast observations for a grid cell

pub mod geolocation;
pub mod kma;

pub use geolocation::{GeolocationClient, GeolocationResponse};
pub use kma::WeatherApiClient;

const USER_AGENT: &str = concat!("weathergrid/", env!("CARGO_PKG_VERSION"));
