//! `weathergrid` - KMA forecast-grid geodesy and region resolution
//!
//! Converts latitude/longitude fixes to the Korea Meteorological
//! Administration's Lambert Conformal Conic grid (and back), resolves grid
//! cells to the closest named region in a compiled-in table, and fetches
//! nowcast observations for a cell.

pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod locations;
pub mod models;
pub mod projection;
pub mod weather;

// Re-export core types for public API
pub use api::{GeolocationClient, GeolocationResponse, WeatherApiClient};
pub use crate::config::WeatherGridConfig;
pub use error::WeatherGridError;
pub use location_resolver::{
    LocationResolver, find_grid_by_name, find_name_by_grid, resolve_nearest,
};
pub use locations::LocationTable;
pub use models::{GeoCoordinate, GridCell, RegionRecord, ResolvedLocation};
pub use projection::{KMA_GRID, LccParams, LccProjection, project, unproject};
pub use weather::{Metric, Observation, WeatherHistory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherGridError>;
