//! Data models for the weathergrid library
//!
//! - Grid: service grid cells and geographic coordinates
//! - Region: location table records and resolution results

pub mod grid;
pub mod region;

pub use grid::{GeoCoordinate, GridCell};
pub use region::{RegionRecord, ResolvedLocation};
