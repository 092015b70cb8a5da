//! Named administrative regions and resolution results

use super::grid::{GeoCoordinate, GridCell};
use serde::{Deserialize, Serialize};

/// One entry of the compiled-in location table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionRecord {
    /// Region name, matched byte-for-byte by name lookups
    pub name: &'static str,
    /// Grid cell the weather service uses for this region
    pub grid_cell: GridCell,
    /// Representative point, used to tell apart regions in neighbouring cells
    pub reference: GeoCoordinate,
}

impl RegionRecord {
    #[must_use]
    pub const fn new(
        name: &'static str,
        grid_x: i32,
        grid_y: i32,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name,
            grid_cell: GridCell::new(grid_x, grid_y),
            reference: GeoCoordinate::new(latitude, longitude),
        }
    }
}

/// The application's current location: a grid cell and, when known, its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub grid_cell: GridCell,
    /// Matched region name, `None` when nothing in the table qualified
    pub name: Option<String>,
    /// Distance from the originating fix to the region's reference point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(grid_cell: GridCell, name: Option<String>) -> Self {
        Self {
            grid_cell,
            name,
            distance_km: None,
        }
    }

    /// Label for display: the region name, or the bare grid numbers
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Grid {}", self.grid_cell),
        }
    }
}
