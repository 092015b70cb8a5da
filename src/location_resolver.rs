//! Location Resolution Module
//!
//! Resolves GPS/IP fixes, grid cells and typed region names against the
//! location table. All lookups are linear scans with first-match semantics.
//!
//! `find_name_by_grid(find_grid_by_name(name))` does not always return
//! `name`: when several regions share a cell, the first one in table order
//! wins.

use crate::locations::LocationTable;
use crate::models::{GeoCoordinate, GridCell, RegionRecord, ResolvedLocation};
use crate::projection::LccProjection;
use tracing::debug;

/// Closest region to `reference` among those whose cell is within one step
/// (Chebyshev distance) of `target`.
///
/// Ties keep the earliest record in table order.
#[must_use]
pub fn resolve_nearest<'a>(
    target: GridCell,
    reference: GeoCoordinate,
    table: LocationTable<'a>,
) -> Option<&'a RegionRecord> {
    let mut best = None;
    let mut min_distance_sq = f64::INFINITY;

    for record in table {
        if !target.is_adjacent_or_equal(&record.grid_cell) {
            continue;
        }

        let distance_sq = record.reference.distance_squared(&reference);
        if distance_sq < min_distance_sq {
            min_distance_sq = distance_sq;
            best = Some(record);
        }
    }

    best
}

/// Grid cell of the first region whose name matches `name` exactly
#[must_use]
pub fn find_grid_by_name(name: &str, table: LocationTable<'_>) -> Option<GridCell> {
    table
        .iter()
        .find(|record| record.name == name)
        .map(|record| record.grid_cell)
}

/// Name of the first region assigned to exactly `cell`
#[must_use]
pub fn find_name_by_grid(cell: GridCell, table: LocationTable<'_>) -> Option<&'static str> {
    table
        .iter()
        .find(|record| record.grid_cell == cell)
        .map(|record| record.name)
}

/// Service tying the projection and the table together
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    projection: LccProjection,
    table: LocationTable<'a>,
}

impl Default for LocationResolver<'static> {
    fn default() -> Self {
        Self::new(LccProjection::default(), LocationTable::builtin())
    }
}

impl<'a> LocationResolver<'a> {
    #[must_use]
    pub fn new(projection: LccProjection, table: LocationTable<'a>) -> Self {
        Self { projection, table }
    }

    #[must_use]
    pub fn table(&self) -> LocationTable<'a> {
        self.table
    }

    #[must_use]
    pub fn projection(&self) -> &LccProjection {
        &self.projection
    }

    /// Resolve a position fix to its grid cell and the nearest named region
    #[must_use]
    pub fn resolve_fix(&self, fix: GeoCoordinate) -> ResolvedLocation {
        let cell = self.projection.project(fix);
        debug!(
            "Projected fix ({}) to grid cell {}",
            fix.format_coordinates(),
            cell
        );

        match resolve_nearest(cell, fix, self.table) {
            Some(record) => {
                let distance_km = fix.distance_km(&record.reference);
                debug!(
                    "Nearest region for {}: {} ({:.2} km away)",
                    cell, record.name, distance_km
                );
                ResolvedLocation {
                    grid_cell: cell,
                    name: Some(record.name.to_string()),
                    distance_km: Some(distance_km),
                }
            }
            None => {
                debug!("No region within one cell of {}", cell);
                ResolvedLocation::new(cell, None)
            }
        }
    }

    /// Resolve a grid cell typed by the user to the region assigned to it
    #[must_use]
    pub fn resolve_grid(&self, cell: GridCell) -> ResolvedLocation {
        let name = find_name_by_grid(cell, self.table);
        debug!("Grid cell {} resolved to {:?}", cell, name);
        ResolvedLocation::new(cell, name.map(str::to_string))
    }

    /// Resolve a region name typed by the user; the name is kept verbatim
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<ResolvedLocation> {
        let cell = find_grid_by_name(name, self.table)?;
        debug!("Region '{}' resolved to grid cell {}", name, cell);
        Some(ResolvedLocation::new(cell, Some(name.to_string())))
    }
}
