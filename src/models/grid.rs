//! Grid cell and geographic coordinate value types

use crate::error::WeatherGridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer cell index in the weather service's 5 km LCC grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance between two cells
    #[must_use]
    pub fn chebyshev_distance(&self, other: &GridCell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// True when `other` lies in the 3x3 neighbourhood centred on `self`
    #[must_use]
    pub fn is_adjacent_or_equal(&self, other: &GridCell) -> bool {
        self.chebyshev_distance(other) <= 1
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting values outside the valid degree ranges.
    ///
    /// The projection and resolver never call this; it exists for
    /// collaborators that receive fixes from untrusted sources.
    pub fn validated(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherGridError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherGridError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Squared planar distance in degree space, used only for ranking
    #[must_use]
    pub fn distance_squared(&self, other: &GeoCoordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat * dlat + dlon * dlon
    }

    /// Great-circle distance in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &GeoCoordinate) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Format as "lat, lon" with four decimals
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GridCell::new(60, 127), 0)]
    #[case(GridCell::new(61, 126), 1)]
    #[case(GridCell::new(59, 128), 1)]
    #[case(GridCell::new(62, 127), 2)]
    #[case(GridCell::new(60, 124), 3)]
    fn test_chebyshev_distance(#[case] other: GridCell, #[case] expected: u32) {
        let centre = GridCell::new(60, 127);
        assert_eq!(centre.chebyshev_distance(&other), expected);
        assert_eq!(other.chebyshev_distance(&centre), expected);
        assert_eq!(centre.is_adjacent_or_equal(&other), expected <= 1);
    }

    #[test]
    fn test_grid_cell_display() {
        assert_eq!(GridCell::new(60, 127).to_string(), "60,127");
    }

    #[test]
    fn test_validated_coordinates() {
        assert!(GeoCoordinate::validated(37.5714, 126.9658).is_ok());
        assert!(GeoCoordinate::validated(90.0, -180.0).is_ok());

        let err = GeoCoordinate::validated(91.0, 126.0).unwrap_err();
        assert!(matches!(err, WeatherGridError::Validation { .. }));

        let err = GeoCoordinate::validated(37.0, 180.5).unwrap_err();
        assert!(err.to_string().contains("Longitude"));
    }

    #[test]
    fn test_distance_squared() {
        let a = GeoCoordinate::new(37.0, 127.0);
        let b = GeoCoordinate::new(37.3, 127.4);
        assert!((a.distance_squared(&b) - 0.25).abs() < 1e-9);
        assert_eq!(a.distance_squared(&a), 0.0);
    }

    #[test]
    fn test_distance_km_seoul_busan() {
        let seoul = GeoCoordinate::new(37.5665, 126.9780);
        let busan = GeoCoordinate::new(35.1796, 129.0756);
        let km = seoul.distance_km(&busan);
        assert!((300.0..350.0).contains(&km), "unexpected distance {km}");
    }
}
