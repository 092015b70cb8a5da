//! Lambert Conformal Conic grid projection
//!
//! Converts between latitude/longitude and the Korea Meteorological
//! Administration's 5 km forecast grid. The forward transform must match the
//! service's own grid convention bit for bit, so the operation order and the
//! `floor(v + 0.5)` rounding below are fixed.
//!
//! Coordinates far outside the Korean peninsula (and the poles in particular)
//! produce defined but meaningless cells; nothing here checks for that.

use crate::models::{GeoCoordinate, GridCell};
use std::f64::consts::PI;

const DEGRAD: f64 = PI / 180.0;
const RADDEG: f64 = 180.0 / PI;

/// Fixed parameters of an LCC grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LccParams {
    /// Earth radius in km
    pub earth_radius_km: f64,
    /// Grid spacing in km
    pub grid_km: f64,
    /// First standard parallel in degrees
    pub standard_lat1: f64,
    /// Second standard parallel in degrees
    pub standard_lat2: f64,
    /// Origin longitude in degrees
    pub origin_lon: f64,
    /// Origin latitude in degrees
    pub origin_lat: f64,
    /// Grid X of the origin
    pub origin_x: f64,
    /// Grid Y of the origin
    pub origin_y: f64,
}

/// The KMA village-forecast grid
pub const KMA_GRID: LccParams = LccParams {
    earth_radius_km: 6371.00877,
    grid_km: 5.0,
    standard_lat1: 30.0,
    standard_lat2: 60.0,
    origin_lon: 126.0,
    origin_lat: 38.0,
    origin_x: 43.0,
    origin_y: 136.0,
};

/// LCC projection with its derived constants precomputed
#[derive(Debug, Clone, Copy)]
pub struct LccProjection {
    params: LccParams,
    re: f64,
    olon: f64,
    sn: f64,
    sf: f64,
    ro: f64,
}

impl Default for LccProjection {
    fn default() -> Self {
        Self::new(KMA_GRID)
    }
}

impl LccProjection {
    #[must_use]
    pub fn new(params: LccParams) -> Self {
        let re = params.earth_radius_km / params.grid_km;
        let slat1 = params.standard_lat1 * DEGRAD;
        let slat2 = params.standard_lat2 * DEGRAD;
        let olon = params.origin_lon * DEGRAD;
        let olat = params.origin_lat * DEGRAD;

        let sn = (PI * 0.25 + slat2 * 0.5).tan() / (PI * 0.25 + slat1 * 0.5).tan();
        let sn = (slat1.cos() / slat2.cos()).ln() / sn.ln();

        let sf = (PI * 0.25 + slat1 * 0.5).tan();
        let sf = sf.powf(sn) * slat1.cos() / sn;

        let ro = (PI * 0.25 + olat * 0.5).tan();
        let ro = re * sf / ro.powf(sn);

        Self {
            params,
            re,
            olon,
            sn,
            sf,
            ro,
        }
    }

    #[must_use]
    pub fn params(&self) -> &LccParams {
        &self.params
    }

    /// Cone constant
    #[must_use]
    pub fn cone_constant(&self) -> f64 {
        self.sn
    }

    /// Map a coordinate to its grid cell
    #[must_use]
    pub fn project(&self, coordinate: GeoCoordinate) -> GridCell {
        let ra = (PI * 0.25 + coordinate.latitude * DEGRAD * 0.5).tan();
        let ra = self.re * self.sf / ra.powf(self.sn);

        let theta = normalize_to_signed_pi(coordinate.longitude * DEGRAD - self.olon) * self.sn;

        let x = (ra * theta.sin() + self.params.origin_x + 0.5).floor();
        let y = (self.ro - ra * theta.cos() + self.params.origin_y + 0.5).floor();

        // Truncating casts are exact here: both values are already integral.
        GridCell::new(x as i32, y as i32)
    }

    /// Map a grid cell back to the coordinate of its centre
    #[must_use]
    pub fn unproject(&self, cell: GridCell) -> GeoCoordinate {
        let xn = f64::from(cell.x) - self.params.origin_x;
        let yn = self.ro - f64::from(cell.y) + self.params.origin_y;

        let mut ra = (xn * xn + yn * yn).sqrt();
        if self.sn < 0.0 {
            ra = -ra;
        }

        let alat = (self.re * self.sf / ra).powf(1.0 / self.sn);
        let alat = 2.0 * alat.atan() - PI * 0.5;

        let theta = if xn.abs() <= 0.0 {
            0.0
        } else if yn.abs() <= 0.0 {
            if xn < 0.0 { -PI * 0.5 } else { PI * 0.5 }
        } else {
            xn.atan2(yn)
        };
        let alon = theta / self.sn + self.olon;

        GeoCoordinate::new(alat * RADDEG, alon * RADDEG)
    }
}

/// Wrap an angle into (-PI, PI] with a single correction step
#[must_use]
pub fn normalize_to_signed_pi(theta: f64) -> f64 {
    if theta > PI {
        theta - 2.0 * PI
    } else if theta <= -PI {
        theta + 2.0 * PI
    } else {
        theta
    }
}

/// Project a latitude/longitude onto the KMA grid
#[must_use]
pub fn project(latitude: f64, longitude: f64) -> GridCell {
    LccProjection::default().project(GeoCoordinate::new(latitude, longitude))
}

/// Centre coordinate of a KMA grid cell
#[must_use]
pub fn unproject(cell: GridCell) -> GeoCoordinate {
    LccProjection::default().unproject(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_origin_maps_to_origin_offset() {
        assert_eq!(project(38.0, 126.0), GridCell::new(43, 136));
    }

    #[test]
    fn test_seoul_reference_cell() {
        assert_eq!(project(37.5714, 126.9658), GridCell::new(60, 127));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let projection = LccProjection::default();
        let coordinate = GeoCoordinate::new(35.1796, 129.0756);
        let first = projection.project(coordinate);
        for _ in 0..10 {
            assert_eq!(projection.project(coordinate), first);
        }
        assert_eq!(first, project(35.1796, 129.0756));
    }

    // Province seats against the cells the weather service publishes for them
    #[rstest]
    #[case::busan(35.1770194, 129.0769528, 98, 76)]
    #[case::daegu(35.8685417, 128.6035528, 89, 90)]
    #[case::incheon(37.4532333, 126.7073528, 55, 124)]
    #[case::gwangju(35.1569750, 126.8533639, 58, 74)]
    #[case::daejeon(36.3471194, 127.3865667, 67, 100)]
    #[case::ulsan(35.5354083, 129.3136889, 102, 84)]
    #[case::sejong(36.4800121, 127.2890691, 66, 103)]
    #[case::jeju(33.4890, 126.4983, 52, 38)]
    #[case::ieodo(32.1230, 125.1820, 28, 8)]
    fn test_known_service_cells(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] x: i32,
        #[case] y: i32,
    ) {
        assert_eq!(project(lat, lon), GridCell::new(x, y));
    }

    #[test]
    fn test_cone_constant() {
        let projection = LccProjection::default();
        assert!((projection.cone_constant() - 0.715_566_847).abs() < 1e-8);
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(PI, PI)]
    #[case(-PI, PI)]
    #[case(PI + 0.25, 0.25 - PI)]
    #[case(-PI - 0.25, PI - 0.25)]
    fn test_normalize_to_signed_pi(#[case] input: f64, #[case] expected: f64) {
        assert!((normalize_to_signed_pi(input) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_theta_wraps_across_antimeridian_offset() {
        // 180 degrees from the 126E origin meridian is 54W. Just east of it
        // the offset stays at -179.9 degrees; just west it wraps to +179.9.
        let east = project(38.0, -53.9);
        let west = project(38.0, -54.1);

        assert!(east.x < 43, "east side should fall left of origin: {east:?}");
        assert!(west.x > 43, "west side should wrap right of origin: {west:?}");
        assert_eq!(east.x - 43, -(west.x - 43));
        assert_eq!(east.y, west.y);
    }

    #[test]
    fn test_unproject_origin() {
        let origin = unproject(GridCell::new(43, 136));
        assert!((origin.latitude - 38.0).abs() < 1e-9);
        assert!((origin.longitude - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_lands_inside_cell() {
        for cell in [
            GridCell::new(60, 127),
            GridCell::new(98, 76),
            GridCell::new(52, 38),
            GridCell::new(1, 1),
            GridCell::new(149, 253),
        ] {
            let centre = unproject(cell);
            assert_eq!(project(centre.latitude, centre.longitude), cell);
        }
    }

    #[test]
    fn test_unproject_seoul_cell_centre() {
        let centre = unproject(GridCell::new(60, 127));
        assert!((centre.latitude - 37.5799).abs() < 1e-3);
        assert!((centre.longitude - 126.9894).abs() < 1e-3);
    }
}
