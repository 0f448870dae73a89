//! Geographic coordinate value type and conversions

use serde::{Deserialize, Serialize};

/// Earth's mean radius in meters
pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from a GeoJSON position (`[longitude, latitude, ...]`)
    ///
    /// Returns `None` when the position has fewer than two values or a value is
    /// not finite.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [longitude, latitude, ..] if longitude.is_finite() && latitude.is_finite() => {
                Some(Self::new(*latitude, *longitude))
            }
            _ => None,
        }
    }

    /// Great-circle distance to another coordinate in meters (haversine)
    pub fn distance_to(&self, other: &GeoCoordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Degrees of latitude and longitude spanned by the given distances in meters
    /// around this coordinate (equirectangular approximation, fine at park scale)
    pub fn span_degrees(&self, latitudinal_meters: f64, longitudinal_meters: f64) -> (f64, f64) {
        let lat_span = (latitudinal_meters / EARTH_RADIUS_M).to_degrees();
        let cos_lat = self.latitude.to_radians().cos().abs().max(f64::EPSILON);
        let lon_span = (longitudinal_meters / (EARTH_RADIUS_M * cos_lat)).to_degrees();
        (lat_span, lon_span)
    }
}

impl From<GeoCoordinate> for geo::Coord<f64> {
    #[inline]
    fn from(value: GeoCoordinate) -> Self {
        geo::Coord {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<geo::Coord<f64>> for GeoCoordinate {
    #[inline]
    fn from(value: geo::Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

impl From<GeoCoordinate> for geo::Point<f64> {
    #[inline]
    fn from(value: GeoCoordinate) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_swaps_axes() {
        let coord = GeoCoordinate::from_position(&[-104.96, 39.73]).unwrap();
        assert_eq!(coord.latitude, 39.73);
        assert_eq!(coord.longitude, -104.96);
    }

    #[test]
    fn test_from_position_ignores_altitude() {
        let coord = GeoCoordinate::from_position(&[1.0, 2.0, 1600.0]).unwrap();
        assert_eq!(coord, GeoCoordinate::new(2.0, 1.0));
    }

    #[test]
    fn test_from_position_rejects_short_or_nan() {
        assert!(GeoCoordinate::from_position(&[1.0]).is_none());
        assert!(GeoCoordinate::from_position(&[]).is_none());
        assert!(GeoCoordinate::from_position(&[f64::NAN, 1.0]).is_none());
    }

    #[test]
    fn test_geo_coord_roundtrip() {
        let coord = GeoCoordinate::new(39.73186, -104.96128515747814);
        let geo_coord: geo::Coord<f64> = coord.into();
        assert_eq!(geo_coord.x, coord.longitude);
        assert_eq!(geo_coord.y, coord.latitude);
        assert_eq!(GeoCoordinate::from(geo_coord), coord);
    }

    #[test]
    fn test_distance_to() {
        let a = GeoCoordinate::new(39.7300, -104.9600);
        let b = GeoCoordinate::new(39.7310, -104.9600);
        let d = a.distance_to(&b);
        // 0.001 degrees of latitude is roughly 111 meters
        assert!(d > 105.0 && d < 117.0);
        assert!(a.distance_to(&a).abs() < f64::EPSILON);
    }

    #[test]
    fn test_span_degrees_wider_in_longitude_away_from_equator() {
        let coord = GeoCoordinate::new(39.73, -104.96);
        let (lat_span, lon_span) = coord.span_degrees(1000.0, 1000.0);
        assert!(lat_span > 0.008 && lat_span < 0.01);
        assert!(lon_span > lat_span);
    }
}
