//! Map camera limits around the park

use crate::{ExhibitMarker, GeoCoordinate, ParkDataset};

/// Side of the square region the camera center may move in, in meters
pub const CENTER_REGION_METERS: f64 = 1000.0;
/// Closest allowed camera distance in meters
pub const MIN_DISTANCE_M: f64 = 10.0;
/// Farthest allowed camera distance in meters
pub const MAX_DISTANCE_M: f64 = 2000.0;
/// Camera distance used when the map first opens
pub const INITIAL_DISTANCE_M: f64 = 1000.0;
/// Camera distance used when jumping to a selected exhibit
pub const FOCUS_DISTANCE_M: f64 = 150.0;

/// Where the camera looks from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPosition {
    pub center: GeoCoordinate,
    /// Distance from the camera to the center, in meters
    pub distance: f64,
}

impl CameraPosition {
    /// Camera centered on the park
    pub fn initial(dataset: &ParkDataset) -> Self {
        Self {
            center: dataset.center(),
            distance: INITIAL_DISTANCE_M,
        }
    }

    /// Camera jumping to a selected exhibit, kept within the bounds
    pub fn focus(marker: &ExhibitMarker, bounds: &CameraBounds) -> Self {
        bounds.clamp(Self {
            center: marker.coordinate,
            distance: FOCUS_DISTANCE_M,
        })
    }
}

/// Limits applied to every camera move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBounds {
    pub min_center: GeoCoordinate,
    pub max_center: GeoCoordinate,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl CameraBounds {
    /// Default bounds: a 1 km square around `center`, 10 m to 2 km away
    pub fn around(center: GeoCoordinate) -> Self {
        Self::with_region(center, CENTER_REGION_METERS, MIN_DISTANCE_M, MAX_DISTANCE_M)
    }

    pub fn with_region(
        center: GeoCoordinate,
        region_meters: f64,
        min_distance: f64,
        max_distance: f64,
    ) -> Self {
        let (lat_span, lon_span) = center.span_degrees(region_meters, region_meters);
        Self {
            min_center: GeoCoordinate::new(
                center.latitude - lat_span / 2.0,
                center.longitude - lon_span / 2.0,
            ),
            max_center: GeoCoordinate::new(
                center.latitude + lat_span / 2.0,
                center.longitude + lon_span / 2.0,
            ),
            min_distance,
            max_distance: max_distance.max(min_distance),
        }
    }

    /// Whether a camera center lies inside the allowed region
    pub fn contains_center(&self, coordinate: &GeoCoordinate) -> bool {
        (self.min_center.latitude..=self.max_center.latitude).contains(&coordinate.latitude)
            && (self.min_center.longitude..=self.max_center.longitude)
                .contains(&coordinate.longitude)
    }

    /// Pull a requested camera back inside the limits
    pub fn clamp(&self, position: CameraPosition) -> CameraPosition {
        CameraPosition {
            center: GeoCoordinate::new(
                position
                    .center
                    .latitude
                    .clamp(self.min_center.latitude, self.max_center.latitude),
                position
                    .center
                    .longitude
                    .clamp(self.min_center.longitude, self.max_center.longitude),
            ),
            distance: position.distance.clamp(self.min_distance, self.max_distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExhibitProperties;

    const CENTER: GeoCoordinate = GeoCoordinate::new(39.73186, -104.96128515747814);

    #[test]
    fn test_region_is_about_one_kilometer() {
        let bounds = CameraBounds::around(CENTER);
        let south_west = bounds.min_center;
        let north_west = GeoCoordinate::new(bounds.max_center.latitude, south_west.longitude);
        let south_east = GeoCoordinate::new(south_west.latitude, bounds.max_center.longitude);

        assert!((south_west.distance_to(&north_west) - 1000.0).abs() < 5.0);
        assert!((south_west.distance_to(&south_east) - 1000.0).abs() < 5.0);
        assert!(bounds.contains_center(&CENTER));
    }

    #[test]
    fn test_clamp_distance_and_center() {
        let bounds = CameraBounds::around(CENTER);
        let far_away = CameraPosition {
            center: GeoCoordinate::new(40.0, -105.0),
            distance: 50_000.0,
        };
        let clamped = bounds.clamp(far_away);
        assert_eq!(clamped.distance, MAX_DISTANCE_M);
        assert!(bounds.contains_center(&clamped.center));
        assert_eq!(clamped.center.latitude, bounds.max_center.latitude);
        assert_eq!(clamped.center.longitude, bounds.min_center.longitude);

        let too_close = bounds.clamp(CameraPosition {
            center: CENTER,
            distance: 1.0,
        });
        assert_eq!(too_close.distance, MIN_DISTANCE_M);
        assert_eq!(too_close.center, CENTER);
    }

    #[test]
    fn test_focus_on_marker() {
        let bounds = CameraBounds::around(CENTER);
        let marker = ExhibitMarker::new(
            ExhibitProperties {
                name: "Japanese Garden".to_string(),
                category: "garden".to_string(),
                monogram: None,
                icon_name: None,
            },
            GeoCoordinate::new(39.7325, -104.9605),
        );
        let camera = CameraPosition::focus(&marker, &bounds);
        assert_eq!(camera.center, marker.coordinate);
        assert_eq!(camera.distance, FOCUS_DISTANCE_M);
    }
}
