//! Park dataset ingestion from a GeoJSON feature collection
//!
//! Every feature carries an [`ExhibitProperties`] block. Features tagged with
//! the [`PARK_GEOMETRY_CATEGORY`] code describe the park itself (a point for
//! the center, a polygon for the boundary); every other point is an exhibit.
//!
//! A feature that cannot be understood is dropped and recorded as a
//! [`FeatureSkip`]. Only a missing center or boundary fails the whole load.

use crate::{
    CategoryCatalog, CategoryEntry, DataError, ExhibitMarker, ExhibitProperties, GeoCoordinate,
    Result,
};
use geo::{BoundingRect, Contains, LineString, Polygon, Rect};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Reserved category code marking park metadata features
pub const PARK_GEOMETRY_CATEGORY: &str = "park-geometry";

/// Why a single feature was left out of the dataset
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("not a GeoJSON feature: {0}")]
    UnrecognizedFeature(String),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unsupported geometry type {0}")]
    UnsupportedGeometry(String),

    #[error("feature has no properties")]
    MissingProperties,

    #[error("invalid properties: {0}")]
    InvalidProperties(String),

    #[error("invalid coordinates")]
    InvalidCoordinates,

    #[error("polygon is not a park boundary")]
    NonParkPolygon,

    #[error("duplicate exhibit name")]
    DuplicateName,
}

/// A feature dropped during ingestion
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSkip {
    /// Position of the feature in the source collection
    pub index: usize,
    /// Exhibit name, when the properties could be decoded
    pub name: Option<String>,
    pub reason: SkipReason,
}

/// Exhibits of one category, in listing order
#[derive(Debug)]
pub struct ExhibitGroup<'a> {
    /// Category code, `None` for exhibits whose code is not in the catalog
    pub code: Option<&'a str>,
    pub category: &'a CategoryEntry,
    pub markers: Vec<&'a ExhibitMarker>,
}

/// Immutable park snapshot: center, boundary and exhibits
#[derive(Clone, Debug)]
pub struct ParkDataset {
    center: GeoCoordinate,
    /// Closed exterior ring (first coordinate repeated at the end)
    boundary: Vec<GeoCoordinate>,
    boundary_polygon: Polygon<f64>,
    markers: Vec<ExhibitMarker>,
    /// Marker index by exhibit name
    by_name: HashMap<String, usize>,
    skipped: Vec<FeatureSkip>,
}

/// Outcome of interpreting one feature
enum FeatureKind {
    Center(GeoCoordinate),
    Boundary(Vec<GeoCoordinate>),
    Exhibit(ExhibitMarker),
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ParkDataset {
    /// Assemble a dataset from already validated parts
    ///
    /// Markers keep their order. Later markers whose name is already taken are
    /// dropped and recorded as skips.
    pub fn new(
        center: GeoCoordinate,
        boundary: Vec<GeoCoordinate>,
        markers: Vec<ExhibitMarker>,
    ) -> Result<Self> {
        let mut dataset = Self::with_geometry(center, boundary)?;
        for (index, marker) in markers.into_iter().enumerate() {
            dataset.push_marker(index, marker);
        }
        Ok(dataset)
    }

    fn with_geometry(center: GeoCoordinate, boundary: Vec<GeoCoordinate>) -> Result<Self> {
        let positions = boundary.len();
        let boundary = close_ring(boundary).ok_or_else(|| {
            DataError::InvalidGeometry(format!(
                "park boundary has {} positions, at least 4 required",
                positions
            ))
        })?;

        let ring: LineString<f64> = boundary.iter().map(|c| geo::Coord::from(*c)).collect();
        let boundary_polygon = Polygon::new(ring, Vec::new());

        Ok(Self {
            center,
            boundary,
            boundary_polygon,
            markers: Vec::new(),
            by_name: HashMap::new(),
            skipped: Vec::new(),
        })
    }

    /// Parse a GeoJSON FeatureCollection
    pub fn from_geojson_str(source: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(source)?;
        Self::from_geojson_value(document)
    }

    /// Parse a GeoJSON FeatureCollection from a reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::from_geojson_str(&source)
    }

    /// Load a GeoJSON file from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_geojson_value(document: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(mut object) = document else {
            return Err(DataError::NotAFeatureCollection);
        };
        if object.get("type").and_then(|t| t.as_str()) != Some("FeatureCollection") {
            return Err(DataError::NotAFeatureCollection);
        }
        let Some(serde_json::Value::Array(features)) = object.remove("features") else {
            return Err(DataError::NotAFeatureCollection);
        };

        let mut center: Option<GeoCoordinate> = None;
        let mut boundary: Option<Vec<GeoCoordinate>> = None;
        let mut exhibits: Vec<(usize, ExhibitMarker)> = Vec::new();
        let mut skipped: Vec<FeatureSkip> = Vec::new();

        for (index, value) in features.into_iter().enumerate() {
            match Self::interpret_feature(value) {
                Ok(FeatureKind::Center(coordinate)) => {
                    if center.replace(coordinate).is_some() {
                        tracing::warn!(
                            "Feature {}: replacing previous park center with {}",
                            index,
                            coordinate
                        );
                    }
                }
                Ok(FeatureKind::Boundary(ring)) => {
                    if boundary.replace(ring).is_some() {
                        tracing::warn!("Feature {}: replacing previous park boundary", index);
                    }
                }
                Ok(FeatureKind::Exhibit(marker)) => exhibits.push((index, marker)),
                Err((name, reason)) => {
                    tracing::warn!(
                        "Skipping feature {} ({}): {}",
                        index,
                        name.as_deref().unwrap_or("unnamed"),
                        reason
                    );
                    skipped.push(FeatureSkip {
                        index,
                        name,
                        reason,
                    });
                }
            }
        }

        let center = center.ok_or(DataError::MissingCenter)?;
        let boundary = boundary.ok_or(DataError::MissingBoundary)?;

        let mut dataset = Self::with_geometry(center, boundary)?;
        dataset.skipped = skipped;
        for (index, marker) in exhibits {
            dataset.push_marker(index, marker);
        }
        dataset.skipped.sort_by_key(|skip| skip.index);

        tracing::info!(
            "Loaded park dataset: {} exhibits, {} boundary positions, {} features skipped",
            dataset.markers.len(),
            dataset.boundary.len(),
            dataset.skipped.len()
        );
        Ok(dataset)
    }

    /// Classify a single feature, or explain why it has to be skipped
    fn interpret_feature(
        value: serde_json::Value,
    ) -> std::result::Result<FeatureKind, (Option<String>, SkipReason)> {
        let feature = geojson::Feature::try_from(value)
            .map_err(|e| (None, SkipReason::UnrecognizedFeature(e.to_string())))?;

        let properties = feature
            .properties
            .ok_or((None, SkipReason::MissingProperties))?;
        let properties: ExhibitProperties =
            serde_json::from_value(serde_json::Value::Object(properties))
                .map_err(|e| (None, SkipReason::InvalidProperties(e.to_string())))?;
        let name = Some(properties.name.clone());

        let geometry = feature
            .geometry
            .ok_or_else(|| (name.clone(), SkipReason::MissingGeometry))?;
        let is_park_geometry = properties.category == PARK_GEOMETRY_CATEGORY;

        match geometry.value {
            geojson::Value::Point(position) => {
                let coordinate = GeoCoordinate::from_position(&position)
                    .ok_or_else(|| (name.clone(), SkipReason::InvalidCoordinates))?;
                if is_park_geometry {
                    tracing::debug!("Park center at {}", coordinate);
                    Ok(FeatureKind::Center(coordinate))
                } else {
                    Ok(FeatureKind::Exhibit(ExhibitMarker::new(properties, coordinate)))
                }
            }
            geojson::Value::Polygon(rings) => {
                if !is_park_geometry {
                    return Err((name, SkipReason::NonParkPolygon));
                }
                let exterior = rings
                    .first()
                    .ok_or_else(|| (name.clone(), SkipReason::InvalidCoordinates))?;
                let ring: Option<Vec<GeoCoordinate>> = exterior
                    .iter()
                    .map(|position| GeoCoordinate::from_position(position))
                    .collect();
                match ring.and_then(close_ring) {
                    Some(ring) => {
                        tracing::debug!("Park boundary with {} positions", ring.len());
                        Ok(FeatureKind::Boundary(ring))
                    }
                    _ => Err((name, SkipReason::InvalidCoordinates)),
                }
            }
            other => Err((
                name,
                SkipReason::UnsupportedGeometry(geometry_type_name(&other).to_string()),
            )),
        }
    }

    fn push_marker(&mut self, index: usize, marker: ExhibitMarker) {
        if self.by_name.contains_key(marker.name()) {
            tracing::warn!(
                "Skipping feature {}: exhibit name {:?} already used",
                index,
                marker.name()
            );
            self.skipped.push(FeatureSkip {
                index,
                name: Some(marker.name().to_string()),
                reason: SkipReason::DuplicateName,
            });
            return;
        }
        self.by_name
            .insert(marker.name().to_string(), self.markers.len());
        self.markers.push(marker);
    }

    /// Park center point
    #[inline]
    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    /// Closed boundary ring
    #[inline]
    pub fn boundary(&self) -> &[GeoCoordinate] {
        &self.boundary
    }

    /// Boundary as a `geo` polygon (x = longitude, y = latitude)
    #[inline]
    pub fn boundary_polygon(&self) -> &Polygon<f64> {
        &self.boundary_polygon
    }

    /// Exhibits in source order
    #[inline]
    pub fn markers(&self) -> &[ExhibitMarker] {
        &self.markers
    }

    /// Features dropped during ingestion, by source position
    #[inline]
    pub fn skipped(&self) -> &[FeatureSkip] {
        &self.skipped
    }

    /// Look up an exhibit by name
    pub fn marker(&self, name: &str) -> Option<&ExhibitMarker> {
        self.by_name.get(name).map(|&i| &self.markers[i])
    }

    /// Exhibits of one category, ordered by sort key
    pub fn markers_in_category(&self, code: &str) -> Vec<&ExhibitMarker> {
        let mut markers: Vec<&ExhibitMarker> = self
            .markers
            .iter()
            .filter(|m| m.category() == code)
            .collect();
        markers.sort_by_cached_key(|m| m.sort_key());
        markers
    }

    /// Exhibits grouped for listing: one group per catalog code (lexicographic),
    /// followed by a group for codes the catalog does not know, if any
    pub fn grouped<'a>(&'a self, catalog: &'a CategoryCatalog) -> Vec<ExhibitGroup<'a>> {
        let mut groups: Vec<ExhibitGroup<'a>> = catalog
            .keys_sorted()
            .into_iter()
            .map(|code| ExhibitGroup {
                code: Some(code),
                category: catalog.get(code),
                markers: self.markers_in_category(code),
            })
            .collect();

        let mut uncategorized: Vec<&ExhibitMarker> = self
            .markers
            .iter()
            .filter(|m| !catalog.contains(m.category()))
            .collect();
        if !uncategorized.is_empty() {
            uncategorized.sort_by_cached_key(|m| m.sort_key());
            groups.push(ExhibitGroup {
                code: None,
                category: catalog.get(""),
                markers: uncategorized,
            });
        }
        groups
    }

    /// Case-insensitive search on exhibit name and monogram, ordered by sort key
    pub fn search(&self, query: &str) -> Vec<&ExhibitMarker> {
        let query = query.trim().to_lowercase();
        let mut results: Vec<&ExhibitMarker> = self
            .markers
            .iter()
            .filter(|m| {
                query.is_empty()
                    || m.name().to_lowercase().contains(&query)
                    || m
                        .properties
                        .monogram
                        .as_deref()
                        .is_some_and(|mono| mono.to_lowercase().contains(&query))
            })
            .collect();
        results.sort_by_cached_key(|m| m.sort_key());
        results
    }

    /// Whether a coordinate lies strictly inside the park boundary
    #[inline]
    pub fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        self.boundary_polygon
            .contains(&geo::Point::from(*coordinate))
    }

    /// Bounding rectangle of the boundary (x = longitude, y = latitude)
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.boundary_polygon.bounding_rect()
    }
}

/// Close a ring by repeating its first position; `None` when the closed ring
/// has fewer than four positions
fn close_ring(mut ring: Vec<GeoCoordinate>) -> Option<Vec<GeoCoordinate>> {
    let first = *ring.first()?;
    if ring.last() != Some(&first) {
        ring.push(first);
    }
    (ring.len() >= 4).then_some(ring)
}

/// GeoJSON `type` tag of a geometry value
fn geometry_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point_feature(name: &str, category: &str, lon: f64, lat: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": { "name": name, "category": category },
            "geometry": { "type": "Point", "coordinates": [lon, lat] }
        })
    }

    fn boundary_feature(ring: serde_json::Value) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": { "name": "Boundary", "category": PARK_GEOMETRY_CATEGORY },
            "geometry": { "type": "Polygon", "coordinates": [ring] }
        })
    }

    fn square_boundary() -> serde_json::Value {
        boundary_feature(json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]))
    }

    fn collection(features: Vec<serde_json::Value>) -> String {
        json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    fn create_test_collection() -> String {
        collection(vec![
            point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5),
            square_boundary(),
            point_feature("Rose Garden", "garden", 0.2, 0.3),
            point_feature("Gift Shop", "amenity", 0.8, 0.1),
        ])
    }

    #[test]
    fn test_load_dataset() {
        let dataset = ParkDataset::from_geojson_str(&create_test_collection()).unwrap();
        assert_eq!(dataset.center(), GeoCoordinate::new(0.5, 0.5));
        assert_eq!(dataset.boundary().len(), 5);
        assert_eq!(dataset.markers().len(), 2);
        assert!(dataset.skipped().is_empty());
    }

    #[test]
    fn test_markers_exclude_park_geometry_and_keep_order() {
        let dataset = ParkDataset::from_geojson_str(&create_test_collection()).unwrap();
        let names: Vec<&str> = dataset.markers().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Rose Garden", "Gift Shop"]);
        assert!(
            dataset
                .markers()
                .iter()
                .all(|m| m.category() != PARK_GEOMETRY_CATEGORY)
        );
    }

    #[test]
    fn test_missing_center_fails() {
        let source = collection(vec![
            square_boundary(),
            point_feature("Rose Garden", "garden", 0.2, 0.3),
        ]);
        let result = ParkDataset::from_geojson_str(&source);
        assert!(matches!(result, Err(DataError::MissingCenter)));
    }

    #[test]
    fn test_missing_boundary_fails() {
        let source = collection(vec![point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5)]);
        let result = ParkDataset::from_geojson_str(&source);
        assert!(matches!(result, Err(DataError::MissingBoundary)));
    }

    #[test]
    fn test_not_a_feature_collection_fails() {
        let source = point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5).to_string();
        assert!(matches!(
            ParkDataset::from_geojson_str(&source),
            Err(DataError::NotAFeatureCollection)
        ));
        assert!(matches!(
            ParkDataset::from_geojson_str("[1, 2]"),
            Err(DataError::NotAFeatureCollection)
        ));
        assert!(matches!(
            ParkDataset::from_geojson_str("{ nope"),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn test_bad_features_are_skipped() {
        let source = collection(vec![
            point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5),
            square_boundary(),
            json!({ "type": "Feature", "geometry": { "type": "Point", "coordinates": [0.1, 0.1] } }),
            json!({
                "type": "Feature",
                "properties": { "name": "No Category" },
                "geometry": { "type": "Point", "coordinates": [0.1, 0.1] }
            }),
            json!({ "type": "Feature", "properties": { "name": "Nowhere", "category": "garden" }, "geometry": null }),
            json!({ "type": "Point", "coordinates": [0.1, 0.1] }),
            json!({
                "type": "Feature",
                "properties": { "name": "Path", "category": "garden" },
                "geometry": { "type": "LineString", "coordinates": [[0.1, 0.1], [0.2, 0.2]] }
            }),
            json!({
                "type": "Feature",
                "properties": { "name": "Pond", "category": "water" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.1, 0.1], [0.2, 0.1], [0.2, 0.2], [0.1, 0.1]]]
                }
            }),
            point_feature("Rose Garden", "garden", 0.2, 0.3),
        ]);

        let dataset = ParkDataset::from_geojson_str(&source).unwrap();
        assert_eq!(dataset.markers().len(), 1);
        assert_eq!(dataset.markers()[0].name(), "Rose Garden");

        let reasons: Vec<&SkipReason> = dataset.skipped().iter().map(|s| &s.reason).collect();
        assert_eq!(reasons.len(), 6);
        assert_eq!(reasons[0], &SkipReason::MissingProperties);
        assert!(matches!(reasons[1], SkipReason::InvalidProperties(_)));
        assert_eq!(reasons[2], &SkipReason::MissingGeometry);
        assert!(matches!(reasons[3], SkipReason::UnrecognizedFeature(_)));
        assert_eq!(
            reasons[4],
            &SkipReason::UnsupportedGeometry("LineString".to_string())
        );
        assert_eq!(reasons[5], &SkipReason::NonParkPolygon);
        assert_eq!(dataset.skipped()[5].name.as_deref(), Some("Pond"));
    }

    #[test]
    fn test_last_park_geometry_wins() {
        let source = collection(vec![
            point_feature("Old Center", PARK_GEOMETRY_CATEGORY, 0.1, 0.1),
            square_boundary(),
            point_feature("New Center", PARK_GEOMETRY_CATEGORY, 0.9, 0.9),
        ]);
        let dataset = ParkDataset::from_geojson_str(&source).unwrap();
        assert_eq!(dataset.center(), GeoCoordinate::new(0.9, 0.9));
        assert!(dataset.markers().is_empty());
    }

    #[test]
    fn test_last_boundary_wins() {
        let source = collection(vec![
            point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5),
            square_boundary(),
            boundary_feature(json!([[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]])),
        ]);
        let dataset = ParkDataset::from_geojson_str(&source).unwrap();
        assert_eq!(dataset.boundary().len(), 5);
        assert_eq!(dataset.boundary()[0], GeoCoordinate::new(2.0, 2.0));
        assert_eq!(dataset.boundary()[2], GeoCoordinate::new(4.0, 4.0));
        assert!(dataset.contains(&GeoCoordinate::new(3.0, 3.0)));
        assert!(!dataset.contains(&GeoCoordinate::new(0.5, 0.5)));
    }

    #[test]
    fn test_degenerate_boundary_feature_is_skipped() {
        let source = collection(vec![
            point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5),
            square_boundary(),
            boundary_feature(json!([[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]])),
        ]);
        let dataset = ParkDataset::from_geojson_str(&source).unwrap();
        assert_eq!(dataset.boundary().len(), 5);
        assert!(dataset.contains(&GeoCoordinate::new(0.5, 0.5)));
        assert_eq!(dataset.skipped().len(), 1);
        assert_eq!(dataset.skipped()[0].index, 2);
        assert_eq!(dataset.skipped()[0].reason, SkipReason::InvalidCoordinates);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let source = collection(vec![
            point_feature("Center", PARK_GEOMETRY_CATEGORY, 0.5, 0.5),
            square_boundary(),
            point_feature("Fountain", "water", 0.2, 0.2),
            point_feature("Fountain", "water", 0.7, 0.7),
        ]);
        let dataset = ParkDataset::from_geojson_str(&source).unwrap();
        assert_eq!(dataset.markers().len(), 1);
        assert_eq!(
            dataset.marker("Fountain").unwrap().coordinate,
            GeoCoordinate::new(0.2, 0.2)
        );
        assert_eq!(dataset.skipped().len(), 1);
        assert_eq!(dataset.skipped()[0].index, 3);
        assert_eq!(dataset.skipped()[0].reason, SkipReason::DuplicateName);
    }

    #[test]
    fn test_contains() {
        let dataset = ParkDataset::from_geojson_str(&create_test_collection()).unwrap();
        assert!(dataset.contains(&GeoCoordinate::new(0.5, 0.5)));
        assert!(!dataset.contains(&GeoCoordinate::new(5.0, 5.0)));
        assert!(!dataset.contains(&GeoCoordinate::new(-0.5, 0.5)));
    }

    #[test]
    fn test_new_closes_ring() {
        let ring = vec![
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(1.0, 1.0),
        ];
        let dataset = ParkDataset::new(GeoCoordinate::new(0.5, 0.5), ring, Vec::new()).unwrap();
        assert_eq!(dataset.boundary().len(), 4);
        assert_eq!(dataset.boundary().first(), dataset.boundary().last());
    }

    #[test]
    fn test_new_rejects_degenerate_boundary() {
        let ring = vec![GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 1.0)];
        let result = ParkDataset::new(GeoCoordinate::new(0.5, 0.5), ring, Vec::new());
        assert!(matches!(result, Err(DataError::InvalidGeometry(_))));
    }

    #[test]
    fn test_markers_in_category_sorted_by_sort_key() {
        let marker = |name: &str, monogram: &str| {
            ExhibitMarker::new(
                ExhibitProperties {
                    name: name.to_string(),
                    category: "garden".to_string(),
                    monogram: Some(monogram.to_string()),
                    icon_name: None,
                },
                GeoCoordinate::new(0.5, 0.5),
            )
        };
        let ring = vec![
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(1.0, 1.0),
        ];
        let dataset = ParkDataset::new(
            GeoCoordinate::new(0.5, 0.5),
            ring,
            vec![marker("Ten", "10"), marker("Two", "2"), marker("Bee", "B")],
        )
        .unwrap();

        let names: Vec<&str> = dataset
            .markers_in_category("garden")
            .into_iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["Two", "Ten", "Bee"]);
        assert!(dataset.markers_in_category("water").is_empty());
    }

    #[test]
    fn test_grouped_and_search() {
        let catalog = CategoryCatalog::from_json_str(
            r#"{
                "garden": { "index": 0, "name": "Gardens", "color": { "red": 0, "green": 1, "blue": 0 } },
                "water": { "index": 1, "name": "Water", "color": { "red": 0, "green": 0, "blue": 1 } }
            }"#,
        )
        .unwrap();
        let dataset = ParkDataset::from_geojson_str(&create_test_collection()).unwrap();

        let groups = dataset.grouped(&catalog);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].code, Some("garden"));
        assert_eq!(groups[0].markers.len(), 1);
        assert_eq!(groups[1].code, Some("water"));
        assert!(groups[1].markers.is_empty());
        assert_eq!(groups[2].code, None);
        assert!(groups[2].category.is_unknown());
        assert_eq!(groups[2].markers[0].name(), "Gift Shop");

        assert_eq!(dataset.search("rose")[0].name(), "Rose Garden");
        assert_eq!(dataset.search("  GIFT ").len(), 1);
        assert_eq!(dataset.search("").len(), 2);
        assert!(dataset.search("cactus").is_empty());
    }

    #[test]
    fn test_bounding_rect() {
        let dataset = ParkDataset::from_geojson_str(&create_test_collection()).unwrap();
        let rect = dataset.bounding_rect().unwrap();
        assert_eq!(rect.min().x, 0.0);
        assert_eq!(rect.max().y, 1.0);
    }
}
