//! Exhibit properties and markers

use crate::GeoCoordinate;
use serde::{Deserialize, Serialize};

/// Property block carried by every GeoJSON feature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitProperties {
    /// Display name, unique across the dataset
    pub name: String,
    /// Category code, looked up in the [`crate::CategoryCatalog`]
    pub category: String,
    /// Short label drawn on the marker instead of a pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monogram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

impl ExhibitProperties {
    /// Key used to order exhibits inside a category listing
    ///
    /// Purely numeric monograms are zero-padded to a minimum width of 2 so that
    /// one and two digit labels sort numerically; anything else sorts as text.
    pub fn sort_key(&self) -> String {
        match self.monogram.as_deref() {
            None | Some("") => self.name.clone(),
            Some(monogram) => match monogram.parse::<i64>() {
                Ok(number) => format!("{:02}", number),
                Err(_) => monogram.to_string(),
            },
        }
    }
}

/// A visitable exhibit with its position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExhibitMarker {
    pub properties: ExhibitProperties,
    pub coordinate: GeoCoordinate,
}

impl ExhibitMarker {
    pub fn new(properties: ExhibitProperties, coordinate: GeoCoordinate) -> Self {
        Self {
            properties,
            coordinate,
        }
    }

    /// Identity of the marker
    #[inline]
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.properties.category
    }

    #[inline]
    pub fn sort_key(&self) -> String {
        self.properties.sort_key()
    }
}
