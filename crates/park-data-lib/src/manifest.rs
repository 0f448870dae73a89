//! Remote manifest document
//!
//! The manifest lists, per platform and per named location, where the park
//! data file and the category catalog can be downloaded and the SHA-256 of
//! each file:
//!
//! ```json
//! {
//!   "ios": {
//!     "york-street": {
//!       "data": { "url": "york-street/data.geojson", "sha256": "9f86..." },
//!       "categories": { "url": "york-street/categories.json", "sha256": "60303..." }
//!     }
//!   }
//! }
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A downloadable file and its expected content hash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Absolute URL, or a path relative to the manifest's base URL
    pub url: String,
    /// Lowercase hex SHA-256 of the file contents
    pub sha256: String,
}

/// Files describing one park location
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub data: FileReference,
    pub categories: FileReference,
}

/// Platform -> location name -> entry
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    platforms: HashMap<String, HashMap<String, ManifestEntry>>,
}

impl Manifest {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn entry(&self, platform: &str, location: &str) -> Option<&ManifestEntry> {
        self.platforms.get(platform)?.get(location)
    }

    /// Location names available for a platform, sorted
    pub fn locations(&self, platform: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .platforms
            .get(platform)
            .map(|locations| locations.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn insert(&mut self, platform: &str, location: &str, entry: ManifestEntry) {
        self.platforms
            .entry(platform.to_string())
            .or_default()
            .insert(location.to_string(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "ios": {
            "york-street": {
                "data": { "url": "york-street/data.geojson", "sha256": "aa" },
                "categories": { "url": "https://example.org/cats.json", "sha256": "bb" }
            },
            "chatfield": {
                "data": { "url": "chatfield/data.geojson", "sha256": "cc" },
                "categories": { "url": "chatfield/categories.json", "sha256": "dd" }
            }
        }
    }"#;

    #[test]
    fn test_lookup_entry() {
        let manifest = Manifest::from_json_str(MANIFEST).unwrap();
        let entry = manifest.entry("ios", "york-street").unwrap();
        assert_eq!(entry.data.url, "york-street/data.geojson");
        assert_eq!(entry.categories.sha256, "bb");
        assert!(manifest.entry("android", "york-street").is_none());
        assert!(manifest.entry("ios", "kew").is_none());
    }

    #[test]
    fn test_locations_sorted() {
        let manifest = Manifest::from_json_str(MANIFEST).unwrap();
        assert_eq!(manifest.locations("ios"), vec!["chatfield", "york-street"]);
        assert!(manifest.locations("macos").is_empty());
    }

    #[test]
    fn test_insert_roundtrips_through_json() {
        let mut manifest = Manifest::default();
        manifest.insert(
            "macos",
            "york-street",
            ManifestEntry {
                data: FileReference {
                    url: "d".to_string(),
                    sha256: "1".to_string(),
                },
                categories: FileReference {
                    url: "c".to_string(),
                    sha256: "2".to_string(),
                },
            },
        );
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(Manifest::from_json_str(&json).unwrap(), manifest);
    }

    #[test]
    fn test_malformed_manifest_fails() {
        assert!(Manifest::from_json_str(r#"{ "ios": { "york-street": {} } }"#).is_err());
    }
}
