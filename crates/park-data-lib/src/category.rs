//! Category catalog storage and lookup
//!
//! The catalog maps a category code (as used in the `category` property of each
//! GeoJSON feature) to its display name, color and listing index. Lookups never
//! fail: unknown codes resolve to a sentinel entry.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// RGB color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl CategoryColor {
    pub const BLACK: CategoryColor = CategoryColor {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    /// 8-bit RGB triple, components clamped to the valid range
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.red), channel(self.green), channel(self.blue)]
    }

    /// `#rrggbb` hex string
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// A single category as described by the catalog file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Listing order (ascending)
    pub index: i32,
    /// Display name
    pub name: String,
    pub color: CategoryColor,
}

impl CategoryEntry {
    /// The sentinel returned for codes missing from the catalog
    pub fn unknown() -> Self {
        Self {
            index: -1,
            name: "Unknown".to_string(),
            color: CategoryColor::BLACK,
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.index == -1
    }
}

/// Immutable category catalog, constructed once at startup
#[derive(Clone, Debug)]
pub struct CategoryCatalog {
    entries: HashMap<String, CategoryEntry>,
    unknown: CategoryEntry,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl CategoryCatalog {
    /// Build a catalog from already decoded entries
    pub fn new(entries: HashMap<String, CategoryEntry>) -> Self {
        Self {
            entries,
            unknown: CategoryEntry::unknown(),
        }
    }

    /// Decode a catalog from its JSON text
    pub fn from_json_str(source: &str) -> Result<Self> {
        let entries: HashMap<String, CategoryEntry> = serde_json::from_str(source)?;
        tracing::debug!("Loaded {} categories", entries.len());
        Ok(Self::new(entries))
    }

    /// Decode a catalog from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: HashMap<String, CategoryEntry> = serde_json::from_reader(reader)?;
        tracing::debug!("Loaded {} categories", entries.len());
        Ok(Self::new(entries))
    }

    /// Load a catalog file from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Look up a category; codes not in the catalog resolve to the sentinel
    #[inline]
    pub fn get(&self, code: &str) -> &CategoryEntry {
        self.entries.get(code).unwrap_or(&self.unknown)
    }

    #[inline]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Entries sorted by ascending index, ties broken by code
    pub fn list_sorted(&self) -> Vec<(&str, &CategoryEntry)> {
        let mut list: Vec<(&str, &CategoryEntry)> = self
            .entries
            .iter()
            .map(|(code, entry)| (code.as_str(), entry))
            .collect();
        list.sort_by(|(a_code, a), (b_code, b)| a.index.cmp(&b.index).then(a_code.cmp(b_code)));
        list
    }

    /// Category codes in lexicographic order
    pub fn keys_sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
