//! Application state management
//!
//! Owns the loaded park snapshot and decides where it came from: local files
//! given on the command line, a fresh remote download, the last verified
//! download kept in storage, or the copy bundled with the binary.

use crate::app::AppError;
use crate::app::remote::{FetchError, ManifestClient, RemoteSnapshot, decode_snapshot};
use crate::app::settings::Settings;
use crate::app::storage::{self, StorageBackend};
use park_data_lib::{
    CameraBounds, CameraPosition, CategoryCatalog, LocationProvider, LocationTracker, ParkDataset,
};
use std::fmt;

/// York Street park data shipped with the binary
pub const BUNDLED_GEOJSON: &str = include_str!("../../assets/york_street.geojson");

/// York Street category catalog shipped with the binary
pub const BUNDLED_CATEGORIES: &str = include_str!("../../assets/york_street.categories.json");

/// Where the current snapshot was loaded from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Cached,
    Bundled,
    LocalFiles,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Remote => "remote manifest",
            Self::Cached => "cached download",
            Self::Bundled => "bundled copy",
            Self::LocalFiles => "local files",
        };
        f.write_str(name)
    }
}

/// Dismissable notice shown after a failed remote load
#[derive(Clone, Debug, PartialEq)]
pub struct LoadNotice {
    pub message: String,
    /// Source that was used instead
    pub fallback: DataSource,
}

impl LoadNotice {
    fn fetch_failed(error: &FetchError, fallback: DataSource) -> Self {
        Self {
            message: format!("Could not load the latest park data: {}", error),
            fallback,
        }
    }
}

/// Main application state
pub struct AppState {
    settings: Settings,
    dataset: ParkDataset,
    catalog: CategoryCatalog,
    source: DataSource,
    notice: Option<LoadNotice>,
    bounds: CameraBounds,
    storage: Option<Box<dyn StorageBackend>>,
}

impl AppState {
    /// Load the park snapshot according to the settings
    pub async fn load(settings: Settings) -> Result<Self, AppError> {
        profiling::scope!("AppState::load");

        if settings.data.is_some() || settings.categories.is_some() {
            return Self::from_local_files(settings);
        }

        let storage = match storage::open_backend(settings.cache_file.clone()) {
            Ok(storage) => Some(storage),
            Err(e) => {
                tracing::warn!("Snapshot cache unavailable: {}", e);
                None
            }
        };
        let remote = fetch_remote(&settings).await;
        Self::from_sources(settings, remote, storage)
    }

    /// Load from `--data` / `--categories`; the missing half comes from the bundle
    pub fn from_local_files(settings: Settings) -> Result<Self, AppError> {
        let dataset = match &settings.data {
            Some(path) => ParkDataset::load_from_file(path).map_err(|source| AppError::Load {
                what: path.display().to_string(),
                source,
            })?,
            None => bundled_dataset()?,
        };
        let catalog = match &settings.categories {
            Some(path) => {
                CategoryCatalog::load_from_file(path).map_err(|source| AppError::Load {
                    what: path.display().to_string(),
                    source,
                })?
            }
            None => bundled_catalog()?,
        };
        tracing::info!("Loaded park data from local files");
        Ok(Self::assemble(
            settings,
            dataset,
            catalog,
            DataSource::LocalFiles,
            None,
            None,
        ))
    }

    /// Pick a snapshot given the outcome of the remote fetch (`None` when no
    /// manifest is configured)
    pub fn from_sources(
        settings: Settings,
        remote: Option<Result<RemoteSnapshot, FetchError>>,
        storage: Option<Box<dyn StorageBackend>>,
    ) -> Result<Self, AppError> {
        match remote {
            Some(Ok(snapshot)) => {
                remember_snapshot(storage.as_deref(), &settings, &snapshot);
                Ok(Self::assemble(
                    settings,
                    snapshot.dataset,
                    snapshot.catalog,
                    DataSource::Remote,
                    None,
                    storage,
                ))
            }
            Some(Err(error)) => {
                tracing::warn!("Remote load failed, falling back: {}", error);
                let (dataset, catalog, source) = fallback(&settings, storage.as_deref())?;
                let notice = LoadNotice::fetch_failed(&error, source);
                Ok(Self::assemble(
                    settings,
                    dataset,
                    catalog,
                    source,
                    Some(notice),
                    storage,
                ))
            }
            None => {
                let (dataset, catalog, source) = fallback(&settings, storage.as_deref())?;
                Ok(Self::assemble(
                    settings, dataset, catalog, source, None, storage,
                ))
            }
        }
    }

    fn assemble(
        settings: Settings,
        dataset: ParkDataset,
        catalog: CategoryCatalog,
        source: DataSource,
        notice: Option<LoadNotice>,
        storage: Option<Box<dyn StorageBackend>>,
    ) -> Self {
        for skip in dataset.skipped() {
            tracing::warn!(
                "Skipped feature #{} ({}): {}",
                skip.index,
                skip.name.as_deref().unwrap_or("unnamed"),
                skip.reason
            );
        }
        tracing::info!(
            "Park data from {}: {} exhibits, {} categories",
            source,
            dataset.markers().len(),
            catalog.len()
        );
        let bounds = CameraBounds::around(dataset.center());
        Self {
            settings,
            dataset,
            catalog,
            source,
            notice,
            bounds,
            storage,
        }
    }

    #[inline]
    pub fn dataset(&self) -> &ParkDataset {
        &self.dataset
    }

    #[inline]
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    #[inline]
    pub fn source(&self) -> DataSource {
        self.source
    }

    #[inline]
    pub fn notice(&self) -> Option<&LoadNotice> {
        self.notice.as_ref()
    }

    #[inline]
    pub fn camera_bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Try the remote manifest again; on success the snapshot is replaced and
    /// the notice cleared, on failure the notice is refreshed
    pub async fn retry(&mut self) -> Result<(), FetchError> {
        let Some(result) = fetch_remote(&self.settings).await else {
            tracing::debug!("Retry requested without a manifest URL");
            return Ok(());
        };
        match result {
            Ok(snapshot) => {
                remember_snapshot(self.storage.as_deref(), &self.settings, &snapshot);
                self.bounds = CameraBounds::around(snapshot.dataset.center());
                self.dataset = snapshot.dataset;
                self.catalog = snapshot.catalog;
                self.source = DataSource::Remote;
                self.notice = None;
                tracing::info!("Retry succeeded");
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Retry failed: {}", error);
                self.notice = Some(LoadNotice::fetch_failed(&error, self.source));
                Err(error)
            }
        }
    }

    /// Camera used when the map first opens
    pub fn initial_camera(&self) -> CameraPosition {
        self.bounds.clamp(CameraPosition::initial(&self.dataset))
    }

    /// Camera for a selected exhibit
    pub fn focus_camera(&self, name: &str) -> Option<CameraPosition> {
        self.dataset
            .marker(name)
            .map(|marker| CameraPosition::focus(marker, &self.bounds))
    }

    /// A location tracker bound to the current park boundary
    pub fn tracker<P: LocationProvider>(&self, provider: P) -> LocationTracker<P> {
        LocationTracker::new(provider, &self.dataset)
    }
}

async fn fetch_remote(settings: &Settings) -> Option<Result<RemoteSnapshot, FetchError>> {
    let url = settings.manifest_url.as_deref()?;
    let client = match ManifestClient::new(url, settings.timeout()) {
        Ok(client) => client,
        Err(e) => return Some(Err(e)),
    };
    Some(
        client
            .fetch_snapshot(&settings.platform, &settings.location)
            .await,
    )
}

fn remember_snapshot(
    storage: Option<&dyn StorageBackend>,
    settings: &Settings,
    snapshot: &RemoteSnapshot,
) {
    let Some(storage) = storage else {
        return;
    };
    if let Err(e) =
        storage::store_snapshot(storage, &settings.platform, &settings.location, &snapshot.raw)
    {
        tracing::warn!("Failed to cache snapshot: {}", e);
    }
}

/// Cached snapshot when usable, else the bundled copy
fn fallback(
    settings: &Settings,
    storage: Option<&dyn StorageBackend>,
) -> Result<(ParkDataset, CategoryCatalog, DataSource), AppError> {
    if !settings.ignore_cache
        && let Some(storage) = storage
    {
        match storage::load_snapshot(storage, &settings.platform, &settings.location) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok((dataset, catalog)) => return Ok((dataset, catalog, DataSource::Cached)),
                Err(e) => tracing::warn!("Cached snapshot unusable: {}", e),
            },
            Ok(None) => tracing::debug!("No cached snapshot"),
            Err(e) => tracing::warn!("Failed to read cached snapshot: {}", e),
        }
    }
    Ok((bundled_dataset()?, bundled_catalog()?, DataSource::Bundled))
}

fn bundled_dataset() -> Result<ParkDataset, AppError> {
    ParkDataset::from_geojson_str(BUNDLED_GEOJSON).map_err(|source| AppError::Load {
        what: "bundled park data".to_string(),
        source,
    })
}

fn bundled_catalog() -> Result<CategoryCatalog, AppError> {
    CategoryCatalog::from_json_str(BUNDLED_CATEGORIES).map_err(|source| AppError::Load {
        what: "bundled categories".to_string(),
        source,
    })
}
