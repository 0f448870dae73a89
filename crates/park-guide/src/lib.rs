//! Lost in the Gardens - Application Library
//!
//! Command-line front end over `park-data-lib`: loads the York Street park
//! snapshot (local files, remote manifest, cached download or bundled copy)
//! and answers browsing, location and camera queries against it.

mod app;
pub mod logging;

pub use app::location::SimulatedProvider;
pub use app::remote::{FetchError, ManifestClient, RemoteSnapshot, sha256_hex};
pub use app::settings::{Command, Settings};
pub use app::state::{AppState, BUNDLED_CATEGORIES, BUNDLED_GEOJSON, DataSource, LoadNotice};
pub use app::storage::{CachedSnapshot, FileStorage, StorageBackend, StorageError};
pub use app::{AppError, execute, locate, run};
