use clap::{Parser, Subcommand};
use park_data_lib::AuthorizationStatus;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Lost in the Gardens - a guide to the York Street botanical garden
pub struct Settings {
    /// GeoJSON park data file to use instead of the bundled copy
    #[clap(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Category catalog file to use instead of the bundled copy
    #[clap(short, long, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    /// URL of the remote manifest; no network access when unset
    #[clap(long, value_name = "URL")]
    pub manifest_url: Option<String>,

    /// Platform key looked up in the manifest
    #[clap(long, default_value = "ios")]
    pub platform: String,

    /// Location name looked up in the manifest
    #[clap(long, default_value = "york-street")]
    pub location: String,

    /// Per-request timeout for remote fetches, in milliseconds
    #[clap(long, default_value = "1500")]
    pub timeout_ms: u64,

    /// Snapshot cache file (defaults to the per-user cache directory)
    #[clap(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Ignore previously cached remote snapshots
    #[clap(long, default_value = "false")]
    pub ignore_cache: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print where the park data came from and what it contains (default)
    Summary,

    /// List categories in display order
    Categories,

    /// List exhibits grouped by category
    Exhibits {
        /// Only list exhibits of this category code
        #[clap(long)]
        category: Option<String>,

        /// Only list exhibits whose name or monogram matches
        #[clap(short, long)]
        search: Option<String>,
    },

    /// Feed a location fix through the tracker and report in-park status
    Locate {
        #[clap(long, allow_hyphen_values = true)]
        lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        lon: f64,

        /// Course over ground in degrees
        #[clap(long)]
        bearing: Option<f64>,

        /// Authorization status reported by the platform
        #[clap(long, default_value = "when-in-use", value_parser = parse_authorization)]
        status: AuthorizationStatus,
    },

    /// Show the camera position for an exhibit
    Focus {
        /// Exhibit name
        name: String,
    },
}

fn parse_authorization(value: &str) -> Result<AuthorizationStatus, String> {
    value.parse()
}

impl Settings {
    /// Parse the process arguments, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// The subcommand to run, `summary` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
