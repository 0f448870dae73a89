//! Application module
//!
//! Loads the park snapshot once and runs a single command against it:
//! - `summary`: where the data came from and what it contains
//! - `categories`: the catalog in display order
//! - `exhibits`: exhibits grouped by category, filtered or searched
//! - `locate`: feed a fix through the location tracker
//! - `focus`: camera position for a selected exhibit

pub(crate) mod location;
pub(crate) mod remote;
pub(crate) mod settings;
pub(crate) mod state;
pub(crate) mod storage;

use crate::app::location::SimulatedProvider;
use crate::app::settings::{Command, Settings};
use crate::app::state::AppState;
use park_data_lib::{
    AuthorizationStatus, CategoryCatalog, DataError, ExhibitMarker, GeoCoordinate, LocationFix,
    LocationState,
};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use thiserror::Error;

/// Fatal application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load {what}: {source}")]
    Load { what: String, source: DataError },

    #[error("No exhibit named {0:?}")]
    UnknownExhibit(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Load the park data and run the configured command, printing to stdout
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let command = settings.command();
    let state = AppState::load(settings).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&state, &command, &mut out)
}

/// Run one command against a loaded state
pub fn execute(state: &AppState, command: &Command, out: &mut dyn Write) -> Result<(), AppError> {
    match command {
        Command::Summary => write_summary(state, out)?,
        Command::Categories => write_categories(state.catalog(), out)?,
        Command::Exhibits { category, search } => {
            write_exhibits(state, category.as_deref(), search.as_deref(), out)?
        }
        Command::Locate {
            lat,
            lon,
            bearing,
            status,
        } => {
            let mut fix = LocationFix::at(GeoCoordinate::new(*lat, *lon));
            if let Some(bearing) = bearing {
                fix = fix.with_bearing(*bearing);
            }
            let final_state = locate(state, fix, *status);
            write_location(&final_state, out)?;
        }
        Command::Focus { name } => {
            let camera = state
                .focus_camera(name)
                .ok_or_else(|| AppError::UnknownExhibit(name.clone()))?;
            writeln!(out, "{}", name)?;
            writeln!(out, "  camera center: {}", camera.center)?;
            writeln!(out, "  camera distance: {:.0} m", camera.distance)?;
        }
    }
    Ok(())
}

/// Drive a tracker through authorization and one fix; returns the last
/// published state
pub fn locate(state: &AppState, fix: LocationFix, status: AuthorizationStatus) -> LocationState {
    let mut tracker = state.tracker(SimulatedProvider::with_fix(fix));
    let published = Rc::new(RefCell::new(None));
    let sink = published.clone();
    tracker.subscribe(move |location: &LocationState| {
        *sink.borrow_mut() = Some(*location);
    });

    tracker.check_authorization(status);
    let last = *published.borrow();
    last.unwrap_or(*tracker.state())
}

fn write_summary(state: &AppState, out: &mut dyn Write) -> std::io::Result<()> {
    let dataset = state.dataset();
    writeln!(out, "Source: {}", state.source())?;
    if let Some(notice) = state.notice() {
        writeln!(out, "Notice: {}", notice.message)?;
    }
    writeln!(out, "Park center: {}", dataset.center())?;
    writeln!(
        out,
        "Boundary: {} vertices",
        dataset.boundary().len().saturating_sub(1)
    )?;
    writeln!(out, "Exhibits: {}", dataset.markers().len())?;
    writeln!(out, "Categories: {}", state.catalog().len())?;
    if !dataset.skipped().is_empty() {
        writeln!(out, "Skipped features: {}", dataset.skipped().len())?;
        for skip in dataset.skipped() {
            writeln!(
                out,
                "  #{} {}: {}",
                skip.index,
                skip.name.as_deref().unwrap_or("-"),
                skip.reason
            )?;
        }
    }
    Ok(())
}

fn write_categories(catalog: &CategoryCatalog, out: &mut dyn Write) -> std::io::Result<()> {
    for (code, entry) in catalog.list_sorted() {
        writeln!(
            out,
            "{:>3}  {:<14} {:<20} {}",
            entry.index,
            code,
            entry.name,
            entry.color.to_hex()
        )?;
    }
    Ok(())
}

fn write_marker(
    marker: &ExhibitMarker,
    catalog: &CategoryCatalog,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(
        out,
        "  {:<4} {:<40} {:<14} {}",
        marker.properties.monogram.as_deref().unwrap_or(""),
        marker.name(),
        catalog.get(marker.category()).name,
        marker.coordinate
    )
}

fn write_exhibits(
    state: &AppState,
    category: Option<&str>,
    search: Option<&str>,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let dataset = state.dataset();
    let catalog = state.catalog();

    if search.is_some() || category.is_some() {
        let mut markers = match search {
            Some(query) => dataset.search(query),
            None => dataset.markers().iter().collect(),
        };
        if let Some(code) = category {
            markers.retain(|m| m.category() == code);
        }
        markers.sort_by_key(|m| m.sort_key());
        for marker in markers {
            write_marker(marker, catalog, out)?;
        }
        return Ok(());
    }

    for group in dataset.grouped(catalog) {
        writeln!(out, "{}", group.category.name)?;
        for marker in group.markers {
            write_marker(marker, catalog, out)?;
        }
    }
    Ok(())
}

fn write_location(location: &LocationState, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Authorization: {:?}", location.authorization)?;
    match location.last_coordinate {
        Some(coordinate) => writeln!(out, "Location: {}", coordinate)?,
        None => writeln!(out, "Location: unavailable")?,
    }
    if let Some(bearing) = location.bearing {
        writeln!(out, "Bearing: {:.0}°", bearing)?;
    }
    writeln!(out, "In park: {}", if location.in_park { "yes" } else { "no" })?;
    writeln!(
        out,
        "User location control: {}",
        if location.in_park { "shown" } else { "hidden" }
    )?;
    Ok(())
}
