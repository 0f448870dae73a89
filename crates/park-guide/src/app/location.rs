//! Location provider for the command line
//!
//! There is no platform location service here, so the fix comes from the
//! command arguments and is handed out as the "last known" location once the
//! tracker starts updates.

use park_data_lib::{LocationFix, LocationProvider};

#[derive(Debug, Default)]
pub struct SimulatedProvider {
    fix: Option<LocationFix>,
    permission_requests: usize,
    updating: bool,
}

impl SimulatedProvider {
    pub fn with_fix(fix: LocationFix) -> Self {
        Self {
            fix: Some(fix),
            ..Self::default()
        }
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }
}

impl LocationProvider for SimulatedProvider {
    fn request_when_in_use_authorization(&mut self) {
        tracing::debug!("Simulated permission prompt");
        self.permission_requests += 1;
    }

    fn start_updating_location(&mut self) {
        self.updating = true;
    }

    fn stop_updating_location(&mut self) {
        self.updating = false;
    }

    fn last_known_location(&self) -> Option<LocationFix> {
        if self.updating { self.fix } else { None }
    }
}
