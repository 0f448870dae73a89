//! Location authorization and in-park tracking
//!
//! The platform location service is abstracted behind [`LocationProvider`].
//! The platform pushes authorization changes and location fixes into a
//! [`LocationTracker`], which updates its [`LocationState`] synchronously and
//! notifies subscribers. Callbacks are expected on a single thread, so there is
//! no locking.

use crate::{GeoCoordinate, ParkDataset};
use geo::{Contains, Polygon};

/// Location permission as reported by the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    AuthorizedAlways,
    AuthorizedWhenInUse,
    DeniedOrRestricted,
    /// A status this build does not recognize
    Unknown,
}

impl AuthorizationStatus {
    #[inline]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }
}

impl std::str::FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "notdetermined" => Ok(Self::NotDetermined),
            "always" | "authorizedalways" => Ok(Self::AuthorizedAlways),
            "wheninuse" | "authorizedwheninuse" => Ok(Self::AuthorizedWhenInUse),
            "denied" | "restricted" | "deniedorrestricted" => Ok(Self::DeniedOrRestricted),
            other => Err(format!("unknown authorization status: {}", other)),
        }
    }
}

/// A single location event from the platform
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LocationFix {
    pub coordinate: Option<GeoCoordinate>,
    /// Course over ground in degrees clockwise from true north
    pub bearing: Option<f64>,
}

impl LocationFix {
    pub fn at(coordinate: GeoCoordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            bearing: None,
        }
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }
}

/// Published tracker state
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LocationState {
    pub last_coordinate: Option<GeoCoordinate>,
    pub bearing: Option<f64>,
    pub authorization: AuthorizationStatus,
    pub in_park: bool,
}

/// Platform location service
pub trait LocationProvider {
    /// Ask the user for when-in-use permission
    fn request_when_in_use_authorization(&mut self);

    /// Start (or keep) delivering location updates
    fn start_updating_location(&mut self);

    /// Stop delivering location updates
    fn stop_updating_location(&mut self) {}

    /// Most recent fix known to the platform, if any
    fn last_known_location(&self) -> Option<LocationFix>;
}

/// Handle returned by [`LocationTracker::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&LocationState)>;

/// Location state machine for one map view
pub struct LocationTracker<P: LocationProvider> {
    provider: P,
    boundary: Polygon<f64>,
    state: LocationState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<P: LocationProvider> LocationTracker<P> {
    /// Create a tracker checking containment against the dataset's boundary
    pub fn new(provider: P, dataset: &ParkDataset) -> Self {
        Self {
            provider,
            boundary: dataset.boundary_polygon().clone(),
            state: LocationState::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> &LocationState {
        &self.state
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Whether the "center on me" control should be offered
    #[inline]
    pub fn shows_user_location_control(&self) -> bool {
        self.state.in_park
    }

    /// Register a callback invoked after every state change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&LocationState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    /// Act on the current authorization status
    pub fn check_authorization(&mut self, status: AuthorizationStatus) {
        match status {
            AuthorizationStatus::NotDetermined => {
                tracing::info!("Requesting location access");
                self.state.authorization = status;
                self.provider.request_when_in_use_authorization();
            }
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse => {
                tracing::info!("Location authorized ({:?})", status);
                self.state.authorization = status;
                self.provider.start_updating_location();
                if let Some(fix) = self.provider.last_known_location() {
                    self.apply_fix(fix);
                }
            }
            AuthorizationStatus::DeniedOrRestricted => {
                tracing::info!("Location access not allowed");
                self.state.authorization = status;
                self.provider.stop_updating_location();
            }
            AuthorizationStatus::Unknown => {
                tracing::warn!("Location authorization status unknown, ignoring");
                return;
            }
        }
        self.notify();
    }

    /// Platform signal that the authorization status changed
    pub fn authorization_changed(&mut self, status: AuthorizationStatus) {
        tracing::debug!(
            "Authorization changed: {:?} -> {:?}",
            self.state.authorization,
            status
        );
        self.check_authorization(status);
    }

    /// Platform delivered a location event
    pub fn location_updated(&mut self, fix: LocationFix) {
        self.apply_fix(fix);
        self.notify();
    }

    /// Platform delivered a batch of location events; only the newest matters
    pub fn locations_updated(&mut self, fixes: &[LocationFix]) {
        self.location_updated(fixes.last().copied().unwrap_or_default());
    }

    fn apply_fix(&mut self, fix: LocationFix) {
        match fix.coordinate {
            Some(coordinate) => {
                self.state.last_coordinate = Some(coordinate);
                self.state.in_park = self.boundary.contains(&geo::Point::from(coordinate));
                tracing::debug!("Location {} in park: {}", coordinate, self.state.in_park);
            }
            None => {
                self.state.in_park = false;
            }
        }
        if let Some(bearing) = fix.bearing.filter(|b| b.is_finite()) {
            self.state.bearing = Some(bearing.rem_euclid(360.0));
        }
    }

    fn notify(&mut self) {
        let state = self.state;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&state);
        }
    }
}
