//! Location entity as exposed by the organization's location directory.

use rcp_shared::utils::geo::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GPS accuracy ceiling applied when a location does not configure one
pub const DEFAULT_MAX_ACCURACY_METERS: f64 = 100.0;

/// A physical site workers clock in at
///
/// Owned by the organization and read-only to the clock subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Geofence radius in meters
    pub radius_meters: Option<u32>,
    /// Largest GPS accuracy (meters) still accepted for a clock attempt
    pub max_accuracy_meters: f64,
    /// Whether QR time clock is switched on for this site
    pub rcp_enabled: bool,
}

/// Circular boundary derived from a fully configured location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub center: Coordinate,
    pub radius_meters: u32,
}

impl Geofence {
    /// Distance in whole meters from the center to `point`
    pub fn distance_to(&self, point: &Coordinate) -> u32 {
        rcp_shared::utils::geo::distance_meters(
            self.center.latitude,
            self.center.longitude,
            point.latitude,
            point.longitude,
        )
    }

    /// Whether `distance` (meters) is inside the boundary, inclusive
    pub fn contains_distance(&self, distance: u32) -> bool {
        distance <= self.radius_meters
    }
}

impl Location {
    /// Create a location without geolocation setup
    pub fn new(organization_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: name.into(),
            latitude: None,
            longitude: None,
            radius_meters: None,
            max_accuracy_meters: DEFAULT_MAX_ACCURACY_METERS,
            rcp_enabled: false,
        }
    }

    /// Set the geofence center and radius
    pub fn with_geofence(mut self, latitude: f64, longitude: f64, radius_meters: u32) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.radius_meters = Some(radius_meters);
        self
    }

    /// Set the accepted GPS accuracy ceiling
    pub fn with_max_accuracy(mut self, meters: f64) -> Self {
        self.max_accuracy_meters = meters;
        self
    }

    /// Enable or disable the QR time clock
    pub fn with_rcp_enabled(mut self, enabled: bool) -> Self {
        self.rcp_enabled = enabled;
        self
    }

    /// The geofence, present only when latitude, longitude and radius are all set
    pub fn geofence(&self) -> Option<Geofence> {
        match (self.latitude, self.longitude, self.radius_meters) {
            (Some(lat), Some(lng), Some(radius)) => Some(Geofence {
                center: Coordinate::new(lat, lng),
                radius_meters: radius,
            }),
            _ => None,
        }
    }
}
