//! Customer and time window types.

use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;

/// Delivery shift a customer accepts. Routes never mix shifts.
///
/// # Examples
///
/// ```
/// use u_irp::models::TimeWindow;
///
/// assert_eq!(TimeWindow::default(), TimeWindow::Day);
/// assert_ne!(TimeWindow::Day, TimeWindow::Night);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Daytime deliveries.
    #[default]
    Day,
    /// Night-time deliveries.
    Night,
}

/// A customer tank (or the depot) in an inventory routing problem.
///
/// Location 0 is the depot. Inventory attributes (`safety_level`,
/// `near_safety_level`, `init_quantity`) are percentages of `capacity` on a
/// 0–100 scale.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Customer, TimeWindow};
///
/// let depot = Customer::depot(21.0, 105.8);
/// assert!(depot.is_depot());
///
/// let c = Customer::new(1, 21.1, 105.9, 20_000.0, 60.0)
///     .with_safety_level(20.0)
///     .with_near_safety_level(30.0)
///     .with_time_window(TimeWindow::Night);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.safety_level(), 20.0);
/// assert_eq!(c.time_window(), TimeWindow::Night);
/// assert!((c.scale() - 0.005).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    capacity: f64,
    #[serde(default)]
    safety_level: f64,
    #[serde(default)]
    near_safety_level: f64,
    #[serde(default)]
    init_quantity: f64,
    #[serde(default)]
    time_window: TimeWindow,
}

impl Customer {
    /// Creates a day-window customer with no safety thresholds.
    pub fn new(id: usize, latitude: f64, longitude: f64, capacity: f64, init_quantity: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            capacity,
            safety_level: 0.0,
            near_safety_level: 0.0,
            init_quantity,
            time_window: TimeWindow::Day,
        }
    }

    /// Creates the depot at the given coordinates (id 0, no tank).
    pub fn depot(latitude: f64, longitude: f64) -> Self {
        Self::new(0, latitude, longitude, 0.0, 0.0)
    }

    /// Sets the safety threshold (percent).
    pub fn with_safety_level(mut self, level: f64) -> Self {
        self.safety_level = level;
        self
    }

    /// Sets the near-safety warning threshold (percent).
    pub fn with_near_safety_level(mut self, level: f64) -> Self {
        self.near_safety_level = level;
        self
    }

    /// Sets the delivery time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Location id (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == 0
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Tank size in quantity units.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Inventory percentage below which a delivery is urgent.
    pub fn safety_level(&self) -> f64 {
        self.safety_level
    }

    /// Inventory percentage that triggers a warning in reports.
    pub fn near_safety_level(&self) -> f64 {
        self.near_safety_level
    }

    /// Starting inventory percentage.
    pub fn init_quantity(&self) -> f64 {
        self.init_quantity
    }

    /// Accepted delivery shift.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Percentage points per quantity unit (`100 / capacity`).
    pub fn scale(&self) -> f64 {
        100.0 / self.capacity
    }

    /// Great-circle distance to another location in kilometers.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}
