//! Homogeneous vehicle type with capacity and cost parameters.

use serde::{Deserialize, Serialize};

/// The vehicle type every route is served with.
///
/// `fixed_cost` is charged per dispatched trip, `cost_per_distance` per
/// kilometer driven.
///
/// # Examples
///
/// ```
/// use u_irp::models::Vehicle;
///
/// let v = Vehicle::new(30_000.0)
///     .with_fixed_cost(300_000.0)
///     .with_cost_per_distance(50_000.0);
/// assert_eq!(v.capacity(), 30_000.0);
/// assert_eq!(v.fixed_cost(), 300_000.0);
/// assert_eq!(v.cost_per_distance(), 50_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    capacity: f64,
    #[serde(default)]
    cost_per_distance: f64,
    #[serde(default)]
    fixed_cost: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity and no costs.
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            cost_per_distance: 0.0,
            fixed_cost: 0.0,
        }
    }

    /// Sets cost per kilometer (delivery unit cost).
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }

    /// Sets cost per dispatched trip (setup cost).
    pub fn with_fixed_cost(mut self, cost: f64) -> Self {
        self.fixed_cost = cost;
        self
    }

    /// Maximum load per trip.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Cost per unit distance traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    /// Cost of dispatching one trip.
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(200.0);
        assert_eq!(v.capacity(), 200.0);
        assert_eq!(v.cost_per_distance(), 0.0);
        assert_eq!(v.fixed_cost(), 0.0);
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(100.0)
            .with_cost_per_distance(1.5)
            .with_fixed_cost(50.0);
        assert_eq!(v.capacity(), 100.0);
        assert_eq!(v.cost_per_distance(), 1.5);
        assert_eq!(v.fixed_cost(), 50.0);
    }
}
