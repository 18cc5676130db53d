//! Inventory routing problem instance.

use serde::{Deserialize, Serialize};

use super::{Customer, PeriodMatrix, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::{InstanceError, IrpError};

/// A validated, fully-populated inventory routing instance.
///
/// Holds the depot and customers (indexed by id, depot at 0), the
/// forecasted-consumption matrix, the vehicle type, and the distance matrix.
/// Construction validates the instance; a `Problem` that exists is always
/// well-shaped.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Customer, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 10.1, 106.0, 100.0, 50.0).with_safety_level(20.0),
/// ];
/// let problem = Problem::new(
///     locations,
///     vec![vec![30.0, 30.0, 30.0]],
///     Vehicle::new(100.0).with_fixed_cost(10.0),
/// )
/// .unwrap();
/// assert_eq!(problem.num_customers(), 1);
/// assert_eq!(problem.duration(), 3);
/// assert!(problem.distance(0, 1) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    locations: Vec<Customer>,
    distances: DistanceMatrix,
    forecast: PeriodMatrix,
    vehicle: Vehicle,
}

impl Problem {
    /// Validates and builds a problem.
    ///
    /// `locations` must contain exactly one depot (id 0) anywhere in the list;
    /// the remaining customers must appear in id order `1..=n`.
    /// `forecasted_quantities[k]` is the per-period consumption of customer
    /// `k + 1`. Distances are great-circle distances between coordinates.
    pub fn new(
        locations: Vec<Customer>,
        forecasted_quantities: Vec<Vec<f64>>,
        vehicle: Vehicle,
    ) -> Result<Self, IrpError> {
        validate_vehicle(&vehicle)?;

        let mut depots = locations.iter().filter(|c| c.is_depot());
        let depot = depots.next().cloned().ok_or(InstanceError::MissingDepot)?;
        if depots.next().is_some() {
            return Err(InstanceError::DuplicateDepot.into());
        }

        let mut ordered = Vec::with_capacity(locations.len());
        ordered.push(depot);
        ordered.extend(locations.into_iter().filter(|c| !c.is_depot()));
        ordered.iter().try_for_each(validate_coordinates)?;

        for (pos, customer) in ordered.iter().enumerate().skip(1) {
            if customer.id() != pos {
                return Err(InstanceError::CustomerIdMismatch {
                    expected: pos,
                    found: customer.id(),
                }
                .into());
            }
            validate_customer(customer)?;
        }

        let forecast = build_forecast(&forecasted_quantities, ordered.len() - 1)?;
        let distances = DistanceMatrix::from_customers(&ordered);

        Ok(Self {
            locations: ordered,
            distances,
            forecast,
            vehicle,
        })
    }

    /// Replaces the great-circle distances with caller-supplied distances
    /// (e.g. road network kilometers), indexed by location id.
    ///
    /// Every entry must be finite and non-negative.
    pub fn with_distance_matrix(mut self, distances: DistanceMatrix) -> Result<Self, IrpError> {
        let n = distances.size();
        if n != self.locations.len() {
            return Err(InstanceError::DistanceMatrixSize {
                locations: self.locations.len(),
                size: n,
            }
            .into());
        }
        for from in 0..n {
            for to in 0..n {
                let value = distances.get(from, to);
                if !value.is_finite() || value < 0.0 {
                    return Err(InstanceError::InvalidDistance { from, to, value }.into());
                }
            }
        }
        self.distances = distances;
        Ok(self)
    }

    /// The depot (location 0).
    pub fn depot(&self) -> &Customer {
        &self.locations[0]
    }

    /// Routable customers ordered by id (depot excluded).
    pub fn customers(&self) -> &[Customer] {
        &self.locations[1..]
    }

    /// All locations, index = id.
    pub fn locations(&self) -> &[Customer] {
        &self.locations
    }

    /// Customer with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id is out of range.
    pub fn customer(&self, id: usize) -> &Customer {
        &self.locations[id]
    }

    /// Number of routable customers.
    pub fn num_customers(&self) -> usize {
        self.locations.len() - 1
    }

    /// Number of planning periods.
    pub fn duration(&self) -> usize {
        self.forecast.periods()
    }

    /// Distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The full distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Forecasted consumption per customer and period.
    pub fn forecast(&self) -> &PeriodMatrix {
        &self.forecast
    }

    /// The vehicle type.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Load limit per trip.
    pub fn vehicle_capacity(&self) -> f64 {
        self.vehicle.capacity()
    }

    /// Cost per dispatched trip.
    pub fn setup_cost_for_one_trip(&self) -> f64 {
        self.vehicle.fixed_cost()
    }

    /// Cost per kilometer.
    pub fn delivery_unit_cost(&self) -> f64 {
        self.vehicle.cost_per_distance()
    }
}

/// Instance record as handed over by a data-loading layer.
///
/// `customers` includes the depot. When `distances` is present it replaces
/// the great-circle distances.
///
/// # Examples
///
/// ```
/// use u_irp::models::{InstanceData, Problem};
///
/// let json = r#"{
///     "customers": [
///         {"id": 0, "latitude": 10.0, "longitude": 106.0},
///         {"id": 1, "latitude": 10.1, "longitude": 106.0, "capacity": 100.0,
///          "safety_level": 20.0, "init_quantity": 50.0, "time_window": "night"}
///     ],
///     "forecasted_quantities": [[30.0, 30.0]],
///     "vehicle": {"capacity": 100.0, "fixed_cost": 5.0, "cost_per_distance": 1.0}
/// }"#;
/// let data: InstanceData = serde_json::from_str(json).unwrap();
/// let problem = Problem::try_from(data).unwrap();
/// assert_eq!(problem.duration(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceData {
    /// Depot and customers.
    pub customers: Vec<Customer>,
    /// `[customer][period]` forecasted consumption, rows in id order.
    pub forecasted_quantities: Vec<Vec<f64>>,
    /// Vehicle type.
    pub vehicle: Vehicle,
    /// Optional explicit distances, `[from][to]` by location id.
    #[serde(default)]
    pub distances: Option<Vec<Vec<f64>>>,
}

impl TryFrom<InstanceData> for Problem {
    type Error = IrpError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        let problem = Problem::new(data.customers, data.forecasted_quantities, data.vehicle)?;
        match data.distances {
            None => Ok(problem),
            Some(rows) => {
                let size = rows.len();
                if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
                    return Err(InstanceError::RaggedDistanceRow {
                        row,
                        expected: size,
                        found: r.len(),
                    }
                    .into());
                }
                let flat: Vec<f64> = rows.into_iter().flatten().collect();
                let dm = DistanceMatrix::from_data(size, flat).ok_or(
                    InstanceError::DistanceMatrixSize {
                        locations: problem.locations().len(),
                        size,
                    },
                )?;
                problem.with_distance_matrix(dm)
            }
        }
    }
}

fn validate_vehicle(vehicle: &Vehicle) -> Result<(), InstanceError> {
    let capacity = vehicle.capacity();
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(InstanceError::NonPositiveVehicleCapacity(capacity));
    }
    for (name, value) in [
        ("setup_cost_for_one_trip", vehicle.fixed_cost()),
        ("delivery_unit_cost", vehicle.cost_per_distance()),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(InstanceError::InvalidCost { name, value });
        }
    }
    Ok(())
}

fn validate_coordinates(location: &Customer) -> Result<(), InstanceError> {
    let (latitude, longitude) = (location.latitude(), location.longitude());
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(InstanceError::InvalidCoordinate {
            customer_id: location.id(),
            latitude,
            longitude,
        });
    }
    Ok(())
}

fn validate_customer(customer: &Customer) -> Result<(), InstanceError> {
    let capacity = customer.capacity();
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(InstanceError::NonPositiveTankCapacity {
            customer_id: customer.id(),
            capacity,
        });
    }
    for (name, value) in [
        ("safety_level", customer.safety_level()),
        ("near_safety_level", customer.near_safety_level()),
        ("init_quantity", customer.init_quantity()),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(InstanceError::PercentageOutOfRange {
                customer_id: customer.id(),
                name,
                value,
            });
        }
    }
    Ok(())
}

fn build_forecast(rows: &[Vec<f64>], customers: usize) -> Result<PeriodMatrix, InstanceError> {
    if customers == 0 {
        return Err(InstanceError::EmptyHorizon);
    }
    if rows.len() != customers {
        return Err(InstanceError::ForecastRowMismatch {
            customers,
            rows: rows.len(),
        });
    }
    let periods = rows[0].len();
    if periods == 0 {
        return Err(InstanceError::EmptyHorizon);
    }
    for (k, row) in rows.iter().enumerate() {
        if row.len() != periods {
            return Err(InstanceError::ForecastColumnMismatch {
                customer_id: k + 1,
                expected: periods,
                found: row.len(),
            });
        }
        if let Some((period, &value)) = row
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(InstanceError::InvalidForecast {
                customer_id: k + 1,
                period,
                value,
            });
        }
    }
    PeriodMatrix::from_rows(rows).ok_or(InstanceError::EmptyHorizon)
}
