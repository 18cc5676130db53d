//! Error types for instance validation and objective evaluation.
//!
//! Infeasible candidate moves are not errors; they are reported as
//! [`Violation`](crate::models::Violation)s by the route evaluator and handled
//! inside the operator that produced them.

/// Reasons a problem instance is rejected before any simulation runs.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// No location with id 0 was supplied.
    MissingDepot,
    /// More than one location carries id 0.
    DuplicateDepot,
    /// A customer id does not match its position in the customer list.
    CustomerIdMismatch {
        /// Position (1-based) the customer occupies.
        expected: usize,
        /// Id the customer carries.
        found: usize,
    },
    /// The forecast matrix row count differs from the number of customers.
    ForecastRowMismatch {
        /// Number of routable customers.
        customers: usize,
        /// Number of forecast rows supplied.
        rows: usize,
    },
    /// A forecast row has a different number of periods than the first row.
    ForecastColumnMismatch {
        /// Customer id of the offending row.
        customer_id: usize,
        /// Periods in the first row.
        expected: usize,
        /// Periods in this row.
        found: usize,
    },
    /// The planning horizon has zero periods or there are no customers.
    EmptyHorizon,
    /// Vehicle capacity is zero, negative, or not finite.
    NonPositiveVehicleCapacity(f64),
    /// A customer's tank capacity is zero, negative, or not finite.
    NonPositiveTankCapacity {
        /// Offending customer id.
        customer_id: usize,
        /// Supplied capacity.
        capacity: f64,
    },
    /// A cost parameter is negative or not finite.
    InvalidCost {
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// A percentage attribute lies outside `0..=100`.
    PercentageOutOfRange {
        /// Offending customer id.
        customer_id: usize,
        /// Attribute name.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// A supplied distance matrix does not cover every location.
    DistanceMatrixSize {
        /// Number of locations including the depot.
        locations: usize,
        /// Matrix dimension supplied.
        size: usize,
    },
    /// A location's coordinates are not finite or lie outside the valid
    /// latitude/longitude range.
    InvalidCoordinate {
        /// Location id.
        customer_id: usize,
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// A row of an explicit distance matrix has the wrong number of entries.
    RaggedDistanceRow {
        /// Row index (origin location id).
        row: usize,
        /// Expected number of entries.
        expected: usize,
        /// Entries supplied.
        found: usize,
    },
    /// A distance entry is negative or not finite.
    InvalidDistance {
        /// Origin location id.
        from: usize,
        /// Destination location id.
        to: usize,
        /// Supplied value.
        value: f64,
    },
    /// A forecasted consumption is negative or not finite.
    InvalidForecast {
        /// Customer id.
        customer_id: usize,
        /// Period index.
        period: usize,
        /// Supplied value.
        value: f64,
    },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::MissingDepot => write!(f, "no depot (id 0) supplied"),
            InstanceError::DuplicateDepot => write!(f, "more than one location has id 0"),
            InstanceError::CustomerIdMismatch { expected, found } => write!(
                f,
                "customer at position {} has id {}; ids must be 1..=n in order",
                expected, found
            ),
            InstanceError::ForecastRowMismatch { customers, rows } => write!(
                f,
                "forecast has {} rows but there are {} customers",
                rows, customers
            ),
            InstanceError::ForecastColumnMismatch {
                customer_id,
                expected,
                found,
            } => write!(
                f,
                "forecast row for customer {} has {} periods, expected {}",
                customer_id, found, expected
            ),
            InstanceError::EmptyHorizon => write!(f, "instance has no customers or no periods"),
            InstanceError::NonPositiveVehicleCapacity(c) => {
                write!(f, "vehicle capacity must be positive, got {}", c)
            }
            InstanceError::NonPositiveTankCapacity {
                customer_id,
                capacity,
            } => write!(
                f,
                "customer {} tank capacity must be positive, got {}",
                customer_id, capacity
            ),
            InstanceError::InvalidCost { name, value } => {
                write!(f, "{} must be finite and non-negative, got {}", name, value)
            }
            InstanceError::PercentageOutOfRange {
                customer_id,
                name,
                value,
            } => write!(
                f,
                "customer {} {} must lie in 0..=100, got {}",
                customer_id, name, value
            ),
            InstanceError::DistanceMatrixSize { locations, size } => write!(
                f,
                "distance matrix is {}x{} but there are {} locations",
                size, size, locations
            ),
            InstanceError::InvalidCoordinate {
                customer_id,
                latitude,
                longitude,
            } => write!(
                f,
                "location {} has invalid coordinates ({}, {})",
                customer_id, latitude, longitude
            ),
            InstanceError::RaggedDistanceRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "distance row {} has {} entries, expected {}",
                row, found, expected
            ),
            InstanceError::InvalidDistance { from, to, value } => write!(
                f,
                "distance from {} to {} must be finite and non-negative, got {}",
                from, to, value
            ),
            InstanceError::InvalidForecast {
                customer_id,
                period,
                value,
            } => write!(
                f,
                "forecast for customer {} at period {} must be finite and non-negative, got {}",
                customer_id, period, value
            ),
        }
    }
}

impl std::error::Error for InstanceError {}

/// Fatal errors surfaced to the caller. No partial plan accompanies them.
#[derive(Debug, Clone, PartialEq)]
pub enum IrpError {
    /// The problem instance is malformed.
    InvalidInstance(InstanceError),
    /// Total delivered quantity is zero, so the logistic ratio is undefined.
    DegenerateObjective,
}

impl std::fmt::Display for IrpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrpError::InvalidInstance(err) => write!(f, "invalid instance: {}", err),
            IrpError::DegenerateObjective => {
                write!(f, "logistic ratio undefined: nothing is delivered")
            }
        }
    }
}

impl std::error::Error for IrpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IrpError::InvalidInstance(err) => Some(err),
            IrpError::DegenerateObjective => None,
        }
    }
}

impl From<InstanceError> for IrpError {
    fn from(err: InstanceError) -> Self {
        IrpError::InvalidInstance(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_mentions_values() {
        let err = IrpError::from(InstanceError::ForecastRowMismatch {
            customers: 3,
            rows: 2,
        });
        let msg = err.to_string();
        assert!(msg.contains("2 rows"));
        assert!(msg.contains("3 customers"));
    }

    #[test]
    fn test_source_chain() {
        let err = IrpError::from(InstanceError::MissingDepot);
        assert!(err.source().is_some());
        assert!(IrpError::DegenerateObjective.source().is_none());
    }
}
