//! Constraint violation types.

use super::TimeWindow;

/// A type of constraint violation in a route or plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Period of the route.
        period: usize,
        /// Load on the route.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// A customer's window differs from the route's window.
    MixedTimeWindows {
        /// Period of the route.
        period: usize,
        /// Customer that breaks segregation.
        customer_id: usize,
        /// Window of the route.
        expected: TimeWindow,
        /// Window of the customer.
        found: TimeWindow,
    },
    /// A customer is visited more than once in one period.
    DuplicateVisit {
        /// Period.
        period: usize,
        /// Customer visited twice.
        customer_id: usize,
    },
    /// A delivery is recorded for a customer no route visits.
    UnroutedDelivery {
        /// Period.
        period: usize,
        /// Customer id.
        customer_id: usize,
        /// Quantity recorded.
        quantity: f64,
    },
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}
