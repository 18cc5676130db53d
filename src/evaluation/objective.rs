//! Logistic ratio: total transport cost per unit delivered.

use serde::{Deserialize, Serialize};

use super::CAPACITY_TOLERANCE;
use crate::error::IrpError;
use crate::models::{Plan, Problem, Route};

/// Cost breakdown of a plan.
///
/// `route_quantities` and `route_distances` are indexed `[period][route]` in
/// the plan's route order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// `(setup_cost + delivery_cost) / total_delivered`; lower is better.
    pub logistic_ratio: f64,
    /// Dispatch cost summed over all trips.
    pub setup_cost: f64,
    /// Distance cost summed over all trips.
    pub delivery_cost: f64,
    /// Sum of every delivered quantity.
    pub total_delivered: f64,
    /// Load of each route.
    pub route_quantities: Vec<Vec<f64>>,
    /// Length of each route.
    pub route_distances: Vec<Vec<f64>>,
}

impl Objective {
    /// Setup plus delivery cost.
    pub fn total_cost(&self) -> f64 {
        self.setup_cost + self.delivery_cost
    }
}

/// Read-only objective evaluator for plans of one problem.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::{PlanEvaluator, RouteEvaluator};
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.0, 100.0, 10.0),
/// ];
/// let vehicle = Vehicle::new(100.0).with_fixed_cost(10.0).with_cost_per_distance(2.0);
/// let problem = Problem::new(locations, vec![vec![5.0]], vehicle)
///     .unwrap()
///     .with_distance_matrix(DistanceMatrix::from_data(2, vec![0.0, 3.0, 3.0, 0.0]).unwrap())
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(1, 1);
/// delivered.set(1, 0, 50.0);
/// let (route, _) = RouteEvaluator::new(&problem).build_route(0, &[1], &delivered);
/// let plan = Plan::from_parts(vec![vec![route]], delivered);
///
/// let objective = PlanEvaluator::new(&problem).evaluate(&plan).unwrap();
/// assert_eq!(objective.setup_cost, 10.0);
/// assert_eq!(objective.delivery_cost, 12.0);
/// assert!((objective.logistic_ratio - 22.0 / 50.0).abs() < 1e-12);
/// ```
pub struct PlanEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> PlanEvaluator<'a> {
    /// Creates an evaluator for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Number of vehicle trips needed to carry a route's load.
    pub fn trips(&self, route: &Route) -> f64 {
        let trips = (route.total_quantity() / self.problem.vehicle_capacity() - CAPACITY_TOLERANCE)
            .ceil();
        trips.max(0.0)
    }

    /// Setup and delivery cost of one route.
    pub fn route_cost(&self, route: &Route) -> (f64, f64) {
        let trips = self.trips(route);
        (
            trips * self.problem.setup_cost_for_one_trip(),
            trips * route.total_distance() * self.problem.delivery_unit_cost(),
        )
    }

    /// Full cost breakdown of a plan.
    ///
    /// Fails with [`IrpError::DegenerateObjective`] when nothing is delivered.
    pub fn evaluate(&self, plan: &Plan) -> Result<Objective, IrpError> {
        let mut setup_cost = 0.0;
        let mut delivery_cost = 0.0;
        let mut route_quantities = Vec::with_capacity(plan.duration());
        let mut route_distances = Vec::with_capacity(plan.duration());

        for routes in plan.periods() {
            for route in routes {
                let (setup, delivery) = self.route_cost(route);
                setup_cost += setup;
                delivery_cost += delivery;
            }
            route_quantities.push(routes.iter().map(|r| r.total_quantity()).collect());
            route_distances.push(routes.iter().map(|r| r.total_distance()).collect());
        }

        let total_delivered = plan.total_delivered();
        if total_delivered <= 0.0 {
            return Err(IrpError::DegenerateObjective);
        }

        Ok(Objective {
            logistic_ratio: (setup_cost + delivery_cost) / total_delivered,
            setup_cost,
            delivery_cost,
            total_delivered,
            route_quantities,
            route_distances,
        })
    }

    /// Logistic ratio alone, without collecting the per-route breakdown.
    pub fn logistic_ratio(&self, plan: &Plan) -> Result<f64, IrpError> {
        let total_delivered = plan.total_delivered();
        if total_delivered <= 0.0 {
            return Err(IrpError::DegenerateObjective);
        }
        let cost: f64 = plan
            .periods()
            .iter()
            .flatten()
            .map(|r| {
                let (setup, delivery) = self.route_cost(r);
                setup + delivery
            })
            .sum();
        Ok(cost / total_delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Customer, PeriodMatrix, Vehicle};

    fn setup() -> Problem {
        let locations = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 0.0, 0.0, 100.0, 50.0),
            Customer::new(2, 0.0, 0.0, 100.0, 50.0),
        ];
        let dm = DistanceMatrix::from_data(3, vec![0.0, 4.0, 5.0, 4.0, 0.0, 3.0, 5.0, 3.0, 0.0])
            .expect("square");
        let vehicle = Vehicle::new(100.0)
            .with_fixed_cost(20.0)
            .with_cost_per_distance(1.5);
        Problem::new(locations, vec![vec![10.0, 10.0]; 2], vehicle)
            .and_then(|p| p.with_distance_matrix(dm))
            .expect("valid")
    }

    fn plan(problem: &Problem, delivered: PeriodMatrix, periods: &[&[&[usize]]]) -> Plan {
        let eval = RouteEvaluator::new(problem);
        let routes = periods
            .iter()
            .enumerate()
            .map(|(t, rs)| {
                rs.iter()
                    .map(|ids| eval.build_route(t, ids, &delivered).0)
                    .collect()
            })
            .collect();
        Plan::from_parts(routes, delivered)
    }

    #[test]
    fn test_breakdown() {
        let p = setup();
        let mut d = PeriodMatrix::zeros(2, 2);
        d.set(1, 0, 40.0);
        d.set(2, 0, 30.0);
        d.set(2, 1, 50.0);
        let plan = plan(&p, d, &[&[&[1, 2]], &[&[2]]]);
        let obj = PlanEvaluator::new(&p).evaluate(&plan).expect("non-degenerate");

        assert_eq!(obj.setup_cost, 40.0);
        // route 0: 4 + 3 + 5 = 12, route 1: 5 + 5 = 10
        assert!((obj.delivery_cost - 1.5 * 22.0).abs() < 1e-10);
        assert_eq!(obj.total_delivered, 120.0);
        assert_eq!(obj.route_quantities, vec![vec![70.0], vec![50.0]]);
        assert_eq!(obj.route_distances, vec![vec![12.0], vec![10.0]]);
        assert!((obj.logistic_ratio - (40.0 + 33.0) / 120.0).abs() < 1e-12);
        assert!((obj.total_cost() - 73.0).abs() < 1e-10);

        let ratio = PlanEvaluator::new(&p).logistic_ratio(&plan).expect("non-degenerate");
        assert!((ratio - obj.logistic_ratio).abs() < 1e-15);
    }

    #[test]
    fn test_trips() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        let mut d = PeriodMatrix::zeros(2, 2);
        let cases = [(0.0, 0.0), (1.0, 1.0), (100.0, 1.0), (100.0 + 1e-12, 1.0), (150.0, 2.0)];
        for (q, expected) in cases {
            d.set(1, 0, q);
            let (route, _) = RouteEvaluator::new(&p).build_route(0, &[1], &d);
            assert_eq!(eval.trips(&route), expected, "quantity {}", q);
        }
    }

    #[test]
    fn test_degenerate() {
        let p = setup();
        let plan = Plan::new(2, 2);
        let eval = PlanEvaluator::new(&p);
        assert_eq!(eval.evaluate(&plan), Err(IrpError::DegenerateObjective));
        assert_eq!(eval.logistic_ratio(&plan), Err(IrpError::DegenerateObjective));
    }
}
