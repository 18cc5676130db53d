//! Route evaluator that computes distance, load, and feasibility.

use std::collections::HashSet;

use super::exceeds_capacity;
use crate::distance::DistanceMatrix;
use crate::models::{PeriodMatrix, Plan, Problem, Route, TimeWindow, Violation, ViolationType};

/// Computes the total distance: depot → route[0] → ... → route[n-1] → depot.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::route_distance;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 1.0,
///     2.0, 1.0, 0.0,
/// ]).unwrap();
/// assert_eq!(route_distance(&[1, 2], 0, &dm), 4.0);
/// assert_eq!(route_distance(&[], 0, &dm), 0.0);
/// ```
pub fn route_distance(route: &[usize], depot: usize, distances: &DistanceMatrix) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let mut dist = distances.get(depot, route[0]);
    for w in route.windows(2) {
        dist += distances.get(w[0], w[1]);
    }
    dist += distances.get(route[route.len() - 1], depot);
    dist
}

/// Builds routes from customer sequences, computing distance and load, and
/// checks the route constraints: one time window per route and load within
/// vehicle capacity.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Customer, PeriodMatrix, Problem, TimeWindow, Vehicle};
/// use u_irp::evaluation::RouteEvaluator;
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.1, 100.0, 50.0),
///     Customer::new(2, 0.1, 0.0, 100.0, 50.0).with_time_window(TimeWindow::Night),
/// ];
/// let problem = Problem::new(locations, vec![vec![0.0], vec![0.0]], Vehicle::new(100.0)).unwrap();
/// let mut delivered = PeriodMatrix::zeros(2, 1);
/// delivered.set(1, 0, 40.0);
/// delivered.set(2, 0, 30.0);
///
/// let evaluator = RouteEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1], &delivered);
/// assert!(violations.is_empty());
/// assert_eq!(route.total_quantity(), 40.0);
///
/// let (_, violations) = evaluator.build_route(0, &[1, 2], &delivered);
/// assert_eq!(violations.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// The problem this evaluator reads from.
    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Depot-to-depot distance of a customer sequence.
    pub fn distance(&self, customer_ids: &[usize]) -> f64 {
        route_distance(customer_ids, 0, self.problem.distances())
    }

    /// Builds a route in `period`, reading loads from `delivered`.
    pub fn build_route(
        &self,
        period: usize,
        customer_ids: &[usize],
        delivered: &PeriodMatrix,
    ) -> (Route, Vec<Violation>) {
        self.build_route_with(period, customer_ids, |id| delivered.get(id, period))
    }

    /// Builds a route in `period`, reading each customer's load from
    /// `quantity`.
    ///
    /// The route takes the time window of its first customer; every other
    /// customer must match it.
    pub fn build_route_with<F>(
        &self,
        period: usize,
        customer_ids: &[usize],
        quantity: F,
    ) -> (Route, Vec<Violation>)
    where
        F: Fn(usize) -> f64,
    {
        let time_window = customer_ids
            .first()
            .map_or(TimeWindow::Day, |&id| self.problem.customer(id).time_window());
        let mut route = Route::new(period, time_window);
        let mut violations = Vec::new();
        let mut load = 0.0;

        for &cid in customer_ids {
            let found = self.problem.customer(cid).time_window();
            if found != time_window {
                violations.push(Violation::new(ViolationType::MixedTimeWindows {
                    period,
                    customer_id: cid,
                    expected: time_window,
                    found,
                }));
            }
            load += quantity(cid);
            route.push_customer(cid);
        }

        route.set_total_distance(self.distance(customer_ids));
        route.set_total_quantity(load);

        let capacity = self.problem.vehicle_capacity();
        if exceeds_capacity(load, capacity) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                period,
                load,
                capacity,
            }));
        }

        (route, violations)
    }

    /// Builds a route and returns it only if it is feasible.
    ///
    /// An infeasible candidate is an ordinary rejected move, not an error.
    pub fn feasible_route<F>(&self, period: usize, customer_ids: &[usize], quantity: F) -> Option<Route>
    where
        F: Fn(usize) -> f64,
    {
        let (route, violations) = self.build_route_with(period, customer_ids, quantity);
        violations.is_empty().then_some(route)
    }

    /// Checks every route of a plan against the plan's delivered quantities,
    /// plus single visits per period and that every delivery is routed.
    pub fn validate_plan(&self, plan: &Plan) -> Vec<Violation> {
        let mut all_violations = Vec::new();

        for (period, routes) in plan.periods().iter().enumerate() {
            let mut seen = HashSet::new();
            for route in routes {
                let (_, mut violations) =
                    self.build_route(period, route.customer_ids(), plan.delivered());
                all_violations.append(&mut violations);

                for &cid in route.customer_ids() {
                    if !seen.insert(cid) {
                        all_violations.push(Violation::new(ViolationType::DuplicateVisit {
                            period,
                            customer_id: cid,
                        }));
                    }
                }
            }

            for customer in self.problem.customers() {
                let quantity = plan.delivered().get(customer.id(), period);
                if quantity > 0.0 && !seen.contains(&customer.id()) {
                    all_violations.push(Violation::new(ViolationType::UnroutedDelivery {
                        period,
                        customer_id: customer.id(),
                        quantity,
                    }));
                }
            }
        }

        all_violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, PlanEdit, Vehicle};

    fn setup() -> Problem {
        let locations = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 0.0, 0.1, 100.0, 50.0),
            Customer::new(2, 0.0, 0.2, 100.0, 50.0),
            Customer::new(3, 0.1, 0.0, 100.0, 50.0).with_time_window(TimeWindow::Night),
        ];
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 5.0, 8.0, 12.0, 5.0, 0.0, 3.0, 7.0, 8.0, 3.0, 0.0, 4.0, 12.0, 7.0, 4.0, 0.0,
            ],
        )
        .expect("square");
        Problem::new(locations, vec![vec![0.0; 2]; 3], Vehicle::new(50.0))
            .and_then(|p| p.with_distance_matrix(dm))
            .expect("valid")
    }

    fn delivered() -> PeriodMatrix {
        let mut m = PeriodMatrix::zeros(3, 2);
        m.set(1, 0, 20.0);
        m.set(2, 0, 25.0);
        m.set(3, 0, 10.0);
        m
    }

    #[test]
    fn test_build_route_empty() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let (route, violations) = eval.build_route(0, &[], &delivered());
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.total_distance(), 0.0);
    }

    #[test]
    fn test_build_route_distance_and_load() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let (route, violations) = eval.build_route(0, &[1, 2], &delivered());
        assert!(violations.is_empty());
        // 0->1 = 5, 1->2 = 3, 2->0 = 8
        assert!((route.total_distance() - 16.0).abs() < 1e-10);
        assert_eq!(route.total_quantity(), 45.0);
        assert_eq!(route.time_window(), TimeWindow::Day);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let (_, violations) = eval.build_route_with(0, &[1, 2], |_| 30.0);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { load, capacity, .. } if load == 60.0 && capacity == 50.0
        ));
    }

    #[test]
    fn test_capacity_tolerates_rounding_noise() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let q = 50.0 - 0.1;
        let route = eval.feasible_route(0, &[1, 2], |id| if id == 1 { q } else { 0.1 + 1e-14 });
        assert!(route.is_some());
    }

    #[test]
    fn test_mixed_time_windows() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let (route, violations) = eval.build_route(0, &[3, 1], &delivered());
        assert_eq!(route.time_window(), TimeWindow::Night);
        assert!(matches!(
            violations[0].kind,
            ViolationType::MixedTimeWindows {
                customer_id: 1,
                expected: TimeWindow::Night,
                found: TimeWindow::Day,
                ..
            }
        ));
        assert!(eval.feasible_route(0, &[3, 1], |_| 1.0).is_none());
    }

    #[test]
    fn test_validate_plan() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let d = delivered();
        let (r1, _) = eval.build_route(0, &[1, 2], &d);
        let (r2, _) = eval.build_route(0, &[3], &d);
        let plan = Plan::from_parts(vec![vec![r1, r2], Vec::new()], d);
        assert!(eval.validate_plan(&plan).is_empty());

        // Drop the night route: customer 3's delivery is no longer routed.
        let mut broken = plan.clone();
        broken.apply(&PlanEdit::new().replace_route(0, 1, Route::new(0, TimeWindow::Night)));
        let violations = eval.validate_plan(&broken);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::UnroutedDelivery { customer_id: 3, .. }
        ));
    }

    #[test]
    fn test_validate_plan_duplicate_visit() {
        let p = setup();
        let eval = RouteEvaluator::new(&p);
        let d = delivered();
        let (r1, _) = eval.build_route(0, &[1], &d);
        let (r2, _) = eval.build_route(0, &[1, 2], &d);
        let (r3, _) = eval.build_route(0, &[3], &d);
        let plan = Plan::from_parts(vec![vec![r1, r2, r3], Vec::new()], d);
        let violations = eval.validate_plan(&plan);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::DuplicateVisit { customer_id: 1, .. })));
    }
}
