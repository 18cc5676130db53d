//! Shared fixtures for unit tests.

use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{Customer, PeriodMatrix, Plan, Problem, TimeWindow, Vehicle};

/// Customers on a line at `positions` with the depot at `0.0`; distance is
/// the absolute difference. Tanks of 100 start at 50 and burn 10 per period.
/// Vehicle capacity 100, setup cost 10, unit cost 1.
pub(crate) fn line_problem(positions: &[f64], windows: &[TimeWindow], duration: usize) -> Problem {
    let mut locations = vec![Customer::depot(0.0, 0.0)];
    for (k, (&x, &tw)) in positions.iter().zip(windows).enumerate() {
        locations.push(
            Customer::new(k + 1, 0.0, x, 100.0, 50.0)
                .with_safety_level(20.0)
                .with_time_window(tw),
        );
    }

    let xs: Vec<f64> = std::iter::once(0.0).chain(positions.iter().copied()).collect();
    let n = xs.len();
    let xs = &xs;
    let data = (0..n)
        .flat_map(|a| (0..n).map(move |b| (xs[a] - xs[b]).abs()))
        .collect();
    let dm = DistanceMatrix::from_data(n, data).expect("square matrix");

    let vehicle = Vehicle::new(100.0)
        .with_fixed_cost(10.0)
        .with_cost_per_distance(1.0);
    Problem::new(locations, vec![vec![10.0; duration]; positions.len()], vehicle)
        .and_then(|p| p.with_distance_matrix(dm))
        .expect("valid instance")
}

/// All-day variant of [`line_problem`].
pub(crate) fn day_line_problem(positions: &[f64], duration: usize) -> Problem {
    line_problem(positions, &vec![TimeWindow::Day; positions.len()], duration)
}

/// Builds a plan from `[period][route]` customer lists, delivering
/// `quantity` to every routed customer.
pub(crate) fn plan_with(problem: &Problem, periods: &[Vec<Vec<usize>>], quantity: f64) -> Plan {
    let mut delivered = PeriodMatrix::zeros(problem.num_customers(), problem.duration());
    for (t, routes) in periods.iter().enumerate() {
        for &id in routes.iter().flatten() {
            delivered.set(id, t, quantity);
        }
    }
    plan_from(problem, delivered, periods)
}

/// Builds a plan from `[period][route]` customer lists and explicit
/// delivered quantities.
pub(crate) fn plan_from(
    problem: &Problem,
    delivered: PeriodMatrix,
    periods: &[Vec<Vec<usize>>],
) -> Plan {
    let eval = RouteEvaluator::new(problem);
    let mut all = vec![Vec::new(); problem.duration()];
    for (t, routes) in periods.iter().enumerate() {
        all[t] = routes
            .iter()
            .map(|ids| eval.build_route(t, ids, &delivered).0)
            .collect();
    }
    Plan::from_parts(all, delivered)
}

/// Customer ids of every route, `[period][route]`.
pub(crate) fn route_ids(plan: &Plan) -> Vec<Vec<Vec<usize>>> {
    plan.periods()
        .iter()
        .map(|rs| rs.iter().map(|r| r.customer_ids().to_vec()).collect())
        .collect()
}
