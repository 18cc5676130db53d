//! Ratio-driven customer insertion.
//!
//! # Algorithm
//!
//! For each period and each route with spare capacity, try appending every
//! same-window customer not yet served in that period, delivering exactly
//! the spare capacity. Candidates are applied, measured and undone; the
//! lowest ratio below the current one is committed. Filling routes raises
//! the total delivered, which lowers cost per unit.

use super::perturb_periods;
use crate::error::IrpError;
use crate::evaluation::{RouteEvaluator, CAPACITY_TOLERANCE};
use crate::models::{Plan, PlanEdit, Problem};

/// Adds a customer not served in a period to the tail of one of that
/// period's routes, delivering the route's spare capacity, once per period,
/// when it lowers the plan's logistic ratio.
///
/// Only routes of the customer's time window with spare capacity are
/// considered. Returns `true` if the plan changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
/// use u_irp::perturbation::perturb_insertion;
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.0, 100.0, 50.0),
///     Customer::new(2, 0.0, 0.0, 100.0, 50.0),
/// ];
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 10.0, 10.0,
///     10.0, 0.0, 1.0,
///     10.0, 1.0, 0.0,
/// ]).unwrap();
/// let vehicle = Vehicle::new(100.0).with_fixed_cost(10.0).with_cost_per_distance(1.0);
/// let problem = Problem::new(locations, vec![vec![0.0]; 2], vehicle)
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(2, 1);
/// delivered.set(1, 0, 30.0);
/// let (route, _) = RouteEvaluator::new(&problem).build_route(0, &[1], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![route]], delivered);
///
/// assert!(perturb_insertion(&mut plan, &problem).unwrap());
/// assert_eq!(plan.delivered().get(2, 0), 70.0);
/// assert_eq!(plan.routes(0)[0].total_quantity(), 100.0);
/// ```
pub fn perturb_insertion(plan: &mut Plan, problem: &Problem) -> Result<bool, IrpError> {
    perturb_periods(plan, problem, "perturb-insertion", insertion_moves)
}

/// Feasible insertions in `period`: routes in order, then customers by id.
fn insertion_moves(plan: &Plan, eval: RouteEvaluator<'_>, period: usize) -> Vec<PlanEdit> {
    let problem = eval.problem();
    let capacity = problem.vehicle_capacity();
    let mut edits = Vec::new();

    for (index, route) in plan.routes(period).iter().enumerate() {
        let spare = capacity - route.total_quantity();
        if spare <= capacity * CAPACITY_TOLERANCE {
            continue;
        }
        for customer in problem.customers() {
            let id = customer.id();
            if customer.time_window() != route.time_window() || plan.served_in(period, id).is_some()
            {
                continue;
            }

            let mut ids = route.customer_ids().to_vec();
            ids.push(id);
            let quantity = |c| {
                if c == id {
                    spare
                } else {
                    plan.delivered().get(c, period)
                }
            };
            if let Some(new_route) = eval.feasible_route(period, &ids, quantity) {
                edits.push(
                    PlanEdit::new()
                        .replace_route(period, index, new_route)
                        .set_quantity(id, period, spare),
                );
            }
        }
    }
    edits
}
