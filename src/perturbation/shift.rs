//! Ratio-driven block relocation.
//!
//! # Algorithm
//!
//! For each period, enumerate the same moves as the shift local search
//! operator (a block of 1 to 3 customers appended to another same-window
//! route). Each candidate is applied, the plan's logistic ratio is measured,
//! and the candidate is undone. The lowest ratio below the current one is
//! committed. Merging two routes this way can lengthen the tour yet still
//! pay off by saving a vehicle trip.

use super::perturb_periods;
use crate::error::IrpError;
use crate::local_search::shift_moves;
use crate::models::{Plan, Problem};

/// Relocates a block of 1–3 customers to the tail of another route of the
/// same period, once per period, when it lowers the plan's logistic ratio.
///
/// Returns `true` if the plan changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
/// use u_irp::perturbation::perturb_shift;
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.0, 100.0, 50.0),
///     Customer::new(2, 0.0, 0.0, 100.0, 50.0),
/// ];
/// // Customers on opposite sides of the depot: merging lengthens the tour
/// // by nothing but saves a dispatch.
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 5.0, 5.0,
///     5.0, 0.0, 10.0,
///     5.0, 10.0, 0.0,
/// ]).unwrap();
/// let vehicle = Vehicle::new(100.0).with_fixed_cost(50.0).with_cost_per_distance(1.0);
/// let problem = Problem::new(locations, vec![vec![0.0]; 2], vehicle)
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(2, 1);
/// delivered.set(1, 0, 40.0);
/// delivered.set(2, 0, 40.0);
/// let eval = RouteEvaluator::new(&problem);
/// let (a, _) = eval.build_route(0, &[1], &delivered);
/// let (b, _) = eval.build_route(0, &[2], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![a, b]], delivered);
///
/// assert!(perturb_shift(&mut plan, &problem).unwrap());
/// assert_eq!(plan.num_routes(), 1);
/// ```
pub fn perturb_shift(plan: &mut Plan, problem: &Problem) -> Result<bool, IrpError> {
    perturb_periods(plan, problem, "perturb-shift", |plan, eval, period| {
        shift_moves(plan, eval, period).collect()
    })
}
