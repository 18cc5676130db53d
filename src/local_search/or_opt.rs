//! Intra-route segment reversal.
//!
//! # Algorithm
//!
//! For every pair of positions `k < l` in a route, reverses the segment
//! `route[k..=l]`. The first reversal that strictly shortens the route is
//! applied and the scan restarts, until no reversal helps. Loads do not
//! change, so only time-window feasibility can reject a candidate, and a
//! route built by this crate never mixes windows.
//!
//! # Complexity
//!
//! O(n³) per pass (n² reversals, each re-measured in O(n)).

use log::trace;

use super::{descend, shortens};
use crate::evaluation::RouteEvaluator;
use crate::models::{Plan, PlanEdit, Problem};

/// Applies segment reversal to every route of every period.
///
/// Returns `true` if any route changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::local_search::or_opt;
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.0, 100.0, 50.0),
///     Customer::new(2, 0.0, 0.0, 100.0, 50.0),
///     Customer::new(3, 0.0, 0.0, 100.0, 50.0),
/// ];
/// // Customers on a line at 1, 2, 3.
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 2.0, 3.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     3.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
/// let problem = Problem::new(locations, vec![vec![0.0]; 3], Vehicle::new(100.0))
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(3, 1);
/// for id in 1..=3 {
///     delivered.set(id, 0, 10.0);
/// }
/// let (route, _) = RouteEvaluator::new(&problem).build_route(0, &[2, 1, 3], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![route]], delivered);
///
/// assert!(or_opt(&mut plan, &problem));
/// assert!((plan.total_distance() - 6.0).abs() < 1e-10);
/// ```
pub fn or_opt(plan: &mut Plan, problem: &Problem) -> bool {
    let mut improved = false;
    for period in 0..plan.duration() {
        for index in 0..plan.routes(period).len() {
            improved |= or_opt_route(plan, problem, period, index);
        }
    }
    improved
}

/// Applies segment reversal to one route until no reversal shortens it.
///
/// Returns `true` if the route changed.
pub fn or_opt_route(plan: &mut Plan, problem: &Problem, period: usize, index: usize) -> bool {
    let eval = RouteEvaluator::new(problem);
    let applied = descend(plan, |plan| {
        let len = plan.routes(period)[index].len();
        (0..len)
            .flat_map(|k| ((k + 1)..len).map(move |l| (k, l)))
            .filter_map(|(k, l)| reversal(plan, eval, period, index, k, l))
            .find(|edit| shortens(edit, plan))
    });
    if applied > 0 {
        trace!("or-opt: period {} route {} improved {} times", period, index, applied);
    }
    applied > 0
}

/// Reverses `route[k..=l]`, or `None` if the result is infeasible.
fn reversal(
    plan: &Plan,
    eval: RouteEvaluator<'_>,
    period: usize,
    index: usize,
    k: usize,
    l: usize,
) -> Option<PlanEdit> {
    let mut ids = plan.routes(period)[index].customer_ids().to_vec();
    ids[k..=l].reverse();
    let route = eval.feasible_route(period, &ids, |id| plan.delivered().get(id, period))?;
    Some(PlanEdit::new().replace_route(period, index, route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{day_line_problem, plan_with, route_ids};

    #[test]
    fn test_or_opt_untangles_route() {
        let p = day_line_problem(&[1.0, 2.0, 3.0, 4.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![3, 1, 4, 2]]], 10.0);
        assert!(or_opt(&mut plan, &p));
        // Optimal out-and-back on a line: 2 * 4
        assert!((plan.total_distance() - 8.0).abs() < 1e-10);
        assert_eq!(plan.routes(0)[0].len(), 4);
    }

    #[test]
    fn test_or_opt_already_optimal() {
        let p = day_line_problem(&[1.0, 2.0, 3.0], 2);
        let mut plan = plan_with(&p, &[vec![vec![1, 2, 3]], vec![vec![3]]], 10.0);
        let before = plan.clone();
        assert!(!or_opt(&mut plan, &p));
        assert_eq!(plan, before);
    }

    #[test]
    fn test_or_opt_keeps_quantities() {
        let p = day_line_problem(&[1.0, 2.0, 3.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![2, 3, 1]]], 20.0);
        or_opt(&mut plan, &p);
        assert_eq!(plan.routes(0)[0].total_quantity(), 60.0);
        assert_eq!(plan.total_delivered(), 60.0);
        let mut ids = route_ids(&plan)[0][0].clone();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
