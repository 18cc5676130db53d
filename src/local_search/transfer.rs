//! Inter-period delivery relocation.
//!
//! # Algorithm
//!
//! For a customer served in an interior period `t` (`0 < t < duration - 1`),
//! moves its whole delivery to the tail of a route in `t - 1` or `t + 1`,
//! provided the customer is not already served in that period. The two
//! delivered-quantity cells are swapped in the same edit that replaces the
//! routes, so the customer's total over the horizon is unchanged.
//!
//! A candidate is accepted if both routes stay feasible and their combined
//! distance strictly decreases. A source route left empty is removed.

use log::trace;

use super::{descend, shortens};
use crate::evaluation::RouteEvaluator;
use crate::models::{Plan, PlanEdit, Problem, Route};

/// Applies delivery relocation to every interior period until no relocation
/// shortens the routes.
///
/// Returns `true` if any route changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::local_search::transfer;
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
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
/// let problem = Problem::new(locations, vec![vec![0.0; 3]; 2], Vehicle::new(100.0))
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(2, 3);
/// delivered.set(1, 0, 30.0);
/// delivered.set(2, 1, 40.0);
/// let eval = RouteEvaluator::new(&problem);
/// let (a, _) = eval.build_route(0, &[1], &delivered);
/// let (b, _) = eval.build_route(1, &[2], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![a], vec![b], vec![]], delivered);
///
/// assert!(transfer(&mut plan, &problem));
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.delivered().get(2, 0), 40.0);
/// assert_eq!(plan.delivered().get(2, 1), 0.0);
/// ```
pub fn transfer(plan: &mut Plan, problem: &Problem) -> bool {
    let eval = RouteEvaluator::new(problem);
    let mut improved = false;
    for period in 0..plan.duration() {
        let applied = descend(plan, |plan| {
            transfer_moves(plan, eval, period).find(|edit| shortens(edit, plan))
        });
        if applied > 0 {
            trace!("transfer: period {} improved {} times", period, applied);
            improved = true;
        }
    }
    improved
}

/// Feasible delivery relocations out of `period`, in scan order: routes,
/// then positions, then the earlier period before the later one.
pub(crate) fn transfer_moves<'a>(
    plan: &'a Plan,
    eval: RouteEvaluator<'a>,
    period: usize,
) -> impl Iterator<Item = PlanEdit> + 'a {
    let interior = period > 0 && period + 1 < plan.duration();
    let routes: &[Route] = if interior { plan.routes(period) } else { &[] };
    (0..routes.len())
        .flat_map(move |i| (0..routes[i].len()).map(move |pos| (i, pos)))
        .flat_map(move |(i, pos)| [period - 1, period + 1].map(move |target| (i, pos, target)))
        .filter(move |&(i, pos, target)| {
            let customer = routes[i].customer_ids()[pos];
            plan.served_in(target, customer).is_none()
        })
        .flat_map(move |(i, pos, target)| {
            (0..plan.routes(target).len()).map(move |dst| (i, pos, target, dst))
        })
        .filter_map(move |(i, pos, target, dst)| relocation(plan, eval, period, i, pos, target, dst))
}

/// Moves customer `pos` of route `i` in `period` to the tail of route `dst`
/// in `target`, carrying its delivered quantity along.
fn relocation(
    plan: &Plan,
    eval: RouteEvaluator<'_>,
    period: usize,
    i: usize,
    pos: usize,
    target: usize,
    dst: usize,
) -> Option<PlanEdit> {
    let from = plan.routes(period)[i].customer_ids();
    let to = plan.routes(target)[dst].customer_ids();
    let customer = from[pos];
    let moved = plan.delivered().get(customer, period);
    let left = plan.delivered().get(customer, target);

    let mut new_from = from.to_vec();
    new_from.remove(pos);
    let mut new_to = to.to_vec();
    new_to.push(customer);

    let route_from =
        eval.feasible_route(period, &new_from, |id| plan.delivered().get(id, period))?;
    let route_to = eval.feasible_route(target, &new_to, |id| {
        if id == customer {
            moved
        } else {
            plan.delivered().get(id, target)
        }
    })?;

    Some(
        PlanEdit::new()
            .replace_route(period, i, route_from)
            .replace_route(target, dst, route_to)
            .set_quantity(customer, period, left)
            .set_quantity(customer, target, moved),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PeriodMatrix, TimeWindow};
    use crate::testing::{day_line_problem, line_problem, plan_from, plan_with, route_ids};
    use proptest::prelude::*;

    #[test]
    fn test_transfer_boundary_periods_untouched() {
        let p = day_line_problem(&[5.0, 6.0], 2);
        let mut plan = plan_with(&p, &[vec![vec![1]], vec![vec![2]]], 10.0);
        assert!(!transfer(&mut plan, &p));
        assert_eq!(plan.num_routes(), 2);
    }

    #[test]
    fn test_transfer_skips_customer_served_in_target() {
        let p = day_line_problem(&[5.0, 6.0], 3);
        let plan = plan_with(&p, &[vec![vec![1, 2]], vec![vec![1]], vec![vec![1]]], 10.0);
        let eval = RouteEvaluator::new(&p);
        assert_eq!(transfer_moves(&plan, eval, 1).count(), 0);
    }

    #[test]
    fn test_transfer_respects_time_window() {
        let p = line_problem(&[5.0, 6.0], &[TimeWindow::Day, TimeWindow::Night], 3);
        let mut plan = plan_with(&p, &[vec![vec![1]], vec![vec![2]], Vec::new()], 10.0);
        assert!(!transfer(&mut plan, &p));
        assert_eq!(route_ids(&plan), vec![vec![vec![1]], vec![vec![2]], Vec::new()]);
    }

    #[test]
    fn test_transfer_respects_capacity() {
        let p = day_line_problem(&[5.0, 6.0], 3);
        let mut plan = plan_with(&p, &[vec![vec![1]], vec![vec![2]], Vec::new()], 60.0);
        assert!(!transfer(&mut plan, &p));
    }

    #[test]
    fn test_transfer_conserves_quantity() {
        let p = day_line_problem(&[5.0, 6.0, 7.0], 3);
        let mut d = PeriodMatrix::zeros(3, 3);
        d.set(1, 0, 30.0);
        d.set(2, 1, 25.0);
        d.set(3, 2, 35.0);
        let mut plan = plan_from(&p, d, &[vec![vec![1]], vec![vec![2]], vec![vec![3]]]);
        assert!(transfer(&mut plan, &p));
        assert_eq!(plan.total_delivered(), 90.0);
        assert_eq!(plan.delivered().row(2).iter().sum::<f64>(), 25.0);
        assert_eq!(plan.num_routes(), 2);
        assert!(RouteEvaluator::new(&p).validate_plan(&plan).is_empty());
    }

    proptest! {
        #[test]
        fn prop_transfer_preserves_customer_totals(
            q in proptest::collection::vec(1.0f64..40.0, 9),
            x in proptest::collection::vec(1.0f64..50.0, 3),
        ) {
            let p = day_line_problem(&x, 3);
            let mut d = PeriodMatrix::zeros(3, 3);
            let mut periods = vec![Vec::new(); 3];
            for t in 0..3 {
                let ids: Vec<usize> = (1..=3).filter(|id| (id + t) % 2 == 0).collect();
                for &id in &ids {
                    d.set(id, t, q[t * 3 + id - 1]);
                }
                if !ids.is_empty() {
                    periods[t].push(ids);
                }
            }
            let mut plan = plan_from(&p, d, &periods);
            let before: Vec<f64> = (1..=3).map(|id| plan.delivered().row(id).iter().sum()).collect();

            transfer(&mut plan, &p);

            for id in 1..=3 {
                let after: f64 = plan.delivered().row(id).iter().sum();
                prop_assert!((after - before[id - 1]).abs() < 1e-9);
            }
            prop_assert!(RouteEvaluator::new(&p).validate_plan(&plan).is_empty());
        }
    }
}
