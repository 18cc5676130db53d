//! Inter-route block relocation within a period.
//!
//! # Algorithm
//!
//! For every ordered pair of routes `(src, dst)` of the same period and time
//! window, moves a block `src[k..k+len]` with `len ∈ 1..=3` to the tail of
//! `dst`. A candidate is accepted if both routes stay within capacity and
//! their combined distance strictly decreases. A source route left empty is
//! removed from the period.
//!
//! # Complexity
//!
//! O(R² × n × n) per pass, where R = routes per period and n = customers
//! per route.

use log::trace;

use super::{descend, shortens};
use crate::evaluation::RouteEvaluator;
use crate::models::{Plan, PlanEdit, Problem};

const MAX_BLOCK: usize = 3;

/// Applies block relocation to every period until no relocation shortens
/// the routes.
///
/// Returns `true` if any route changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::local_search::shift;
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
/// let problem = Problem::new(locations, vec![vec![0.0]; 2], Vehicle::new(100.0))
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(2, 1);
/// delivered.set(1, 0, 30.0);
/// delivered.set(2, 0, 30.0);
/// let eval = RouteEvaluator::new(&problem);
/// let (a, _) = eval.build_route(0, &[1], &delivered);
/// let (b, _) = eval.build_route(0, &[2], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![a, b]], delivered);
///
/// assert!(shift(&mut plan, &problem));
/// assert_eq!(plan.num_routes(), 1);
/// assert!((plan.total_distance() - 21.0).abs() < 1e-10);
/// ```
pub fn shift(plan: &mut Plan, problem: &Problem) -> bool {
    let eval = RouteEvaluator::new(problem);
    let mut improved = false;
    for period in 0..plan.duration() {
        let applied = descend(plan, |plan| {
            shift_moves(plan, eval, period).find(|edit| shortens(edit, plan))
        });
        if applied > 0 {
            trace!("shift: period {} improved {} times", period, applied);
            improved = true;
        }
    }
    improved
}

/// Feasible block relocations in `period`, in scan order.
pub(crate) fn shift_moves<'a>(
    plan: &'a Plan,
    eval: RouteEvaluator<'a>,
    period: usize,
) -> impl Iterator<Item = PlanEdit> + 'a {
    let routes = plan.routes(period);
    let n = routes.len();
    (0..n)
        .flat_map(move |src| (0..n).map(move |dst| (src, dst)))
        .filter(move |&(src, dst)| {
            src != dst && routes[src].time_window() == routes[dst].time_window()
        })
        .flat_map(move |(src, dst)| {
            let len_src = routes[src].len();
            (0..len_src).flat_map(move |k| {
                (1..=MAX_BLOCK)
                    .filter(move |&len| k + len <= len_src)
                    .map(move |len| (src, dst, k, len))
            })
        })
        .filter_map(move |(src, dst, k, len)| relocation(plan, eval, period, src, dst, k, len))
}

/// Moves `src[k..k+len]` to the tail of `dst`.
fn relocation(
    plan: &Plan,
    eval: RouteEvaluator<'_>,
    period: usize,
    src: usize,
    dst: usize,
    k: usize,
    len: usize,
) -> Option<PlanEdit> {
    let from = plan.routes(period)[src].customer_ids();
    let to = plan.routes(period)[dst].customer_ids();

    let mut new_to = to.to_vec();
    new_to.extend_from_slice(&from[k..k + len]);
    let mut new_from = from.to_vec();
    new_from.drain(k..k + len);

    let quantity = |id| plan.delivered().get(id, period);
    let route_to = eval.feasible_route(period, &new_to, quantity)?;
    let route_from = eval.feasible_route(period, &new_from, quantity)?;
    Some(
        PlanEdit::new()
            .replace_route(period, src, route_from)
            .replace_route(period, dst, route_to),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use crate::testing::{day_line_problem, line_problem, plan_with, route_ids};

    #[test]
    fn test_shift_merges_routes() {
        let p = day_line_problem(&[5.0, 6.0, 7.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![1], vec![2, 3]]], 20.0);
        assert!(shift(&mut plan, &p));
        assert_eq!(plan.num_routes(), 1);
        assert!((plan.total_distance() - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_shift_blocked_by_capacity() {
        let p = day_line_problem(&[5.0, 6.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![1], vec![2]]], 60.0);
        assert!(!shift(&mut plan, &p));
        assert_eq!(plan.num_routes(), 2);
    }

    #[test]
    fn test_shift_blocked_by_time_window() {
        let p = line_problem(&[5.0, 6.0], &[TimeWindow::Day, TimeWindow::Night], 1);
        let mut plan = plan_with(&p, &[vec![vec![1], vec![2]]], 10.0);
        assert!(!shift(&mut plan, &p));
        assert_eq!(route_ids(&plan), vec![vec![vec![1], vec![2]]]);
    }

    #[test]
    fn test_shift_moves_blocks_up_to_three() {
        let p = day_line_problem(&[1.0, 2.0, 3.0, 4.0, 5.0], 1);
        let plan = plan_with(&p, &[vec![vec![1, 2, 3, 4], vec![5]]], 10.0);
        let eval = RouteEvaluator::new(&p);
        // Blocks of 1..=3 from the first route: 3 + 3 + 2 + 1, plus [5] itself
        assert_eq!(shift_moves(&plan, eval, 0).count(), 10);
        let largest_block = shift_moves(&plan, eval, 0)
            .filter_map(|e| {
                e.routes()
                    .find(|r| r.customer_ids().first() == Some(&5))
                    .map(|r| r.len() - 1)
            })
            .max();
        assert_eq!(largest_block, Some(3));
    }
}
