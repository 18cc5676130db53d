//! Inter-route block exchange within a period.
//!
//! # Algorithm
//!
//! For every pair of routes `a`, `b` of the same period and time window,
//! every position `k` in `a` and `l` in `b`, and block sizes
//! `p, q ∈ {1, 2}`, exchanges `a[k..k+p]` with `b[l..l+q]`:
//!
//! ```text
//! a' = a[..k] + b[l..l+q] + a[k+p..]
//! b' = b[..l] + a[k..k+p] + b[l+q..]
//! ```
//!
//! A candidate is accepted if both routes stay within capacity and their
//! combined distance strictly decreases. Delivered quantities travel with
//! their customers; the period's matrix column is untouched.
//!
//! # Complexity
//!
//! O(R² × n² × n) per pass, where R = routes per period and n = customers
//! per route.

use log::trace;

use super::{descend, shortens};
use crate::evaluation::RouteEvaluator;
use crate::models::{Plan, PlanEdit, Problem};

const MAX_BLOCK: usize = 2;

/// Applies block exchange to every period until no exchange shortens the
/// routes.
///
/// Returns `true` if any route changed.
///
/// # Examples
///
/// ```
/// use u_irp::distance::DistanceMatrix;
/// use u_irp::evaluation::RouteEvaluator;
/// use u_irp::local_search::swap;
/// use u_irp::models::{Customer, PeriodMatrix, Plan, Problem, Vehicle};
///
/// let locations: Vec<Customer> = std::iter::once(Customer::depot(0.0, 0.0))
///     .chain((1..=4).map(|id| Customer::new(id, 0.0, 0.0, 100.0, 50.0)))
///     .collect();
/// // Customers 1, 2 sit west at -10, -11; customers 3, 4 east at 10, 11.
/// let xs = [0.0, -10.0, 10.0, -11.0, 11.0];
/// let data = xs.iter().flat_map(|a| xs.iter().map(move |b| f64::abs(a - b))).collect();
/// let dm = DistanceMatrix::from_data(5, data).unwrap();
/// let problem = Problem::new(locations, vec![vec![0.0]; 4], Vehicle::new(100.0))
///     .unwrap()
///     .with_distance_matrix(dm)
///     .unwrap();
///
/// let mut delivered = PeriodMatrix::zeros(4, 1);
/// for id in 1..=4 {
///     delivered.set(id, 0, 25.0);
/// }
/// let eval = RouteEvaluator::new(&problem);
/// let (a, _) = eval.build_route(0, &[1, 2], &delivered);
/// let (b, _) = eval.build_route(0, &[3, 4], &delivered);
/// let mut plan = Plan::from_parts(vec![vec![a, b]], delivered);
///
/// assert!(swap(&mut plan, &problem));
/// assert!((plan.total_distance() - 44.0).abs() < 1e-10);
/// ```
pub fn swap(plan: &mut Plan, problem: &Problem) -> bool {
    let eval = RouteEvaluator::new(problem);
    let mut improved = false;
    for period in 0..plan.duration() {
        let applied = descend(plan, |plan| {
            swap_moves(plan, eval, period).find(|edit| shortens(edit, plan))
        });
        if applied > 0 {
            trace!("swap: period {} improved {} times", period, applied);
            improved = true;
        }
    }
    improved
}

/// Feasible block exchanges in `period`, in scan order.
pub(crate) fn swap_moves<'a>(
    plan: &'a Plan,
    eval: RouteEvaluator<'a>,
    period: usize,
) -> impl Iterator<Item = PlanEdit> + 'a {
    let routes = plan.routes(period);
    let n = routes.len();
    (0..n)
        .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
        .filter(move |&(i, j)| routes[i].time_window() == routes[j].time_window())
        .flat_map(move |(i, j)| {
            let (len_a, len_b) = (routes[i].len(), routes[j].len());
            (0..len_a).flat_map(move |k| {
                (0..len_b).flat_map(move |l| {
                    (1..=MAX_BLOCK).flat_map(move |p| {
                        (1..=MAX_BLOCK)
                            .filter(move |&q| k + p <= len_a && l + q <= len_b)
                            .map(move |q| (i, j, k, l, p, q))
                    })
                })
            })
        })
        .filter_map(move |(i, j, k, l, p, q)| exchange(plan, eval, period, (i, k, p), (j, l, q)))
}

/// Exchanges block `(route, start, len)` of one route with that of another.
fn exchange(
    plan: &Plan,
    eval: RouteEvaluator<'_>,
    period: usize,
    (i, k, p): (usize, usize, usize),
    (j, l, q): (usize, usize, usize),
) -> Option<PlanEdit> {
    let a = plan.routes(period)[i].customer_ids();
    let b = plan.routes(period)[j].customer_ids();

    let mut new_a = Vec::with_capacity(a.len() - p + q);
    new_a.extend_from_slice(&a[..k]);
    new_a.extend_from_slice(&b[l..l + q]);
    new_a.extend_from_slice(&a[k + p..]);

    let mut new_b = Vec::with_capacity(b.len() - q + p);
    new_b.extend_from_slice(&b[..l]);
    new_b.extend_from_slice(&a[k..k + p]);
    new_b.extend_from_slice(&b[l + q..]);

    let quantity = |id| plan.delivered().get(id, period);
    let route_a = eval.feasible_route(period, &new_a, quantity)?;
    let route_b = eval.feasible_route(period, &new_b, quantity)?;
    Some(
        PlanEdit::new()
            .replace_route(period, i, route_a)
            .replace_route(period, j, route_b),
    )
}
