//! Period-by-period construction of a delivery plan.
//!
//! # Algorithm
//!
//! For each period `t`, every customer's simulated level is compared with its
//! safety level:
//!
//! - already unsafe at `t`: refill to full from the previous level, except in
//!   the last period, where only the deficit below safety is delivered;
//! - unsafe within the look-ahead window: refill to `ratio_demand` of full;
//! - otherwise: no delivery.
//!
//! Quantities are capped at the vehicle capacity. The served customers are
//! split by time window, first-fit packed into routes (day routes first), and
//! the inventory is re-simulated before moving on to `t + 1`.

use log::debug;

use super::grid::{parameter_grid, ConstructionConfig, GridPoint};
use super::packing::first_fit_pack;
use crate::error::IrpError;
use crate::evaluation::{PlanEvaluator, RouteEvaluator};
use crate::inventory::{is_urgent, simulate};
use crate::models::{Customer, PeriodMatrix, Plan, Problem, Route, TimeWindow};

/// Builds the initial plan: one plan per grid point, keeping the one with
/// the lowest logistic ratio. Ties go to the earlier grid point.
///
/// Grid points whose plan delivers nothing are skipped; if every point is
/// degenerate the call fails with [`IrpError::DegenerateObjective`].
///
/// # Examples
///
/// ```
/// use u_irp::constructive::{construct, ConstructionConfig};
/// use u_irp::models::{Customer, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 10.01, 106.0, 100.0, 50.0).with_safety_level(20.0),
/// ];
/// let problem = Problem::new(
///     locations,
///     vec![vec![30.0, 30.0, 30.0, 30.0]],
///     Vehicle::new(100.0).with_fixed_cost(5.0).with_cost_per_distance(1.0),
/// )
/// .unwrap();
///
/// let plan = construct(&problem, &ConstructionConfig::default()).unwrap();
/// assert!(plan.total_delivered() > 0.0);
/// ```
pub fn construct(problem: &Problem, config: &ConstructionConfig) -> Result<Plan, IrpError> {
    let grid = parameter_grid(problem.duration(), config);
    let evaluator = PlanEvaluator::new(problem);

    let candidates = collect_grid(&grid, |point| {
        let plan = build_plan(problem, point);
        let ratio = evaluator.logistic_ratio(&plan);
        (plan, ratio)
    });

    let mut best: Option<(Plan, f64, GridPoint)> = None;
    for ((plan, ratio), point) in candidates.into_iter().zip(grid.iter()) {
        let Ok(ratio) = ratio else {
            debug!(
                "construction: ratio_demand={:.2} look_ahead={} delivers nothing",
                point.ratio_demand, point.look_ahead
            );
            continue;
        };
        let is_better = best.as_ref().is_none_or(|(_, b, _)| ratio < *b);
        if is_better {
            best = Some((plan, ratio, *point));
        }
    }

    let (plan, ratio, point) = best.ok_or(IrpError::DegenerateObjective)?;
    debug!(
        "construction: best ratio {:.6} at ratio_demand={:.2} look_ahead={} ({} routes)",
        ratio,
        point.ratio_demand,
        point.look_ahead,
        plan.num_routes()
    );
    Ok(plan)
}

/// Builds the plan for one grid point.
///
/// # Examples
///
/// ```
/// use u_irp::constructive::{build_plan, GridPoint};
/// use u_irp::models::{Customer, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 0.01, 100.0, 30.0).with_safety_level(20.0),
/// ];
/// let problem = Problem::new(locations, vec![vec![20.0, 20.0]], Vehicle::new(100.0)).unwrap();
///
/// let plan = build_plan(&problem, GridPoint { ratio_demand: 1.0, look_ahead: 1 });
/// // Level drops to 10 in period 0: refill from the period-0 level.
/// assert_eq!(plan.delivered().get(1, 0), 90.0);
/// assert_eq!(plan.routes(0).len(), 1);
/// ```
pub fn build_plan(problem: &Problem, point: GridPoint) -> Plan {
    let customers = problem.customers();
    let duration = problem.duration();
    let route_evaluator = RouteEvaluator::new(problem);

    let mut delivered = PeriodMatrix::zeros(customers.len(), duration);
    let mut levels = simulate(customers, problem.forecast(), &delivered);
    let mut periods = Vec::with_capacity(duration);

    for t in 0..duration {
        let mut day = Vec::new();
        let mut night = Vec::new();

        for customer in customers {
            let Some(quantity) = delivery_quantity(problem, customer, &levels, t, point) else {
                continue;
            };
            delivered.set(customer.id(), t, quantity);
            match customer.time_window() {
                TimeWindow::Day => day.push(customer.id()),
                TimeWindow::Night => night.push(customer.id()),
            }
        }

        let capacity = problem.vehicle_capacity();
        let routes: Vec<Route> = [day, night]
            .iter()
            .flat_map(|group| first_fit_pack(group, |id| delivered.get(id, t), capacity))
            .map(|ids| route_evaluator.build_route(t, &ids, &delivered).0)
            .collect();
        periods.push(routes);

        levels = simulate(customers, problem.forecast(), &delivered);
    }

    Plan::from_parts(periods, delivered)
}

/// Delivery for one customer in period `t`, or `None` if it is not served.
fn delivery_quantity(
    problem: &Problem,
    customer: &Customer,
    levels: &PeriodMatrix,
    t: usize,
    point: GridPoint,
) -> Option<f64> {
    let id = customer.id();
    let deficit = levels.get(id, t) - customer.safety_level();
    let previous = levels.get(id, t.saturating_sub(1));
    let fill_to_full = customer.capacity() * (1.0 - previous / 100.0);
    let vehicle_capacity = problem.vehicle_capacity();

    let quantity = if deficit < 0.0 {
        if t + 1 == problem.duration() {
            (-deficit / 100.0 * customer.capacity()).min(vehicle_capacity)
        } else {
            fill_to_full.min(vehicle_capacity)
        }
    } else if is_urgent(customer, levels, t, point.look_ahead) {
        (fill_to_full * point.ratio_demand).min(vehicle_capacity)
    } else {
        return None;
    };
    Some(quantity.max(0.0))
}

#[cfg(feature = "parallel")]
fn collect_grid<F, R>(grid: &[GridPoint], map_op: F) -> Vec<R>
where
    F: Fn(GridPoint) -> R + Sync + Send,
    R: Send,
{
    use rayon::prelude::*;
    grid.par_iter().map(|&p| map_op(p)).collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_grid<F, R>(grid: &[GridPoint], map_op: F) -> Vec<R>
where
    F: Fn(GridPoint) -> R,
{
    grid.iter().map(|&p| map_op(p)).collect()
}
