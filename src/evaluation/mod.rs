//! Route feasibility and plan objective evaluation.
//!
//! - [`RouteEvaluator`] — Builds routes, caches distance and load, reports violations
//! - [`PlanEvaluator`] — Logistic ratio (cost per unit delivered) with cost breakdown

mod objective;
mod route;

pub use objective::{Objective, PlanEvaluator};
pub use route::{route_distance, RouteEvaluator};

/// Relative slack on capacity comparisons, absorbing floating-point noise in
/// summed quantities.
pub(crate) const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `load` is over `capacity` beyond rounding noise.
pub(crate) fn exceeds_capacity(load: f64, capacity: f64) -> bool {
    load > capacity * (1.0 + CAPACITY_TOLERANCE)
}
