//! Local search operators for improving delivery plans.
//!
//! Every operator works period by period, accepts only feasible moves that
//! strictly shorten the routes involved, and runs to a fixed point.
//!
//! - [`or_opt`] — Intra-route segment reversal
//! - [`swap`] — Inter-route exchange of 1 or 2 consecutive customers
//! - [`shift`] — Inter-route relocation of a 1–3 customer block to a route tail
//! - [`transfer`] — Inter-period relocation of one delivery to an adjacent period
//! - [`local_search`] — Variable neighborhood descent over all four

mod or_opt;
mod shift;
mod swap;
mod transfer;
mod vnd;

pub use or_opt::{or_opt, or_opt_route};
pub use shift::shift;
pub use swap::swap;
pub use transfer::transfer;
pub use vnd::{local_search, local_search_with, LocalSearchOperator, OperatorSet};

pub(crate) use shift::shift_moves;
pub(crate) use transfer::transfer_moves;

use crate::models::{Plan, PlanEdit};

/// Minimum distance saving for a move to count as an improvement.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-10;

/// Repeatedly applies the first improving edit returned by `find` until none
/// is left. Returns the number of applied edits.
fn descend<F>(plan: &mut Plan, mut find: F) -> usize
where
    F: FnMut(&Plan) -> Option<PlanEdit>,
{
    let mut applied = 0;
    while let Some(edit) = find(plan) {
        plan.apply(&edit);
        applied += 1;
    }
    applied
}

/// Returns `true` if the edit shortens the routes it replaces.
fn shortens(edit: &PlanEdit, plan: &Plan) -> bool {
    edit.distance_delta(plan) < -IMPROVEMENT_EPS
}
