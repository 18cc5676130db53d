//! Perturbation operators for escaping local optima.
//!
//! Unlike local search, a perturbation judges a candidate by the logistic
//! ratio of the whole plan. A move that lengthens the routes it touches is
//! still taken when it lowers the plan's cost per unit delivered.
//!
//! Each operator visits every period once. Within a period it applies every
//! feasible candidate, measures the ratio, and undoes it; the single best
//! candidate strictly below the current ratio is then committed.
//!
//! - [`perturb_shift`] — Block relocation between routes of a period
//! - [`perturb_insertion`] — Adds an unserved customer to a route, filling its spare capacity
//! - [`perturb_split`] — Moves one delivery to an adjacent period

mod insertion;
mod shift;
mod split;

pub use insertion::perturb_insertion;
pub use shift::perturb_shift;
pub use split::perturb_split;

use log::trace;

use crate::error::IrpError;
use crate::evaluation::{PlanEvaluator, RouteEvaluator};
use crate::models::{Plan, PlanEdit, Problem};

/// Runs one perturbation over every period.
///
/// `candidates` lists the feasible edits of one period against the current
/// plan. Returns `true` if any period committed an edit.
fn perturb_periods<F>(
    plan: &mut Plan,
    problem: &Problem,
    name: &str,
    candidates: F,
) -> Result<bool, IrpError>
where
    F: Fn(&Plan, RouteEvaluator<'_>, usize) -> Vec<PlanEdit>,
{
    let route_evaluator = RouteEvaluator::new(problem);
    let evaluator = PlanEvaluator::new(problem);
    let mut changed = false;

    for period in 0..plan.duration() {
        let current = evaluator.logistic_ratio(plan)?;
        let mut best: Option<(PlanEdit, f64)> = None;

        for edit in candidates(plan, route_evaluator, period) {
            let undo = plan.apply(&edit);
            let ratio = evaluator.logistic_ratio(plan);
            plan.undo(undo);
            let ratio = ratio?;

            let threshold = best.as_ref().map_or(current, |(_, r)| *r);
            if ratio < threshold {
                best = Some((edit, ratio));
            }
        }

        if let Some((edit, ratio)) = best {
            trace!(
                "{}: period {} ratio {:.6} -> {:.6}",
                name,
                period,
                current,
                ratio
            );
            plan.apply(&edit);
            changed = true;
        }
    }

    Ok(changed)
}
