//! Ratio-driven delivery transfer between adjacent periods.
//!
//! # Algorithm
//!
//! For each interior period, enumerate the transfer moves of the local
//! search: a customer's delivery moves to a same-window route at `t - 1`
//! or `t + 1` where it is not yet served. Unlike the local search variant,
//! a candidate is kept when it lowers the logistic ratio, even if it
//! lengthens the routes.

use super::perturb_periods;
use crate::error::IrpError;
use crate::local_search::transfer_moves;
use crate::models::{Plan, Problem};

/// Moves one customer's delivery from an interior period to a route in the
/// previous or next period, once per period, when it lowers the plan's
/// logistic ratio.
///
/// The delivered quantity travels with the customer. Returns `true` if the
/// plan changed.
pub fn perturb_split(plan: &mut Plan, problem: &Problem) -> Result<bool, IrpError> {
    perturb_periods(plan, problem, "perturb-split", |plan, eval, period| {
        transfer_moves(plan, eval, period).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{PlanEvaluator, RouteEvaluator};
    use crate::models::PeriodMatrix;
    use crate::testing::{day_line_problem, plan_from};

    #[test]
    fn test_perturb_split_moves_delivery() {
        // Customer 2 at -6 sits opposite 1 at 5: a distance-only transfer
        // never fires, but dropping a dispatch pays off.
        let p = day_line_problem(&[5.0, -6.0], 3);
        let mut d = PeriodMatrix::zeros(2, 3);
        d.set(1, 0, 30.0);
        d.set(2, 1, 40.0);
        let mut plan = plan_from(&p, d, &[vec![vec![1]], vec![vec![2]], Vec::new()]);

        assert!(!crate::local_search::transfer(&mut plan.clone(), &p));

        let before = PlanEvaluator::new(&p).logistic_ratio(&plan).expect("ratio");
        assert!(perturb_split(&mut plan, &p).expect("ratio"));
        assert!(PlanEvaluator::new(&p).logistic_ratio(&plan).expect("ratio") < before);
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.delivered().row(2).iter().sum::<f64>(), 40.0);
        assert!(RouteEvaluator::new(&p).validate_plan(&plan).is_empty());
    }

    #[test]
    fn test_perturb_split_two_periods_noop() {
        let p = day_line_problem(&[5.0, -6.0], 2);
        let mut d = PeriodMatrix::zeros(2, 2);
        d.set(1, 0, 30.0);
        d.set(2, 1, 40.0);
        let mut plan = plan_from(&p, d, &[vec![vec![1]], vec![vec![2]]]);
        assert!(!perturb_split(&mut plan, &p).expect("ratio"));
    }
}
