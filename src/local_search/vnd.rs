//! Variable neighborhood descent over the local search operators.
//!
//! The driver keeps a set of active operators, initially all four. It always
//! runs the first active operator in the fixed order or-opt, swap, shift,
//! transfer. An operator that lowers the logistic ratio re-activates the full
//! set; one that doesn't is dropped. The descent ends when the set is empty.
//!
//! Operators accept moves by route distance, not by the global ratio. A pass
//! that leaves the ratio worse is rolled back, so the ratio never increases.

use log::debug;

use super::{or_opt, shift, swap, transfer};
use crate::error::IrpError;
use crate::evaluation::PlanEvaluator;
use crate::models::{Plan, Problem};

/// One local search neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalSearchOperator {
    /// Intra-route segment reversal.
    OrOpt,
    /// Inter-route block exchange.
    Swap,
    /// Inter-route block relocation.
    Shift,
    /// Inter-period delivery relocation.
    Transfer,
}

impl LocalSearchOperator {
    /// All operators in descent order.
    pub const ALL: [LocalSearchOperator; 4] = [
        LocalSearchOperator::OrOpt,
        LocalSearchOperator::Swap,
        LocalSearchOperator::Shift,
        LocalSearchOperator::Transfer,
    ];

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            LocalSearchOperator::OrOpt => "or-opt",
            LocalSearchOperator::Swap => "swap",
            LocalSearchOperator::Shift => "shift",
            LocalSearchOperator::Transfer => "transfer",
        }
    }

    /// Runs the operator to its fixed point. Returns `true` if the plan
    /// changed.
    pub fn apply(self, plan: &mut Plan, problem: &Problem) -> bool {
        match self {
            LocalSearchOperator::OrOpt => or_opt(plan, problem),
            LocalSearchOperator::Swap => swap(plan, problem),
            LocalSearchOperator::Shift => shift(plan, problem),
            LocalSearchOperator::Transfer => transfer(plan, problem),
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of operators, stored as a bitmask.
///
/// # Examples
///
/// ```
/// use u_irp::local_search::{LocalSearchOperator, OperatorSet};
///
/// let mut set = OperatorSet::all();
/// set.remove(LocalSearchOperator::OrOpt);
/// assert_eq!(set.first(), Some(LocalSearchOperator::Swap));
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperatorSet(u8);

impl OperatorSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All four operators.
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Adds an operator.
    pub fn insert(&mut self, op: LocalSearchOperator) {
        self.0 |= op.bit();
    }

    /// Removes an operator.
    pub fn remove(&mut self, op: LocalSearchOperator) {
        self.0 &= !op.bit();
    }

    /// Returns a copy with `op` added.
    pub fn with(mut self, op: LocalSearchOperator) -> Self {
        self.insert(op);
        self
    }

    /// Whether `op` is a member.
    pub fn contains(self, op: LocalSearchOperator) -> bool {
        self.0 & op.bit() != 0
    }

    /// Whether no operator is active.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of member operators.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// First member in descent order.
    pub fn first(self) -> Option<LocalSearchOperator> {
        self.iter().next()
    }

    /// Members in descent order.
    pub fn iter(self) -> impl Iterator<Item = LocalSearchOperator> {
        LocalSearchOperator::ALL
            .into_iter()
            .filter(move |&op| self.contains(op))
    }
}

impl FromIterator<LocalSearchOperator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = LocalSearchOperator>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Runs the descent with all four operators.
///
/// `max_passes` caps the number of operator passes; `None` runs until no
/// operator improves. Returns the final logistic ratio.
///
/// # Errors
///
/// [`IrpError::DegenerateObjective`] if the plan delivers nothing.
///
/// # Examples
///
/// ```
/// use u_irp::constructive::{construct, ConstructionConfig};
/// use u_irp::evaluation::PlanEvaluator;
/// use u_irp::local_search::local_search;
/// use u_irp::models::{Customer, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 10.01, 106.0, 100.0, 40.0).with_safety_level(20.0),
///     Customer::new(2, 10.0, 106.01, 100.0, 40.0).with_safety_level(20.0),
///     Customer::new(3, 10.01, 106.01, 100.0, 40.0).with_safety_level(20.0),
/// ];
/// let problem = Problem::new(
///     locations,
///     vec![vec![15.0; 4]; 3],
///     Vehicle::new(100.0).with_fixed_cost(10.0).with_cost_per_distance(2.0),
/// )
/// .unwrap();
///
/// let mut plan = construct(&problem, &ConstructionConfig::default()).unwrap();
/// let initial = PlanEvaluator::new(&problem).logistic_ratio(&plan).unwrap();
/// let ratio = local_search(&mut plan, &problem, None).unwrap();
/// assert!(ratio <= initial);
/// ```
pub fn local_search(
    plan: &mut Plan,
    problem: &Problem,
    max_passes: Option<usize>,
) -> Result<f64, IrpError> {
    local_search_with(plan, problem, OperatorSet::all(), max_passes)
}

/// Runs the descent over a chosen operator set.
///
/// An improvement re-activates every operator of `operators`, not all four.
pub fn local_search_with(
    plan: &mut Plan,
    problem: &Problem,
    operators: OperatorSet,
    max_passes: Option<usize>,
) -> Result<f64, IrpError> {
    let evaluator = PlanEvaluator::new(problem);
    let mut ratio = evaluator.logistic_ratio(plan)?;
    let mut active = operators;
    let mut passes = 0;

    while let Some(op) = active.first() {
        if max_passes.is_some_and(|max| passes >= max) {
            debug!("local search: pass limit {} reached", passes);
            break;
        }
        passes += 1;

        let snapshot = plan.clone();
        if !op.apply(plan, problem) {
            active.remove(op);
            continue;
        }

        let candidate = evaluator.logistic_ratio(plan)?;
        if candidate < ratio {
            debug!(
                "local search: {} improved ratio {:.6} -> {:.6}",
                op.name(),
                ratio,
                candidate
            );
            ratio = candidate;
            active = operators;
        } else {
            if candidate > ratio {
                debug!(
                    "local search: {} worsened ratio to {:.6}, rolled back",
                    op.name(),
                    candidate
                );
                *plan = snapshot;
            }
            active.remove(op);
        }
    }

    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::PeriodMatrix;
    use crate::testing::{day_line_problem, plan_from, plan_with};
    use proptest::prelude::*;

    #[test]
    fn test_operator_set() {
        let mut set = OperatorSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        set.insert(LocalSearchOperator::Transfer);
        set.insert(LocalSearchOperator::Swap);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![LocalSearchOperator::Swap, LocalSearchOperator::Transfer]
        );
        assert!(!set.contains(LocalSearchOperator::Shift));
        let all: OperatorSet = LocalSearchOperator::ALL.into_iter().collect();
        assert_eq!(all, OperatorSet::all());
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_local_search_merges_and_orders() {
        let p = day_line_problem(&[5.0, 6.0, 7.0, 8.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![3, 1], vec![4], vec![2]]], 20.0);
        let initial = PlanEvaluator::new(&p).logistic_ratio(&plan).expect("ratio");
        let ratio = local_search(&mut plan, &p, None).expect("ratio");
        assert!(ratio < initial);
        assert_eq!(plan.num_routes(), 1);
        assert!((plan.total_distance() - 16.0).abs() < 1e-10);
        assert!((PlanEvaluator::new(&p).logistic_ratio(&plan).expect("ratio") - ratio).abs() < 1e-15);
    }

    #[test]
    fn test_local_search_pass_limit() {
        let p = day_line_problem(&[5.0, 6.0, 7.0, 8.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![3, 1], vec![4], vec![2]]], 20.0);
        let before = plan.clone();
        local_search(&mut plan, &p, Some(0)).expect("ratio");
        assert_eq!(plan, before);
    }

    #[test]
    fn test_local_search_subset() {
        let p = day_line_problem(&[5.0, 6.0, 7.0], 1);
        let mut plan = plan_with(&p, &[vec![vec![1], vec![2, 3]]], 20.0);
        let only_or_opt = OperatorSet::empty().with(LocalSearchOperator::OrOpt);
        local_search_with(&mut plan, &p, only_or_opt, None).expect("ratio");
        assert_eq!(plan.num_routes(), 2);
    }

    #[test]
    fn test_local_search_degenerate() {
        let p = day_line_problem(&[5.0], 1);
        let mut plan = Plan::new(1, 1);
        assert_eq!(
            local_search(&mut plan, &p, None),
            Err(IrpError::DegenerateObjective)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_search_keeps_routes_feasible(
            x in proptest::collection::vec(-20.0f64..20.0, 6),
            q in proptest::collection::vec(0.5f64..50.0, 18),
            assign in proptest::collection::vec(0usize..3, 18),
        ) {
            let p = day_line_problem(&x, 3);
            let mut d = PeriodMatrix::zeros(6, 3);
            let mut periods = vec![vec![Vec::new(); 3]; 3];
            for t in 0..3 {
                for id in 1..=6 {
                    let k = t * 6 + id - 1;
                    if (id + t) % 3 == 0 {
                        continue;
                    }
                    // one customer per route slot keeps every initial route under 100
                    let slot = assign[k];
                    if periods[t][slot].len() < 2 {
                        periods[t][slot].push(id);
                        d.set(id, t, q[k]);
                    }
                }
                periods[t].retain(|r: &Vec<usize>| !r.is_empty());
            }
            let mut plan = plan_from(&p, d, &periods);
            let eval = PlanEvaluator::new(&p);
            let Ok(initial) = eval.logistic_ratio(&plan) else {
                return Ok(());
            };

            let ratio = local_search(&mut plan, &p, None).expect("non-degenerate");

            prop_assert!(ratio <= initial + 1e-12);
            prop_assert!(RouteEvaluator::new(&p).validate_plan(&plan).is_empty());
            prop_assert!((eval.logistic_ratio(&plan).expect("ratio") - ratio).abs() < 1e-12);
        }
    }
}
