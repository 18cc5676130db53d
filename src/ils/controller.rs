//! Iterated local search state machine.
//!
//! ```text
//! Construct → LocalOptimum → Perturbed ─┬→ LocalOptimum (round improved)
//!                                       └→ Terminated   (stuck or round cap)
//! ```
//!
//! Each round perturbs a copy of the best plan with shift, insertion and
//! split in sequence, descends to a local optimum, and replaces the best
//! plan only if the logistic ratio strictly drops. There is no randomness:
//! the same problem and configuration always yield the same plan.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::config::IlsConfig;
use super::report::Schedule;
use crate::constructive::construct;
use crate::error::IrpError;
use crate::evaluation::{Objective, PlanEvaluator};
use crate::local_search::local_search;
use crate::models::{Plan, Problem};
use crate::perturbation::{perturb_insertion, perturb_shift, perturb_split};

/// Minimum ratio drop for a round to be accepted.
const ACCEPT_EPS: f64 = 1e-10;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Building the initial plan.
    Construct,
    /// The best plan is a local optimum of every local search operator.
    LocalOptimum,
    /// A perturbed copy of the best plan is being improved.
    Perturbed,
    /// The search has finished.
    Terminated,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// A full round failed to lower the ratio.
    Stuck,
    /// The configured round cap was reached.
    RoundLimit,
}

/// Outcome of a search run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    /// Best plan found.
    pub plan: Plan,
    /// Cost breakdown of the best plan.
    pub objective: Objective,
    /// Perturbation rounds executed, including the final rejected one.
    pub rounds: usize,
    /// Best ratio after construction, after the first descent, and after
    /// every accepted round.
    pub history: Vec<f64>,
    /// Why the search stopped.
    pub termination: Termination,
}

impl IlsResult {
    /// Reporting view of the best plan.
    pub fn schedule(&self, problem: &Problem) -> Schedule {
        Schedule::with_objective(problem, &self.plan, self.objective.clone())
    }
}

/// Deterministic iterated local search for one problem.
///
/// # Examples
///
/// ```
/// use u_irp::ils::{IlsConfig, IteratedLocalSearch, SearchState};
/// use u_irp::models::{Customer, Problem, TimeWindow, Vehicle};
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 10.02, 106.0, 100.0, 50.0).with_safety_level(20.0),
///     Customer::new(2, 10.0, 106.02, 100.0, 80.0)
///         .with_safety_level(20.0)
///         .with_time_window(TimeWindow::Night),
/// ];
/// let problem = Problem::new(
///     locations,
///     vec![vec![30.0; 3], vec![10.0; 3]],
///     Vehicle::new(100.0).with_fixed_cost(10.0).with_cost_per_distance(1.0),
/// )
/// .unwrap();
///
/// let mut ils = IteratedLocalSearch::new(&problem, IlsConfig::default());
/// let result = ils.run().unwrap();
/// assert_eq!(ils.state(), SearchState::Terminated);
/// assert!(result.objective.logistic_ratio > 0.0);
/// assert!(result.objective.logistic_ratio.is_finite());
/// ```
pub struct IteratedLocalSearch<'a> {
    problem: &'a Problem,
    config: IlsConfig,
    state: SearchState,
}

impl<'a> IteratedLocalSearch<'a> {
    /// Creates a controller in the [`SearchState::Construct`] state.
    pub fn new(problem: &'a Problem, config: IlsConfig) -> Self {
        Self {
            problem,
            config,
            state: SearchState::Construct,
        }
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The configuration in use.
    pub fn config(&self) -> &IlsConfig {
        &self.config
    }

    /// Runs the search to termination.
    ///
    /// # Errors
    ///
    /// [`IrpError::DegenerateObjective`] if no construction grid point
    /// delivers anything.
    pub fn run(&mut self) -> Result<IlsResult, IrpError> {
        let problem = self.problem;
        let evaluator = PlanEvaluator::new(problem);
        let passes = self.config.max_local_search_passes;
        self.state = SearchState::Construct;

        info!(
            "ils: start, {} customers over {} periods",
            problem.num_customers(),
            problem.duration()
        );

        let mut best = construct(problem, &self.config.construction)?;
        let initial = evaluator.logistic_ratio(&best)?;
        let mut history = vec![initial];
        info!(
            "ils: constructed {} routes, ratio {:.6}",
            best.num_routes(),
            initial
        );

        let mut best_ratio = local_search(&mut best, problem, passes)?;
        history.push(best_ratio);
        self.transition(SearchState::LocalOptimum);

        let mut rounds = 0;
        let termination = loop {
            if self.config.max_rounds.is_some_and(|max| rounds >= max) {
                break Termination::RoundLimit;
            }
            rounds += 1;

            let mut candidate = best.clone();
            self.transition(SearchState::Perturbed);
            let shifted = perturb_shift(&mut candidate, problem)?;
            let inserted = perturb_insertion(&mut candidate, problem)?;
            let split = perturb_split(&mut candidate, problem)?;
            debug!(
                "ils: round {} perturbations shift={} insertion={} split={}",
                rounds, shifted, inserted, split
            );

            let ratio = local_search(&mut candidate, problem, passes)?;
            if ratio < best_ratio - ACCEPT_EPS {
                info!(
                    "ils: round {} improved ratio {:.6} -> {:.6}",
                    rounds, best_ratio, ratio
                );
                best = candidate;
                best_ratio = ratio;
                history.push(ratio);
                self.transition(SearchState::LocalOptimum);
            } else {
                break Termination::Stuck;
            }
        };
        self.transition(SearchState::Terminated);

        let objective = evaluator.evaluate(&best)?;
        info!(
            "ils: finished after {} rounds ({:?}), ratio {:.6}, {} routes",
            rounds,
            termination,
            objective.logistic_ratio,
            best.num_routes()
        );

        Ok(IlsResult {
            plan: best,
            objective,
            rounds,
            history,
            termination,
        })
    }

    fn transition(&mut self, next: SearchState) {
        debug!("ils: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
