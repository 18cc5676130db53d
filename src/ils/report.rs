//! Reporting view of a finished plan.
//!
//! A [`Schedule`] flattens a plan into serializable rows for an external
//! reporting layer: routes per period, the delivered and inventory matrices,
//! the cost breakdown, and the periods where a customer's level falls under
//! its thresholds.

use serde::{Deserialize, Serialize};

use crate::error::IrpError;
use crate::evaluation::{Objective, PlanEvaluator};
use crate::inventory::simulate;
use crate::models::{Plan, Problem, TimeWindow};

/// One route of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Window shared by every customer on the route.
    pub time_window: TimeWindow,
    /// Visit order, depot excluded.
    pub customers: Vec<usize>,
    /// Total quantity delivered on the route.
    pub quantity: f64,
    /// Depot-to-depot tour length in kilometers.
    pub distance: f64,
    /// Vehicle trips charged for the route.
    pub trips: f64,
}

/// Routes dispatched in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSchedule {
    /// Period index.
    pub period: usize,
    /// Routes in dispatch order.
    pub routes: Vec<RouteSummary>,
}

/// A customer's simulated level in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryEvent {
    /// Customer whose level crossed a threshold.
    pub customer_id: usize,
    /// Period of the simulated level.
    pub period: usize,
    /// Inventory level in percent.
    pub level: f64,
}

/// Serializable output of a search.
///
/// Matrices are `[customer][period]` with row `k` holding customer `k + 1`.
///
/// # Examples
///
/// ```
/// use u_irp::ils::{IlsConfig, IteratedLocalSearch};
/// use u_irp::models::{Customer, Problem, Vehicle};
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 10.01, 106.0, 100.0, 45.0)
///         .with_safety_level(20.0)
///         .with_near_safety_level(30.0),
/// ];
/// let problem = Problem::new(
///     locations,
///     vec![vec![20.0; 4]],
///     Vehicle::new(100.0).with_fixed_cost(10.0).with_cost_per_distance(1.0),
/// )
/// .unwrap();
///
/// let result = IteratedLocalSearch::new(&problem, IlsConfig::default()).run().unwrap();
/// let schedule = result.schedule(&problem);
/// assert_eq!(schedule.periods.len(), 4);
/// assert_eq!(schedule.num_routes(), result.plan.num_routes());
/// let json = serde_json::to_string(&schedule).unwrap();
/// assert!(json.contains("logistic_ratio"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Routes of every period.
    pub periods: Vec<PeriodSchedule>,
    /// Delivered quantities.
    pub delivered: Vec<Vec<f64>>,
    /// Simulated inventory levels in percent.
    pub inventory_levels: Vec<Vec<f64>>,
    /// Cost breakdown of the plan.
    pub objective: Objective,
    /// Level below zero.
    pub stockouts: Vec<InventoryEvent>,
    /// Level in `[0, safety)`.
    pub below_safety: Vec<InventoryEvent>,
    /// Level in `[safety, near_safety)`.
    pub near_safety: Vec<InventoryEvent>,
}

impl Schedule {
    /// Evaluates and flattens a plan.
    pub fn new(problem: &Problem, plan: &Plan) -> Result<Self, IrpError> {
        let objective = PlanEvaluator::new(problem).evaluate(plan)?;
        Ok(Self::with_objective(problem, plan, objective))
    }

    /// Flattens a plan whose objective is already known.
    pub(crate) fn with_objective(problem: &Problem, plan: &Plan, objective: Objective) -> Self {
        let evaluator = PlanEvaluator::new(problem);
        let periods = plan
            .periods()
            .iter()
            .enumerate()
            .map(|(period, routes)| PeriodSchedule {
                period,
                routes: routes
                    .iter()
                    .map(|r| RouteSummary {
                        time_window: r.time_window(),
                        customers: r.customer_ids().to_vec(),
                        quantity: r.total_quantity(),
                        distance: r.total_distance(),
                        trips: evaluator.trips(r),
                    })
                    .collect(),
            })
            .collect();

        let levels = simulate(problem.customers(), problem.forecast(), plan.delivered());
        let mut stockouts = Vec::new();
        let mut below_safety = Vec::new();
        let mut near_safety = Vec::new();
        for customer in problem.customers() {
            for (period, &level) in levels.row(customer.id()).iter().enumerate() {
                let event = InventoryEvent {
                    customer_id: customer.id(),
                    period,
                    level,
                };
                if level < 0.0 {
                    stockouts.push(event);
                } else if level < customer.safety_level() {
                    below_safety.push(event);
                } else if level < customer.near_safety_level() {
                    near_safety.push(event);
                }
            }
        }

        Self {
            periods,
            delivered: plan.delivered().to_rows(),
            inventory_levels: levels.to_rows(),
            objective,
            stockouts,
            below_safety,
            near_safety,
        }
    }

    /// Number of routes over all periods.
    pub fn num_routes(&self) -> usize {
        self.periods.iter().map(|p| p.routes.len()).sum()
    }
}
