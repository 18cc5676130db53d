//! Multi-period delivery plan and transactional edits.

use super::{PeriodMatrix, Route};

/// A delivery plan: the routes of every period plus the delivered-quantity
/// matrix they draw their loads from.
///
/// The plan is the only owner of delivered quantities. All mutation goes
/// through [`Plan::apply`], which writes matrix cells and route replacements
/// as one step and hands back a [`PlanUndo`] for rollback.
///
/// # Examples
///
/// ```
/// use u_irp::models::Plan;
///
/// let plan = Plan::new(3, 4);
/// assert_eq!(plan.duration(), 4);
/// assert_eq!(plan.num_routes(), 0);
/// assert_eq!(plan.total_delivered(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    periods: Vec<Vec<Route>>,
    delivered: PeriodMatrix,
}

impl Plan {
    /// Creates an empty plan for `customers` customers over `duration` periods.
    pub fn new(customers: usize, duration: usize) -> Self {
        Self {
            periods: vec![Vec::new(); duration],
            delivered: PeriodMatrix::zeros(customers, duration),
        }
    }

    /// Assembles a plan from per-period routes and the matching delivered
    /// quantities.
    ///
    /// # Panics
    ///
    /// Panics if the number of periods differs between the two parts.
    pub fn from_parts(periods: Vec<Vec<Route>>, delivered: PeriodMatrix) -> Self {
        assert_eq!(
            periods.len(),
            delivered.periods(),
            "route periods and delivered matrix disagree on the horizon"
        );
        Self { periods, delivered }
    }

    /// Number of periods.
    pub fn duration(&self) -> usize {
        self.periods.len()
    }

    /// Routes of every period.
    pub fn periods(&self) -> &[Vec<Route>] {
        &self.periods
    }

    /// Routes active in one period.
    pub fn routes(&self, period: usize) -> &[Route] {
        &self.periods[period]
    }

    /// Delivered quantities per customer and period.
    pub fn delivered(&self) -> &PeriodMatrix {
        &self.delivered
    }

    /// Number of routes across all periods.
    pub fn num_routes(&self) -> usize {
        self.periods.iter().map(|p| p.len()).sum()
    }

    /// Sum of all delivered quantities.
    pub fn total_delivered(&self) -> f64 {
        self.delivered.total()
    }

    /// Sum of all route distances.
    pub fn total_distance(&self) -> f64 {
        self.periods
            .iter()
            .flatten()
            .map(|r| r.total_distance())
            .sum()
    }

    /// Index of the route serving `customer_id` in `period`, if any.
    pub fn served_in(&self, period: usize, customer_id: usize) -> Option<usize> {
        self.periods[period]
            .iter()
            .position(|r| r.contains(customer_id))
    }

    /// Applies an edit: delivered cells first, then route replacements, then
    /// removal of routes left empty in the touched periods.
    ///
    /// Returns the inverse of the edit.
    pub fn apply(&mut self, edit: &PlanEdit) -> PlanUndo {
        let touched = edit.touched_periods();
        let undo = PlanUndo {
            periods: touched
                .iter()
                .map(|&t| (t, self.periods[t].clone()))
                .collect(),
            quantities: edit
                .quantities
                .iter()
                .map(|&(c, t, _)| (c, t, self.delivered.get(c, t)))
                .collect(),
        };

        for &(customer, period, quantity) in &edit.quantities {
            self.delivered.set(customer, period, quantity);
        }
        for (period, index, route) in &edit.routes {
            self.periods[*period][*index] = route.clone();
        }
        for &t in &touched {
            self.periods[t].retain(|r| !r.is_empty());
        }
        undo
    }

    /// Reverts a previously applied edit.
    ///
    /// Edits must be undone in reverse order of application.
    pub fn undo(&mut self, undo: PlanUndo) {
        for &(customer, period, quantity) in undo.quantities.iter().rev() {
            self.delivered.set(customer, period, quantity);
        }
        for (period, routes) in undo.periods {
            self.periods[period] = routes;
        }
    }
}

/// A set of route replacements and delivered-quantity writes applied to a
/// [`Plan`] as one unit.
///
/// Route indices refer to the plan before the edit. Replacing a route with an
/// empty one removes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanEdit {
    routes: Vec<(usize, usize, Route)>,
    quantities: Vec<(usize, usize, f64)>,
}

impl PlanEdit {
    /// Creates an empty edit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces route `index` of `period` with `route`.
    pub fn replace_route(mut self, period: usize, index: usize, route: Route) -> Self {
        self.routes.push((period, index, route));
        self
    }

    /// Sets the delivered quantity of a customer in a period.
    pub fn set_quantity(mut self, customer_id: usize, period: usize, quantity: f64) -> Self {
        self.quantities.push((customer_id, period, quantity));
        self
    }

    /// Change in total route distance if applied to `plan`.
    pub fn distance_delta(&self, plan: &Plan) -> f64 {
        self.routes
            .iter()
            .map(|(t, i, r)| r.total_distance() - plan.routes(*t)[*i].total_distance())
            .sum()
    }

    /// New routes carried by this edit.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|(_, _, r)| r)
    }

    fn touched_periods(&self) -> Vec<usize> {
        let mut periods: Vec<usize> = self.routes.iter().map(|(t, _, _)| *t).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }
}

/// Recorded inverse of an applied [`PlanEdit`].
#[derive(Debug, Clone)]
pub struct PlanUndo {
    periods: Vec<(usize, Vec<Route>)>,
    quantities: Vec<(usize, usize, f64)>,
}
