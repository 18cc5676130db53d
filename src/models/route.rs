//! Route type.

use super::TimeWindow;

/// An ordered sequence of customers served by one vehicle trip in one period
/// and one time window.
///
/// A route starts and ends at the depot (not stored). Distance and quantity
/// are cached by the [`RouteEvaluator`](crate::evaluation::RouteEvaluator)
/// that builds the route, so a route never outlives the quantities it was
/// built from.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Route, TimeWindow};
///
/// let route = Route::new(2, TimeWindow::Night);
/// assert!(route.is_empty());
/// assert_eq!(route.period(), 2);
/// assert_eq!(route.time_window(), TimeWindow::Night);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    period: usize,
    time_window: TimeWindow,
    customers: Vec<usize>,
    total_distance: f64,
    total_quantity: f64,
}

impl Route {
    /// Creates an empty route.
    pub fn new(period: usize, time_window: TimeWindow) -> Self {
        Self {
            period,
            time_window,
            customers: Vec::new(),
            total_distance: 0.0,
            total_quantity: 0.0,
        }
    }

    /// Appends a customer to the end of this route.
    pub(crate) fn push_customer(&mut self, customer_id: usize) {
        self.customers.push(customer_id);
    }

    /// Period this route runs in.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Time window shared by every customer of the route.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Customer ids in visit order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this route has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Returns `true` if the route visits the customer.
    pub fn contains(&self, customer_id: usize) -> bool {
        self.customers.contains(&customer_id)
    }

    /// Depot-to-depot distance.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Quantity delivered on this trip.
    pub fn total_quantity(&self) -> f64 {
        self.total_quantity
    }

    pub(crate) fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    pub(crate) fn set_total_quantity(&mut self, q: f64) {
        self.total_quantity = q;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0, TimeWindow::Day);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.total_quantity(), 0.0);
    }

    #[test]
    fn test_route_push_customer() {
        let mut r = Route::new(1, TimeWindow::Day);
        r.push_customer(5);
        r.push_customer(3);
        r.set_total_quantity(35.0);
        assert_eq!(r.len(), 2);
        assert_eq!(r.customer_ids(), &[5, 3]);
        assert!(r.contains(3));
        assert!(!r.contains(4));
        assert_eq!(r.total_quantity(), 35.0);
    }
}
