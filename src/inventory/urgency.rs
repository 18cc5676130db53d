//! Look-ahead urgency check.

use crate::models::{Customer, PeriodMatrix};

/// Returns `true` if the customer's simulated level falls below its safety
/// level in some period `t'` with `t < t' <= t + look_ahead`, clipped to the
/// horizon.
///
/// Period `t` itself is not inspected; a customer already unsafe at `t` is
/// handled by the caller.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Customer, PeriodMatrix};
/// use u_irp::inventory::is_urgent;
///
/// let c = Customer::new(1, 0.0, 0.0, 100.0, 50.0).with_safety_level(20.0);
/// let levels = PeriodMatrix::from_rows(&[vec![40.0, 30.0, 10.0]]).unwrap();
/// assert!(!is_urgent(&c, &levels, 0, 1));
/// assert!(is_urgent(&c, &levels, 0, 2));
/// ```
pub fn is_urgent(customer: &Customer, levels: &PeriodMatrix, t: usize, look_ahead: usize) -> bool {
    let last = (t + look_ahead).min(levels.periods().saturating_sub(1));
    ((t + 1)..=last).any(|future| levels.get(customer.id(), future) - customer.safety_level() < 0.0)
}
