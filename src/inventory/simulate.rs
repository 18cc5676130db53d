//! Forward inventory simulation.
//!
//! # Recurrence
//!
//! For customer `i` with `scale_i = 100 / capacity_i`:
//!
//! ```text
//! v[i][-1] = init_quantity_i
//! v[i][t]  = v[i][t-1] - scale_i * (consumption[i][t] - delivered[i][t])
//! level[i][t] = round(v[i][t])
//! ```
//!
//! The running value is kept unrounded, so each stored level equals the
//! rounded closed-form sum from `init_quantity`.

use crate::models::{Customer, PeriodMatrix};

/// Simulates inventory percentages for every customer and period.
///
/// `customers` are the routable customers ordered by id; the result is
/// addressed like the input matrices.
///
/// # Panics
///
/// Panics if the matrix shapes don't match the customer count or each other.
///
/// # Examples
///
/// ```
/// use u_irp::models::{Customer, PeriodMatrix};
/// use u_irp::inventory::simulate;
///
/// let customers = vec![Customer::new(1, 0.0, 0.0, 200.0, 50.0)];
/// let forecast = PeriodMatrix::from_rows(&[vec![20.0, 20.0, 20.0]]).unwrap();
/// let mut delivered = PeriodMatrix::zeros(1, 3);
/// delivered.set(1, 1, 100.0);
///
/// let levels = simulate(&customers, &forecast, &delivered);
/// assert_eq!(levels.row(1), &[40.0, 80.0, 70.0]);
/// ```
pub fn simulate(
    customers: &[Customer],
    forecast: &PeriodMatrix,
    delivered: &PeriodMatrix,
) -> PeriodMatrix {
    assert_eq!(
        customers.len(),
        forecast.customers(),
        "forecast rows must match customers"
    );
    assert_eq!(
        (forecast.customers(), forecast.periods()),
        (delivered.customers(), delivered.periods()),
        "forecast and delivered matrices must have the same shape"
    );

    let mut levels = PeriodMatrix::zeros(forecast.customers(), forecast.periods());
    for customer in customers {
        let id = customer.id();
        let scale = customer.scale();
        let mut current = customer.init_quantity();
        for t in 0..forecast.periods() {
            current -= scale * (forecast.get(id, t) - delivered.get(id, t));
            levels.set(id, t, current.round());
        }
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pure_consumption_decay() {
        let customers = vec![
            Customer::new(1, 0.0, 0.0, 100.0, 50.0),
            Customer::new(2, 0.0, 0.0, 100.0, 80.0),
        ];
        let forecast =
            PeriodMatrix::from_rows(&[vec![30.0, 30.0, 30.0], vec![10.0, 10.0, 10.0]])
                .expect("rect");
        let levels = simulate(&customers, &forecast, &PeriodMatrix::zeros(2, 3));
        assert_eq!(levels.row(1), &[20.0, -10.0, -40.0]);
        assert_eq!(levels.row(2), &[70.0, 60.0, 50.0]);
    }

    #[test]
    fn test_rounding_keeps_unrounded_running_value() {
        // 0.4 points per period: rounding each step would stay at 100 forever.
        let customers = vec![Customer::new(1, 0.0, 0.0, 1000.0, 100.0)];
        let forecast = PeriodMatrix::from_rows(&[vec![4.0; 5]]).expect("rect");
        let levels = simulate(&customers, &forecast, &PeriodMatrix::zeros(1, 5));
        assert_eq!(levels.row(1), &[100.0, 99.0, 99.0, 98.0, 98.0]);
    }

    #[test]
    #[should_panic]
    fn test_shape_mismatch_panics() {
        let customers = vec![Customer::new(1, 0.0, 0.0, 100.0, 50.0)];
        let forecast = PeriodMatrix::zeros(1, 3);
        let _ = simulate(&customers, &forecast, &PeriodMatrix::zeros(1, 2));
    }

    proptest! {
        #[test]
        fn prop_matches_closed_form(
            capacity in 10.0f64..10_000.0,
            init in 0.0f64..=100.0,
            cells in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 1..12),
        ) {
            let periods = cells.len();
            let customers = vec![Customer::new(1, 0.0, 0.0, capacity, init)];
            let forecast = PeriodMatrix::from_rows(&[cells.iter().map(|c| c.0).collect()])
                .expect("rect");
            let delivered = PeriodMatrix::from_rows(&[cells.iter().map(|c| c.1).collect()])
                .expect("rect");
            let levels = simulate(&customers, &forecast, &delivered);

            let scale = 100.0 / capacity;
            let mut net = 0.0;
            for t in 0..periods {
                net += cells[t].0 - cells[t].1;
                let closed = (init - scale * net).round();
                prop_assert!((levels.get(1, t) - closed).abs() <= 1.0);
            }
        }

        #[test]
        fn prop_zero_delivery_is_monotone_decay(
            init in 0.0f64..=100.0,
            usage in prop::collection::vec(0.0f64..50.0, 1..10),
        ) {
            let customers = vec![Customer::new(1, 0.0, 0.0, 100.0, init)];
            let forecast = PeriodMatrix::from_rows(&[usage.clone()]).expect("rect");
            let levels = simulate(&customers, &forecast, &PeriodMatrix::zeros(1, usage.len()));
            let mut prev = init.round();
            for t in 0..usage.len() {
                prop_assert!(levels.get(1, t) <= prev);
                prev = levels.get(1, t);
            }
        }
    }
}
