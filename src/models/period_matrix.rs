//! Per-customer, per-period quantity matrix.

/// A dense `customers × periods` matrix of quantities stored in row-major
/// order and addressed by customer id (`1..=n`) and period index.
///
/// Used for forecasted consumption, delivered quantities, and simulated
/// inventory levels.
///
/// # Examples
///
/// ```
/// use u_irp::models::PeriodMatrix;
///
/// let mut m = PeriodMatrix::zeros(2, 3);
/// m.set(2, 1, 40.0);
/// assert_eq!(m.get(2, 1), 40.0);
/// assert_eq!(m.row(2), &[0.0, 40.0, 0.0]);
/// assert_eq!(m.total(), 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMatrix {
    data: Vec<f64>,
    customers: usize,
    periods: usize,
}

impl PeriodMatrix {
    /// Creates an all-zero matrix.
    pub fn zeros(customers: usize, periods: usize) -> Self {
        Self {
            data: vec![0.0; customers * periods],
            customers,
            periods,
        }
    }

    /// Builds a matrix from rows ordered by customer id.
    ///
    /// Returns `None` if rows have differing lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let periods = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != periods) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            customers: rows.len(),
            periods,
        })
    }

    /// Value for customer `customer_id` at `period`.
    ///
    /// # Panics
    ///
    /// Panics if the id is 0 or either index is out of bounds.
    pub fn get(&self, customer_id: usize, period: usize) -> f64 {
        self.data[self.index(customer_id, period)]
    }

    /// Sets the value for customer `customer_id` at `period`.
    pub fn set(&mut self, customer_id: usize, period: usize, value: f64) {
        let idx = self.index(customer_id, period);
        self.data[idx] = value;
    }

    /// All periods of one customer.
    pub fn row(&self, customer_id: usize) -> &[f64] {
        let start = self.index(customer_id, 0);
        &self.data[start..start + self.periods]
    }

    /// Values of every customer at one period, ordered by id.
    pub fn column(&self, period: usize) -> Vec<f64> {
        (1..=self.customers).map(|id| self.get(id, period)).collect()
    }

    /// Overwrites one period with values ordered by id.
    pub(crate) fn set_column(&mut self, period: usize, values: &[f64]) {
        for (k, &v) in values.iter().enumerate() {
            self.set(k + 1, period, v);
        }
    }

    /// Sum over all cells.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Number of customers (rows).
    pub fn customers(&self) -> usize {
        self.customers
    }

    /// Number of periods (columns).
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Rows as nested vectors, ordered by customer id.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data
            .chunks(self.periods.max(1))
            .take(self.customers)
            .map(|r| r.to_vec())
            .collect()
    }

    fn index(&self, customer_id: usize, period: usize) -> usize {
        assert!(
            customer_id >= 1 && customer_id <= self.customers && period < self.periods,
            "cell ({}, {}) outside {}x{} matrix",
            customer_id,
            period,
            self.customers,
            self.periods
        );
        (customer_id - 1) * self.periods + period
    }
}
