//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order, indexed by
/// location id (0 = depot).
///
/// # Examples
///
/// ```
/// use u_irp::models::Customer;
/// use u_irp::distance::DistanceMatrix;
///
/// let locations = vec![
///     Customer::depot(10.0, 106.0),
///     Customer::new(1, 11.0, 106.0, 100.0, 50.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&locations);
/// assert_eq!(dm.size(), 2);
/// assert!((dm.get(0, 1) - 111.19).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes great-circle distances between all location pairs.
    ///
    /// `locations[k]` must be the location with id `k`.
    pub fn from_customers(locations: &[Customer]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid (e.g. road
    /// distances supplied by the caller).
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
