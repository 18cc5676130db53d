//! First-fit route packing.
//!
//! Customers are taken in the order given and appended to the open route
//! while the running load stays within capacity; otherwise the open route is
//! closed and a new one starts with that customer. Packing is not distance
//! aware; route order is left to local search.

use crate::evaluation::exceeds_capacity;

/// Packs customers into capacity-limited groups in input order.
///
/// A single customer whose quantity alone exceeds `capacity` still gets its
/// own group.
///
/// # Examples
///
/// ```
/// use u_irp::constructive::first_fit_pack;
///
/// let quantities = [0.0, 60.0, 30.0, 50.0, 20.0];
/// let groups = first_fit_pack(&[1, 2, 3, 4], |id| quantities[id], 100.0);
/// assert_eq!(groups, vec![vec![1, 2], vec![3, 4]]);
/// ```
pub fn first_fit_pack<F>(customer_ids: &[usize], quantity: F, capacity: f64) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> f64,
{
    let mut groups = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut load = 0.0;

    for &cid in customer_ids {
        let q = quantity(cid);
        if !current.is_empty() && exceeds_capacity(load + q, capacity) {
            groups.push(std::mem::take(&mut current));
            load = 0.0;
        }
        current.push(cid);
        load += q;
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_empty() {
        assert!(first_fit_pack(&[], |_| 1.0, 10.0).is_empty());
    }

    #[test]
    fn test_pack_exact_fill() {
        let groups = first_fit_pack(&[1, 2, 3], |_| 50.0, 100.0);
        assert_eq!(groups, vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_pack_keeps_input_order() {
        // 3 would fit with 1 but packing never looks back
        let q = [0.0, 70.0, 40.0, 20.0];
        let groups = first_fit_pack(&[1, 2, 3], |id| q[id], 100.0);
        assert_eq!(groups, vec![vec![1], vec![2, 3]]);
    }

    #[test]
    fn test_pack_oversized_customer() {
        let q = [0.0, 150.0, 10.0];
        let groups = first_fit_pack(&[1, 2], |id| q[id], 100.0);
        assert_eq!(groups, vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_pack_zero_quantities() {
        let groups = first_fit_pack(&[1, 2, 3], |_| 0.0, 100.0);
        assert_eq!(groups, vec![vec![1, 2, 3]]);
    }
}
