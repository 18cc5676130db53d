//! Construction heuristic for the initial multi-period plan.
//!
//! - [`construct`] — Grid search over fill ratio × look-ahead, keeps the lowest logistic ratio
//! - [`build_plan`] — Period-by-period delivery decisions for one grid point
//! - [`first_fit_pack`] — Greedy first-fit packing in input order, O(n)
//! - [`parameter_grid`] — Finite enumeration of the grid points

mod grid;
mod packing;
mod periodic;

pub use grid::{parameter_grid, ConstructionConfig, GridPoint};
pub use packing::first_fit_pack;
pub use periodic::{build_plan, construct};
