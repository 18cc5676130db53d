//! # u-irp
//!
//! Multi-period inventory routing: decides which customers to replenish in
//! each period, how much to deliver, and in which order to visit them, so
//! that the logistic ratio (total transport cost per unit delivered) is as
//! low as possible while tanks stay above their safety levels.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Vehicle, Route, Plan, Problem)
//! - [`distance`] — Great-circle distances and the distance matrix
//! - [`inventory`] — Inventory simulation and urgency detection
//! - [`evaluation`] — Route feasibility and logistic-ratio evaluation
//! - [`constructive`] — Periodic construction over a parameter grid
//! - [`local_search`] — Or-opt, swap, shift, transfer and the VND driver
//! - [`perturbation`] — Ratio-driven shift, insertion and split moves
//! - [`ils`] — Iterated local search controller and schedule report
//!
//! ## Example
//!
//! ```
//! use u_irp::ils::{IlsConfig, IteratedLocalSearch};
//! use u_irp::models::{Customer, Problem, TimeWindow, Vehicle};
//!
//! let locations = vec![
//!     Customer::depot(10.77, 106.70),
//!     Customer::new(1, 10.80, 106.65, 200.0, 40.0).with_safety_level(20.0),
//!     Customer::new(2, 10.75, 106.75, 150.0, 60.0)
//!         .with_safety_level(25.0)
//!         .with_time_window(TimeWindow::Night),
//! ];
//! let forecast = vec![vec![30.0; 5], vec![25.0; 5]];
//! let vehicle = Vehicle::new(180.0)
//!     .with_fixed_cost(50.0)
//!     .with_cost_per_distance(2.0);
//! let problem = Problem::new(locations, forecast, vehicle).unwrap();
//!
//! let result = IteratedLocalSearch::new(&problem, IlsConfig::default())
//!     .run()
//!     .unwrap();
//! assert!(result.objective.logistic_ratio > 0.0);
//! assert_eq!(result.plan.duration(), 5);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ils;
pub mod inventory;
pub mod local_search;
pub mod models;
pub mod perturbation;

#[cfg(test)]
mod testing;

pub use error::{InstanceError, IrpError};
