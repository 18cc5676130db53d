//! Domain model types for inventory routing.
//!
//! Provides customers with tanks and time windows, the homogeneous vehicle
//! type, the validated problem instance, routes, and the multi-period plan
//! that owns delivered quantities.

mod customer;
mod period_matrix;
mod plan;
mod problem;
mod route;
mod vehicle;
mod violation;

pub use customer::{Customer, TimeWindow};
pub use period_matrix::PeriodMatrix;
pub use plan::{Plan, PlanEdit, PlanUndo};
pub use problem::{InstanceData, Problem};
pub use route::Route;
pub use vehicle::Vehicle;
pub use violation::{Violation, ViolationType};
