//! Iterated local search controller.
//!
//! - [`IteratedLocalSearch`] — Construction, descent, then perturb-and-descend rounds
//! - [`IlsConfig`] — Construction grid and operational caps
//! - [`Schedule`] — Reporting view of a finished plan

mod config;
mod controller;
mod report;

pub use config::IlsConfig;
pub use controller::{IlsResult, IteratedLocalSearch, SearchState, Termination};
pub use report::{InventoryEvent, PeriodSchedule, RouteSummary, Schedule};
