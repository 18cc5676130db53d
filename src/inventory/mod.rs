//! Inventory simulation over the planning horizon.
//!
//! - [`simulate`] — Forward simulation of tank levels from consumption and deliveries
//! - [`is_urgent`] — Look-ahead check for an upcoming safety-level breach

mod simulate;
mod urgency;

pub use simulate::simulate;
pub use urgency::is_urgent;
