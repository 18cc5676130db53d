//! Iterated local search configuration.

use serde::{Deserialize, Serialize};

use crate::constructive::ConstructionConfig;

/// Configuration for [`IteratedLocalSearch`](super::IteratedLocalSearch).
///
/// The caps are operational limits layered on top of the search; the
/// default leaves them off and runs until no round improves.
///
/// # Examples
///
/// ```
/// use u_irp::ils::IlsConfig;
///
/// let config = IlsConfig::default()
///     .with_max_rounds(20)
///     .with_max_local_search_passes(200);
/// assert_eq!(config.max_rounds, Some(20));
/// assert_eq!(config.construction.ratio_steps, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    /// Construction grid.
    pub construction: ConstructionConfig,
    /// Maximum number of perturbation rounds (None for no limit).
    pub max_rounds: Option<usize>,
    /// Maximum operator passes per local search (None for no limit).
    pub max_local_search_passes: Option<usize>,
}

impl IlsConfig {
    /// Sets the construction grid.
    pub fn with_construction(mut self, construction: ConstructionConfig) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the maximum number of perturbation rounds.
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = Some(n);
        self
    }

    /// Sets the maximum operator passes per local search.
    pub fn with_max_local_search_passes(mut self, n: usize) -> Self {
        self.max_local_search_passes = Some(n);
        self
    }
}
