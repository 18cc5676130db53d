//! Construction parameter grid.

use serde::{Deserialize, Serialize};

/// Configuration of the construction grid search.
///
/// # Examples
///
/// ```
/// use u_irp::constructive::ConstructionConfig;
///
/// let config = ConstructionConfig::default().with_ratio_steps(4);
/// assert_eq!(config.ratio_steps, 4);
/// assert_eq!(config.max_look_ahead, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Number of fill ratios tried: `k / ratio_steps` for
    /// `k = ratio_steps, ..., 1`.
    pub ratio_steps: usize,
    /// Upper bound on the look-ahead, on top of half the horizon.
    pub max_look_ahead: Option<usize>,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            ratio_steps: 10,
            max_look_ahead: None,
        }
    }
}

impl ConstructionConfig {
    /// Sets the number of fill ratios. Zero is treated as one.
    pub fn with_ratio_steps(mut self, steps: usize) -> Self {
        self.ratio_steps = steps;
        self
    }

    /// Caps the look-ahead.
    pub fn with_max_look_ahead(mut self, look_ahead: usize) -> Self {
        self.max_look_ahead = Some(look_ahead);
        self
    }
}

/// One construction parameter pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Fraction of the fill-to-full quantity delivered on look-ahead urgency,
    /// in `(0, 1]`.
    pub ratio_demand: f64,
    /// Periods scanned ahead for an impending safety breach.
    pub look_ahead: usize,
}

/// Enumerates the grid in scan order: fill ratio descending from `1.0`,
/// then look-ahead ascending from `1`.
///
/// Ratios are computed from integer steps, so `0.0` is never produced and no
/// floating-point drift accumulates. Look-ahead runs to `max(1, duration / 2)`.
///
/// # Examples
///
/// ```
/// use u_irp::constructive::{parameter_grid, ConstructionConfig};
///
/// let grid = parameter_grid(6, &ConstructionConfig::default());
/// assert_eq!(grid.len(), 30);
/// assert_eq!(grid[0].ratio_demand, 1.0);
/// assert_eq!(grid[0].look_ahead, 1);
/// assert_eq!(grid[2].look_ahead, 3);
/// assert!((grid[29].ratio_demand - 0.1).abs() < 1e-12);
/// ```
pub fn parameter_grid(duration: usize, config: &ConstructionConfig) -> Vec<GridPoint> {
    let steps = config.ratio_steps.max(1);
    let mut max_look_ahead = (duration / 2).max(1);
    if let Some(cap) = config.max_look_ahead {
        max_look_ahead = max_look_ahead.min(cap.max(1));
    }

    (1..=steps)
        .rev()
        .flat_map(|k| {
            let ratio_demand = k as f64 / steps as f64;
            (1..=max_look_ahead).map(move |look_ahead| GridPoint {
                ratio_demand,
                look_ahead,
            })
        })
        .collect()
}
