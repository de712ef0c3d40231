//! Cutting-plane loop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for [`CuttingPlane`](super::CuttingPlane).
///
/// The loop terminates on its own; both budgets are optional operational
/// caps. With no cap set the loop runs until the solver returns a single
/// tour.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_subtour::cutting_plane::CuttingPlaneConfig;
///
/// let config = CuttingPlaneConfig::default()
///     .with_max_iterations(50)
///     .with_time_limit(Duration::from_secs(10));
/// assert_eq!(config.max_iterations, Some(50));
/// assert_eq!(config.integrality_tolerance, 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingPlaneConfig {
    /// Maximum number of solver calls.
    pub max_iterations: Option<usize>,
    /// Wall-clock budget, checked before each solver call.
    pub time_limit: Option<Duration>,
    /// Largest distance from 0 or 1 accepted without a rounding warning.
    pub integrality_tolerance: f64,
}

impl Default for CuttingPlaneConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            time_limit: None,
            integrality_tolerance: 1e-6,
        }
    }
}

impl CuttingPlaneConfig {
    /// Caps the number of solver calls.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Caps the total wall-clock time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.integrality_tolerance = tol;
        self
    }
}
