//! Outcome of a converged cutting-plane run.

use std::time::Duration;

use crate::models::{Cut, Tour};
use crate::solver::ConstraintHandle;

/// What happened in one solver call.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Objective reported by the solver.
    pub objective: f64,
    /// Sizes of the components found, in order of smallest vertex.
    pub component_sizes: Vec<usize>,
    /// Cuts added after this iteration (0 on the final one).
    pub cuts_added: usize,
}

/// A converged run: the optimal tour and how it was reached.
#[derive(Debug, Clone)]
pub struct CuttingPlaneResult {
    /// The accepted Hamiltonian cycle.
    pub tour: Tour,
    /// Objective value reported by the solver for the final solve.
    pub objective: f64,
    /// Number of solver calls.
    pub iterations: usize,
    /// Every cut added during the run, in insertion order.
    pub cuts: Vec<Cut>,
    /// Solver rows holding `cuts`, index for index.
    pub cut_rows: Vec<ConstraintHandle>,
    /// Solver rows holding the degree-2 constraints, one per vertex.
    pub degree_rows: Vec<ConstraintHandle>,
    /// Per-iteration statistics.
    pub history: Vec<IterationStats>,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
}

impl CuttingPlaneResult {
    /// Number of components seen at each iteration.
    pub fn component_counts(&self) -> Vec<usize> {
        self.history
            .iter()
            .map(|s| s.component_sizes.len())
            .collect()
    }

    /// Returns `true` if the component count never increased between
    /// consecutive iterations.
    pub fn converged_monotonically(&self) -> bool {
        self.component_counts().windows(2).all(|w| w[1] <= w[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::graph::Graph;
    use crate::models::Selection;

    fn triangle_tour() -> Tour {
        let g = Graph::build(&DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]))
            .expect("valid");
        let sel = Selection::from_pairs(&g, &[(0, 1), (1, 2), (2, 0)]).expect("valid");
        Tour::from_selection(&g, &sel).expect("tour")
    }

    fn stats(iteration: usize, sizes: Vec<usize>) -> IterationStats {
        IterationStats {
            iteration,
            objective: 0.0,
            cuts_added: if sizes.len() > 1 { sizes.len() } else { 0 },
            component_sizes: sizes,
        }
    }

    #[test]
    fn test_component_counts() {
        let result = CuttingPlaneResult {
            tour: triangle_tour(),
            objective: 0.0,
            iterations: 3,
            cuts: Vec::new(),
            cut_rows: Vec::new(),
            degree_rows: Vec::new(),
            history: vec![stats(1, vec![3, 3]), stats(2, vec![2, 4]), stats(3, vec![6])],
            elapsed: Duration::ZERO,
        };
        assert_eq!(result.component_counts(), vec![2, 2, 1]);
        assert!(result.converged_monotonically());
    }

    #[test]
    fn test_non_monotonic_detected() {
        let result = CuttingPlaneResult {
            tour: triangle_tour(),
            objective: 0.0,
            iterations: 3,
            cuts: Vec::new(),
            cut_rows: Vec::new(),
            degree_rows: Vec::new(),
            history: vec![stats(1, vec![3, 3]), stats(2, vec![2, 2, 2]), stats(3, vec![6])],
            elapsed: Duration::ZERO,
        };
        assert!(!result.converged_monotonically());
    }
}
