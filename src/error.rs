//! Error taxonomy for the subtour-elimination loop.

use thiserror::Error as ThisError;

use crate::models::Tour;
use crate::solver::SolveStatus;

/// Failures surfaced by graph construction, decomposition, cut generation,
/// and the cutting-plane loop.
///
/// Only [`Error::InvalidInstance`] and [`Error::BudgetExceeded`] are
/// recoverable: the former by fixing the input, the latter by inspecting the
/// best tour carried in the error (if any). Every other variant signals a
/// broken solver contract or formulation.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The distance data does not describe a valid symmetric instance.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A vertex received the wrong number of selected edges.
    #[error(
        "degenerate solution at iteration {iteration}: vertex {vertex} has selection degree {degree}"
    )]
    DegenerateSolution {
        /// Offending vertex.
        vertex: usize,
        /// Its selection degree.
        degree: usize,
        /// Loop iteration (0 outside the loop).
        iteration: usize,
    },

    /// A cut was requested for a component with fewer than two vertices.
    #[error("cannot build a subtour cut for a component of size {size}")]
    TrivialComponent {
        /// Component size.
        size: usize,
    },

    /// The solver reported a non-optimal terminal status.
    #[error("solver returned {status:?} at iteration {iteration}")]
    SolverFailure {
        /// Status reported by the solver.
        status: SolveStatus,
        /// Loop iteration.
        iteration: usize,
    },

    /// The solver returned a selection violating a cut it had already been given.
    #[error("solver violated the cut over {vertices:?} again at iteration {iteration}")]
    RepeatedCut {
        /// Loop iteration.
        iteration: usize,
        /// Vertex set of the repeated cut.
        vertices: Vec<usize>,
    },

    /// Rounding fractional values broke the degree-2 constraint.
    #[error(
        "solver precision failure at iteration {iteration}: vertex {vertex} has degree {degree} after rounding"
    )]
    SolverPrecision {
        /// Loop iteration.
        iteration: usize,
        /// First vertex whose degree is not 2.
        vertex: usize,
        /// Its degree after rounding.
        degree: usize,
    },

    /// The iteration or time budget expired before convergence.
    #[error(
        "budget exceeded after {iterations} iterations (last component sizes: {component_sizes:?})"
    )]
    BudgetExceeded {
        /// Iterations completed.
        iterations: usize,
        /// Component sizes of the last decomposed selection.
        component_sizes: Vec<usize>,
        /// Best full tour seen, if the solver ever produced one.
        best: Option<Box<Tour>>,
    },

    /// The run was cancelled through its [`CancelToken`](crate::solver::CancelToken).
    #[error("cancelled after {iterations} iterations")]
    Cancelled {
        /// Iterations completed.
        iterations: usize,
    },

    /// Backend-level failure (bad handle, querying before a solve, internal error).
    #[error("solver error: {0}")]
    Solver(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance(message.into())
    }

    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver(message.into())
    }

    /// Returns `true` if the caller can act on this error without treating
    /// it as a defect.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInstance(_) | Self::BudgetExceeded { .. })
    }

    /// Best tour carried by a [`Error::BudgetExceeded`], if any.
    pub fn best_tour(&self) -> Option<&Tour> {
        match self {
            Self::BudgetExceeded { best, .. } => best.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        assert!(Error::invalid_instance("x").is_recoverable());
        assert!(Error::BudgetExceeded {
            iterations: 3,
            component_sizes: vec![2, 3],
            best: None,
        }
        .is_recoverable());
        assert!(!Error::TrivialComponent { size: 1 }.is_recoverable());
        assert!(!Error::Cancelled { iterations: 0 }.is_recoverable());
    }

    #[test]
    fn test_display_carries_context() {
        let e = Error::BudgetExceeded {
            iterations: 4,
            component_sizes: vec![3, 3],
            best: None,
        };
        let msg = e.to_string();
        assert!(msg.contains("4 iterations"));
        assert!(msg.contains("[3, 3]"));
        assert!(e.best_tour().is_none());
    }

    #[test]
    fn test_solver_failure_message() {
        let e = Error::SolverFailure {
            status: SolveStatus::Infeasible,
            iteration: 2,
        };
        assert_eq!(e.to_string(), "solver returned Infeasible at iteration 2");
    }

    #[test]
    fn test_repeated_cut_is_fatal() {
        let e = Error::RepeatedCut {
            iteration: 3,
            vertices: vec![0, 1],
        };
        assert!(!e.is_recoverable());
        assert!(e.to_string().contains("[0, 1]"));
        assert!(e.to_string().contains("iteration 3"));
    }
}
