//! Solve loop: lazy subtour elimination driven over a [`MilpSolver`](crate::solver::MilpSolver).
//!
//! # Algorithm
//!
//! 1. Declare one binary variable per edge, minimize total weight, and
//!    require selection degree 2 at every vertex.
//! 2. Optimize and read the integral edge selection.
//! 3. Split the selection into connected components.
//! 4. One component: accept it as the tour. Several: add one
//!    subtour-elimination cut per component and go back to 2.
//!
//! Each non-final iteration adds at least one cut the current solution
//! violates, and only finitely many distinct cuts exist, so the loop
//! terminates without an iteration cap.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R., Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *Operations Research* 2(4), 393-410.

mod config;
mod result;
mod runner;

pub use config::CuttingPlaneConfig;
pub use result::{CuttingPlaneResult, IterationStats};
pub use runner::{CuttingPlane, LoopState};
