//! External MILP solver boundary.
//!
//! - [`MilpSolver`] — the narrow contract the cutting-plane loop drives
//! - [`VariableHandle`], [`ConstraintHandle`] — typed handles returned at creation
//! - [`CancelToken`] — cooperative cancellation shared with the caller
//! - [`MicrolpSolver`] — pure-Rust backend (feature `microlp`, on by default)

mod cancel;
#[cfg(feature = "microlp")]
mod microlp_solver;
mod types;

pub use cancel::CancelToken;
#[cfg(feature = "microlp")]
pub use microlp_solver::MicrolpSolver;
pub use types::{
    ConstraintHandle, Direction, LinearExpr, MilpSolver, Relation, SolveStatus, VarDomain,
    VariableHandle,
};
