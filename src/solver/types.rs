//! Solver contract: handles, expressions, statuses, and the [`MilpSolver`] trait.

use serde::{Deserialize, Serialize};

use super::CancelToken;
use crate::error::Result;

/// Typed reference to a variable, returned by [`MilpSolver::create_variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableHandle(usize);

impl VariableHandle {
    /// Wraps a backend-specific variable index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Backend-specific variable index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Typed reference to a constraint, returned by [`MilpSolver::add_constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintHandle(usize);

impl ConstraintHandle {
    /// Wraps a backend-specific constraint index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Backend-specific constraint index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    /// 0/1 variable.
    Binary,
    /// Real variable with inclusive bounds.
    Continuous {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// Relation between a linear expression and its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr <= bound`
    Le,
    /// `expr >= bound`
    Ge,
    /// `expr == bound`
    Eq,
}

impl Relation {
    /// Returns `true` if `lhs` satisfies the relation against `bound`
    /// within `tol`.
    pub fn holds(&self, lhs: f64, bound: f64, tol: f64) -> bool {
        match self {
            Relation::Le => lhs <= bound + tol,
            Relation::Ge => lhs >= bound - tol,
            Relation::Eq => (lhs - bound).abs() <= tol,
        }
    }
}

/// Terminal status of one [`MilpSolver::optimize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A proven optimal solution is available.
    Optimal,
    /// The constraints cannot be satisfied.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The solver's own time limit expired.
    TimeLimit,
    /// The solver observed the cancel token.
    Cancelled,
}

/// A sum of `coefficient * variable` terms.
///
/// # Examples
///
/// ```
/// use u_subtour::solver::{LinearExpr, VariableHandle};
///
/// let x = VariableHandle::new(0);
/// let y = VariableHandle::new(1);
/// let mut expr: LinearExpr = [(x, 1.0), (y, 2.0)].into_iter().collect();
/// expr.add(x, 0.5);
/// assert_eq!(expr.terms(), &[(x, 1.5), (y, 2.0)]);
/// assert_eq!(expr.evaluate(|v| if v == x { 2.0 } else { 1.0 }), 5.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VariableHandle, f64)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coeff * var`, merging with an existing term for `var`.
    pub fn add(&mut self, var: VariableHandle, coeff: f64) {
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, c)) => *c += coeff,
            None => self.terms.push((var, coeff)),
        }
    }

    /// Terms in insertion order, one per variable.
    pub fn terms(&self) -> &[(VariableHandle, f64)] {
        &self.terms
    }

    /// Number of distinct variables.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression with the given variable values.
    pub fn evaluate(&self, mut value: impl FnMut(VariableHandle) -> f64) -> f64 {
        self.terms.iter().map(|&(v, c)| c * value(v)).sum()
    }
}

impl FromIterator<(VariableHandle, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VariableHandle, f64)>>(iter: I) -> Self {
        let mut expr = Self::new();
        for (var, coeff) in iter {
            expr.add(var, coeff);
        }
        expr
    }
}

/// The external MILP solver the cutting-plane loop drives.
///
/// Variables and constraints persist across repeated [`optimize`](Self::optimize)
/// calls; the loop only ever adds constraints. Values are queried through the
/// handles returned at creation time.
pub trait MilpSolver {
    /// Declares a variable with the given objective coefficient.
    fn create_variable(&mut self, domain: VarDomain, objective: f64) -> VariableHandle;

    /// Replaces the objective: coefficients not listed become 0.
    fn set_objective(&mut self, coefficients: &[(VariableHandle, f64)], direction: Direction);

    /// Adds `expr (relation) bound`.
    ///
    /// # Errors
    ///
    /// Backends may reject expressions that reference unknown variables.
    fn add_constraint(
        &mut self,
        expr: &LinearExpr,
        relation: Relation,
        bound: f64,
    ) -> Result<ConstraintHandle>;

    /// Solves the current model.
    ///
    /// # Errors
    ///
    /// Reserved for backend failures; infeasibility and unboundedness are
    /// reported through [`SolveStatus`].
    fn optimize(&mut self, cancel: &CancelToken) -> Result<SolveStatus>;

    /// Value of a variable in the last solution.
    ///
    /// # Errors
    ///
    /// Fails if no solution is available or the handle is unknown.
    fn value_of(&self, var: VariableHandle) -> Result<f64>;

    /// Objective value of the last solution.
    ///
    /// # Errors
    ///
    /// Fails if no solution is available.
    fn objective_value(&self) -> Result<f64>;

    /// Returns `true` if values can be read after a non-optimal status
    /// (e.g. an incumbent at [`SolveStatus::TimeLimit`]).
    fn has_incumbent(&self) -> bool {
        false
    }
}
