//! Test doubles and helpers shared by the integration suites.

#![allow(dead_code)]

use std::collections::VecDeque;

use u_subtour::distance::DistanceMatrix;
use u_subtour::graph::Graph;
use u_subtour::solver::{
    CancelToken, ConstraintHandle, Direction, LinearExpr, MilpSolver, Relation, SolveStatus,
    VarDomain, VariableHandle,
};
use u_subtour::{Error, Result};

const FEASIBILITY_TOL: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Row {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub bound: f64,
}

/// Shared model storage for the test solvers.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub objective: Vec<f64>,
    pub direction: Option<Direction>,
    pub rows: Vec<Row>,
}

impl Model {
    fn create(&mut self, objective: f64) -> VariableHandle {
        self.objective.push(objective);
        VariableHandle::new(self.objective.len() - 1)
    }

    fn set_objective(&mut self, coefficients: &[(VariableHandle, f64)], direction: Direction) {
        self.direction = Some(direction);
        self.objective.iter_mut().for_each(|c| *c = 0.0);
        for &(v, c) in coefficients {
            self.objective[v.index()] += c;
        }
    }

    fn add(&mut self, expr: &LinearExpr, relation: Relation, bound: f64) -> ConstraintHandle {
        self.rows.push(Row {
            expr: expr.clone(),
            relation,
            bound,
        });
        ConstraintHandle::new(self.rows.len() - 1)
    }

    fn objective_of(&self, values: &[f64]) -> f64 {
        self.objective.iter().zip(values).map(|(c, v)| c * v).sum()
    }

    fn feasible(&self, values: &[f64]) -> bool {
        self.rows.iter().all(|row| {
            let lhs = row.expr.evaluate(|v| values[v.index()]);
            row.relation.holds(lhs, row.bound, FEASIBILITY_TOL)
        })
    }
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Response {
    /// `Optimal` with these variable values.
    Values(Vec<f64>),
    /// A bare status with no readable values.
    Status(SolveStatus),
    /// `TimeLimit` with an incumbent.
    Incumbent(Vec<f64>),
}

/// Replays a fixed sequence of answers, recording everything the loop adds.
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    pub model: Model,
    script: VecDeque<Response>,
    current: Option<Vec<f64>>,
    incumbent: bool,
    pub optimize_calls: usize,
}

impl ScriptedSolver {
    pub fn new(script: Vec<Response>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }
}

impl MilpSolver for ScriptedSolver {
    fn create_variable(&mut self, _domain: VarDomain, objective: f64) -> VariableHandle {
        self.model.create(objective)
    }

    fn set_objective(&mut self, coefficients: &[(VariableHandle, f64)], direction: Direction) {
        self.model.set_objective(coefficients, direction);
    }

    fn add_constraint(
        &mut self,
        expr: &LinearExpr,
        relation: Relation,
        bound: f64,
    ) -> Result<ConstraintHandle> {
        Ok(self.model.add(expr, relation, bound))
    }

    fn optimize(&mut self, _cancel: &CancelToken) -> Result<SolveStatus> {
        self.optimize_calls += 1;
        self.incumbent = false;
        self.current = None;
        match self.script.pop_front() {
            Some(Response::Values(values)) => {
                self.current = Some(values);
                Ok(SolveStatus::Optimal)
            }
            Some(Response::Incumbent(values)) => {
                self.current = Some(values);
                self.incumbent = true;
                Ok(SolveStatus::TimeLimit)
            }
            Some(Response::Status(status)) => Ok(status),
            None => Err(Error::solver("script exhausted")),
        }
    }

    fn value_of(&self, var: VariableHandle) -> Result<f64> {
        self.current
            .as_ref()
            .and_then(|v| v.get(var.index()).copied())
            .ok_or_else(|| Error::solver("no value"))
    }

    fn objective_value(&self) -> Result<f64> {
        self.current
            .as_ref()
            .map(|v| self.model.objective_of(v))
            .ok_or_else(|| Error::solver("no solution"))
    }

    fn has_incumbent(&self) -> bool {
        self.incumbent
    }
}

/// Exact solver for tiny binary models: tries every 0/1 assignment.
///
/// Ties go to the assignment with the smallest bit pattern, so answers are
/// deterministic.
#[derive(Debug, Default)]
pub struct EnumerationSolver {
    pub model: Model,
    best: Option<(Vec<f64>, f64)>,
    pub optimize_calls: usize,
}

impl EnumerationSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MilpSolver for EnumerationSolver {
    fn create_variable(&mut self, _domain: VarDomain, objective: f64) -> VariableHandle {
        self.model.create(objective)
    }

    fn set_objective(&mut self, coefficients: &[(VariableHandle, f64)], direction: Direction) {
        self.model.set_objective(coefficients, direction);
    }

    fn add_constraint(
        &mut self,
        expr: &LinearExpr,
        relation: Relation,
        bound: f64,
    ) -> Result<ConstraintHandle> {
        Ok(self.model.add(expr, relation, bound))
    }

    fn optimize(&mut self, cancel: &CancelToken) -> Result<SolveStatus> {
        self.optimize_calls += 1;
        self.best = None;
        if cancel.is_cancelled() {
            return Ok(SolveStatus::Cancelled);
        }
        let m = self.model.objective.len();
        assert!(m <= 20, "enumeration solver is for tiny models only");
        let sign = match self.model.direction {
            Some(Direction::Maximize) => -1.0,
            _ => 1.0,
        };

        let mut values = vec![0.0; m];
        for mask in 0u32..(1u32 << m) {
            for (k, v) in values.iter_mut().enumerate() {
                *v = if mask & (1 << k) != 0 { 1.0 } else { 0.0 };
            }
            if !self.model.feasible(&values) {
                continue;
            }
            let obj = self.model.objective_of(&values);
            let better = match &self.best {
                None => true,
                Some((_, best)) => sign * obj < sign * best - 1e-12,
            };
            if better {
                self.best = Some((values.clone(), obj));
            }
        }

        Ok(if self.best.is_some() {
            SolveStatus::Optimal
        } else {
            SolveStatus::Infeasible
        })
    }

    fn value_of(&self, var: VariableHandle) -> Result<f64> {
        self.best
            .as_ref()
            .and_then(|(v, _)| v.get(var.index()).copied())
            .ok_or_else(|| Error::solver("no value"))
    }

    fn objective_value(&self) -> Result<f64> {
        self.best
            .as_ref()
            .map(|(_, obj)| *obj)
            .ok_or_else(|| Error::solver("no solution"))
    }
}

/// Edge-variable values selecting exactly `pairs`.
pub fn values_for(graph: &Graph, pairs: &[(usize, usize)]) -> Vec<f64> {
    let mut values = vec![0.0; graph.num_edges()];
    for &(a, b) in pairs {
        let id = graph.edge_id(a, b).expect("edge exists");
        values[id.index()] = 1.0;
    }
    values
}

/// Pentagon A..E with unit cycle edges and weight-2 diagonals.
pub fn pentagon() -> Graph {
    let mut dm = DistanceMatrix::new(5);
    for i in 0..5 {
        for j in (i + 1)..5 {
            let adjacent = j == i + 1 || (i == 0 && j == 4);
            dm.set_symmetric(i, j, if adjacent { 1.0 } else { 2.0 });
        }
    }
    Graph::build(&dm).expect("valid pentagon")
}

/// Two unit right triangles one hundred units apart.
pub fn two_clusters() -> Graph {
    Graph::build(&DistanceMatrix::from_points(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (100.0, 0.0),
        (101.0, 0.0),
        (100.0, 1.0),
    ]))
    .expect("valid clusters")
}

/// Optimal tour length by trying every permutation that fixes vertex 0.
pub fn brute_force_optimum(graph: &Graph) -> f64 {
    fn search(
        graph: &Graph,
        path: &mut Vec<usize>,
        used: &mut [bool],
        length: f64,
        best: &mut f64,
    ) {
        let n = used.len();
        let last = *path.last().expect("non-empty path");
        if path.len() == n {
            *best = best.min(length + graph.weight(last, path[0]));
            return;
        }
        for v in 1..n {
            if !used[v] {
                used[v] = true;
                path.push(v);
                search(graph, path, used, length + graph.weight(last, v), best);
                path.pop();
                used[v] = false;
            }
        }
    }

    let n = graph.num_vertices();
    let mut used = vec![false; n];
    used[0] = true;
    let mut best = f64::INFINITY;
    search(graph, &mut vec![0], &mut used, 0.0, &mut best);
    best
}
