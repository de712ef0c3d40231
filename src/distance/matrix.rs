//! Dense distance matrix.

use crate::error::{Error, Result};

/// A dense n×n distance matrix stored in row-major order.
///
/// Supports both Euclidean distance computation from planar coordinates
/// and explicit distance specification.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from `(x, y)` coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if the data length doesn't match
    /// `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::invalid_instance(format!(
                "{} distances given for {size} vertices, expected {}",
                data.len(),
                size * size
            )));
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_instance(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(size, data)
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets both `(a, b)` and `(b, a)`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// The tolerance is scaled by the magnitude of the compared entries
    /// (never below 1), so large distances are compared relatively.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.first_asymmetry(tol).is_none()
    }

    /// First `(i, j)` pair, `i < j`, whose entries differ beyond tolerance.
    pub(crate) fn first_asymmetry(&self, tol: f64) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                let scale = 1.0_f64.max(a.abs()).max(b.abs());
                if !((a - b).abs() <= tol * scale) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
