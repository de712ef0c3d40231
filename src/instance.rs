//! Random instance generation.
//!
//! Produces reproducible Euclidean instances for experiments and tests.
//! Loading real instances (spreadsheets, TSPLIB files) is left to callers,
//! who hand a [`DistanceMatrix`] to [`Graph::build`](crate::graph::Graph::build).

use rand::Rng;

use crate::distance::DistanceMatrix;

/// Samples `n` points uniformly in `[0, side)²`.
pub fn random_points<R: Rng>(n: usize, side: f64, rng: &mut R) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| (rng.random_range(0.0..side), rng.random_range(0.0..side)))
        .collect()
}

/// Euclidean distance matrix over `n` uniformly random points.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_subtour::instance::random_euclidean;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let dm = random_euclidean(6, 100.0, &mut rng);
/// assert_eq!(dm.size(), 6);
/// assert!(dm.is_symmetric(1e-12));
/// ```
pub fn random_euclidean<R: Rng>(n: usize, side: f64, rng: &mut R) -> DistanceMatrix {
    DistanceMatrix::from_points(&random_points(n, side, rng))
}

/// Symmetric matrix with integer weights drawn from `1..=max_weight`.
///
/// Ties between tours are common, which exercises tie handling in the loop.
pub fn random_integer_weights<R: Rng>(n: usize, max_weight: u32, rng: &mut R) -> DistanceMatrix {
    let mut dm = DistanceMatrix::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            dm.set_symmetric(i, j, f64::from(rng.random_range(1..=max_weight.max(1))));
        }
    }
    dm
}
