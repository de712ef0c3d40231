//! Subtour-elimination cut generation.
//!
//! For a component `S` found in the current selection, the cut
//!
//! ```text
//! Σ_{i<j, i,j ∈ S} x_ij ≤ |S| − 1
//! ```
//!
//! forbids every cycle that stays inside `S`. A Hamiltonian cycle over all
//! vertices enters and leaves a proper subset at least once, so it keeps at
//! most `|S| − 1` edges inside and never violates the cut.

use crate::error::{Error, Result};
use crate::models::{Component, Cut};

/// Builds the subtour-elimination cut for one component.
///
/// # Errors
///
/// Returns [`Error::TrivialComponent`] for components with fewer than two
/// vertices, whose cut would be vacuous.
///
/// # Examples
///
/// ```
/// use u_subtour::models::Component;
/// use u_subtour::cuts::generate;
///
/// let cut = generate(&Component::new(vec![2, 3, 4])).unwrap();
/// assert_eq!(cut.bound(), 2);
/// assert_eq!(cut.edges(), &[(2, 3), (2, 4), (3, 4)]);
/// ```
pub fn generate(component: &Component) -> Result<Cut> {
    if component.len() < 2 {
        return Err(Error::TrivialComponent {
            size: component.len(),
        });
    }
    Ok(Cut::from_component(component))
}

/// Builds one cut per component, stopping at the first trivial component.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_all(components: &[Component]) -> Result<Vec<Cut>> {
    components.iter().map(generate).collect()
}
