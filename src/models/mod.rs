//! Value types flowing through the cutting-plane loop.
//!
//! A solver answer becomes a [`Selection`], the decomposer splits it into
//! [`Component`]s, each subtour yields a [`Cut`], and the accepted final
//! selection becomes a [`Tour`].

mod component;
mod cut;
mod selection;
mod tour;

pub use component::Component;
pub use cut::Cut;
pub use selection::Selection;
pub use tour::Tour;
