//! Game of Life core: grid storage and evolution rules

pub mod grid;
pub mod rules;

pub use grid::Grid;
pub use rules::{step, EdgePolicy, MAX_SPECIES};
