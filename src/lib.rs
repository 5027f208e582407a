//! Multi-species Game of Life simulator
//!
//! This library provides a toroidal/bounded cellular-automaton core: the
//! world model with twin generation grids, the evolution engine with
//! selectable edge policies and majority-species coloring, a JSON codec
//! that round-trips full world state, and cooperative run/edit loops that
//! draw through pluggable canvas and event traits. A crossterm terminal
//! frontend backs the binary.

pub mod config;
pub mod error;
pub mod life;
pub mod runtime;
pub mod terminal;
pub mod utils;
pub mod world;

/// RGBA byte tuple used for every palette entry.
pub type Rgba = [u8; 4];

pub use error::WorldError;
pub use life::{EdgePolicy, Grid};
pub use world::World;
