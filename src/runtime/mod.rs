//! Cooperative single-threaded run and edit loops plus their collaborators

pub mod backend;
pub mod edit;
pub mod render;
pub mod run;
pub mod timer;

#[cfg(test)]
pub mod testkit;

pub use backend::{Canvas, EventSource, InputEvent, Rect};
pub use edit::edit;
pub use run::{run, WARMUP_SECONDS};
pub use timer::IntervalTimer;
