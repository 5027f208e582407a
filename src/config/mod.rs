//! World document persistence

pub mod document;

pub use document::{
    builtin, load_document, resolve, save_document, to_document, ResolvedWorld, WorldDefaults,
    DEFAULT_PALETTE,
};
