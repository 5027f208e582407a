//! Structural error taxonomy for world construction and persistence

use thiserror::Error;

/// Errors that survive local default-recovery and reach the caller.
///
/// Per-field problems in a world document never show up here; the codec
/// substitutes documented defaults for them. What remains is malformed
/// documents, impossible dimensions, and grid shape violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell size {cell_size} does not fit a {width}x{height} viewport")]
    CellSizeTooLarge {
        cell_size: u32,
        width: u32,
        height: u32,
    },

    #[error("coordinates ({row}, {column}) out of bounds for {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("grid shapes differ: {left_rows}x{left_columns} vs {right_rows}x{right_columns}")]
    ShapeMismatch {
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },
}
