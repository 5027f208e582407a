//! Cell grid storage for multi-species Game of Life worlds

use crate::error::WorldError;
use std::fmt;

/// A rows×columns byte grid backed by one contiguous buffer.
///
/// A cell value of 0 means dead; `1..=colors` means alive, carrying the
/// species index of the cell. The world keeps two of these (current and
/// previous generation) and exchanges their buffers each evolution step
/// instead of reallocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a new all-dead grid.
    pub fn new(rows: usize, columns: usize) -> Result<Self, WorldError> {
        if rows == 0 || columns == 0 {
            return Err(WorldError::InvalidDimensions { rows, columns });
        }

        Ok(Self {
            rows,
            columns,
            cells: vec![0; rows * columns],
        })
    }

    /// Build a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, WorldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(WorldError::InvalidDimensions {
                rows: height,
                columns: width,
            });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(WorldError::RaggedRows {
                    row: i,
                    got: row.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            rows: height,
            columns: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Convert 2D coordinates to an index into the flat buffer.
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Get the cell value at coordinates; out of bounds reads as dead.
    pub fn get(&self, row: usize, column: usize) -> u8 {
        if row < self.rows && column < self.columns {
            self.cells[self.index(row, column)]
        } else {
            0
        }
    }

    /// Set the cell value at coordinates.
    pub fn set(&mut self, row: usize, column: usize, value: u8) -> Result<(), WorldError> {
        if row >= self.rows || column >= self.columns {
            return Err(WorldError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }

        let idx = self.index(row, column);
        self.cells[idx] = value;
        Ok(())
    }

    /// Exchange cell contents with another grid of identical dimensions.
    ///
    /// Swapping buffers rotates the current generation into the previous
    /// slot without touching individual cells. Own-inverse.
    pub fn swap(&mut self, other: &mut Grid) -> Result<(), WorldError> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(WorldError::ShapeMismatch {
                left_rows: self.rows,
                left_columns: self.columns,
                right_rows: other.rows,
                right_columns: other.columns,
            });
        }

        std::mem::swap(&mut self.cells, &mut other.cells);
        Ok(())
    }

    /// Reset every cell to dead.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Count living cells of any species.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell > 0).count()
    }

    /// Check whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Clamp every cell value into `0..=max`, for grids read from documents.
    pub fn clamp_values(&mut self, max: u8) {
        for cell in &mut self.cells {
            if *cell > max {
                *cell = max;
            }
        }
    }

    /// Copy the grid out as nested rows for serialization.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.columns).map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                match self.get(row, column) {
                    0 => write!(f, "·")?,
                    v => write!(f, "{}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
