use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::CellCoord;
use crate::cell::CellValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Coordinate {coord} is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        coord: CellCoord,
        rows: usize,
        cols: usize,
    },

    #[error("Row {row} has {got} cells, expected {exp}")]
    RaggedRow { row: usize, exp: usize, got: usize },

    #[error("Unrecognized cell character '{0}'")]
    InvalidChar(char),
}

/// A fixed-size snapshot of the cell matrix.
///
/// Every mutation returns a new `Grid`, leaving `self` untouched. A caller holding an older
/// snapshot keeps seeing a consistent view no matter what happens to newer ones.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,

    /// Row-major, `rows * cols` long
    cells: Vec<CellValue>,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell DEAD
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![CellValue::Dead; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: CellCoord) -> Result<CellValue, GridError> {
        let i = self.index(coord)?;

        Ok(self.cells[i])
    }

    /// Same grid with the cell at `coord` flipped
    pub fn toggle(&self, coord: CellCoord) -> Result<Self, GridError> {
        let value = self.get(coord)?;

        self.set(coord, value.flip())
    }

    /// Same grid with the cell at `coord` set to `value`
    pub fn set(&self, coord: CellCoord, value: CellValue) -> Result<Self, GridError> {
        let i = self.index(coord)?;

        let mut next = self.clone();
        next.cells[i] = value;

        Ok(next)
    }

    /// A grid with the same dimensions, every cell DEAD
    pub fn clear(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![CellValue::Dead; self.cells.len()],
        }
    }

    /// A new grid of the given dimensions that keeps the region both grids share
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Self, GridError> {
        let mut next = Self::new(rows, cols)?;

        for row in 0..rows.min(self.rows) {
            for col in 0..cols.min(self.cols) {
                next.cells[row * cols + col] = self.cells[row * self.cols + col];
            }
        }

        Ok(next)
    }

    /// Number of ALIVE cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate over every coordinate with its value, row by row
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellValue)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (CellCoord::new(i / self.cols, i % self.cols), v))
    }

    /// Build a grid from a row-major list of values. `cells.len()` must be `rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<CellValue>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);

        Self { rows, cols, cells }
    }

    fn index(&self, coord: CellCoord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(coord.row * self.cols + coord.col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        write!(f, "{self}")
    }
}

/// Parses the text form produced by `Display`: one line per row, `#` for ALIVE and `.` for
/// DEAD. Surrounding whitespace on each line is ignored, as are blank lines.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut rows = 0;

        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let before = cells.len();

            for c in line.chars() {
                let value = match c {
                    '#' => CellValue::Alive,
                    '.' => CellValue::Dead,
                    c => return Err(GridError::InvalidChar(c)),
                };

                cells.push(value);
            }

            let got = cells.len() - before;
            let exp = *cols.get_or_insert(got);

            if got != exp {
                return Err(GridError::RaggedRow { row: rows, exp, got });
            }

            rows += 1;
        }

        let cols = cols.unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        Ok(Self::from_cells(rows, cols, cells))
    }
}
