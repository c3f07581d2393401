use crate::cell::CellCoord;
use crate::grid::Grid;

/// Offsets of the eight cells surrounding a cell, as `(d_row, d_col)`
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count the live neighbours of `coord`.
///
/// Edges are bounded: a neighbour position that falls outside the grid contributes nothing, it
/// never wraps around to the opposite side. Corners therefore have 3 candidate neighbours and
/// edge cells have 5.
pub fn count(grid: &Grid, coord: CellCoord) -> u8 {
    let mut n = 0;

    for (d_row, d_col) in OFFSETS {
        let Some(neighbor) = coord.offset(d_row, d_col) else {
            continue;
        };

        if let Ok(value) = grid.get(neighbor) {
            n += value as u8;
        }
    }

    n
}

/// Number of neighbour positions of `coord` that lie inside the grid
pub fn candidates(grid: &Grid, coord: CellCoord) -> usize {
    OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| coord.offset(d_row, d_col))
        .filter(|&c| grid.contains(c))
        .count()
}
