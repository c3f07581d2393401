use tracing::trace;

use crate::grid::Grid;
use crate::neighbors;
use crate::rule_set::RuleSet;

/// Applies a life rule to every cell of a grid at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationEngine {
    rules: RuleSet,
}

impl GenerationEngine {
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Compute the next generation.
    ///
    /// Every cell is decided from `grid` alone and written into a fresh grid, so no cell ever
    /// sees a neighbour that was already updated this generation. The output always has the
    /// dimensions of the input. Counting iterations is left to the caller.
    pub fn advance(&self, grid: &Grid) -> Grid {
        let cells = grid
            .iter()
            .map(|(coord, value)| self.rules.next(value, neighbors::count(grid, coord)))
            .collect();

        let next = Grid::from_cells(grid.rows(), grid.cols(), cells);
        trace!(population = next.population(), "advanced one generation");

        next
    }
}

/// Advance `grid` by one generation under B3/S23
pub fn advance(grid: &Grid) -> Grid {
    GenerationEngine::default().advance(grid)
}
