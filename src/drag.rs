use std::collections::HashSet;

use tracing::debug;
use tracing::trace;

use crate::cell::CellCoord;
use crate::grid::Grid;

/// A position on the drawing surface, in pixels
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Map a pointer position to the cell under it.
///
/// `origin` is the top left corner of the grid on the surface. Returns `None` when the pointer is
/// not over any cell of a `rows` by `cols` grid.
pub fn cell_at(
    pointer: SurfacePoint,
    origin: SurfacePoint,
    cell_size: u32,
    rows: usize,
    cols: usize,
) -> Option<CellCoord> {
    if cell_size == 0 {
        return None;
    }

    let size = cell_size as f64;
    let col = ((pointer.x - origin.x) / size).floor();
    let row = ((pointer.y - origin.y) / size).floor();

    // NaN fails both comparisons
    if !(row >= 0.0 && col >= 0.0) || row >= rows as f64 || col >= cols as f64 {
        return None;
    }

    Some(CellCoord::new(row as usize, col as usize))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Turns a stream of pointer positions into cell toggles.
///
/// While a drag is in progress each cell is toggled at most once, however many move events land
/// on it. The set of toggled cells is forgotten when the drag ends.
#[derive(Debug, Default)]
pub struct DragPaintController {
    state: DragState,
    toggled: HashSet<CellCoord>,
}

impl DragPaintController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Cells already toggled by the current drag
    pub fn toggled(&self) -> &HashSet<CellCoord> {
        &self.toggled
    }

    /// Start a drag. Toggles the cell under the pointer, if any.
    ///
    /// Returns the new grid snapshot when a cell was toggled.
    pub fn pointer_down(
        &mut self,
        grid: &Grid,
        pointer: SurfacePoint,
        origin: SurfacePoint,
        cell_size: u32,
    ) -> Option<Grid> {
        debug!(x = pointer.x, y = pointer.y, "drag started");

        self.toggled.clear();
        self.state = DragState::Dragging;

        self.paint(grid, pointer, origin, cell_size)
    }

    /// Continue a drag. Toggles the cell under the pointer unless this drag already did.
    ///
    /// Does nothing while idle.
    pub fn pointer_move(
        &mut self,
        grid: &Grid,
        pointer: SurfacePoint,
        origin: SurfacePoint,
        cell_size: u32,
    ) -> Option<Grid> {
        if self.state != DragState::Dragging {
            return None;
        }

        self.paint(grid, pointer, origin, cell_size)
    }

    /// The pointer was released
    pub fn pointer_up(&mut self) {
        self.end("released");
    }

    /// The pointer left the drawing surface
    pub fn pointer_leave(&mut self) {
        self.end("left surface");
    }

    /// Drop any drag in progress. Used when the grid the drag was painting on goes away.
    pub fn reset(&mut self) {
        self.end("reset");
    }

    fn end(&mut self, reason: &str) {
        if self.state == DragState::Dragging {
            debug!(reason, toggled = self.toggled.len(), "drag ended");
        }

        self.state = DragState::Idle;
        self.toggled.clear();
    }

    fn paint(
        &mut self,
        grid: &Grid,
        pointer: SurfacePoint,
        origin: SurfacePoint,
        cell_size: u32,
    ) -> Option<Grid> {
        let coord = cell_at(pointer, origin, cell_size, grid.rows(), grid.cols())?;

        if !self.toggled.insert(coord) {
            return None;
        }

        trace!(%coord, "painting cell");

        // `cell_at` only yields coordinates inside the grid
        grid.toggle(coord).ok()
    }
}
