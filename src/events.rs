use crate::drag::SurfacePoint;

pub enum Event {
    PointerEvent(PointerEvent),
    SessionEvent(SessionEvent),
    AppEvent(AppEvent),
}

/// Pointer input, positions relative to the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(SurfacePoint),
    Move(SurfacePoint),
    Up,

    /// The pointer left the drawing surface
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Advance a single generation
    Step,

    /// Start or stop the run loop
    ToggleRun,

    /// Kill every cell and reset the iteration count
    Clear,

    /// Grow or shrink cells by this many pixels
    CellSize(i32),

    /// Lengthen or shorten the interval by this many steps
    Interval(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The terminal changed size
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
