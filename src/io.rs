use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::camera::DOTS_X;
use crate::camera::DOTS_Y;
use crate::drag::SurfacePoint;
use crate::events::AppEvent;
use crate::events::Event;
use crate::events::PointerEvent;
use crate::events::SessionEvent;

/// Terminal rows above the drawing surface, taken by the status line
pub const STATUS_ROWS: u16 = 1;

/// Top left corner of the drawing surface, in pixels
pub const SURFACE_ORIGIN: SurfacePoint =
    SurfacePoint::new(0.0, (STATUS_ROWS as usize * DOTS_Y) as f64);

/// The pixel under the centre of a terminal character
pub fn surface_point(column: u16, row: u16) -> SurfacePoint {
    SurfacePoint::new(
        column as f64 * DOTS_X as f64 + DOTS_X as f64 / 2.0,
        row as f64 * DOTS_Y as f64 + DOTS_Y as f64 / 2.0,
    )
}

/// Converts a crossterm event into a lifegrid event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event).map(Event::PointerEvent),
        CrossTermEvent::FocusLost => Some(Event::PointerEvent(PointerEvent::Leave)),
        CrossTermEvent::Resize(cols, rows) => {
            Some(Event::AppEvent(AppEvent::Resize { cols, rows }))
        }
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Event::AppEvent(AppEvent::Exit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Event::SessionEvent(SessionEvent::ToggleRun),
        KeyEvent {
            code: KeyCode::Char('n') | KeyCode::Right,
            ..
        } => Event::SessionEvent(SessionEvent::Step),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Event::SessionEvent(SessionEvent::Clear),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Event::SessionEvent(SessionEvent::CellSize(1)),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Event::SessionEvent(SessionEvent::CellSize(-1)),
        KeyEvent {
            code: KeyCode::Char('['),
            ..
        } => Event::SessionEvent(SessionEvent::Interval(-1)),
        KeyEvent {
            code: KeyCode::Char(']'),
            ..
        } => Event::SessionEvent(SessionEvent::Interval(1)),
        _ => return None,
    };

    Some(event)
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<PointerEvent> {
    let MouseEvent {
        kind, column, row, ..
    } = mouse_event;

    // The status line is not part of the surface. Dragging onto it counts as leaving.
    if row < STATUS_ROWS {
        return match kind {
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left) => {
                Some(PointerEvent::Leave)
            }
            _ => None,
        };
    }

    let point = surface_point(column, row);

    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down(point)),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move(point)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}
