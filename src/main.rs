use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use lifegrid::camera::Camera;
use lifegrid::camera::DOTS_X;
use lifegrid::camera::DOTS_Y;
use lifegrid::events::AppEvent;
use lifegrid::events::Event;
use lifegrid::events::PointerEvent;
use lifegrid::events::SessionEvent;
use lifegrid::io::convert_event;
use lifegrid::io::STATUS_ROWS;
use lifegrid::io::SURFACE_ORIGIN;
use lifegrid::Session;
use lifegrid::SimulationConfig;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_micros(1_000_000 / FRAMERATE as u64);

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = SimulationConfig::from_env().context("Invalid configuration")?;
    let mut session = Session::new(config).context("Failed to create session")?;

    let mut stdout = io::stdout();

    enter_terminal(&mut stdout)?;

    let res = run(&mut session, &mut stdout);

    session.shutdown();

    leave_terminal(&mut stdout)?;

    res
}

/// Raw mode, alternate screen and mouse capture. If anything after raw mode fails, raw mode is
/// turned back off before the error is returned.
fn enter_terminal<W: Write>(out: &mut W) -> anyhow::Result<()> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;

    let res = execute!(
        out,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        event::EnableFocusChange,
        cursor::Hide,
    );

    if let Err(e) = res {
        if let Err(raw) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {raw}");
        }

        return Err(e).context("Failed to set up terminal");
    }

    Ok(())
}

/// Undo [`enter_terminal`]. Raw mode is turned off even if restoring the screen fails.
fn leave_terminal<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let res = execute!(
        out,
        cursor::Show,
        event::DisableFocusChange,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
    );

    terminal::disable_raw_mode().context("Failed to disable raw mode")?;
    res.context("Failed to restore terminal")
}

fn run(session: &mut Session, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let mut cam = Camera::for_terminal(cols, rows.saturating_sub(STATUS_ROWS));
    let mut dirty = true;

    loop {
        if dirty {
            draw(session, &mut cam, stdout)?;
            dirty = false;
        }

        // Sleep until input arrives, the next generation is due, or a frame passes
        let now = Instant::now();
        let timeout = session
            .next_deadline()
            .map_or(FRAMETIME, |deadline| deadline.saturating_duration_since(now))
            .min(FRAMETIME);

        if event::poll(timeout).context("Failed to poll events")? {
            let event = event::read().context("Failed to read event")?;

            match convert_event(event) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => break,
                Some(Event::AppEvent(AppEvent::Resize { cols, rows })) => {
                    cam.resize(
                        cols as usize * DOTS_X,
                        rows.saturating_sub(STATUS_ROWS) as usize * DOTS_Y,
                    );
                    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    dirty = true;
                }
                Some(Event::PointerEvent(e)) => {
                    handle_pointer(session, e);
                    dirty = true;
                }
                Some(Event::SessionEvent(e)) => {
                    handle_session(session, e);
                    dirty = true;
                }
            }
        }

        if session.tick(Instant::now()) {
            dirty = true;
        }
    }

    debug!(iteration = session.iteration(), "exiting");

    Ok(())
}

fn handle_pointer(session: &mut Session, event: PointerEvent) {
    match event {
        PointerEvent::Down(p) => session.pointer_down(p, SURFACE_ORIGIN),
        PointerEvent::Move(p) => session.pointer_move(p, SURFACE_ORIGIN),
        PointerEvent::Up => session.pointer_up(),
        PointerEvent::Leave => session.pointer_leave(),
    }
}

fn handle_session(session: &mut Session, event: SessionEvent) {
    match event {
        SessionEvent::Step => session.step(),
        SessionEvent::ToggleRun => session.toggle_running(Instant::now()),
        SessionEvent::Clear => session.clear(),
        SessionEvent::CellSize(delta) => {
            session.adjust_cell_size(delta);
        }
        SessionEvent::Interval(steps) => {
            session.adjust_interval(steps, Instant::now());
        }
    }
}

fn draw(session: &Session, cam: &mut Camera, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    let config = session.config();

    let status = format!(
        "Iteration:{}  population {}  [{}]  cell {}px  interval {}ms  {}  \
         (space run/stop, n step, c clear, +/- size, [/] speed, q quit)",
        session.iteration(),
        session.grid().population(),
        if session.is_running() { "running" } else { "stopped" },
        config.cell_size(),
        config.interval().as_millis(),
        config.rule,
    );
    let status: String = status.chars().take(cam.width() / DOTS_X).collect();

    let grid = session.grid();

    cam.reset();
    cam.draw_lattice(grid.rows(), grid.cols(), config.cell_size());
    cam.draw_grid(grid, config.cell_size());

    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        style::Print(status),
        terminal::Clear(terminal::ClearType::UntilNewLine),
    )?;

    for (i, line) in cam.render().lines().enumerate() {
        queue!(
            stdout,
            cursor::MoveTo(0, STATUS_ROWS + i as u16),
            style::Print(line)
        )?;
    }

    stdout.flush()?;

    Ok(())
}
