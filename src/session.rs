use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::warn;

use crate::config::ConfigError;
use crate::config::SimulationConfig;
use crate::drag::DragPaintController;
use crate::drag::SurfacePoint;
use crate::engine::GenerationEngine;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::run_loop::RunLoopController;

/// One interactive simulation: the current grid snapshot, the iteration count, and the
/// controllers feeding pointer input and timer ticks into them.
///
/// Every handler runs to completion and swaps in a whole new grid, so pointer events and
/// timer ticks can interleave freely.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    iteration: u64,
    config: SimulationConfig,
    engine: GenerationEngine,
    drag: DragPaintController,
    run_loop: RunLoopController,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.rows, config.cols)?;
        let engine = GenerationEngine::new(config.rule);
        let run_loop = RunLoopController::new(config.interval());

        debug!(
            rows = config.rows,
            cols = config.cols,
            rule = %config.rule,
            "session created"
        );

        Ok(Self {
            grid,
            iteration: 0,
            config,
            engine,
            drag: DragPaintController::new(),
            run_loop,
        })
    }

    /// The current snapshot
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations computed since the session started or was last cleared
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.run_loop.is_running()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Advance one generation by hand. Does not start or stop the run loop.
    pub fn step(&mut self) {
        self.grid = self.engine.advance(&self.grid);
        self.iteration += 1;
    }

    pub fn start(&mut self, now: Instant) {
        self.run_loop.start(now);
    }

    pub fn stop(&mut self) {
        self.run_loop.stop();
    }

    pub fn toggle_running(&mut self, now: Instant) {
        self.run_loop.toggle(now);
    }

    /// Advance one generation if the timer is due at `now`. Returns whether a generation ran.
    /// However long the caller stalled, at most one generation runs per call.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.run_loop.poll(now);

        if due {
            self.step();
        }

        due
    }

    /// When [`Session::tick`] next has work to do, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.run_loop.next_deadline()
    }

    /// Kill every cell and reset the iteration count
    pub fn clear(&mut self) {
        debug!(iteration = self.iteration, "clearing grid");

        self.grid = self.grid.clear();
        self.iteration = 0;
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), ConfigError> {
        self.config.set_cell_size(cell_size).inspect_err(|e| {
            warn!("{e}");
        })
    }

    pub fn adjust_cell_size(&mut self, delta: i32) -> u32 {
        self.config.adjust_cell_size(delta)
    }

    /// Change the interval. A running loop picks it up immediately.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) -> Result<(), ConfigError> {
        if let Err(e) = self.config.set_interval(interval) {
            warn!("{e}");
            return Err(e);
        }

        self.run_loop.set_interval(self.config.interval(), now);

        Ok(())
    }

    pub fn adjust_interval(&mut self, steps: i64, now: Instant) -> Duration {
        let interval = self.config.adjust_interval(steps);
        self.run_loop.set_interval(interval, now);

        interval
    }

    /// Replace the grid with one of the new dimensions, keeping the overlapping cells. A drag in
    /// progress is dropped since its cells may no longer exist.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), GridError> {
        let grid = self.grid.resized(rows, cols)?;

        debug!(rows, cols, "grid resized");

        self.drag.reset();
        self.grid = grid;
        self.config.rows = rows;
        self.config.cols = cols;

        Ok(())
    }

    pub fn pointer_down(&mut self, pointer: SurfacePoint, origin: SurfacePoint) {
        let cell_size = self.config.cell_size();

        if let Some(grid) = self.drag.pointer_down(&self.grid, pointer, origin, cell_size) {
            self.grid = grid;
        }
    }

    pub fn pointer_move(&mut self, pointer: SurfacePoint, origin: SurfacePoint) {
        let cell_size = self.config.cell_size();

        if let Some(grid) = self.drag.pointer_move(&self.grid, pointer, origin, cell_size) {
            self.grid = grid;
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.drag.pointer_leave();
    }

    /// End the session. The run loop's timer is cancelled and any drag is dropped.
    pub fn shutdown(&mut self) {
        debug!(iteration = self.iteration, "session shutting down");

        self.run_loop.stop();
        self.drag.reset();
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;
    use std::time::Instant;

    use super::Session;
    use crate::cell::CellCoord;
    use crate::cell::CellValue;
    use crate::config::ConfigError;
    use crate::config::SimulationConfig;
    use crate::drag::SurfacePoint;

    const MS: Duration = Duration::from_millis(1);
    const ORIGIN: SurfacePoint = SurfacePoint::new(0.0, 0.0);

    fn session(rows: usize, cols: usize) -> Session {
        let mut config = SimulationConfig::default();
        config.rows = rows;
        config.cols = cols;

        Session::new(config).unwrap()
    }

    #[test]
    fn invalid_dimensions() {
        let mut config = SimulationConfig::default();
        config.rows = 0;

        assert!(Session::new(config).is_err());
    }

    #[test]
    fn step_counts_iterations() {
        let mut s = session(4, 4);

        s.step();
        s.step();

        assert_eq!(s.iteration(), 2);
        assert!(!s.is_running());
    }

    #[test]
    fn clear_resets_the_counter() {
        let mut s = session(3, 3);

        s.pointer_down(SurfacePoint::new(25.0, 25.0), ORIGIN);
        s.pointer_up();
        s.step();
        s.clear();

        assert_eq!(s.iteration(), 0);
        assert_eq!(s.grid().population(), 0);
        assert_eq!((s.grid().rows(), s.grid().cols()), (3, 3));
    }

    #[test]
    fn timer_drives_generations() {
        let t0 = Instant::now();
        let mut s = session(5, 5);

        s.start(t0);
        assert!(!s.tick(t0 + 50 * MS));
        assert!(s.tick(t0 + 425 * MS));
        assert_eq!(s.iteration(), 1);

        s.stop();
        assert!(!s.tick(t0 + 5000 * MS));
        assert_eq!(s.iteration(), 1);
    }

    #[test]
    fn stalled_tick_runs_one_generation() {
        let t0 = Instant::now();
        let mut s = session(5, 5);
        s.set_interval(100 * MS, t0).unwrap();

        s.start(t0);
        assert!(s.tick(t0 + 2000 * MS));
        assert_eq!(s.iteration(), 1);

        // re-armed after the stall instead of owing the missed periods
        let deadline = s.next_deadline().unwrap();
        assert!(deadline > t0 + 2000 * MS);
        assert_eq!(deadline, t0 + 2100 * MS);
        assert!(!s.tick(t0 + 2050 * MS));
        assert_eq!(s.iteration(), 1);
    }

    #[test]
    fn interval_changes_apply_to_the_running_loop() {
        let t0 = Instant::now();
        let mut s = session(5, 5);

        s.toggle_running(t0);
        s.set_interval(100 * MS, t0 + 10 * MS).unwrap();
        assert_eq!(s.next_deadline(), Some(t0 + 110 * MS));

        assert_eq!(
            s.set_interval(20 * MS, t0),
            Err(ConfigError::IntervalOutOfRange(20))
        );
        assert_eq!(s.config().interval(), 100 * MS);

        assert_eq!(s.adjust_interval(1, t0 + 20 * MS), 110 * MS);
        assert_eq!(s.next_deadline(), Some(t0 + 130 * MS));
    }

    #[test]
    fn cell_size_changes_the_mapping() {
        let mut s = session(10, 10);

        s.set_cell_size(5).unwrap();
        s.pointer_down(SurfacePoint::new(12.0, 7.0), ORIGIN);
        s.pointer_up();

        assert_eq!(s.grid().get(CellCoord::new(1, 2)), Ok(CellValue::Alive));
        assert!(s.set_cell_size(4).is_err());
        assert_eq!(s.adjust_cell_size(100), 70);
    }

    #[test]
    fn resize_drops_the_drag() {
        let mut s = session(4, 4);

        s.pointer_down(SurfacePoint::new(5.0, 5.0), ORIGIN);
        assert!(s.is_dragging());

        s.resize(2, 3).unwrap();
        assert!(!s.is_dragging());
        assert_eq!(s.grid().to_string(), "#..\n...");

        // moves after the resize need a new pointer down
        s.pointer_move(SurfacePoint::new(25.0, 5.0), ORIGIN);
        assert_eq!(s.grid().population(), 1);

        assert!(s.resize(0, 3).is_err());
        assert_eq!(s.config().rows, 2);
    }

    #[test]
    fn shutdown_cancels_the_timer() {
        let t0 = Instant::now();
        let mut s = session(3, 3);

        s.start(t0);
        s.shutdown();

        assert!(!s.is_running());
        assert!(!s.tick(t0 + 10_000 * MS));
        assert_eq!(s.iteration(), 0);
    }
}
