use std::time::Duration;
use std::time::Instant;

use lifegrid::CellCoord;
use lifegrid::CellValue;
use lifegrid::Grid;
use lifegrid::Session;
use lifegrid::SimulationConfig;
use lifegrid::drag::SurfacePoint;
use lifegrid::engine;

const ORIGIN: SurfacePoint = SurfacePoint::new(0.0, 0.0);

fn session(rows: usize, cols: usize, cell_size: u32, interval_ms: u64) -> Session {
    let mut config = SimulationConfig::default();
    config.rows = rows;
    config.cols = cols;
    config.set_cell_size(cell_size).unwrap();
    config.set_interval(Duration::from_millis(interval_ms)).unwrap();

    Session::new(config).unwrap()
}

/// Pointer position at the centre of a cell
fn centre(coord: CellCoord, cell_size: u32) -> SurfacePoint {
    let s = cell_size as f64;

    SurfacePoint::new(
        coord.col as f64 * s + s / 2.0,
        coord.row as f64 * s + s / 2.0,
    )
}

#[test]
fn blinker_drawn_by_drag_rotates() {
    let mut s = session(3, 3, 10, 100);

    // one stroke across the middle row, with plenty of jitter inside each cell
    s.pointer_down(centre(CellCoord::new(1, 0), 10), ORIGIN);
    for x in [6.0, 7.5, 9.9, 10.0, 14.0, 19.0, 15.0, 21.0, 29.0, 25.0] {
        s.pointer_move(SurfacePoint::new(x, 14.0), ORIGIN);
    }
    s.pointer_up();

    assert_eq!(s.grid().to_string(), "...\n###\n...");

    s.step();

    assert_eq!(s.iteration(), 1);
    insta::assert_snapshot!("blinker_after_one_generation", s.grid().to_string());
}

#[test]
fn horizontal_blinker_by_toggles() {
    let mut g = Grid::new(3, 3).unwrap();
    for coord in [CellCoord::new(1, 1), CellCoord::new(1, 0), CellCoord::new(1, 2)] {
        g = g.toggle(coord).unwrap();
    }

    let next = engine::advance(&g);

    assert_eq!(next.get(CellCoord::new(1, 1)), Ok(CellValue::Alive));
    assert_eq!(next.get(CellCoord::new(0, 1)), Ok(CellValue::Alive));
    assert_eq!(next.get(CellCoord::new(2, 1)), Ok(CellValue::Alive));
    assert_eq!(next.get(CellCoord::new(1, 0)), Ok(CellValue::Dead));
    assert_eq!(next.get(CellCoord::new(1, 2)), Ok(CellValue::Dead));
    assert_eq!(next.population(), 3);

    // the old snapshot is untouched
    assert_eq!(g.to_string(), "...\n###\n...");
}

#[test]
fn run_loop_three_ticks_then_stop() {
    let t0 = Instant::now();
    let mut s = session(3, 3, 10, 100);

    s.start(t0);

    let mut generations = 0;
    for ms in [100, 200, 300] {
        if s.tick(t0 + Duration::from_millis(ms)) {
            generations += 1;
        }
    }

    assert_eq!(generations, 3);
    assert_eq!(s.iteration(), 3);

    s.stop();
    s.stop();

    assert!(!s.tick(t0 + Duration::from_millis(10_000)));
    assert_eq!(s.iteration(), 3);
}

#[test]
fn manual_steps_while_running() {
    let t0 = Instant::now();
    let mut s = session(4, 4, 10, 100);

    s.start(t0);
    s.step();

    assert!(s.is_running());
    assert_eq!(s.iteration(), 1);

    assert!(s.tick(t0 + Duration::from_millis(100)));
    assert_eq!(s.iteration(), 2);
}

#[test]
fn pointer_near_the_edge_is_harmless() {
    let mut s = session(2, 2, 10, 100);

    s.pointer_down(SurfacePoint::new(-1.0, -1.0), ORIGIN);
    s.pointer_move(SurfacePoint::new(20.0, 5.0), ORIGIN);
    s.pointer_move(SurfacePoint::new(5.0, 20.0), ORIGIN);
    s.pointer_move(SurfacePoint::new(1e9, 1e9), ORIGIN);
    s.pointer_leave();

    assert_eq!(s.grid().population(), 0);
    assert!(!s.is_dragging());
}
