pub mod camera;
pub mod cell;
pub mod config;
pub mod drag;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod neighbors;
pub mod rule_set;
pub mod run_loop;
pub mod session;

pub use cell::CellCoord;
pub use cell::CellValue;
pub use config::SimulationConfig;
pub use grid::Grid;
pub use grid::GridError;
pub use session::Session;
