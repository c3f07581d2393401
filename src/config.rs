use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::grid::GridError;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// Side length of a cell on the drawing surface, in pixels
pub const CELL_SIZE_RANGE: RangeInclusive<u32> = 5..=70;

/// Time between two generations while running, in milliseconds
pub const INTERVAL_MS_RANGE: RangeInclusive<u64> = 50..=1000;

/// Interactive adjustments of the interval move in steps of this many milliseconds
pub const INTERVAL_STEP_MS: u64 = 10;

pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 425;
pub const DEFAULT_ROWS: usize = 500;
pub const DEFAULT_COLS: usize = 500;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size {0}px is out of range, expected 5 to 70")]
    CellSizeOutOfRange(u32),

    #[error("Interval {0}ms is out of range, expected 50 to 1000")]
    IntervalOutOfRange(u128),

    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("Failed to parse {var}=\"{value}\"")]
    Env { var: &'static str, value: String },
}

/// Settings of a simulation session.
///
/// `cell_size` and `interval` can change at any time and only affect what happens next.
/// `rows` and `cols` are fixed for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    cell_size: u32,
    interval: Duration,
    pub rows: usize,
    pub cols: usize,
    pub rule: RuleSet,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            rule: RuleSet::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults, overridden by any of `LIFE_CELL_SIZE`, `LIFE_INTERVAL_MS`, `LIFE_ROWS`,
    /// `LIFE_COLS` and `LIFE_RULE` that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Like [`SimulationConfig::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env { var, value })
        }

        let mut config = Self::default();

        if let Some(v) = lookup("LIFE_CELL_SIZE") {
            config.set_cell_size(parse("LIFE_CELL_SIZE", v)?)?;
        }

        if let Some(v) = lookup("LIFE_INTERVAL_MS") {
            let ms: u64 = parse("LIFE_INTERVAL_MS", v)?;
            config.set_interval(Duration::from_millis(ms))?;
        }

        if let Some(v) = lookup("LIFE_ROWS") {
            config.rows = parse("LIFE_ROWS", v)?;
        }

        if let Some(v) = lookup("LIFE_COLS") {
            config.cols = parse("LIFE_COLS", v)?;
        }

        if let Some(v) = lookup("LIFE_RULE") {
            config.rule = v.parse()?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), ConfigError> {
        if !CELL_SIZE_RANGE.contains(&cell_size) {
            return Err(ConfigError::CellSizeOutOfRange(cell_size));
        }

        self.cell_size = cell_size;
        Ok(())
    }

    pub fn set_interval(&mut self, interval: Duration) -> Result<(), ConfigError> {
        let ms = interval.as_millis();
        let (lo, hi) = (*INTERVAL_MS_RANGE.start(), *INTERVAL_MS_RANGE.end());

        if interval.subsec_nanos() % 1_000_000 != 0 || ms < lo as u128 || ms > hi as u128 {
            return Err(ConfigError::IntervalOutOfRange(ms));
        }

        self.interval = interval;
        Ok(())
    }

    /// Step the cell size by `delta` pixels, clamped to its bounds. Returns the new size.
    pub fn adjust_cell_size(&mut self, delta: i32) -> u32 {
        let size = self.cell_size.saturating_add_signed(delta);
        self.cell_size = size.clamp(*CELL_SIZE_RANGE.start(), *CELL_SIZE_RANGE.end());

        self.cell_size
    }

    /// Step the interval by `steps` increments of [`INTERVAL_STEP_MS`], clamped to its bounds.
    /// Returns the new interval.
    pub fn adjust_interval(&mut self, steps: i64) -> Duration {
        let ms = self.interval.as_millis() as u64;
        let ms = ms.saturating_add_signed(steps.saturating_mul(INTERVAL_STEP_MS as i64));
        let ms = ms.clamp(*INTERVAL_MS_RANGE.start(), *INTERVAL_MS_RANGE.end());

        self.interval = Duration::from_millis(ms);
        self.interval
    }

    fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(())
    }
}
