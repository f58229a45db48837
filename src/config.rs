use std::time::Duration;

use thiserror::Error;

use crate::color::Color;
use crate::grid::GridError;
use crate::grid::MIN_SIDE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid grid size: {0}")]
    Grid(#[from] GridError),

    #[error("Cell size must be at least 1 pixel")]
    ZeroCellSize,

    #[error("Tick interval must be non-zero")]
    ZeroTick,
}

/// Everything the simulation reads once, when it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Grid width, in cells
    pub width: usize,

    /// Grid height, in cells
    pub height: usize,

    /// Side of a cell on screen, at scale 1
    pub cell_size: u32,

    /// Time between two generations while ticking
    pub tick: Duration,

    /// Whether cells get randomized on start
    pub randomize: bool,

    pub background: Color,

    /// Whether cells start out drawn with a stroke
    pub stroke: bool,

    /// Seed for randomization. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            cell_size: 15,
            tick: Duration::from_millis(100),
            randomize: true,
            background: Color::rgb(100, 100, 100),
            stroke: true,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(GridError::TooSmall {
                width: self.width,
                height: self.height,
            }
            .into());
        }

        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}
