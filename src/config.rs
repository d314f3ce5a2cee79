use std::time::Duration;

use ratatui::style::Color;

use crate::error::ConfigError;

/// Playing field width in cells.
pub const GRID_WIDTH: u16 = 30;

/// Playing field height in cells.
pub const GRID_HEIGHT: u16 = 20;

/// Snake length at the start of every round.
pub const INITIAL_SNAKE_LENGTH: usize = 5;

/// Milliseconds between simulation ticks.
pub const TICK_INTERVAL_MS: u64 = 150;

/// Points awarded per food eaten.
pub const FOOD_SCORE: u32 = 10;

/// Fallback cell size when the drawing surface reports no size.
pub const DEFAULT_CELL_SIZE: u16 = 1;

/// Terminal columns per cell-size unit; terminal glyphs are roughly twice as tall as wide.
pub const CELL_ASPECT_X: u16 = 2;

/// Title shown by the host terminal.
pub const WINDOW_TITLE: &str = "Ekans - Snake Game";

pub const FIELD_BG: Color = Color::Rgb(220, 220, 220);
pub const SNAKE_COLOR: Color = Color::Rgb(0, 128, 0);
pub const FOOD_COLOR: Color = Color::Rgb(255, 0, 0);
pub const TEXT_COLOR: Color = Color::Black;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Maximum snake length; one cell always stays free for food.
    #[must_use]
    pub fn snake_capacity(self) -> usize {
        self.total_cells().saturating_sub(1)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

/// Rules and pacing for one engine instance.
///
/// The defaults are the compiled-in constants above; tests and embedders may
/// pass a different grid or speed through [`crate::game::Game::new`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_length: usize,
    pub tick_interval: Duration,
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            initial_length: INITIAL_SNAKE_LENGTH,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            food_score: FOOD_SCORE,
        }
    }
}

impl GameConfig {
    /// Same rules on a different grid.
    #[must_use]
    pub fn with_grid(grid: GridSize) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Checks that the starting layout fits the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        let capacity = self.grid.snake_capacity();
        if self.initial_length > capacity {
            return Err(ConfigError::InitialLengthExceedsCapacity {
                length: self.initial_length,
                capacity,
            });
        }

        let head_x = usize::from(self.start_head_x());
        if self.initial_length > head_x + 1 {
            return Err(ConfigError::StartOutOfBounds {
                length: self.initial_length,
                head_x,
            });
        }

        Ok(())
    }

    /// Head column of the starting layout: a quarter of the way across.
    #[must_use]
    pub fn start_head_x(&self) -> u16 {
        self.grid.width / 4
    }

    /// Row of the starting layout: vertically centred.
    #[must_use]
    pub fn start_row(&self) -> u16 {
        self.grid.height / 2
    }
}
