// config.rs - Command-line / environment configuration

use std::time::Duration;

use clap::{Parser, ValueEnum};
use egui::Color32;
use thiserror::Error;

use crate::render::Palette;

const MAX_CANVAS_SIDE: u64 = 16_384;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid colour {0:?}: expected #RRGGBB")]
    InvalidColor(String),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Which cells are alive when the window opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InitialCells {
    /// Cell i alive when i is even or a multiple of seven.
    Interleaved,
    Random,
    Dead,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "life-driver", version, about = "Interactive Conway's Game of Life")]
pub struct Args {
    /// Grid width in cells.
    #[arg(long, env = "LIFE_WIDTH", default_value_t = 64)]
    pub width: u32,

    /// Grid height in cells.
    #[arg(long, env = "LIFE_HEIGHT", default_value_t = 64)]
    pub height: u32,

    /// Cell edge in pixels, not counting the 1px border.
    #[arg(long, env = "LIFE_CELL_SIZE", default_value_t = 5)]
    pub cell_size: u32,

    /// Frames rendered per run is this value plus one.
    #[arg(long, env = "LIFE_STEP_BUDGET", default_value_t = 100)]
    pub step_budget: u32,

    /// Upper end of the step-budget slider.
    #[arg(long, env = "LIFE_MAX_STEP_BUDGET", default_value_t = 1000)]
    pub max_step_budget: u32,

    /// Seed for random universes; omit for a fresh seed each run.
    #[arg(long, env = "LIFE_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "LIFE_INITIAL", value_enum, default_value_t = InitialCells::Interleaved)]
    pub initial: InitialCells,

    /// Store the universe eight cells per byte.
    #[arg(long, env = "LIFE_PACKED")]
    pub packed: bool,

    /// Minimum time between animation frames; 0 follows the display.
    #[arg(long, env = "LIFE_FRAME_INTERVAL_MS", default_value_t = 0)]
    pub frame_interval_ms: u64,

    #[arg(long, env = "LIFE_GRID_COLOR", default_value = "#CCCCCC", value_parser = parse_color)]
    pub grid_color: Color32,

    #[arg(long, env = "LIFE_DEAD_COLOR", default_value = "#FFFFFF", value_parser = parse_color)]
    pub dead_color: Color32,

    #[arg(long, env = "LIFE_ALIVE_COLOR", default_value = "#000000", value_parser = parse_color)]
    pub alive_color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub step_budget: u32,
    pub max_step_budget: u32,
    pub seed: Option<u64>,
    pub initial: InitialCells,
    pub packed: bool,
    pub frame_interval: Duration,
    pub palette: Palette,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 5,
            step_budget: 100,
            max_step_budget: 1000,
            seed: None,
            initial: InitialCells::Interleaved,
            packed: false,
            frame_interval: Duration::ZERO,
            palette: Palette::default(),
        }
    }
}

impl TryFrom<Args> for DriverConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = DriverConfig {
            width: args.width,
            height: args.height,
            cell_size: args.cell_size,
            step_budget: args.step_budget,
            max_step_budget: args.max_step_budget,
            seed: args.seed,
            initial: args.initial,
            packed: args.packed,
            frame_interval: Duration::from_millis(args.frame_interval_ms),
            palette: Palette {
                grid: args.grid_color,
                dead: args.dead_color,
                alive: args.alive_color,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be positive"));
        }
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell size must be positive"));
        }
        if self.step_budget > self.max_step_budget {
            return Err(ConfigError::Invalid("step budget exceeds its maximum"));
        }
        // The canvas is uploaded as a single texture.
        let pitch = u64::from(self.cell_size) + 1;
        if pitch * u64::from(self.width.max(self.height)) + 1 > MAX_CANVAS_SIDE {
            return Err(ConfigError::Invalid("canvas would exceed 16384 pixels on a side"));
        }
        Ok(())
    }
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_color(s: &str) -> Result<Color32, ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
    };
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
