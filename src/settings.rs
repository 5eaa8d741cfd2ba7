//! Session configuration.
//!
//! Accepted once at session start/reset and validated up front: a bad
//! configuration is fatal to session creation and to nothing else. The
//! struct round-trips through JSON so external collaborators can ship
//! config files.

use serde::{Deserialize, Serialize};

use crate::sim::ColorId;

/// Engine configuration for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ceiling row index at session start; grows as rows are inserted
    pub num_rows: u32,
    /// Board width in columns
    pub num_cols: u32,
    /// How many rows below the ceiling start populated (0 permitted)
    pub initial_fill_rows: u32,
    /// Bubble diameter in pixels
    pub bubble_diameter: f32,
    /// Gap between adjacent rows/bubbles in pixels
    pub bubble_margin: f32,
    /// Horizontal origin of column 1 (even rows)
    pub start_x: f32,
    /// Vertical origin: how far below the top edge the ceiling row sits
    pub start_y: f32,
    /// Playfield height; the shooter sits one diameter above the bottom
    pub field_height: f32,
    /// Color identifiers available this session (at least 1, 3+ recommended)
    pub palette: Vec<ColorId>,
    /// Countdown start value in timer steps
    pub default_timer: u32,
    /// Timer steps between ceiling-row insertions
    pub growth_interval: u32,
    /// Occupied height span (in rows) that loses the session
    pub height_limit: u32,
    /// Fixed length of the next-bubble queue
    pub queue_len: usize,
    /// Probability that a generated queue bubble is special
    pub special_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_rows: 10,
            num_cols: 12,
            initial_fill_rows: 4,
            bubble_diameter: 40.0,
            bubble_margin: 2.0,
            start_x: 20.0,
            start_y: 20.0,
            field_height: 640.0,
            palette: (0..6).map(ColorId).collect(),
            default_timer: 600,
            growth_interval: 20,
            height_limit: 8,
            queue_len: 3,
            special_chance: 0.08,
        }
    }
}

impl GameConfig {
    /// Check everything session creation relies on. Runs once at start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.num_rows == 0 || self.num_cols == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        if self.initial_fill_rows > self.num_rows {
            return Err(ConfigError::FillExceedsRows {
                fill: self.initial_fill_rows,
                rows: self.num_rows,
            });
        }
        if self.bubble_diameter <= 0.0 {
            return Err(ConfigError::NonPositiveDiameter(self.bubble_diameter));
        }
        if self.bubble_margin < 0.0 {
            return Err(ConfigError::NegativeMargin(self.bubble_margin));
        }
        if self.growth_interval == 0 {
            return Err(ConfigError::ZeroGrowthInterval);
        }
        if self.height_limit == 0 {
            return Err(ConfigError::ZeroHeightLimit);
        }
        if self.queue_len == 0 {
            return Err(ConfigError::ZeroQueueLength);
        }
        if !(0.0..=1.0).contains(&self.special_chance) {
            return Err(ConfigError::SpecialChanceOutOfRange(self.special_chance));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration rejection reasons, fatal to session start only.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyPalette,
    ZeroDimension { rows: u32, cols: u32 },
    FillExceedsRows { fill: u32, rows: u32 },
    NonPositiveDiameter(f32),
    NegativeMargin(f32),
    ZeroGrowthInterval,
    ZeroHeightLimit,
    ZeroQueueLength,
    SpecialChanceOutOfRange(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyPalette => write!(f, "palette must contain at least one color"),
            ConfigError::ZeroDimension { rows, cols } => {
                write!(f, "grid dimensions must be positive (got {rows}x{cols})")
            }
            ConfigError::FillExceedsRows { fill, rows } => {
                write!(f, "initial fill of {fill} rows exceeds the {rows}-row grid")
            }
            ConfigError::NonPositiveDiameter(d) => {
                write!(f, "bubble diameter must be positive (got {d})")
            }
            ConfigError::NegativeMargin(m) => {
                write!(f, "bubble margin must not be negative (got {m})")
            }
            ConfigError::ZeroGrowthInterval => write!(f, "growth interval must be positive"),
            ConfigError::ZeroHeightLimit => write!(f, "height limit must be positive"),
            ConfigError::ZeroQueueLength => write!(f, "queue length must be positive"),
            ConfigError::SpecialChanceOutOfRange(p) => {
                write!(f, "special chance must be within 0..=1 (got {p})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
