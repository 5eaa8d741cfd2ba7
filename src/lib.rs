//! Hexpop - a hex-packed bubble matching game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid geometry, collisions, matching, session state)
//! - `settings`: Session configuration, validated at session start
//! - `highscores`: Score hand-off types for an external leaderboard collaborator
//!
//! Rendering, UI, audio and persistence live outside this crate. Collaborators
//! drive the engine through `sim::tick` at a fixed render-tick rate and read
//! state back between ticks.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, SessionOutcome};
pub use settings::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz render/tick callback)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Render ticks per countdown step. The timer is tick-driven, so the
    /// effective countdown rate follows the frame rate.
    pub const TICKS_PER_TIMER_STEP: u64 = 60;
    /// Projectile launch speed in pixels per second
    pub const PROJECTILE_SPEED: f32 = 600.0;
    /// Points per bubble removed, matched or dropped
    pub const POINTS_PER_BUBBLE: u64 = 30;
}
