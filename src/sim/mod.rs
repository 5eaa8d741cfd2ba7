//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Sorted iteration wherever hash order would leak into an output
//! - No rendering or platform dependencies

pub mod cluster;
pub mod collision;
pub mod grid;
pub mod growth;
pub mod hex;
pub mod state;
pub mod tick;

pub use cluster::MIN_MATCH_SIZE;
pub use collision::resolve;
pub use grid::GridStore;
pub use growth::GrowthScheduler;
pub use hex::{Cell, Grid};
pub use state::{
    Bubble, BubbleQueue, ColorId, FallingBubble, GameEvent, GamePhase, GameState, PromptAnswer,
    SpecialAnswer,
};
pub use tick::{TickInput, tick};
