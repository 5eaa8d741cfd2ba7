//! Session state and core simulation types.
//!
//! All state a session needs lives in `GameState`, the handle returned from
//! session creation. The caller owns it and drives it through `tick`; there
//! is no ambient global state anywhere in the engine.

use std::collections::VecDeque;

use glam::Vec2;
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::GridStore;
use super::growth::GrowthScheduler;
use super::hex::{Cell, Grid};
use crate::consts::PROJECTILE_SPEED;
use crate::highscores::SessionOutcome;
use crate::settings::{ConfigError, GameConfig};

/// Identifier into the configured color palette. The renderer maps these to
/// actual sprites/colors; the engine only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColorId(pub u8);

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Externally paused; the special-bubble prompt pauses implicitly
    Paused,
    /// Board cleared
    Won,
    /// Timer expired or the grid grew past the height limit
    Lost,
}

/// Answer state for the special-bubble prompt, gating one shot at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialAnswer {
    #[default]
    NotYet,
    Correct,
    Wrong,
}

/// A single answer supplied through the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Correct,
    Wrong,
}

/// A colored disc: waiting in the queue, in flight, or settled on the grid.
///
/// Settled bubbles keep the pixel position they landed with; their
/// authoritative position is their cell, which the grid's movement offset
/// repositions wholesale during row shifts.
#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub color: ColorId,
    pub moving: bool,
    pub special: bool,
}

impl Bubble {
    pub fn queued(pos: Vec2, radius: f32, color: ColorId, special: bool) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: PROJECTILE_SPEED,
            radius,
            color,
            moving: false,
            special,
        }
    }

    pub fn settled(pos: Vec2, radius: f32, color: ColorId) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: 0.0,
            radius,
            color,
            moving: false,
            special: false,
        }
    }
}

/// A removed bubble handed to the renderer for its drop animation.
///
/// The renderer owns the animation and removes each entry from the session's
/// falling list once it leaves the playfield; the engine only checks the
/// list for emptiness (win condition).
#[derive(Debug, Clone)]
pub struct FallingBubble {
    pub pos: Vec2,
    pub color: ColorId,
    pub special: bool,
}

/// Boundary-visible events recorded during a tick and cleared at the start
/// of the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    /// A special bubble awaits a yes/no answer before its shot can fly.
    SpecialPrompt,
    BubblesPopped { count: u32 },
    FloatingDropped { count: u32 },
    RowInserted,
    Won,
    Lost,
}

/// Fixed-length queue of upcoming bubbles; slot 0 is the active projectile.
#[derive(Debug, Clone, Default)]
pub struct BubbleQueue {
    slots: VecDeque<Bubble>,
}

impl BubbleQueue {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active(&self) -> &Bubble {
        self.slots.front().expect("bubble queue is never empty")
    }

    pub fn active_mut(&mut self) -> &mut Bubble {
        self.slots.front_mut().expect("bubble queue is never empty")
    }

    /// Shift: the settled projectile leaves the queue. The matching append
    /// happens in the same settle step, keeping the length fixed outside
    /// that single mutation.
    pub fn pop_active(&mut self) -> Bubble {
        self.slots.pop_front().expect("bubble queue is never empty")
    }

    pub fn push(&mut self, bubble: Bubble) {
        self.slots.push_back(bubble);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.slots.iter()
    }

    /// Line the queue up behind the shooter, one diameter apart.
    pub fn reposition(&mut self, shooter: Vec2, diameter: f32) {
        for (i, bubble) in self.slots.iter_mut().enumerate() {
            if i == 0 && bubble.moving {
                continue;
            }
            bubble.pos = Vec2::new(shooter.x - diameter * i as f32, shooter.y);
        }
    }
}

/// Complete session state: the engine handle.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Session seed, reused on reset for reproducibility
    pub seed: u64,
    pub grid: Grid,
    pub store: GridStore,
    pub queue: BubbleQueue,
    pub phase: GamePhase,
    /// Monotonically non-decreasing within a session
    pub score: u64,
    /// Countdown in timer steps, clamped at 0
    pub timer: u32,
    pub shots: u32,
    pub answer: SpecialAnswer,
    /// True while a special-bubble prompt blocks the pending shot
    pub prompt_open: bool,
    /// Aim stored while the prompt is open; the shot launches on answer
    pub pending_aim: Option<Vec2>,
    /// Pruned bubbles awaiting the renderer's drop animation
    pub falling: Vec<FallingBubble>,
    /// Events of the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulated (unpaused) tick counter; drives the countdown modulus
    pub time_ticks: u64,
    pub(crate) growth: GrowthScheduler,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session from a validated configuration.
    ///
    /// The top `initial_fill_rows` rows are populated full-width with
    /// uniformly random palette colors, and the queue is filled to its
    /// configured length.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(
            config.num_rows,
            config.num_cols,
            config.bubble_diameter,
            config.bubble_margin,
            config.start_x,
            config.start_y,
            config.field_height,
        );
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut store = GridStore::new();
        let first_fill = grid.num_rows - config.initial_fill_rows as i32 + 1;
        for row in first_fill..=grid.num_rows {
            for col in 1..=grid.num_cols {
                let color = config.palette[rng.random_range(0..config.palette.len())];
                let cell = Cell::new(row, col);
                store.insert(
                    cell,
                    Bubble::settled(grid.cell_to_pixel(cell), grid.radius(), color),
                );
            }
        }

        let mut queue = BubbleQueue::empty();
        for _ in 0..config.queue_len {
            let bubble = draw_bubble(&mut rng, &store, &config, &grid);
            queue.push(bubble);
        }
        queue.reposition(grid.shooter_pos(), grid.diameter);

        info!(
            "Session started: {}x{} grid, {} filled rows, {} colors, seed {}",
            config.num_rows,
            config.num_cols,
            config.initial_fill_rows,
            config.palette.len(),
            seed
        );

        Ok(Self {
            seed,
            grid,
            store,
            queue,
            phase: GamePhase::Playing,
            score: 0,
            timer: config.default_timer,
            shots: 0,
            answer: SpecialAnswer::NotYet,
            prompt_open: false,
            pending_aim: None,
            falling: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            growth: GrowthScheduler::new(),
            rng,
            config,
        })
    }

    /// Full reset: fresh grid, store, queue and session state from the
    /// stored configuration and seed.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let seed = self.seed;
        *self = Self::new(config, seed).expect("configuration was validated at session start");
        info!("Session reset");
    }

    /// Generate a queue bubble, biased toward colors still on the board so
    /// every draw stays matchable; the full palette is used when the board
    /// is empty.
    pub(crate) fn spawn_queue_bubble(&mut self) -> Bubble {
        draw_bubble(&mut self.rng, &self.store, &self.config, &self.grid)
    }

    /// Renderer access to the drop-animation list; entries are removed by
    /// the renderer once they fall below the playfield.
    pub fn falling_mut(&mut self) -> &mut Vec<FallingBubble> {
        &mut self.falling
    }

    /// Every settled bubble with its current pixel position.
    ///
    /// Positions are derived from cells, so the accumulated movement offset
    /// is already applied; stored bubble positions are not refreshed on row
    /// shifts.
    pub fn board_bubbles(&self) -> impl Iterator<Item = (Cell, Vec2, &Bubble)> {
        self.store
            .iter()
            .map(|(cell, bubble)| (*cell, self.grid.cell_to_pixel(*cell), bubble))
    }

    /// Score/outcome hand-off for the external leaderboard collaborator.
    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            score: self.score,
            won: self.phase == GamePhase::Won,
            shots: self.shots,
        }
    }
}

fn draw_bubble(rng: &mut Pcg32, store: &GridStore, config: &GameConfig, grid: &Grid) -> Bubble {
    let present = store.colors_present();
    let color = if present.is_empty() {
        config.palette[rng.random_range(0..config.palette.len())]
    } else {
        present[rng.random_range(0..present.len())]
    };
    let special = config.special_chance > 0.0 && rng.random_bool(config.special_chance);
    Bubble::queued(grid.shooter_pos(), grid.radius(), color, special)
}
