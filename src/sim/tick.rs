//! Fixed timestep session tick.
//!
//! One call advances the session by one render tick: state-machine
//! transitions first, then countdown and growth, then shot admission and
//! projectile flight. A settle runs the collision -> match -> prune ->
//! score transaction to completion within the same tick; nothing else
//! observes the store mid-transaction.

use glam::Vec2;
use log::{debug, info};

use super::cluster::{self, MIN_MATCH_SIZE};
use super::collision;
use super::growth;
use super::hex::Cell;
use super::state::{
    FallingBubble, GameEvent, GamePhase, GameState, PromptAnswer, SpecialAnswer,
};
use crate::consts::{POINTS_PER_BUBBLE, TICKS_PER_TIMER_STEP};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer coordinate of a shot attempt
    pub aim: Option<Vec2>,
    /// Answer to an open special-bubble prompt
    pub answer: Option<PromptAnswer>,
    /// Pause toggle
    pub pause: bool,
    /// Restart after a terminal phase
    pub restart: bool,
}

/// Advance the session by one render tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart && matches!(state.phase, GamePhase::Won | GamePhase::Lost) {
        state.reset();
        return;
    }

    // Terminal transitions, checked in order; each one ends the tick.
    match state.phase {
        GamePhase::Won | GamePhase::Lost => return,
        _ => {}
    }
    if state.phase == GamePhase::Playing {
        if state.store.is_empty() && state.falling.is_empty() {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::Won);
            info!("Board cleared, session won with score {}", state.score);
            return;
        }
        if state.timer == 0 || state.store.height_span() >= state.config.height_limit as i32 {
            state.phase = GamePhase::Lost;
            state.events.push(GameEvent::Lost);
            info!("Session lost with score {}", state.score);
            return;
        }
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    // Prompt answers are accepted even though the open prompt blocks the
    // simulation below.
    if let Some(answer) = input.answer {
        apply_answer(state, answer);
    }

    if state.phase == GamePhase::Paused || state.prompt_open {
        return;
    }

    state.time_ticks += 1;

    // Tick-driven countdown: one step per TICKS_PER_TIMER_STEP render
    // ticks, clamped at zero.
    if state.time_ticks.is_multiple_of(TICKS_PER_TIMER_STEP) {
        state.timer = state.timer.saturating_sub(1);
    }

    if state
        .growth
        .due(state.timer, state.config.default_timer, state.config.growth_interval)
    {
        state.growth.mark_fired(state.timer);
        growth::insert_ceiling_row(
            &mut state.grid,
            &mut state.store,
            &mut state.rng,
            &state.config.palette,
        );
        state.events.push(GameEvent::RowInserted);
    }

    if let Some(aim) = input.aim {
        try_fire(state, aim);
    }

    if state.queue.active().moving {
        advance_projectile(state, dt);
    }
}

fn apply_answer(state: &mut GameState, answer: PromptAnswer) {
    if !state.prompt_open {
        debug!("Answer with no open prompt ignored");
        return;
    }
    state.prompt_open = false;
    state.answer = match answer {
        PromptAnswer::Correct => SpecialAnswer::Correct,
        PromptAnswer::Wrong => SpecialAnswer::Wrong,
    };
    if state.answer == SpecialAnswer::Wrong {
        // A wrong answer turns this shot's special bubble into an ordinary
        // color bubble; the degrade lasts for this shot only.
        state.queue.active_mut().special = false;
    }
    if let Some(aim) = state.pending_aim.take() {
        launch(state, aim);
    }
}

/// Shot admission: one in-flight projectile at a time, upward aims only,
/// and specials wait for their prompt answer before moving.
fn try_fire(state: &mut GameState, aim: Vec2) {
    if state.queue.active().moving {
        debug!("Shot rejected: projectile already in flight");
        return;
    }
    let shooter = state.grid.shooter_pos();
    if aim.y >= shooter.y {
        debug!("Shot rejected: aim not above the shooter");
        return;
    }
    if state.queue.active().special && state.answer == SpecialAnswer::NotYet {
        state.prompt_open = true;
        state.pending_aim = Some(aim);
        state.events.push(GameEvent::SpecialPrompt);
        return;
    }
    launch(state, aim);
}

fn launch(state: &mut GameState, aim: Vec2) {
    let shooter = state.grid.shooter_pos();
    let dir = (aim - shooter).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let active = state.queue.active_mut();
    active.pos = shooter;
    active.vel = dir * active.speed;
    active.moving = true;
    state.shots += 1;
    state.events.push(GameEvent::ShotFired);
    debug!("Shot {} fired toward {:?}", state.shots, aim);
}

/// Move the in-flight projectile, bounce it off the side walls and settle
/// it once the resolver reports a target cell.
fn advance_projectile(state: &mut GameState, dt: f32) {
    let left = state.grid.left_wall();
    let right = state.grid.right_wall();

    let active = state.queue.active_mut();
    active.pos += active.vel * dt;
    if active.pos.x - active.radius < left {
        active.pos.x = left + active.radius;
        active.vel.x = active.vel.x.abs();
    }
    if active.pos.x + active.radius > right {
        active.pos.x = right - active.radius;
        active.vel.x = -active.vel.x.abs();
    }
    let pos = active.pos;
    let radius = active.radius;

    if let Some(cell) = collision::resolve(&state.store, &state.grid, pos, radius) {
        settle(state, cell);
    }
}

/// The atomic settle transaction: insert, match, prune, score, advance the
/// queue. Runs to completion before any further input is accepted.
fn settle(state: &mut GameState, cell: Cell) {
    let mut bubble = state.queue.pop_active();
    bubble.moving = false;
    bubble.vel = Vec2::ZERO;
    bubble.pos = state.grid.cell_to_pixel(cell);
    let special = bubble.special;
    let color = bubble.color;
    state.store.insert(cell, bubble);

    // The landing bubble is in the store before detection so it counts
    // toward its own group.
    let matched: Vec<Cell> = if special {
        cluster::special_blast(&state.store, cell)
    } else {
        let group = cluster::find_color_cluster(&state.store, cell, color);
        if group.len() >= MIN_MATCH_SIZE {
            group
        } else {
            Vec::new()
        }
    };

    let popped = matched.len() as u32;
    for c in &matched {
        state.store.remove(*c);
    }
    if popped > 0 {
        state.events.push(GameEvent::BubblesPopped { count: popped });
    }

    // Clusters cut off from the ceiling fall once something popped.
    let mut extra = 0u32;
    if popped > 0 {
        let floating = cluster::find_floating(&state.store, state.grid.num_rows);
        extra = floating.len() as u32;
        for c in floating {
            if let Some(b) = state.store.remove(c) {
                state.falling.push(FallingBubble {
                    pos: state.grid.cell_to_pixel(c),
                    color: b.color,
                    special: b.special,
                });
            }
        }
        if extra > 0 {
            state.events.push(GameEvent::FloatingDropped { count: extra });
        }
    }

    if popped + extra > 0 {
        state.score += u64::from(popped + extra) * POINTS_PER_BUBBLE;
    }
    info!(
        "Settled at {}: {} popped, {} dropped, score {}",
        cell, popped, extra, state.score
    );

    // The answer gate covers exactly one shot.
    state.answer = SpecialAnswer::NotYet;

    let replacement = state.spawn_queue_bubble();
    state.queue.push(replacement);
    state
        .queue
        .reposition(state.grid.shooter_pos(), state.grid.diameter);
    debug_assert_eq!(state.queue.len(), state.config.queue_len);
}
