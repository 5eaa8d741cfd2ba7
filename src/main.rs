//! Hexpop headless demo
//!
//! Drives a scripted session through the engine's public API: sweeps aim
//! points across the board, answers special-bubble prompts, consumes the
//! falling list the way a renderer would, and prints the outcome. Useful
//! for eyeballing engine behavior without a frontend.

use glam::Vec2;

use hexpop::consts::SIM_DT;
use hexpop::sim::{GameEvent, GamePhase, GameState, PromptAnswer, TickInput, tick};
use hexpop::{GameConfig, HighScores};

/// Hard stop so a pathological script cannot spin forever.
const MAX_TICKS: u64 = 400_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB0BB1E5);

    let config = GameConfig::default();
    let mut state = GameState::new(config, seed).expect("default config is valid");

    let left = state.grid.left_wall();
    let right = state.grid.right_wall();
    let mut answer_pending = false;
    let mut shot_index = 0u32;

    for _ in 0..MAX_TICKS {
        let mut input = TickInput::default();

        if answer_pending {
            // Always answer the quiz correctly; the demo is not much of a
            // student.
            input.answer = Some(PromptAnswer::Correct);
            answer_pending = false;
        } else if state.phase == GamePhase::Playing
            && !state.prompt_open
            && !state.queue.active().moving
        {
            // Sweep aim points across the board width.
            let span = right - left;
            let x = left + span * 0.1 + (shot_index as f32 * span * 0.13) % (span * 0.8);
            input.aim = Some(Vec2::new(x, 60.0));
            shot_index += 1;
        }

        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            if *event == GameEvent::SpecialPrompt {
                answer_pending = true;
            }
        }

        // Stand in for the renderer: drop animations finish instantly.
        state.falling_mut().clear();

        if matches!(state.phase, GamePhase::Won | GamePhase::Lost) {
            break;
        }
    }

    let outcome = state.outcome();
    println!(
        "{} after {} shots with score {} (timer {} left)",
        if outcome.won { "Won" } else { "Lost" },
        outcome.shots,
        outcome.score,
        state.timer
    );

    let mut scores = HighScores::new();
    scores.add(outcome);
    if let Ok(json) = scores.to_json() {
        println!("leaderboard hand-off: {json}");
    }
}
