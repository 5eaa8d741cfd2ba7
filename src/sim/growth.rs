//! Timed ceiling-row insertion.
//!
//! The countdown timer drives growth: every `growth_interval` timer steps a
//! fresh row appears at the ceiling and the whole board shifts down by one
//! row pitch through the grid's movement offset, without touching any
//! stored bubble.

use log::info;
use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::GridStore;
use super::hex::{Cell, Grid};
use super::state::{Bubble, ColorId};

/// At-most-one-insertion guard per distinct timer value.
///
/// The timer is strictly decreasing, so remembering the last value that
/// fired is enough: re-checking within the same timer step cannot insert a
/// second row.
#[derive(Debug, Clone, Default)]
pub struct GrowthScheduler {
    last_fired: Option<u32>,
}

impl GrowthScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth is due while the timer is running (non-zero and past its
    /// just-reset default), lands on the interval, and this timer value has
    /// not fired yet.
    pub fn due(&self, timer: u32, default_timer: u32, interval: u32) -> bool {
        timer != 0
            && timer != default_timer
            && timer.is_multiple_of(interval)
            && self.last_fired != Some(timer)
    }

    pub fn mark_fired(&mut self, timer: u32) {
        self.last_fired = Some(timer);
    }
}

/// Insert one new row at the ceiling.
///
/// The ceiling index moves up by one, the movement offset grows by one row
/// pitch (so every settled bubble shifts down a full row), and the new row
/// is filled with uniformly random palette colors. The generated row spans
/// columns `1..=num_cols-1`: the top row has always come up one short of
/// the configured width.
pub fn insert_ceiling_row(
    grid: &mut Grid,
    store: &mut GridStore,
    rng: &mut Pcg32,
    palette: &[ColorId],
) {
    grid.num_rows += 1;
    grid.movement += grid.row_pitch();

    let row = grid.num_rows;
    for col in 1..grid.num_cols {
        let color = palette[rng.random_range(0..palette.len())];
        let cell = Cell::new(row, col);
        store.insert(
            cell,
            Bubble::settled(grid.cell_to_pixel(cell), grid.radius(), color),
        );
    }

    info!("Ceiling row {} inserted ({} bubbles)", row, grid.num_cols - 1);
}
