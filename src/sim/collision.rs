//! Projectile-to-grid snap resolution.
//!
//! Purely advisory: the resolver reads the store and reports the cell a
//! moving projectile must settle into, or `None` while it is still in free
//! flight. The caller performs the actual insert.

use glam::Vec2;

use super::grid::GridStore;
use super::hex::{Cell, Grid};

/// Resolve a projectile against the grid.
///
/// A projectile whose top edge reaches the ceiling always snaps (into the
/// row above the highest occupied row), so shots that miss every bubble
/// still settle instead of escaping the board. Otherwise the estimated
/// cell and its 6 neighbors are tested for circle-circle overlap; on a hit,
/// the nearest unoccupied candidate with an in-bounds column wins,
/// tie-broken purely by distance to the impact point.
pub fn resolve(store: &GridStore, grid: &Grid, pos: Vec2, radius: f32) -> Option<Cell> {
    if pos.y - radius <= 0.0 {
        return Some(ceiling_snap(store, grid, pos));
    }

    let estimate = grid.pixel_to_cell(pos);
    let mut candidates: Vec<Cell> = estimate.neighbors().to_vec();
    candidates.push(estimate);

    let hit = candidates.iter().any(|&cell| {
        store.contains(cell) && {
            let center = grid.cell_to_pixel(cell);
            center.distance_squared(pos) <= (radius + grid.radius()).powi(2)
        }
    });
    if !hit {
        return None;
    }

    candidates.sort_by(|&a, &b| {
        let da = grid.cell_to_pixel(a).distance_squared(pos);
        let db = grid.cell_to_pixel(b).distance_squared(pos);
        da.total_cmp(&db)
    });
    candidates
        .into_iter()
        .find(|&cell| !store.contains(cell) && grid.in_cols(cell))
}

/// Nearest free in-bounds column in the row above the highest occupied row
/// (or the ceiling row itself when the board is empty). That row holds no
/// bubbles, so a free column always exists.
fn ceiling_snap(store: &GridStore, grid: &Grid, pos: Vec2) -> Cell {
    let row = store.max_row().map_or(grid.num_rows, |r| r + 1);
    let mut best = Cell::new(row, 1);
    let mut best_dist = f32::INFINITY;
    for col in 1..=grid.num_cols {
        let cell = Cell::new(row, col);
        if store.contains(cell) {
            continue;
        }
        let dist = grid.cell_to_pixel(cell).distance_squared(pos);
        if dist < best_dist {
            best = cell;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bubble, ColorId};
    use proptest::prelude::*;

    fn test_grid() -> Grid {
        Grid::new(10, 12, 40.0, 2.0, 20.0, 20.0, 640.0)
    }

    fn occupy(store: &mut GridStore, grid: &Grid, cell: Cell) {
        store.insert(
            cell,
            Bubble::settled(grid.cell_to_pixel(cell), grid.radius(), ColorId(0)),
        );
    }

    #[test]
    fn test_free_flight_reports_no_collision() {
        let grid = test_grid();
        let mut store = GridStore::new();
        occupy(&mut store, &grid, Cell::new(10, 5));

        // Far below the only bubble.
        let pos = grid.cell_to_pixel(Cell::new(2, 5));
        assert_eq!(resolve(&store, &grid, pos, grid.radius()), None);
    }

    #[test]
    fn test_touching_bubble_snaps_to_nearest_free_cell() {
        let grid = test_grid();
        let mut store = GridStore::new();
        let target = Cell::new(10, 5);
        occupy(&mut store, &grid, target);

        // Three quarters of the way from the occupied cell toward the free
        // cell below it: inside overlap range, nearest free cell is the one
        // below.
        let below = Cell::new(9, 5);
        let target_center = grid.cell_to_pixel(target);
        let pos = target_center + (grid.cell_to_pixel(below) - target_center) * 0.75;
        let cell = resolve(&store, &grid, pos, grid.radius()).expect("overlap must snap");
        assert_eq!(cell, below);
    }

    #[test]
    fn test_occupied_estimate_falls_back_to_neighbor() {
        let grid = test_grid();
        let mut store = GridStore::new();
        let target = Cell::new(10, 5);
        occupy(&mut store, &grid, target);

        // Dead-center on the occupied cell: the snap must pick a free
        // neighbor, never the occupied cell itself.
        let pos = grid.cell_to_pixel(target);
        let cell = resolve(&store, &grid, pos, grid.radius()).expect("overlap must snap");
        assert_ne!(cell, target);
        assert!(target.neighbors().contains(&cell));
    }

    #[test]
    fn test_nearest_distance_tie_break() {
        let grid = test_grid();
        let mut store = GridStore::new();
        occupy(&mut store, &grid, Cell::new(10, 5));
        occupy(&mut store, &grid, Cell::new(10, 6));

        // Just under the seam between the two occupied cells: both
        // intersect, and the winner is the nearest free candidate, not
        // whichever occupied neighbor was found first.
        let left = grid.cell_to_pixel(Cell::new(10, 5));
        let right = grid.cell_to_pixel(Cell::new(10, 6));
        let pos = Vec2::new((left.x + right.x) / 2.0, left.y + 8.0);
        let cell = resolve(&store, &grid, pos, grid.radius()).expect("overlap must snap");
        assert_eq!(cell, Cell::new(9, 5));
    }

    #[test]
    fn test_out_of_bounds_column_never_returned() {
        let grid = test_grid();
        let mut store = GridStore::new();
        // Occupy the left edge; approach from outside the board so the
        // estimated column is 0.
        let edge = Cell::new(10, 1);
        occupy(&mut store, &grid, edge);
        let pos = grid.cell_to_pixel(edge) + Vec2::new(-grid.diameter * 0.6, 0.0);
        if let Some(cell) = resolve(&store, &grid, pos, grid.radius()) {
            assert!(cell.col >= 1 && cell.col <= grid.num_cols);
        }
    }

    #[test]
    fn test_ceiling_snap_on_empty_board_uses_ceiling_row() {
        let grid = test_grid();
        let store = GridStore::new();
        let cell = resolve(&store, &grid, Vec2::new(250.0, 10.0), grid.radius())
            .expect("ceiling crossings always snap");
        assert_eq!(cell.row, grid.num_rows);
    }

    #[test]
    fn test_ceiling_snap_lands_above_highest_row() {
        let grid = test_grid();
        let mut store = GridStore::new();
        occupy(&mut store, &grid, Cell::new(10, 3));
        let cell = resolve(&store, &grid, Vec2::new(120.0, 10.0), grid.radius())
            .expect("ceiling crossings always snap");
        assert_eq!(cell.row, 11);
    }

    proptest! {
        #[test]
        fn ceiling_shots_always_snap_in_bounds(x in -100.0f32..600.0) {
            let grid = test_grid();
            let store = GridStore::new();
            let cell = resolve(&store, &grid, Vec2::new(x, 5.0), grid.radius())
                .expect("ceiling crossings always snap");
            prop_assert!(cell.col >= 1 && cell.col <= grid.num_cols);
        }
    }
}
