//=========================================================================
// Movement Resolver
//=========================================================================
//
// Axis-separated position update against a collision model.
//
// Architecture:
//   held directions → MoveIntent → delta (speed per tick)
//   X tested at current Y → applied or dropped
//   Y tested at (possibly updated) X → applied or dropped
//
// Blocked movement is a no-op. Resolving the axes independently lets an
// entity slide along a wall it hits diagonally.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::DVec2;

//=== Internal Dependencies ===============================================

use super::tile_grid::Collision;

//=== MoveIntent ==========================================================

/// Held direction keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Per-axis delta with magnitude `speed`; opposing keys cancel.
    pub fn delta(&self, speed: f64) -> DVec2 {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -speed,
            (false, true) => speed,
            _ => 0.0,
        };

        DVec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn is_moving(&self) -> bool {
        self.delta(1.0) != DVec2::ZERO
    }
}

//=== Resolution ==========================================================

/// Returns the position reached by moving a `size` body at `position`
/// by `delta`, testing each axis separately against `world`.
pub fn resolve_movement<C>(world: &C, position: DVec2, size: DVec2, delta: DVec2) -> DVec2
where
    C: Collision + ?Sized,
{
    let mut resolved = position;

    if delta.x != 0.0 {
        let next_x = resolved.x + delta.x;
        if !world.is_blocked(next_x, resolved.y, size.x, size.y) {
            resolved.x = next_x;
        }
    }

    if delta.y != 0.0 {
        let next_y = resolved.y + delta.y;
        if !world.is_blocked(resolved.x, next_y, size.x, size.y) {
            resolved.y = next_y;
        }
    }

    resolved
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::{Tile, TileGrid};
    use std::cell::Cell;

    const SIZE: DVec2 = DVec2::new(32.0, 32.0);

    /// Floor everywhere except a wall column at col 3.
    fn wall_column_grid() -> TileGrid {
        let rows = (0..8)
            .map(|_| {
                (0..8)
                    .map(|col| if col == 3 { Tile::WALL } else { Tile::FLOOR })
                    .collect()
            })
            .collect();
        TileGrid::from_rows(rows, 32.0).unwrap()
    }

    struct CountingWorld {
        calls: Cell<usize>,
    }

    impl Collision for CountingWorld {
        fn is_blocked(&self, _x: f64, _y: f64, _w: f64, _h: f64) -> bool {
            self.calls.set(self.calls.get() + 1);
            false
        }
    }

    //=====================================================================
    // Intent
    //=====================================================================

    #[test]
    fn intent_maps_keys_to_signed_axes() {
        let intent = MoveIntent { up: true, right: true, ..Default::default() };
        assert_eq!(intent.delta(4.0), DVec2::new(4.0, -4.0));
        assert!(intent.is_moving());
    }

    #[test]
    fn opposing_keys_cancel() {
        let intent = MoveIntent { left: true, right: true, ..Default::default() };
        assert_eq!(intent.delta(4.0), DVec2::ZERO);
        assert!(!intent.is_moving());
    }

    //=====================================================================
    // Resolution
    //=====================================================================

    #[test]
    fn free_movement_applies_full_delta() {
        let grid = wall_column_grid();
        let moved = resolve_movement(&grid, DVec2::new(32.0, 64.0), SIZE, DVec2::new(4.0, 4.0));
        assert_eq!(moved, DVec2::new(36.0, 68.0));
    }

    #[test]
    fn diagonal_into_wall_slides_along_open_axis() {
        let grid = wall_column_grid();
        // Right edge flush against the wall column at x = 96
        let start = DVec2::new(64.0, 64.0);

        let moved = resolve_movement(&grid, start, SIZE, DVec2::new(4.0, 4.0));

        assert_eq!(moved.x, start.x);
        assert_eq!(moved.y, start.y + 4.0);
    }

    #[test]
    fn y_axis_is_tested_at_updated_x() {
        // Wall only at (row 2, col 2); moving right then down enters it
        let mut rows = vec![vec![Tile::FLOOR; 4]; 4];
        rows[2][2] = Tile::WALL;
        let grid = TileGrid::from_rows(rows, 32.0).unwrap();

        let start = DVec2::new(32.0, 32.0);
        let moved = resolve_movement(&grid, start, SIZE, DVec2::new(32.0, 32.0));

        assert_eq!(moved, DVec2::new(64.0, 32.0));
    }

    #[test]
    fn zero_delta_skips_collision_checks() {
        let world = CountingWorld { calls: Cell::new(0) };

        resolve_movement(&world, DVec2::ZERO, SIZE, DVec2::ZERO);
        assert_eq!(world.calls.get(), 0);

        resolve_movement(&world, DVec2::ZERO, SIZE, DVec2::new(0.0, 4.0));
        assert_eq!(world.calls.get(), 1);
    }

    #[test]
    fn missing_world_blocks_movement() {
        let none: Option<TileGrid> = None;
        let start = DVec2::new(64.0, 64.0);
        assert_eq!(resolve_movement(&none, start, SIZE, DVec2::new(4.0, 4.0)), start);
    }
}
