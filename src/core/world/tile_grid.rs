//=========================================================================
// Tile Grid
//=========================================================================
//
// Immutable wall map answering rectangle occupancy queries.
//
// Architecture:
//   (row, col) → Tile { is_wall }       row-major, rectangular
//   world rect → tile index range → any wall / out of bounds → blocked
//
// Fail-closed: tiles outside the grid are walls, and a missing grid
// blocks everything.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::GridError;

//=== Tile ================================================================

/// Per-cell properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub is_wall: bool,
}

impl Tile {
    pub const FLOOR: Self = Self { is_wall: false };
    pub const WALL: Self = Self { is_wall: true };
}

//=== Collision ===========================================================

/// Occupancy query used by the movement resolver.
pub trait Collision {
    /// Returns `true` if the `width` × `height` rectangle whose top-left
    /// corner is at (`x`, `y`) overlaps anything solid.
    fn is_blocked(&self, x: f64, y: f64, width: f64, height: f64) -> bool;
}

/// No map loaded: block all movement.
impl<C: Collision> Collision for Option<C> {
    fn is_blocked(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        match self {
            Some(grid) => grid.is_blocked(x, y, width, height),
            None => true,
        }
    }
}

//=== TileGrid ============================================================

/// Rectangular grid of tiles, `tile_size` world units per side.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    columns: usize,
    rows: usize,
    tile_size: f64,
    tiles: Vec<Tile>,
}

impl TileGrid {
    //--- Construction -----------------------------------------------------

    /// Builds a grid from rows of tiles.
    ///
    /// # Errors
    ///
    /// Fails if there are no tiles, if any row's length differs from the
    /// first row's, or if `tile_size` is not a positive finite number.
    pub fn from_rows(rows: Vec<Vec<Tile>>, tile_size: f64) -> Result<Self, GridError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::InvalidTileSize(tile_size));
        }

        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(GridError::Empty);
        }

        let row_count = rows.len();
        let mut tiles = Vec::with_capacity(columns * row_count);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(GridError::Ragged {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
            tiles.extend(row);
        }

        Ok(Self {
            columns,
            rows: row_count,
            tile_size,
            tiles,
        })
    }

    /// Open floor enclosed by a one-tile wall ring.
    pub fn bordered(columns: usize, rows: usize, tile_size: f64) -> Result<Self, GridError> {
        let grid = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|col| {
                        let edge = row == 0 || row + 1 == rows || col == 0 || col + 1 == columns;
                        if edge { Tile::WALL } else { Tile::FLOOR }
                    })
                    .collect()
            })
            .collect();

        Self::from_rows(grid, tile_size)
    }

    /// Parses an ASCII map: `#` is a wall, `.` is floor.
    ///
    /// Blank lines and trailing whitespace are ignored.
    pub fn parse(text: &str, tile_size: f64) -> Result<Self, GridError> {
        let mut rows = Vec::new();

        for (line_index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let row = line
                .chars()
                .enumerate()
                .map(|(column, ch)| match ch {
                    '#' => Ok(Tile::WALL),
                    '.' => Ok(Tile::FLOOR),
                    other => Err(GridError::InvalidCell {
                        line: line_index + 1,
                        column: column + 1,
                        found: other,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Self::from_rows(rows, tile_size)
    }

    //--- Accessors --------------------------------------------------------

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Tile at (`row`, `col`), `None` outside the grid.
    pub fn tile(&self, row: i64, col: i64) -> Option<Tile> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.tiles.get(row * self.columns + col).copied()
    }

    /// Iterates wall tiles as (row, col).
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_wall)
            .map(|(index, _)| (index / self.columns, index % self.columns))
    }

    fn tile_index(&self, coordinate: f64) -> i64 {
        (coordinate / self.tile_size).floor() as i64
    }
}

impl Collision for TileGrid {
    fn is_blocked(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        // Far edge uses (edge - 1) so a rect flush with a tile boundary
        // does not claim the next tile; a rect under one unit still
        // covers the tile its origin is in
        let min_col = self.tile_index(x);
        let max_col = self.tile_index(x + width - 1.0).max(min_col);
        let min_row = self.tile_index(y);
        let max_row = self.tile_index(y + height - 1.0).max(min_row);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                match self.tile(row, col) {
                    Some(tile) if !tile.is_wall => {}
                    _ => return true,
                }
            }
        }

        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f64 = 32.0;

    fn open_grid() -> TileGrid {
        TileGrid::bordered(10, 10, TILE).unwrap()
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn bordered_grid_has_wall_ring() {
        let grid = open_grid();

        assert_eq!(grid.tile(0, 5), Some(Tile::WALL));
        assert_eq!(grid.tile(9, 5), Some(Tile::WALL));
        assert_eq!(grid.tile(5, 0), Some(Tile::WALL));
        assert_eq!(grid.tile(5, 9), Some(Tile::WALL));
        assert_eq!(grid.tile(5, 5), Some(Tile::FLOOR));
        assert_eq!(grid.walls().count(), 36);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![Tile::FLOOR; 3], vec![Tile::FLOOR; 2]];
        let err = TileGrid::from_rows(rows, TILE).unwrap_err();
        assert!(matches!(err, GridError::Ragged { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(TileGrid::from_rows(vec![], TILE), Err(GridError::Empty)));
        assert!(matches!(TileGrid::from_rows(vec![vec![]], TILE), Err(GridError::Empty)));
    }

    #[test]
    fn non_positive_tile_size_is_rejected() {
        assert!(matches!(
            TileGrid::bordered(3, 3, 0.0),
            Err(GridError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn parse_reads_walls_and_floor() {
        let grid = TileGrid::parse("###\n#.#\n\n###\n", TILE).unwrap();

        assert_eq!((grid.columns(), grid.rows()), (3, 3));
        assert_eq!(grid.tile(1, 1), Some(Tile::FLOOR));
        assert_eq!(grid.tile(1, 0), Some(Tile::WALL));
    }

    #[test]
    fn parse_reports_unknown_cell() {
        let err = TileGrid::parse("##\n#x\n", TILE).unwrap_err();
        assert!(matches!(err, GridError::InvalidCell { line: 2, column: 2, found: 'x' }));
    }

    //=====================================================================
    // Occupancy
    //=====================================================================

    #[test]
    fn rect_inside_floor_tile_is_free() {
        let grid = open_grid();
        assert!(!grid.is_blocked(64.0, 64.0, 32.0, 32.0));
        assert!(!grid.is_blocked(70.5, 99.25, 10.0, 10.0));
    }

    #[test]
    fn rect_touching_wall_tile_is_blocked() {
        let grid = open_grid();
        // Overlaps column 0 by one unit
        assert!(grid.is_blocked(31.0, 64.0, 32.0, 32.0));
        // Overlaps the bottom wall row
        assert!(grid.is_blocked(64.0, 9.0 * TILE - 31.0, 32.0, 32.0));
    }

    #[test]
    fn flush_far_edge_does_not_claim_next_tile() {
        let grid = open_grid();
        // Occupies exactly columns 1..=8; x + width lands on column 9's edge
        assert!(!grid.is_blocked(TILE, TILE, 8.0 * TILE, TILE));
        assert!(grid.is_blocked(TILE, TILE, 8.0 * TILE + 1.0, TILE));
    }

    #[test]
    fn sub_unit_rect_still_covers_its_tile() {
        let grid = open_grid();
        // Inside wall column 9
        assert!(grid.is_blocked(288.2, 40.0, 0.5, 0.5));
        assert!(grid.is_blocked(288.2, 40.0, 0.0, 0.0));
        // Inside a floor tile
        assert!(!grid.is_blocked(100.2, 100.2, 0.5, 0.5));
        assert!(!grid.is_blocked(100.2, 100.2, 0.0, 0.0));
    }

    #[test]
    fn out_of_bounds_is_blocked_without_walls() {
        let rows = vec![vec![Tile::FLOOR; 4]; 4];
        let grid = TileGrid::from_rows(rows, TILE).unwrap();

        assert!(!grid.is_blocked(0.0, 0.0, 32.0, 32.0));
        assert!(grid.is_blocked(-1.0, 0.0, 32.0, 32.0));
        assert!(grid.is_blocked(0.0, -0.5, 32.0, 32.0));
        assert!(grid.is_blocked(97.0, 0.0, 32.0, 32.0));
        assert!(grid.is_blocked(0.0, 200.0, 32.0, 32.0));
    }

    #[test]
    fn missing_grid_blocks_everything() {
        let none: Option<TileGrid> = None;
        assert!(none.is_blocked(64.0, 64.0, 1.0, 1.0));

        let some = Some(open_grid());
        assert!(!some.is_blocked(64.0, 64.0, 1.0, 1.0));
    }
}
