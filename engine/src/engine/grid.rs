// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{GAP_BRIDGE_ROW, GAP_ROWS, H, HALF_H, W};
use crate::engine::error::CircuitError;
use crate::engine::geometry::{Direction, Half, Hole};

/// Result of `Grid::try_place`.
///
/// On rejection nothing is marked and `terminus` is the origin, so callers may use either
/// `committed` or `terminus == origin` as the overlap signal. A committed one-hole segment also
/// ends on its origin; use `committed` wherever that can happen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placement {
    pub committed: bool,
    pub terminus: Hole,
}

impl Placement {
    fn rejected(origin: Hole) -> Self {
        Self {
            committed: false,
            terminus: origin,
        }
    }
}

/// Number of holes a segment actually covers.
///
/// A North wire leaving the bottom half and reaching the bridge row spends two of its holes of
/// length over the holeless gap, so it covers `length - 2` logical rows.
pub fn effective_span(
    origin_y: i32,
    length: u8,
    direction: Direction,
) -> Result<i32, CircuitError> {
    let len = i32::from(length);
    match direction {
        Direction::South => Err(CircuitError::UnsupportedDirection(Direction::South)),
        Direction::East | Direction::West => Ok(len),
        Direction::North => {
            if Half::of_row(origin_y) == Half::Bottom && origin_y + len >= GAP_BRIDGE_ROW {
                Ok(len - GAP_ROWS)
            } else {
                Ok(len)
            }
        }
    }
}

/// Cells a segment would cover, origin first. Cells may fall outside the board;
/// `try_place` rejects those.
pub fn footprint(
    origin: Hole,
    length: u8,
    direction: Direction,
) -> Result<Vec<Hole>, CircuitError> {
    let span = effective_span(origin.y, length, direction)?;
    Ok((0..span.max(0)).map(|i| origin.offset(direction, i)).collect())
}

/// Breadboard occupancy (row-major: `cells[y][x]`, 0 = free).
///
/// `Grid` is `Copy`; placement attempts work on a copy and commit by assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: [[u8; W]; H],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[0u8; W]; H],
        }
    }

    pub fn cells(&self) -> &[[u8; W]; H] {
        &self.cells
    }

    /// Out-of-board holes count as occupied.
    #[inline]
    pub fn is_occupied(&self, hole: Hole) -> bool {
        if !hole.in_bounds() {
            return true;
        }
        self.cells[hole.y as usize][hole.x as usize] != 0
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum()
    }

    #[inline]
    fn mark(&mut self, hole: Hole) {
        self.cells[hole.y as usize][hole.x as usize] = 1;
    }

    /// Atomically place a wire of `length` holes at `(origin_x, origin_y)`.
    ///
    /// Either every covered cell was free and is now marked, or the grid is untouched and the
    /// returned terminus equals the origin. South is rejected as unsupported.
    pub fn try_place(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        length: u8,
        direction: Direction,
    ) -> Result<Placement, CircuitError> {
        let origin = Hole::new(origin_x, origin_y);
        let cells = footprint(origin, length, direction)?;

        let Some(&terminus) = cells.last() else {
            return Ok(Placement::rejected(origin));
        };

        let mut attempt = *self;
        for &cell in &cells {
            if attempt.is_occupied(cell) {
                return Ok(Placement::rejected(origin));
            }
            attempt.mark(cell);
        }

        *self = attempt;
        Ok(Placement {
            committed: true,
            terminus,
        })
    }

    /// Same as `try_place` but takes the raw direction code used by asset tables.
    pub fn try_place_code(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        length: u8,
        direction_code: u8,
    ) -> Result<Placement, CircuitError> {
        let direction = Direction::from_code(direction_code)?;
        self.try_place(origin_x, origin_y, length, direction)
    }

    /// Top row first, with the physical center gap drawn between the halves.
    pub fn render_ascii(&self) -> String {
        let border = format!("+{}+\n", "-".repeat(W));
        let mut s = String::with_capacity((W + 3) * (H + 4));
        s.push_str(&border);
        for r in (0..H).rev() {
            s.push('|');
            for c in 0..W {
                s.push(if self.cells[r][c] == 0 { '.' } else { '#' });
            }
            s.push_str("|\n");
            if r == HALF_H {
                for _ in 0..GAP_ROWS {
                    s.push('|');
                    s.push_str(&" ".repeat(W));
                    s.push_str("|\n");
                }
            }
        }
        s.push_str(&border);
        s
    }
}
