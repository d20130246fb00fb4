// engine/src/engine/geometry.rs
#![forbid(unsafe_code)]

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{
    BOTTOM_HALF_TOP_ROW, HALF_H, MAX_COL, MAX_ROW, TOP_HALF_LAST_FREE_ROW,
};
use crate::engine::error::CircuitError;

/// Wire direction, encoded 0..=3 in the order South, East, North, West.
///
/// South is kept so that codes round-trip, but no placement routine accepts it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    South,
    East,
    North,
    West,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        use Direction::*;
        &[South, East, North, West]
    }

    /// Directions an interior segment may be sampled from.
    pub fn placeable() -> &'static [Direction] {
        use Direction::*;
        &[East, North, West]
    }

    pub fn code(self) -> u8 {
        use Direction::*;
        match self {
            South => 0,
            East => 1,
            North => 2,
            West => 3,
        }
    }

    /// Inverse of `code()`. Unknown codes are a fatal input error.
    pub fn from_code(code: u8) -> Result<Self, CircuitError> {
        use Direction::*;
        match code {
            0 => Ok(South),
            1 => Ok(East),
            2 => Ok(North),
            3 => Ok(West),
            _ => Err(CircuitError::InvalidDirection(code)),
        }
    }

    /// Visual rotation around the board normal, 90 degrees per code step.
    pub fn rotation_degrees(self) -> u16 {
        90 * u16::from(self.code())
    }

    /// Unit step (dx, dy) in logical grid coordinates.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        use Direction::*;
        match self {
            South => (0, -1),
            East => (1, 0),
            North => (0, 1),
            West => (-1, 0),
        }
    }
}

/// One half of the board. Every column of a half is a single connected strip.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Half {
    Bottom,
    Top,
}

impl Half {
    pub fn of_row(y: i32) -> Self {
        if y <= BOTTOM_HALF_TOP_ROW {
            Half::Bottom
        } else {
            Half::Top
        }
    }

    /// Rows of this half.
    pub fn rows(self) -> RangeInclusive<i32> {
        match self {
            Half::Bottom => 0..=BOTTOM_HALF_TOP_ROW,
            Half::Top => (HALF_H as i32)..=MAX_ROW,
        }
    }

    /// Rows a middle segment may start on. The top rail row is never a starting row.
    pub fn origin_rows(self) -> RangeInclusive<i32> {
        match self {
            Half::Bottom => 0..=BOTTOM_HALF_TOP_ROW,
            Half::Top => (HALF_H as i32)..=TOP_HALF_LAST_FREE_ROW,
        }
    }
}

/// A hole addressed by logical (column, row).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hole {
    pub x: i32,
    pub y: i32,
}

impl Hole {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..=MAX_COL).contains(&self.x) && (0..=MAX_ROW).contains(&self.y)
    }

    #[inline]
    pub fn half(self) -> Half {
        Half::of_row(self.y)
    }

    /// Same column and same half: the two holes are electrically joined by the board.
    #[inline]
    pub fn same_strip(self, other: Hole) -> bool {
        self.x == other.x && self.half() == other.half()
    }

    #[inline]
    pub fn offset(self, direction: Direction, n: i32) -> Hole {
        let (dx, dy) = direction.step();
        Hole::new(self.x + dx * n, self.y + dy * n)
    }
}
