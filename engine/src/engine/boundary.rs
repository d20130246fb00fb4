// engine/src/engine/boundary.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{
    BOTTOM_HALF_TOP_ROW, GAP_ROWS, HALF_H, MAX_COL, RAIL_FIRST_COL, RAIL_GROUP, RAIL_PERIOD,
    TOP_HALF_LAST_FREE_ROW,
};
use crate::engine::error::CircuitError;
use crate::engine::geometry::Direction;

/// Does a candidate segment stay on the board (and cross the center gap correctly)?
///
/// - South: never.
/// - East/West: the span must not run past column 62 / below column 0.
/// - North: only from the bottom half, and the wire must land on rows 5..=8 of the top half
///   so that at least one row is left for the top rail anchor.
pub fn is_inside_boundary(x: i32, y: i32, length: u8, direction: Direction) -> bool {
    let len = i32::from(length);
    match direction {
        Direction::South => false,
        Direction::East => x + len <= MAX_COL,
        Direction::West => x - len >= 0,
        Direction::North => {
            if !(0..=BOTTOM_HALF_TOP_ROW).contains(&y) {
                return false;
            }
            // `length` counts holes, so a wire of n holes ends n - 1 rows further.
            let projected = y - GAP_ROWS + len - 1;
            ((HALF_H as i32)..=TOP_HALF_LAST_FREE_ROW).contains(&projected)
        }
    }
}

/// Raw-code variant of `is_inside_boundary`. An unknown code is an error, not `false`.
pub fn is_inside_boundary_code(
    x: i32,
    y: i32,
    length: u8,
    direction_code: u8,
) -> Result<bool, CircuitError> {
    let direction = Direction::from_code(direction_code)?;
    Ok(is_inside_boundary(x, y, length, direction))
}

/// Columns a rail anchor can land on without sitting next to a power-bus gap column
/// (7, 13, 19, ...). Columns at the very edges are never aligned.
#[inline]
pub fn is_aligned_with_rail(column: i32) -> bool {
    (column - 1).rem_euclid(RAIL_PERIOD) != 0 && column > 1 && column < MAX_COL - 1
}

/// Map a power-rail hole index (0..50) to its board column.
///
/// Rail holes come in groups of five with one column skipped between groups:
/// holes 0..=4 -> columns 2..=6, holes 5..=9 -> columns 8..=12, and so on.
#[inline]
pub fn rail_hole_to_column(hole: u32) -> i32 {
    (hole / RAIL_GROUP + hole) as i32 + RAIL_FIRST_COL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::RAIL_HOLES;

    #[test]
    fn east_edge() {
        assert!(!is_inside_boundary(60, 0, 5, Direction::East));
        assert!(is_inside_boundary(60, 0, 2, Direction::East));
        assert!(!is_inside_boundary(61, 3, 2, Direction::East));
    }

    #[test]
    fn west_edge() {
        assert!(is_inside_boundary(5, 7, 5, Direction::West));
        assert!(!is_inside_boundary(5, 7, 6, Direction::West));
    }

    #[test]
    fn north_must_land_in_upper_half_with_slack() {
        // projected = 3 - 2 + 2 - 1 = 2
        assert!(!is_inside_boundary(0, 3, 2, Direction::North));
        // projected = 3 - 2 + 5 - 1 = 5
        assert!(is_inside_boundary(0, 3, 5, Direction::North));
        // the row drives the projection, not the column: 0 - 2 + 5 - 1 = 2
        assert!(!is_inside_boundary(3, 0, 5, Direction::North));
        // projected = 4 - 2 + 6 - 1 = 7
        assert!(is_inside_boundary(3, 4, 6, Direction::North));
        // projected = 4 - 2 + 7 - 1 = 8, last free row
        assert!(is_inside_boundary(3, 4, 7, Direction::North));
        // projected = 9 would hit the rail row
        assert!(!is_inside_boundary(3, 4, 8, Direction::North));
    }

    #[test]
    fn north_from_top_half_is_never_inside() {
        for y in 5..=9 {
            for len in 1..=10 {
                assert!(!is_inside_boundary(30, y, len, Direction::North));
            }
        }
    }

    #[test]
    fn south_is_never_inside() {
        for y in 0..=9 {
            assert!(!is_inside_boundary(30, y, 2, Direction::South));
        }
    }

    #[test]
    fn raw_code_rejects_unknown_direction() {
        assert_eq!(is_inside_boundary_code(60, 0, 2, 1), Ok(true));
        assert_eq!(is_inside_boundary_code(60, 0, 2, 0), Ok(false));
        assert_eq!(
            is_inside_boundary_code(60, 0, 2, 4),
            Err(CircuitError::InvalidDirection(4))
        );
    }

    #[test]
    fn rail_alignment_skips_bus_gap_columns() {
        assert!(!is_aligned_with_rail(0));
        assert!(!is_aligned_with_rail(1));
        for c in [2, 3, 4, 5, 6, 8, 9, 12, 14, 60] {
            assert!(is_aligned_with_rail(c), "column {c}");
        }
        for c in [7, 13, 19, 25, 31, 37, 43, 49, 55] {
            assert!(!is_aligned_with_rail(c), "column {c}");
        }
        assert!(!is_aligned_with_rail(61));
        assert!(!is_aligned_with_rail(62));
    }

    #[test]
    fn rail_holes_map_to_aligned_columns() {
        assert_eq!(rail_hole_to_column(0), 2);
        assert_eq!(rail_hole_to_column(4), 6);
        assert_eq!(rail_hole_to_column(5), 8);
        assert_eq!(rail_hole_to_column(RAIL_HOLES - 1), 60);

        let mut prev = None;
        for h in 0..RAIL_HOLES {
            let c = rail_hole_to_column(h);
            assert!(is_aligned_with_rail(c), "hole {h} -> column {c}");
            if let Some(p) = prev {
                assert!(c > p);
            }
            prev = Some(c);
        }
    }
}
