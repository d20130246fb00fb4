// engine/src/engine/emitter.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::engine::circuit::{Circuit, SegmentRole};
use crate::engine::constants::{BOTTOM_HALF_TOP_ROW, GAP_ROWS};
use crate::engine::geometry::Direction;

/// What the scene collaborator needs to instantiate and orient one wire.
///
/// `row` is a physical board row (the two gap rows are counted).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub column: i32,
    pub row: i32,
    pub length: u8,
    pub direction: Direction,
    pub role: SegmentRole,
}

#[inline]
pub fn physical_row(logical_row: i32) -> i32 {
    if logical_row > BOTTOM_HALF_TOP_ROW {
        logical_row + GAP_ROWS
    } else {
        logical_row
    }
}

/// One record per segment, in circuit order.
pub fn emit(circuit: &Circuit) -> Vec<PlacementRecord> {
    circuit
        .segments()
        .iter()
        .map(|s| PlacementRecord {
            column: s.origin.x,
            row: physical_row(s.origin.y),
            length: s.length,
            direction: s.direction,
            role: s.role,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::circuit::Segment;
    use crate::engine::geometry::Hole;

    #[test]
    fn gap_offset_applies_to_top_half_only() {
        assert_eq!(physical_row(0), 0);
        assert_eq!(physical_row(4), 4);
        assert_eq!(physical_row(5), 7);
        assert_eq!(physical_row(9), 11);
    }

    #[test]
    fn records_follow_segment_order_and_roles() {
        let c = Circuit::from_segments(vec![
            Segment {
                origin: Hole::new(3, 0),
                terminus: Hole::new(3, 1),
                length: 2,
                direction: Direction::North,
                role: SegmentRole::BottomAnchor,
            },
            Segment {
                origin: Hole::new(3, 4),
                terminus: Hole::new(3, 7),
                length: 6,
                direction: Direction::North,
                role: SegmentRole::Middle,
            },
            Segment {
                origin: Hole::new(3, 8),
                terminus: Hole::new(3, 9),
                length: 2,
                direction: Direction::North,
                role: SegmentRole::TopAnchor,
            },
        ]);

        let recs = emit(&c);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].role, SegmentRole::BottomAnchor);
        assert_eq!((recs[0].column, recs[0].row), (3, 0));
        assert_eq!((recs[1].row, recs[1].length), (4, 6));
        assert_eq!(recs[2].role, SegmentRole::TopAnchor);
        assert_eq!(recs[2].row, 10);
    }
}
