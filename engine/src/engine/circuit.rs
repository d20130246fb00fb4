// engine/src/engine/circuit.rs
#![forbid(unsafe_code)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{BOTTOM_RAIL_ROW, TOP_RAIL_ROW};
use crate::engine::error::CircuitError;
use crate::engine::geometry::{Direction, Hole};
use crate::engine::grid::Grid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SegmentRole {
    BottomAnchor,
    Middle,
    TopAnchor,
}

/// One committed wire.
///
/// Only built from a committed `Grid::try_place`, so `terminus` is the exact last cell and the
/// covered cells are the straight run from `origin` to `terminus` in logical rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Segment {
    pub origin: Hole,
    pub terminus: Hole,
    /// Holes spanned by the physical wire (gap rows included for a gap-crossing North wire).
    pub length: u8,
    pub direction: Direction,
    pub role: SegmentRole,
}

impl Segment {
    pub fn cells(&self) -> impl Iterator<Item = Hole> + '_ {
        let dx = (self.terminus.x - self.origin.x).signum();
        let dy = (self.terminus.y - self.origin.y).signum();
        let n = (self.terminus.x - self.origin.x).abs() + (self.terminus.y - self.origin.y).abs();
        (0..=n).map(move |i| Hole::new(self.origin.x + dx * i, self.origin.y + dy * i))
    }
}

/// Ordered rail-to-rail chain of segments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Circuit {
    segments: Vec<Segment>,
}

impl Circuit {
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn bottom_anchor(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn top_anchor(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn middle(&self) -> &[Segment] {
        match self.segments.len() {
            0..=2 => &[],
            n => &self.segments[1..n - 1],
        }
    }

    pub fn occupied_cells(&self) -> Vec<Hole> {
        self.segments.iter().flat_map(|s| s.cells()).collect()
    }

    /// Rebuild the occupancy grid of this circuit.
    pub fn occupancy(&self) -> Result<Grid, CircuitError> {
        let mut grid = Grid::new();
        for s in &self.segments {
            let placed = grid.try_place(s.origin.x, s.origin.y, s.length, s.direction)?;
            if !placed.committed || placed.terminus != s.terminus {
                return Err(CircuitError::MalformedCircuit(format!(
                    "segment at {:?} does not replay onto the grid",
                    s.origin
                )));
            }
        }
        Ok(grid)
    }

    /// Check the structural invariants of a finished circuit.
    pub fn validate(&self) -> Result<(), CircuitError> {
        let bad = |msg: String| Err(CircuitError::MalformedCircuit(msg));

        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return bad("empty circuit".into());
        };
        if self.segments.len() < 2 {
            return bad("a circuit needs both rail anchors".into());
        }
        if first.role != SegmentRole::BottomAnchor || first.origin.y != BOTTOM_RAIL_ROW {
            return bad(format!("first segment is not a bottom rail anchor: {first:?}"));
        }
        if last.role != SegmentRole::TopAnchor || last.terminus.y != TOP_RAIL_ROW {
            return bad(format!("last segment is not a top rail anchor: {last:?}"));
        }
        if let Some(s) = self.middle().iter().find(|s| s.role != SegmentRole::Middle) {
            return bad(format!("interior segment with rail role: {s:?}"));
        }

        for pair in self.segments.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if !next.origin.same_strip(prev.terminus) || next.origin == prev.terminus {
                return bad(format!(
                    "segment at {:?} does not continue the strip of {:?}",
                    next.origin, prev.terminus
                ));
            }
        }

        let mut seen = HashSet::new();
        for cell in self.occupied_cells() {
            if !cell.in_bounds() {
                return bad(format!("cell {cell:?} is off the board"));
            }
            if !seen.insert(cell) {
                return bad(format!("cell {cell:?} is covered twice"));
            }
        }
        Ok(())
    }
}
