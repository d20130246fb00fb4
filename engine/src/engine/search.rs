// engine/src/engine/search.rs
#![forbid(unsafe_code)]

/*
Rail-to-rail path search

Phases
------
Anchoring   -> a BottomAnchor wire is plugged into a random power-rail hole and runs North
               into column `c` of the bottom half.
Extending   -> up to `max_extensions` steps; each step places at most one Middle wire that
               starts on the frontier's strip (same column and half, different row).
Finalizing  -> once a North wire has just landed in the top half on a rail-aligned column,
               a TopAnchor wire is dropped from the top rail onto the frontier's strip.
Restarting  -> extension budget spent without reaching the top rail: throw the attempt away
               and anchor again. Bounded by `max_restarts`.

Each attempt owns a fresh `Grid`. The sampler (and its RNG) lives across attempts and calls,
so the whole sequence of circuits is reproducible from one seed.
*/

use tracing::{debug, trace, warn};

use crate::engine::boundary::{is_aligned_with_rail, is_inside_boundary, rail_hole_to_column};
use crate::engine::circuit::{Circuit, Segment, SegmentRole};
use crate::engine::constants::{BOTTOM_RAIL_ROW, TOP_RAIL_ROW};
use crate::engine::error::CircuitError;
use crate::engine::geometry::{Direction, Half, Hole};
use crate::engine::grid::Grid;
use crate::engine::sampler::SegmentSampler;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// Extension steps per attempt before restarting.
    pub max_extensions: u32,
    /// Placement attempts per extension step before the step gives up.
    pub max_overlap_retries: u32,
    /// Restarts after the first attempt before giving up with `NoCircuitFound`.
    pub max_restarts: u32,
    /// Candidate draws per placement attempt while looking for one inside the board.
    pub max_boundary_draws: u32,
}

impl SearchConfig {
    pub const DEFAULT_MAX_EXTENSIONS: u32 = 14;
    pub const DEFAULT_MAX_OVERLAP_RETRIES: u32 = 5;
    pub const DEFAULT_MAX_RESTARTS: u32 = 1000;
    pub const DEFAULT_MAX_BOUNDARY_DRAWS: u32 = 256;
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_extensions: Self::DEFAULT_MAX_EXTENSIONS,
            max_overlap_retries: Self::DEFAULT_MAX_OVERLAP_RETRIES,
            max_restarts: Self::DEFAULT_MAX_RESTARTS,
            max_boundary_draws: Self::DEFAULT_MAX_BOUNDARY_DRAWS,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchPhase {
    Anchoring,
    Extending,
    Finalizing,
    Succeeded,
    Restarting,
}

/// Counters for one `find_circuit` call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Attempts thrown away before the successful one.
    pub restarts: u32,
    pub extension_steps: u32,
    /// `try_place` calls for middle wires.
    pub placement_attempts: u32,
    /// Middle-wire placements rejected by the grid.
    pub overlaps: u32,
    /// Candidates rejected by the boundary check before reaching the grid.
    pub boundary_rejections: u32,
    /// Extension steps that ran out of retries and placed nothing.
    pub empty_steps: u32,
    /// Top anchors rejected by the grid.
    pub finalize_overlaps: u32,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub circuit: Circuit,
    pub stats: SearchStats,
}

/// State of one path-construction attempt.
struct Attempt {
    grid: Grid,
    segments: Vec<Segment>,
    frontier: Hole,
    /// Direction of the wire that produced `frontier`.
    frontier_dir: Direction,
}

impl Attempt {
    fn only_anchor(&self) -> bool {
        self.segments.len() == 1
    }

    fn push(&mut self, segment: Segment) {
        self.frontier = segment.terminus;
        self.frontier_dir = segment.direction;
        self.segments.push(segment);
    }
}

/// Backtracking generator for rail-to-rail circuits.
#[derive(Clone)]
pub struct CircuitPathSearch {
    cfg: SearchConfig,
    sampler: SegmentSampler,
}

impl CircuitPathSearch {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SearchConfig::default())
    }

    pub fn with_config(seed: u64, cfg: SearchConfig) -> Self {
        Self::with_sampler(SegmentSampler::new(seed), cfg)
    }

    pub fn with_sampler(sampler: SegmentSampler, cfg: SearchConfig) -> Self {
        Self { cfg, sampler }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Build one circuit, restarting from a new rail hole whenever an attempt runs dry.
    ///
    /// Errors:
    /// - `NoCircuitFound` after `1 + max_restarts` failed attempts;
    /// - any fatal placement error (never retried).
    pub fn find_circuit(&mut self) -> Result<SearchOutcome, CircuitError> {
        let mut stats = SearchStats::default();
        let attempts = self.cfg.max_restarts.saturating_add(1);

        for attempt_idx in 0..attempts {
            if let Some(circuit) = self.run_attempt(&mut stats)? {
                debug!(
                    attempt = attempt_idx,
                    segments = circuit.len(),
                    phase = ?SearchPhase::Succeeded,
                    "circuit found"
                );
                return Ok(SearchOutcome { circuit, stats });
            }
            stats.restarts += 1;
            debug!(
                attempt = attempt_idx,
                phase = ?SearchPhase::Restarting,
                "extension budget spent"
            );
        }

        warn!(attempts, "giving up on circuit search");
        Err(CircuitError::NoCircuitFound { attempts })
    }

    fn run_attempt(&mut self, stats: &mut SearchStats) -> Result<Option<Circuit>, CircuitError> {
        let Some(mut attempt) = self.anchor()? else {
            return Ok(None);
        };

        for step in 0..self.cfg.max_extensions {
            stats.extension_steps += 1;

            if self.finalize_ready(&attempt) && self.finalize(&mut attempt, stats)? {
                trace!(step, "top rail reached");
                return Ok(Some(Circuit::from_segments(attempt.segments)));
            }

            if !self.extend(&mut attempt, stats)? {
                stats.empty_steps += 1;
            }
        }
        Ok(None)
    }

    fn anchor(&mut self) -> Result<Option<Attempt>, CircuitError> {
        let rail_hole = self.sampler.sample_rail_hole();
        let column = rail_hole_to_column(rail_hole);
        let length = self.sampler.sample_anchor_length();

        let mut grid = Grid::new();
        let placed = grid.try_place(column, BOTTOM_RAIL_ROW, length, Direction::North)?;
        debug_assert!(placed.committed, "anchor must fit on an empty grid");
        if !placed.committed {
            return Ok(None);
        }

        debug!(rail_hole, column, length, phase = ?SearchPhase::Anchoring, "bottom anchor placed");

        let origin = Hole::new(column, BOTTOM_RAIL_ROW);
        let mut attempt = Attempt {
            grid,
            segments: Vec::new(),
            frontier: origin,
            frontier_dir: Direction::North,
        };
        attempt.push(Segment {
            origin,
            terminus: placed.terminus,
            length,
            direction: Direction::North,
            role: SegmentRole::BottomAnchor,
        });
        Ok(Some(attempt))
    }

    /// A North wire just crossed into the top half and sits in a column with a rail hole above.
    fn finalize_ready(&self, attempt: &Attempt) -> bool {
        attempt.frontier.half() == Half::Top
            && attempt.frontier_dir == Direction::North
            && is_aligned_with_rail(attempt.frontier.x)
    }

    fn finalize(
        &mut self,
        attempt: &mut Attempt,
        stats: &mut SearchStats,
    ) -> Result<bool, CircuitError> {
        let frontier = attempt.frontier;
        let length = self.sampler.sample_final_length(frontier.y);
        // The wire hangs down from the top rail: rows `TOP_RAIL_ROW - length + 1 ..= TOP_RAIL_ROW`.
        let origin = Hole::new(frontier.x, TOP_RAIL_ROW - i32::from(length) + 1);

        let placed = attempt.grid.try_place(origin.x, origin.y, length, Direction::North)?;
        if !placed.committed {
            stats.finalize_overlaps += 1;
            debug!(x = origin.x, length, phase = ?SearchPhase::Finalizing, "top anchor overlaps");
            return Ok(false);
        }

        debug!(x = origin.x, length, phase = ?SearchPhase::Finalizing, "top anchor placed");
        attempt.push(Segment {
            origin,
            terminus: placed.terminus,
            length,
            direction: Direction::North,
            role: SegmentRole::TopAnchor,
        });
        Ok(true)
    }

    /// One extension step. Returns whether a middle wire was placed.
    fn extend(
        &mut self,
        attempt: &mut Attempt,
        stats: &mut SearchStats,
    ) -> Result<bool, CircuitError> {
        for retry in 0..self.cfg.max_overlap_retries {
            let Some((origin, length, direction)) = self.draw_candidate(attempt, stats) else {
                continue;
            };

            stats.placement_attempts += 1;
            let placed = attempt.grid.try_place(origin.x, origin.y, length, direction)?;
            if !placed.committed {
                stats.overlaps += 1;
                trace!(retry, x = origin.x, y = origin.y, length, ?direction, "overlap");
                continue;
            }

            debug!(
                x = origin.x,
                y = origin.y,
                length,
                ?direction,
                end_x = placed.terminus.x,
                end_y = placed.terminus.y,
                phase = ?SearchPhase::Extending,
                "middle wire placed"
            );
            attempt.push(Segment {
                origin,
                terminus: placed.terminus,
                length,
                direction,
                role: SegmentRole::Middle,
            });
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw (origin, length, direction) until the candidate stays on the board.
    fn draw_candidate(
        &mut self,
        attempt: &Attempt,
        stats: &mut SearchStats,
    ) -> Option<(Hole, u8, Direction)> {
        let frontier = attempt.frontier;
        let half = frontier.half();
        // North never stays inside the board from the top half.
        let excluded: &[Direction] = match half {
            Half::Bottom => &[],
            Half::Top => &[Direction::North],
        };

        for _ in 0..self.cfg.max_boundary_draws {
            let row = if attempt.only_anchor() {
                let anchor_len = attempt.segments[0].length;
                self.sampler.sample_row_above_anchor(anchor_len)
            } else {
                self.sampler.sample_row_in_half(half, frontier.y)
            };
            let direction = self.sampler.sample_direction(excluded)?;
            let length = self.sampler.sample_length();

            if is_inside_boundary(frontier.x, row, length, direction) {
                return Some((Hole::new(frontier.x, row), length, direction));
            }
            stats.boundary_rejections += 1;
        }
        None
    }
}
