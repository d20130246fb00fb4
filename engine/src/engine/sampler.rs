// engine/src/engine/sampler.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::constants::{
    BOTTOM_HALF_TOP_ROW, MAX_ANCHOR_LEN, MIN_ANCHOR_LEN, RAIL_HOLES, TOP_HALF_LAST_FREE_ROW,
};
use crate::engine::geometry::{Direction, Half};

/// Middle-wire lengths; drawing a uniform index gives the weighted distribution
/// (length 5 is by far the most common, 2..=4 and 6..=10 tail off).
pub const LENGTH_WEIGHTS: [u8; 35] = [
    2, 2, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 8, 8, 9,
    9, 10, 10,
];

/// Random draws for the path search. Knows nothing about the grid.
///
/// The RNG is owned here so the whole layout stream is reproducible from one seed.
#[derive(Clone)]
pub struct SegmentSampler {
    rng: StdRng,
}

impl SegmentSampler {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn sample_length(&mut self) -> u8 {
        LENGTH_WEIGHTS[self.rng.gen_range(0..LENGTH_WEIGHTS.len())]
    }

    /// Uniform over {East, North, West} minus `excluding`. `None` if nothing is left.
    pub fn sample_direction(&mut self, excluding: &[Direction]) -> Option<Direction> {
        let candidates: Vec<Direction> = Direction::placeable()
            .iter()
            .copied()
            .filter(|d| !excluding.contains(d))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// Power-rail hole index in `0..RAIL_HOLES`.
    pub fn sample_rail_hole(&mut self) -> u32 {
        self.rng.gen_range(0..RAIL_HOLES)
    }

    pub fn sample_anchor_length(&mut self) -> u8 {
        self.rng.gen_range(MIN_ANCHOR_LEN..=MAX_ANCHOR_LEN)
    }

    /// Starting row of the first middle wire: on the anchor's strip, above the anchor
    /// (the anchor fills rows `0..anchor_len`).
    pub fn sample_row_above_anchor(&mut self, anchor_len: u8) -> i32 {
        let free = (BOTTOM_HALF_TOP_ROW + 1 - i32::from(anchor_len)).max(1);
        BOTTOM_HALF_TOP_ROW - self.rng.gen_range(0..free)
    }

    /// Uniform starting row in `half`, never equal to `excluding`.
    pub fn sample_row_in_half(&mut self, half: Half, excluding: i32) -> i32 {
        let rows = half.origin_rows();
        let (lo, hi) = (*rows.start(), *rows.end());
        if !rows.contains(&excluding) {
            return self.rng.gen_range(lo..=hi);
        }
        let row = self.rng.gen_range(lo..hi);
        if row >= excluding { row + 1 } else { row }
    }

    /// Length of the top rail anchor dropped onto a frontier at `frontier_y`:
    /// `1 + random(8 - frontier_y)`, where an empty range yields 0.
    pub fn sample_final_length(&mut self, frontier_y: i32) -> u8 {
        let room = (TOP_HALF_LAST_FREE_ROW - frontier_y).max(0);
        let extra = if room > 0 { self.rng.gen_range(0..room) } else { 0 };
        (1 + extra) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::{MAX_MIDDLE_LEN, MIN_MIDDLE_LEN};

    #[test]
    fn weight_table_peaks_at_five() {
        let count = |v: u8| LENGTH_WEIGHTS.iter().filter(|&&l| l == v).count();
        for l in MIN_MIDDLE_LEN..=MAX_MIDDLE_LEN {
            assert!(count(l) >= 2, "length {l} missing from table");
            if l != 5 {
                assert!(count(5) > count(l));
            }
        }
        assert_eq!(count(5), 14);
    }

    #[test]
    fn lengths_stay_in_range() {
        let mut s = SegmentSampler::new(7);
        let mut seen = [0u32; 11];
        for _ in 0..5000 {
            let l = s.sample_length();
            assert!((MIN_MIDDLE_LEN..=MAX_MIDDLE_LEN).contains(&l));
            seen[l as usize] += 1;
        }
        let mode = (0..seen.len()).max_by_key(|&i| seen[i]).unwrap();
        assert_eq!(mode, 5);
    }

    #[test]
    fn directions_never_south_and_respect_exclusion() {
        let mut s = SegmentSampler::new(11);
        let mut seen_north = false;
        for _ in 0..500 {
            let d = s.sample_direction(&[]).unwrap();
            assert_ne!(d, Direction::South);
            seen_north |= d == Direction::North;

            let d = s.sample_direction(&[Direction::North]).unwrap();
            assert!(matches!(d, Direction::East | Direction::West));
        }
        assert!(seen_north);
        assert_eq!(s.sample_direction(Direction::placeable()), None);
    }

    #[test]
    fn row_in_half_excludes_frontier_row() {
        let mut s = SegmentSampler::new(3);
        for _ in 0..500 {
            let r = s.sample_row_in_half(Half::Bottom, 2);
            assert!((0..=4).contains(&r) && r != 2);

            let r = s.sample_row_in_half(Half::Top, 8);
            assert!((5..=7).contains(&r));

            // Excluded row outside the origin rows leaves the full range.
            let r = s.sample_row_in_half(Half::Top, 9);
            assert!((5..=8).contains(&r));
        }
    }

    #[test]
    fn row_above_anchor_clears_the_anchor() {
        let mut s = SegmentSampler::new(5);
        for len in MIN_ANCHOR_LEN..=MAX_ANCHOR_LEN {
            for _ in 0..200 {
                let r = s.sample_row_above_anchor(len);
                assert!(r >= i32::from(len) && r <= 4, "len={len} row={r}");
            }
        }
    }

    #[test]
    fn anchor_and_rail_draws_stay_in_range() {
        let mut s = SegmentSampler::new(9);
        for _ in 0..1000 {
            assert!((1..=4).contains(&s.sample_anchor_length()));
            assert!(s.sample_rail_hole() < RAIL_HOLES);
        }
    }

    #[test]
    fn final_length_leaves_a_free_row_above_frontier() {
        let mut s = SegmentSampler::new(13);
        for y in 5..=8 {
            for _ in 0..200 {
                let len = s.sample_final_length(y);
                assert!(len >= 1);
                assert!(i32::from(len) <= (8 - y).max(1));
            }
        }
        assert_eq!(s.sample_final_length(8), 1);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = SegmentSampler::new(42);
        let mut b = SegmentSampler::new(42);
        for _ in 0..100 {
            assert_eq!(a.sample_length(), b.sample_length());
            assert_eq!(a.sample_direction(&[]), b.sample_direction(&[]));
            assert_eq!(a.sample_rail_hole(), b.sample_rail_hole());
        }
    }
}
