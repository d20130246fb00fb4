// engine/tests/circuit_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for generated circuits.
 *
 * Purpose:
 * - Fuzz the path search over generated seeds and lock the structural invariants every
 *   produced circuit must satisfy, independent of the exact random stream.
 *
 * Invariants covered:
 * - Segment 0 is a BottomAnchor rooted on row 0; the last segment is a TopAnchor ending on row 9.
 * - Every interior segment is a Middle wire.
 * - Each segment starts on the strip (same column, same half) of the previous terminus,
 *   on a different hole.
 * - All covered cells are on the board and pairwise disjoint.
 * - Replaying the circuit onto an empty grid commits every segment and reproduces each terminus.
 * - Emitted records map 1:1 to segments and every record resolves to an asset.
 */
use std::collections::HashSet;

use breadboard_engine::engine::{
    AssetCatalog, Circuit, CircuitPathSearch, Direction, Grid, MAX_COL, MAX_ROW, SegmentRole, emit,
    is_inside_boundary, physical_row,
};
use proptest::prelude::*;

fn assert_circuit_invariants(c: &Circuit) {
    let segs = c.segments();
    assert!(segs.len() >= 3, "need anchors plus at least one crossing: {segs:?}");

    let first = segs[0];
    assert_eq!(first.role, SegmentRole::BottomAnchor);
    assert_eq!(first.origin.y, 0);
    assert_eq!(first.direction, Direction::North);
    assert!((1..=4).contains(&first.length));

    let last = segs[segs.len() - 1];
    assert_eq!(last.role, SegmentRole::TopAnchor);
    assert_eq!(last.terminus.y, 9);
    assert_eq!(last.terminus.x, last.origin.x);
    assert!((1..=4).contains(&last.length));

    for s in &segs[1..segs.len() - 1] {
        assert_eq!(s.role, SegmentRole::Middle);
        assert_ne!(s.direction, Direction::South);
        assert!((2..=10).contains(&s.length));
        assert!(is_inside_boundary(s.origin.x, s.origin.y, s.length, s.direction));
    }

    for w in segs.windows(2) {
        assert!(w[1].origin.same_strip(w[0].terminus), "{:?} -> {:?}", w[0], w[1]);
        assert_ne!(w[1].origin, w[0].terminus);
    }

    let mut seen = HashSet::new();
    for cell in c.occupied_cells() {
        assert!((0..=MAX_COL).contains(&cell.x) && (0..=MAX_ROW).contains(&cell.y));
        assert!(seen.insert(cell), "cell {cell:?} covered twice");
    }

    let mut g = Grid::new();
    for s in segs {
        let p = g
            .try_place(s.origin.x, s.origin.y, s.length, s.direction)
            .expect("circuit directions are placeable");
        assert!(p.committed);
        assert_eq!(p.terminus, s.terminus);
    }
    assert_eq!(g.occupied_count(), seen.len());
    assert_eq!(c.validate(), Ok(()));
}

#[test]
fn fixed_seed_circuit_satisfies_invariants() {
    let mut search = CircuitPathSearch::new(20260228);
    for _ in 0..25 {
        let out = search.find_circuit().expect("circuit within restart budget");
        assert_circuit_invariants(&out.circuit);
    }
}

#[test]
fn final_crossing_is_northward_onto_an_aligned_column() {
    let mut search = CircuitPathSearch::new(31337);
    for _ in 0..25 {
        let c = search.find_circuit().unwrap().circuit;
        let segs = c.segments();
        let crossing = segs[segs.len() - 2];
        assert_eq!(crossing.direction, Direction::North);
        assert!(crossing.terminus.y > 4);
        assert!(breadboard_engine::engine::is_aligned_with_rail(crossing.terminus.x));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_circuits_respect_invariants(seed in any::<u64>(), circuits in 1usize..4) {
        let mut search = CircuitPathSearch::new(seed);
        let catalog = AssetCatalog::standard();

        for _ in 0..circuits {
            let out = search.find_circuit();
            prop_assert!(out.is_ok(), "seed {} failed: {:?}", seed, out.as_ref().err());
            let circuit = out.unwrap().circuit;
            assert_circuit_invariants(&circuit);

            let records = emit(&circuit);
            prop_assert_eq!(records.len(), circuit.len());
            for (r, s) in records.iter().zip(circuit.segments()) {
                prop_assert_eq!(r.column, s.origin.x);
                prop_assert_eq!(r.row, physical_row(s.origin.y));
                prop_assert_eq!(r.role, s.role);
                prop_assert!(catalog.resolve(r).is_ok());
            }
        }
    }
}
