// circuit_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};

use serde::Serialize;

use breadboard_engine::{AssetId, PlacementRecord, SegmentRole};

/// One record plus the asset chosen for it, as handed to the scene collaborator.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedPlacement {
    #[serde(flatten)]
    pub record: PlacementRecord,
    pub asset: String,
    pub rotation_deg: u16,
}

impl ResolvedPlacement {
    pub fn new(record: PlacementRecord, asset: AssetId) -> Self {
        Self {
            record,
            asset: asset.to_string(),
            rotation_deg: rotation_for(&record),
        }
    }
}

/// Scene rotation of a placed wire.
///
/// Rail wires have fixed orientations: bottom ones face up (0), top ones hang down (180).
/// Middle wires turn with their direction.
pub fn rotation_for(record: &PlacementRecord) -> u16 {
    match record.role {
        SegmentRole::BottomAnchor => 0,
        SegmentRole::TopAnchor => 180,
        SegmentRole::Middle => record.direction.rotation_degrees(),
    }
}

/// One periodic row emitted by the runner.
///
/// Transport struct: runner/stats compute fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub circuit: u64,
    pub circuits_total: u64,

    pub cps: f64,
    pub failures: u64,

    pub avg_restarts: f64,
    pub max_restarts: u32,

    pub avg_segments: f64,
    pub max_segments: usize,
    pub avg_middle_len: f64,

    /// Per-circuit averages of the search counters.
    pub avg_attempts: f64,
    pub avg_overlaps: f64,
    pub avg_boundary_rej: f64,
}

/// Sink interface for per-circuit output and periodic reporting.
pub trait RolloutSink {
    fn on_circuit(&mut self, _index: u64, _placements: &[ResolvedPlacement]) -> io::Result<()> {
        Ok(())
    }

    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl RolloutSink for NoopSink {}

/// Human-readable periodic table sink.
///
/// Cadence (every N circuits) is handled by Runner. This sink prints whenever called.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // Note: keep widths aligned with row_line() below.
        format!(
            "{:>21} {:>9} {:>6} {:>9} {:>7} {:>8} {:>7} {:>8} {:>8} {:>8} {:>9}",
            "circuit/total",
            "cps",
            "fail",
            "avgRst",
            "maxRst",
            "avgSegs",
            "maxSeg",
            "avgLen",
            "att/c",
            "ovl/c",
            "bndRej/c",
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, r: &ReportRow) -> String {
        format!(
            "{:>10}/{:<10} {:>9.1} {:>6} {:>9.2} {:>7} {:>8.2} {:>7} {:>8.2} {:>8.2} {:>8.2} {:>9.2}",
            r.circuit,
            r.circuits_total,
            r.cps,
            r.failures,
            r.avg_restarts,
            r.max_restarts,
            r.avg_segments,
            r.max_segments,
            r.avg_middle_len,
            r.avg_attempts,
            r.avg_overlaps,
            r.avg_boundary_rej,
        )
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        let mut lines: Vec<String> = Vec::new();

        if self.rows_printed == 0 || (self.rows_printed % self.header_every == 0) {
            lines.push(self.header_line());
            lines.push(self.sep_line());
        }

        lines.push(self.row_line(row));
        self.rows_printed += 1;

        if let Some(pb) = pb {
            for l in lines {
                pb.println(l);
            }
        } else {
            for l in lines {
                println!("{l}");
            }
        }
    }
}

/// One JSON object per circuit and line: `{"index": n, "placements": [...]}`.
pub struct JsonLinesSink {
    out: BufWriter<Box<dyn Write>>,
}

#[derive(Serialize)]
struct CircuitLine<'a> {
    index: u64,
    placements: &'a [ResolvedPlacement],
}

impl JsonLinesSink {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }
}

impl RolloutSink for JsonLinesSink {
    fn on_circuit(&mut self, index: u64, placements: &[ResolvedPlacement]) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &CircuitLine { index, placements })?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use breadboard_engine::engine::{Direction, MiddleWire, RailWire};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_lines_are_one_object_per_circuit() {
        let buf = SharedBuf::default();
        let mut sink = JsonLinesSink::new(Box::new(buf.clone()));

        let rec = PlacementRecord {
            column: 12,
            row: 7,
            length: 5,
            direction: Direction::East,
            role: SegmentRole::Middle,
        };
        let placed = [ResolvedPlacement::new(rec, AssetId::Middle(MiddleWire::Resistor))];
        sink.on_circuit(0, &placed).unwrap();
        sink.on_circuit(1, &placed).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["index"], 1);
        let p = &v["placements"][0];
        assert_eq!(p["column"], 12);
        assert_eq!(p["row"], 7);
        assert_eq!(p["direction"], "East");
        assert_eq!(p["role"], "Middle");
        assert_eq!(p["asset"], "resistor63v4");
        assert_eq!(p["rotation_deg"], 90);
    }

    #[test]
    fn rotation_follows_role() {
        let rec = |role, direction| PlacementRecord {
            column: 8,
            row: 0,
            length: 3,
            direction,
            role,
        };

        let bottom = rec(SegmentRole::BottomAnchor, Direction::North);
        let p = ResolvedPlacement::new(bottom, AssetId::Rail(RailWire::Edge12mm));
        assert_eq!(p.rotation_deg, 0);

        let top = rec(SegmentRole::TopAnchor, Direction::North);
        let p = ResolvedPlacement::new(top, AssetId::Rail(RailWire::Edge12mm));
        assert_eq!(p.rotation_deg, 180);

        for (dir, deg) in [
            (Direction::East, 90),
            (Direction::North, 180),
            (Direction::West, 270),
        ] {
            let middle = rec(SegmentRole::Middle, dir);
            let p = ResolvedPlacement::new(middle, AssetId::Middle(MiddleWire::Jumper7mm));
            assert_eq!(p.rotation_deg, deg, "{dir:?}");
        }
    }
}
