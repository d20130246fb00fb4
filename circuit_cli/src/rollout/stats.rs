// circuit_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use breadboard_engine::{SearchOutcome, SegmentRole};

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub circuits_done: u64,
    /// Searches that ran out of restarts.
    pub failures: u64,

    pub restarts_sum: u64,
    pub restarts_max: u32,

    pub segments_sum: u64,
    pub segments_max: usize,
    pub middle_len_sum: u64,
    pub middle_count: u64,

    pub placement_attempts_sum: u64,
    pub overlaps_sum: u64,
    pub boundary_rejections_sum: u64,
    pub empty_steps_sum: u64,
    pub finalize_overlaps_sum: u64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            circuits_done: 0,
            failures: 0,
            restarts_sum: 0,
            restarts_max: 0,
            segments_sum: 0,
            segments_max: 0,
            middle_len_sum: 0,
            middle_count: 0,
            placement_attempts_sum: 0,
            overlaps_sum: 0,
            boundary_rejections_sum: 0,
            empty_steps_sum: 0,
            finalize_overlaps_sum: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per successful search.
    pub fn on_circuit(&mut self, out: &SearchOutcome) {
        self.circuits_done += 1;

        let s = out.stats;
        self.restarts_sum += u64::from(s.restarts);
        self.restarts_max = self.restarts_max.max(s.restarts);
        self.placement_attempts_sum += u64::from(s.placement_attempts);
        self.overlaps_sum += u64::from(s.overlaps);
        self.boundary_rejections_sum += u64::from(s.boundary_rejections);
        self.empty_steps_sum += u64::from(s.empty_steps);
        self.finalize_overlaps_sum += u64::from(s.finalize_overlaps);

        let n = out.circuit.len();
        self.segments_sum += n as u64;
        self.segments_max = self.segments_max.max(n);

        for seg in out.circuit.segments() {
            if seg.role == SegmentRole::Middle {
                self.middle_count += 1;
                self.middle_len_sum += u64::from(seg.length);
            }
        }
    }

    pub fn on_failure(&mut self) {
        self.failures += 1;
    }

    pub fn attempted(&self) -> u64 {
        self.circuits_done + self.failures
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn circuits_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.circuits_done as f64 / dt
        } else {
            0.0
        }
    }

    fn per_circuit(&self, sum: u64) -> f64 {
        if self.circuits_done > 0 {
            sum as f64 / self.circuits_done as f64
        } else {
            0.0
        }
    }

    pub fn avg_restarts(&self) -> f64 {
        self.per_circuit(self.restarts_sum)
    }

    pub fn avg_segments(&self) -> f64 {
        self.per_circuit(self.segments_sum)
    }

    pub fn avg_overlaps(&self) -> f64 {
        self.per_circuit(self.overlaps_sum)
    }

    pub fn avg_boundary_rejections(&self) -> f64 {
        self.per_circuit(self.boundary_rejections_sum)
    }

    pub fn avg_placement_attempts(&self) -> f64 {
        self.per_circuit(self.placement_attempts_sum)
    }

    pub fn avg_middle_len(&self) -> f64 {
        if self.middle_count > 0 {
            self.middle_len_sum as f64 / self.middle_count as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "cps={:.1} fail={} avg_restarts={:.2} max_restarts={} avg_segs={:.2} max_segs={} ovl/c={:.2}",
            self.circuits_per_sec(),
            self.failures,
            self.avg_restarts(),
            self.restarts_max,
            self.avg_segments(),
            self.segments_max,
            self.avg_overlaps(),
        )
    }

    pub fn final_report(&self, base_seed: u64) -> FinalReport {
        FinalReport {
            base_seed,
            circuits_done: self.circuits_done,
            failures: self.failures,
            elapsed_s: self.elapsed_secs(),
            circuits_per_s: self.circuits_per_sec(),
            avg_restarts: self.avg_restarts(),
            max_restarts: self.restarts_max,
            avg_segments: self.avg_segments(),
            max_segments: self.segments_max,
            avg_middle_len: self.avg_middle_len(),
            avg_placement_attempts: self.avg_placement_attempts(),
            avg_overlaps: self.avg_overlaps(),
            avg_boundary_rejections: self.avg_boundary_rejections(),
            total_empty_steps: self.empty_steps_sum,
            total_finalize_overlaps: self.finalize_overlaps_sum,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub base_seed: u64,

    pub circuits_done: u64,
    pub failures: u64,
    pub elapsed_s: f64,
    pub circuits_per_s: f64,

    pub avg_restarts: f64,
    pub max_restarts: u32,

    pub avg_segments: f64,
    pub max_segments: usize,
    pub avg_middle_len: f64,

    pub avg_placement_attempts: f64,
    pub avg_overlaps: f64,
    pub avg_boundary_rejections: f64,
    pub total_empty_steps: u64,
    pub total_finalize_overlaps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use breadboard_engine::CircuitPathSearch;

    #[test]
    fn averages_track_outcomes() {
        let mut search = CircuitPathSearch::new(8);
        let mut stats = RolloutStats::new();
        assert_eq!(stats.avg_segments(), 0.0);

        let a = search.find_circuit().unwrap();
        let b = search.find_circuit().unwrap();
        stats.on_circuit(&a);
        stats.on_circuit(&b);
        stats.on_failure();

        assert_eq!(stats.circuits_done, 2);
        assert_eq!(stats.attempted(), 3);
        let expected = (a.circuit.len() + b.circuit.len()) as f64 / 2.0;
        assert!((stats.avg_segments() - expected).abs() < 1e-12);
        assert_eq!(stats.segments_max, a.circuit.len().max(b.circuit.len()));
        assert!(stats.avg_middle_len() >= 2.0 && stats.avg_middle_len() <= 10.0);

        let report = stats.final_report(8);
        assert_eq!(report.failures, 1);
        assert_eq!(report.max_segments, stats.segments_max);
    }
}
