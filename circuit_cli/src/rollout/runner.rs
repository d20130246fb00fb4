// circuit_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use breadboard_engine::engine::{
    AssetCatalog, CircuitError, CircuitPathSearch, SearchConfig, SearchOutcome, emit,
};

use super::sinks::{ReportRow, ResolvedPlacement, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 10;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Number of circuits to generate.
    pub circuits: u64,
    /// Seed of the single search stream; circuits are drawn from it in sequence.
    pub base_seed: u64,
    pub search: SearchConfig,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sinks)
    pub verbosity: u8,

    /// Report a table row every N circuits (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every circuit; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    catalog: AssetCatalog,
    sinks: Vec<Box<dyn RolloutSink>>,
}

impl Runner {
    pub fn new(
        cfg: RunnerConfig,
        catalog: AssetCatalog,
        sinks: Vec<Box<dyn RolloutSink>>,
    ) -> Self {
        Self { cfg, catalog, sinks }
    }

    pub fn run(&mut self) -> Result<FinalReport> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.circuits);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("progress bar template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut search = CircuitPathSearch::with_config(cfg.base_seed, cfg.search);
        let mut stats = RolloutStats::new();

        for index in 0..cfg.circuits {
            match search.find_circuit() {
                Ok(out) => {
                    self.deliver(index, &out, pb.as_ref())?;
                    stats.on_circuit(&out);
                }
                Err(e @ CircuitError::NoCircuitFound { .. }) => {
                    warn!(index, error = %e, "circuit skipped");
                    stats.on_failure();
                }
                Err(e) => return Err(e).context(format!("circuit {index}")),
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            self.report(&stats, pb.as_ref());
        }

        for sink in &mut self.sinks {
            sink.finish().context("flushing output")?;
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(cfg.base_seed))
    }

    /// Validate, emit, resolve and hand one circuit to the sinks; render it when enabled.
    fn deliver(
        &mut self,
        index: u64,
        out: &SearchOutcome,
        pb: Option<&ProgressBar>,
    ) -> Result<()> {
        out.circuit
            .validate()
            .with_context(|| format!("circuit {index} failed validation"))?;

        let placements = emit(&out.circuit)
            .into_iter()
            .map(|rec| Ok(ResolvedPlacement::new(rec, self.catalog.resolve(&rec)?)))
            .collect::<Result<Vec<_>, CircuitError>>()
            .with_context(|| format!("resolving assets for circuit {index}"))?;

        debug!(
            index,
            segments = out.circuit.len(),
            restarts = out.stats.restarts,
            "circuit generated"
        );

        for sink in &mut self.sinks {
            sink.on_circuit(index, &placements)
                .with_context(|| format!("writing circuit {index}"))?;
        }

        // Rendering (ASCII) every circuit when enabled.
        if let Some(ms) = self.cfg.render_ms {
            let frame = out.circuit.occupancy()?.render_ascii();
            let header = format!(
                "circuit={} segments={} restarts={}",
                index,
                out.circuit.len(),
                out.stats.restarts
            );
            match pb {
                Some(pb) => {
                    pb.println(header);
                    pb.println(frame.trim_end());
                }
                None => {
                    println!("{header}");
                    print!("{frame}");
                }
            }
            if ms > 0 {
                std::thread::sleep(Duration::from_millis(ms));
            }
        }
        Ok(())
    }

    /// Periodic table row and live message; counts failed circuits too.
    fn report(&mut self, stats: &RolloutStats, pb: Option<&ProgressBar>) {
        let done = stats.attempted();

        // ------------------------------------------------------------
        // Periodic table report (verbosity == 2 only).
        // ------------------------------------------------------------
        if self.cfg.verbosity == 2
            && self.cfg.report_every > 0
            && (done % self.cfg.report_every == 0)
        {
            let row = ReportRow {
                circuit: done,
                circuits_total: self.cfg.circuits,
                cps: stats.circuits_per_sec(),
                failures: stats.failures,

                avg_restarts: stats.avg_restarts(),
                max_restarts: stats.restarts_max,

                avg_segments: stats.avg_segments(),
                max_segments: stats.segments_max,
                avg_middle_len: stats.avg_middle_len(),

                avg_attempts: stats.avg_placement_attempts(),
                avg_overlaps: stats.avg_overlaps(),
                avg_boundary_rej: stats.avg_boundary_rejections(),
            };

            for sink in &mut self.sinks {
                sink.on_report_row(&row, pb);
            }
        }

        if self.cfg.verbosity >= 1 && (done % LIVE_EVERY == 0) {
            if let Some(pb) = pb {
                pb.set_message(stats.live_msg());
            }
        }
    }
}
