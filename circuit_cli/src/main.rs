// circuit_cli/src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::rollout::{JsonLinesSink, NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};
use breadboard_engine::engine::{AssetCatalog, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "circuit_cli")]
struct Args {
    // ---------------- rollout sizing ----------------
    /// Number of circuits to generate.
    #[arg(long, default_value_t = 100)]
    circuits: u64,

    /// RNG seed for the search stream. If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Restarts allowed per circuit before it is reported as not found.
    #[arg(long, default_value_t = SearchConfig::DEFAULT_MAX_RESTARTS)]
    max_restarts: u32,

    // ---------------- visualization ----------------
    /**
     * Render each circuit as ASCII; value is sleep in ms (e.g. 200). Omit to disable rendering.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 200  (sleep 200ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Write placement records as JSON lines to PATH ("-" for stdout).
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N circuits (only used with --verbosity 2).
    #[arg(long, default_value_t = 50)]
    report_every: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr so JSON lines on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let base_seed = args.seed.unwrap_or(12345);

    let cfg = RunnerConfig {
        circuits: args.circuits,
        base_seed,
        search: SearchConfig {
            max_restarts: args.max_restarts,
            ..SearchConfig::default()
        },

        // Progress bar and table share stdout with JSON lines; keep "-" clean.
        verbosity: if args.json.as_deref() == Some("-") {
            0
        } else {
            args.verbosity
        },
        report_every: args.report_every,

        render_ms: args.render,
    };

    // Reporting sinks:
    // - verbosity 2 => periodic table (unless report_every == 0)
    // - --json      => one JSON line per circuit
    let mut sinks: Vec<Box<dyn RolloutSink>> = Vec::new();
    if cfg.verbosity >= 2 && cfg.report_every > 0 {
        sinks.push(Box::new(TableSink::new(20)));
    }
    match args.json.as_deref() {
        Some("-") => sinks.push(Box::new(JsonLinesSink::new(Box::new(io::stdout())))),
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {path}"))?;
            sinks.push(Box::new(JsonLinesSink::new(Box::new(file))));
        }
        None => {}
    }
    if sinks.is_empty() {
        sinks.push(Box::new(NoopSink));
    }

    let catalog = AssetCatalog::standard();
    let mut runner = Runner::new(cfg, catalog, sinks);
    let report = runner.run()?;

    // Final one-line summary (useful for logs / grep). Stderr keeps `--json -` parseable.
    eprintln!(
        "DONE: seed={} circuits_done={} failures={} elapsed={:.3}s circuits/s={:.1} avg_restarts={:.2} max_restarts={} avg_segments={:.2} max_segments={} avg_middle_len={:.2} attempts/c={:.2} overlaps/c={:.2} boundary_rej/c={:.2} empty_steps={} finalize_overlaps={}",
        report.base_seed,
        report.circuits_done,
        report.failures,
        report.elapsed_s,
        report.circuits_per_s,
        report.avg_restarts,
        report.max_restarts,
        report.avg_segments,
        report.max_segments,
        report.avg_middle_len,
        report.avg_placement_attempts,
        report.avg_overlaps,
        report.avg_boundary_rejections,
        report.total_empty_steps,
        report.total_finalize_overlaps,
    );

    Ok(())
}
