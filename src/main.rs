use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use ion_channel_sim::{ConfigOverrides, SimConfig, Simulation, Snapshot, SnapshotSink};

/// Headless voltage-gated ion channel simulation. Streams one JSON snapshot
/// per line to stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with a full or partial SimConfig
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated time to run, in milliseconds
    #[arg(short, long, default_value_t = 30_000)]
    duration_ms: u64,

    /// Membrane potential in mV [-90, 40]
    #[arg(long, allow_hyphen_values = true)]
    membrane_potential: Option<f64>,

    /// Walk tick period in ms [10, 200]
    #[arg(long)]
    speed: Option<u64>,

    /// Probability of a rightward step [0.1, 0.9]
    #[arg(long)]
    p_right: Option<f64>,

    /// Probability of staying in place [0.0, 0.5]
    #[arg(long)]
    p_stay: Option<f64>,

    /// Sleep each simulated step in wall-clock time
    #[arg(long)]
    realtime: bool,
}

/// Writes each snapshot as one JSON line.
struct JsonlSink {
    writer: BufWriter<Stdout>,
}

impl SnapshotSink for JsonlSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")
    }
}

fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    Ok(config.with_overrides(&ConfigOverrides {
        seed: args.seed,
        membrane_potential: args.membrane_potential,
        speed_ms: args.speed,
        p_right: args.p_right,
        p_stay: args.p_stay,
    }))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let mut sim = Simulation::new(config).context("invalid configuration")?;
    let mut sink = JsonlSink {
        writer: BufWriter::new(io::stdout()),
    };

    tracing::info!(
        seed = sim.config().seed,
        duration_ms = args.duration_ms,
        realtime = args.realtime,
        "starting simulation"
    );

    if args.realtime {
        let end = sim.now().after(args.duration_ms);
        while sim.now() < end {
            let before = sim.now();
            sim.tick_with(&mut sink)?;
            sink.writer.flush()?;
            thread::sleep(Duration::from_millis(sim.now().millis_since(before)));
        }
    } else {
        sim.run_for_with(args.duration_ms, &mut sink)?;
    }
    sink.writer.flush()?;

    sim.shutdown();
    let counters = sim.counters();
    tracing::info!(
        gate_ticks = counters.gate_ticks,
        walk_ticks = counters.walk_ticks,
        blocked_ticks = counters.blocked_ticks,
        openings = counters.openings,
        ion_position = sim.state().ion_position,
        "finished"
    );
    Ok(())
}
