//! Out-of-order pipeline simulator CLI.
//!
//! This binary runs a single trace through the pipeline model. It performs:
//! 1. **Configuration:** ROB size, IQ size and width from the command line,
//!    optionally layered over a JSON configuration file.
//! 2. **Timeline:** One line per retired instruction with the entry cycle and
//!    residency of every stage.
//! 3. **Report:** The end-of-run summary (cycles, instruction count, IPC), or
//!    the full statistics as JSON. `--stats` appends the detailed block.

use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use o3sim_core::{Config, RetireRecord, SimError, SimStats, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Trace-driven out-of-order superscalar pipeline simulator",
    long_about = "Simulate a pre-decoded instruction trace on an out-of-order pipeline.\n\nEach trace line is: <pc hex> <op class 0|1|2> <dst|-1> <src1|-1> <src2|-1>\n\nExamples:\n  sim 60 15 3 traces/gcc_trace.txt\n  sim 32 8 2 traces/perl_trace.txt --issue-width 2 --no-timeline --stats\n  RUST_LOG=o3sim_core=trace sim 4 4 1 small.txt"
)]
struct Cli {
    /// Reorder buffer capacity.
    rob_size: usize,

    /// Issue queue capacity.
    iq_size: usize,

    /// Superscalar width.
    width: usize,

    /// Trace file to simulate.
    trace_file: PathBuf,

    /// Instructions selected for execution per cycle.
    #[arg(long)]
    issue_width: Option<usize>,

    /// Number of architectural registers.
    #[arg(long)]
    arch_regs: Option<usize>,

    /// JSON configuration file; command-line values take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print statistics as JSON instead of the text report (implies --no-timeline).
    #[arg(long)]
    json: bool,

    /// Suppress the per-instruction timeline.
    #[arg(long)]
    no_timeline: bool,

    /// Append the detailed statistics block (mix, stalls, occupancy) to the report.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Builds the configuration from the optional JSON file and the arguments.
fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    config.rob_size = cli.rob_size;
    config.iq_size = cli.iq_size;
    config.width = cli.width;
    if let Some(issue_width) = cli.issue_width {
        config.issue_width = issue_width;
    }
    if let Some(arch_regs) = cli.arch_regs {
        config.arch_regs = arch_regs;
    }
    Ok(config)
}

/// Runs one simulation and prints its output.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = load_config(cli)?;
    let trace = TraceReader::open(&cli.trace_file)?.with_register_limit(config.arch_regs);
    let mut sim = Simulator::new(&config, trace)?;

    let show_timeline = !cli.json && !cli.no_timeline;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_err: Option<io::Error> = None;

    let stats = sim.run(|rec: &RetireRecord| {
        if show_timeline
            && write_err.is_none()
            && let Err(e) = writeln!(out, "{rec}")
        {
            write_err = Some(e);
        }
    })?;

    if let Some(e) = write_err {
        return Err(e.into());
    }

    if cli.json {
        let doc = serde_json::json!({
            "config": config,
            "stats": stats,
            "ipc": stats.ipc(),
            "cpi": stats.cpi(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        write_report(&mut out, cli, &config, stats)?;
        if cli.stats {
            stats.print(&mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Writes the end-of-run report.
fn write_report(
    out: &mut impl Write,
    cli: &Cli,
    config: &Config,
    stats: &SimStats,
) -> io::Result<()> {
    let argv0 = std::env::args().next().unwrap_or_else(|| "sim".into());
    writeln!(out, "# === Simulator Command =========")?;
    writeln!(
        out,
        "# {} {} {} {} {}",
        argv0,
        config.rob_size,
        config.iq_size,
        config.width,
        cli.trace_file.display()
    )?;
    writeln!(out, "# === Processor Configuration ===")?;
    writeln!(out, "# ROB_SIZE = {}", config.rob_size)?;
    writeln!(out, "# IQ_SIZE  = {}", config.iq_size)?;
    writeln!(out, "# WIDTH    = {}", config.width)?;
    writeln!(out, "# === Simulation Results ========")?;
    writeln!(
        out,
        "# Dynamic Instruction Count    = {}",
        stats.instructions_retired
    )?;
    writeln!(out, "# Cycles                       = {}", stats.cycles)?;
    writeln!(out, "# Instructions Per Cycle (IPC) = {:.2}", stats.ipc())?;
    Ok(())
}
