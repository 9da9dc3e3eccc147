//! Cache scenario runner CLI.
//!
//! This binary replays JSON scenarios against the cache model. It performs:
//! 1. **Run:** Load a scenario, step the cache through it, print per-cycle
//!    port activity and the final statistics report.
//! 2. **Check:** Load and validate a scenario without running it.
//! 3. **Verify:** Replay a scenario differentially against the mirror model
//!    and report any divergence.
//! 4. **Sweep:** Generate a strided fill-then-read sweep, verify it, and
//!    print the statistics.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use cache_core::sim::{check_scenario, fill_then_read, load_scenario, Runner, StridedStream};
use cache_core::{CacheParams, PolicyKind};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache scenario runner",
    long_about = "Replay a JSON scenario (cache parameters + per-cycle fill/read stimulus)\n\
                  against the cache model.\n\n\
                  Examples:\n  \
                  cachesim run scenario.json\n  \
                  cachesim run --quiet scenario.json\n  \
                  cachesim check scenario.json\n  \
                  cachesim verify scenario.json\n  \
                  cachesim sweep --ways 4 --lines 64 --count 512"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scenario and print activity plus final statistics.
    Run {
        /// Scenario file (JSON).
        scenario: PathBuf,

        /// Suppress per-cycle output; print only the statistics report.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Load and validate a scenario without running it.
    Check {
        /// Scenario file (JSON).
        scenario: PathBuf,
    },

    /// Replay a scenario differentially against the mirror model.
    Verify {
        /// Scenario file (JSON).
        scenario: PathBuf,
    },

    /// Generate, verify, and report a strided fill-then-read sweep.
    Sweep {
        /// Associativity (power of two).
        #[arg(long, default_value_t = 4)]
        ways: usize,

        /// Line count (power of two).
        #[arg(long, default_value_t = 64)]
        lines: usize,

        /// Address stride between consecutive accesses.
        #[arg(long, default_value_t = 1)]
        stride: u64,

        /// Accesses per sweep pass.
        #[arg(long, default_value_t = 256)]
        count: usize,

        /// Use the Available-Invalidated policy instead of Pseudo-LRU.
        #[arg(long)]
        available: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, quiet } => cmd_run(&scenario, quiet),
        Commands::Check { scenario } => cmd_check(&scenario),
        Commands::Verify { scenario } => cmd_verify(&scenario),
        Commands::Sweep {
            ways,
            lines,
            stride,
            count,
            available,
        } => cmd_sweep(ways, lines, stride, count, available),
    }
}

/// Replays the scenario, printing read responses and evictions as they occur.
fn cmd_run(path: &Path, quiet: bool) {
    let scenario = load_scenario(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let params = &scenario.cache;
    println!(
        "[*] Cache: {} ways x {} lines, {:?}, {} fill / {} read ports",
        params.ways, params.lines, params.policy, params.fill_ports, params.read_ports
    );
    println!(
        "[*] Replaying {} cycles from {}",
        scenario.cycles.len(),
        path.display()
    );
    println!();

    let mut runner = Runner::new(&scenario).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    for report in runner.run() {
        if quiet {
            continue;
        }
        for (port, resp) in report.outputs.reads.iter().enumerate() {
            if resp.valid {
                println!(
                    "cycle {:4}  read[{}]  hit   data={:#x}",
                    report.cycle, port, resp.data
                );
            }
        }
        for (port, evict) in report.outputs.evictions.iter().enumerate() {
            if evict.en {
                println!(
                    "cycle {:4}  fill[{}]  evict addr={:#x} data={:#x}",
                    report.cycle, port, evict.addr, evict.data
                );
            }
        }
    }

    if !quiet {
        println!();
    }
    runner.stats().print();
}

/// Replays the scenario against the mirror model and reports the outcome.
fn cmd_verify(path: &Path) {
    let scenario = load_scenario(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match check_scenario(&scenario) {
        Ok(outcome) => {
            println!(
                "PASS: {} cycles, {} reads and {} evictions checked",
                outcome.cycles, outcome.reads_checked, outcome.evictions_checked
            );
            outcome.stats.print();
        }
        Err(e) => {
            eprintln!("FAIL: {}", e);
            process::exit(1);
        }
    }
}

/// Generates a strided fill-then-read sweep, verifies it, and prints stats.
fn cmd_sweep(ways: usize, lines: usize, stride: u64, count: usize, available: bool) {
    let params = CacheParams {
        ways,
        lines,
        policy: if available {
            PolicyKind::AvailableInvalidated
        } else {
            PolicyKind::PseudoLru
        },
        ..CacheParams::default()
    };
    if let Err(e) = params.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let span = stride.saturating_mul(count as u64).max(1);
    let stream = StridedStream::new(0x1000, stride, span);
    let scenario = fill_then_read(&params, stream, count);

    println!(
        "[*] Sweep: {} ways x {} lines, {:?}, stride {:#x}, {} accesses",
        params.ways, params.lines, params.policy, stride, count
    );

    match check_scenario(&scenario) {
        Ok(outcome) => {
            println!(
                "[*] Verified: {} reads, {} evictions",
                outcome.reads_checked, outcome.evictions_checked
            );
            println!();
            outcome.stats.print();
        }
        Err(e) => {
            eprintln!("FAIL: {}", e);
            process::exit(1);
        }
    }
}

/// Validates the scenario and reports its shape.
fn cmd_check(path: &Path) {
    match load_scenario(path) {
        Ok(scenario) => {
            println!(
                "OK: {} cycles, {} ways x {} lines, policy {:?}",
                scenario.cycles.len(),
                scenario.cache.ways,
                scenario.cache.lines,
                scenario.cache.policy
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
