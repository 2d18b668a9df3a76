use std::io;
use std::process;

use clap::{Parser, ValueEnum};

use pinbench::pin::DEFAULT_SMT;
use pinbench::sweep::{run_sweep, KernelVariant, SweepConfig};
use pinbench::SystemRunner;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "striad-sweep")]
#[command(about = "Run the pinned striad benchmark over a growing problem size")]
#[command(version)]
struct Args {
    /// Number of physical cores to pin the benchmark to
    numcores: u32,
    /// Benchmark kernel variant
    #[arg(value_enum)]
    kernel: CliKernel,
    /// Hardware threads per core used in the pin expression
    #[arg(default_value_t = DEFAULT_SMT)]
    smt: u32,
}

/// CLI kernel variant selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliKernel {
    /// Sequential triad
    Seq,
    /// Throughput triad
    Tp,
    /// Write-streaming triad
    Ws,
}

impl From<CliKernel> for KernelVariant {
    fn from(cli: CliKernel) -> Self {
        match cli {
            CliKernel::Seq => KernelVariant::Seq,
            CliKernel::Tp => KernelVariant::Tp,
            CliKernel::Ws => KernelVariant::Ws,
        }
    }
}

// --- Main Function ---

fn main() {
    // Argument problems exit with code 1, not clap's default 2.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    let config = SweepConfig::new(args.numcores, args.kernel.into()).with_smt(args.smt);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = run_sweep(&config, &SystemRunner, &mut out) {
        eprintln!("Error writing sweep output: {}", err);
        process::exit(1);
    }
}
