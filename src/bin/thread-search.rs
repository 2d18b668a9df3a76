use std::io;
use std::process;

use clap::Parser;

use pinbench::pin::DEFAULT_SMT;
use pinbench::search::{run_search, SearchConfig, ThreadRange};
use pinbench::SystemRunner;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "thread-search")]
#[command(about = "Run a pinned command over a thread-count range and report the best result")]
#[command(version)]
struct Args {
    /// Command to run under the pinning tool (quote it if it has arguments)
    command: String,
    /// Inclusive thread-count range, e.g. 2-8
    #[arg(value_parser = parse_range)]
    threads: ThreadRange,
    /// Runs per thread count
    repeats: u32,
    /// Hardware threads per core used in the pin expression
    #[arg(default_value_t = DEFAULT_SMT)]
    smt: u32,
}

fn parse_range(s: &str) -> Result<ThreadRange, String> {
    s.parse()
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

    let config = SearchConfig::new(args.command, args.threads, args.repeats).with_smt(args.smt);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_search(&config, &SystemRunner, &mut out) {
        Ok(best) => {
            drop(out);
            println!("{}", best);
        }
        Err(err) => {
            eprintln!("Error writing search output: {}", err);
            process::exit(1);
        }
    }
}
