//! Problem-size sweep over an external benchmark.
//!
//! The driver grows the problem size geometrically, runs the pinned
//! benchmark at each size and streams one parsed result line per size.
//! A zero performance value repeats the same size until the benchmark
//! produces a usable number (or the retry policy gives up).

pub mod config;

pub use config::{KernelVariant, RetryPolicy, SweepConfig};

use std::io::{self, Write};
use std::thread;

use crate::exec::{CommandRunner, Invocation};
use crate::parse::parse_perf_pair;
use crate::pin::{pinned_invocation, PinTopology};

/// Geometrically growing problem sizes.
///
/// Yields `start`, then `floor(previous * 1.2)`, stopping before `limit`.
/// Truncation stalls the product for values below 5, so every step
/// advances by at least one.
#[derive(Debug, Clone)]
pub struct SizeSequence {
    next: u64,
    limit: u64,
}

impl SizeSequence {
    pub fn new(start: u64, limit: u64) -> Self {
        Self { next: start, limit }
    }
}

impl Iterator for SizeSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.limit {
            return None;
        }
        let current = self.next;
        let grown = (current as f64 * config::GROWTH_FACTOR) as u64;
        self.next = grown.max(current + 1);
        Some(current)
    }
}

/// Counters from a completed sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Sizes the sweep visited.
    pub sizes: u64,
    /// Benchmark processes started.
    pub attempts: u64,
    /// Runs that exited nonzero or failed to start.
    pub failures: u64,
    /// Result lines printed.
    pub results: u64,
}

/// Runs the full sweep, streaming results to `out`.
///
/// Prints the `# striad <cores> <smt> <type>` metadata line first, then
/// one trimmed benchmark output per size that produced a nonzero
/// performance value. Output is flushed after every size so a piped
/// consumer sees progress live.
pub fn run_sweep<R, W>(config: &SweepConfig, runner: &R, out: &mut W) -> io::Result<SweepStats>
where
    R: CommandRunner,
    W: Write,
{
    writeln!(out, "# striad {} {} {}", config.cores, config.smt, config.kernel)?;
    out.flush()?;

    let topology = PinTopology::new(config.cores, config.smt);
    let mut stats = SweepStats::default();

    for size in SizeSequence::new(config.start_size, config.max_size) {
        stats.sizes += 1;
        let invocation = pinned_invocation(
            topology,
            true,
            [
                config.benchmark.clone(),
                config.kernel.code().to_string(),
                size.to_string(),
            ],
        );

        if let Some(line) = run_at_size(config, runner, &invocation, &mut stats, out)? {
            writeln!(out, "{}", line)?;
            stats.results += 1;
        }
        out.flush()?;
    }

    Ok(stats)
}

/// Retries one size until the benchmark reports a nonzero performance.
///
/// A nonzero exit code abandons the size after a failure notice; an
/// exhausted attempt cap abandons it silently.
fn run_at_size<R, W>(
    config: &SweepConfig,
    runner: &R,
    invocation: &Invocation,
    stats: &mut SweepStats,
    out: &mut W,
) -> io::Result<Option<String>>
where
    R: CommandRunner,
    W: Write,
{
    let mut attempts = 0u64;

    'retry: loop {
        if let Some(max_attempts) = config.retry.max_attempts {
            if attempts >= max_attempts {
                break 'retry Ok(None);
            }
        }
        attempts += 1;
        stats.attempts += 1;

        let completed = match runner.run(invocation) {
            Ok(completed) => completed,
            Err(err) => {
                stats.failures += 1;
                writeln!(out, "Execution failed: {} ({})", invocation, err)?;
                break 'retry Ok(None);
            }
        };

        if !completed.success() {
            stats.failures += 1;
            writeln!(out, "Execution failed: {}", invocation)?;
            break 'retry Ok(None);
        }

        let text = completed.output.trim();
        if let Some((_time, performance)) = parse_perf_pair(text) {
            if performance != 0.0 {
                break 'retry Ok(Some(text.to_string()));
            }
        }

        if let Some(delay) = config.retry.delay {
            thread::sleep(delay);
        }
    }
}
