//! Thread-count search over an external command.
//!
//! Runs the pinned command for every thread count in the range,
//! `repeats` times each, scanning every output line for a
//! `<kernel>: <value>` report and keeping the single best triple.

pub mod config;
pub mod result;

pub use config::{SearchConfig, ThreadRange};
pub use result::BestResult;

use std::io::{self, Write};

use crate::exec::CommandRunner;
use crate::parse::parse_kernel_value;
use crate::pin::{pinned_invocation, PinTopology};

/// Runs the full nested sweep and returns the accumulator.
///
/// Failure notices for children that exit nonzero go to `out`; the
/// caller prints the final summary line from the returned [`BestResult`].
pub fn run_search<R, W>(config: &SearchConfig, runner: &R, out: &mut W) -> io::Result<BestResult>
where
    R: CommandRunner,
    W: Write,
{
    let mut best = BestResult::new();
    let target: Vec<&str> = config.command.split_whitespace().collect();

    for threads in config.threads.iter() {
        let invocation = pinned_invocation(
            PinTopology::new(threads, config.smt),
            false,
            target.iter().copied(),
        );

        for _rep in 0..config.repeats {
            let completed = match runner.run(&invocation) {
                Ok(completed) => completed,
                Err(err) => {
                    writeln!(out, "Execution failed: {} ({})", invocation, err)?;
                    continue;
                }
            };

            if !completed.success() {
                writeln!(out, "Execution failed: {}", invocation)?;
                continue;
            }

            for line in completed.output.lines() {
                if let Some((kernel, value)) = parse_kernel_value(line) {
                    best.record(kernel, threads, value);
                }
            }
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{done, ScriptedRunner, Step};

    fn range(min: u32, max: u32) -> ThreadRange {
        ThreadRange::new(min, max).unwrap()
    }

    #[test]
    fn test_search_finds_best_across_thread_counts() {
        let runner = ScriptedRunner::with_steps(vec![
            done(0, "kernelA: 10.0\n"),
            done(0, "kernelA: 30.0\n"),
            done(0, "kernelA: 20.0\n"),
        ]);
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(2, 4), 1);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best.kernel, "kernelA");
        assert_eq!(best.threads, 3);
        assert_eq!(best.value, 30.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_search_runs_repeats_per_thread_count() {
        let runner = ScriptedRunner::repeating(done(0, "triad: 1.0\n"));
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(2, 3), 3);

        run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(runner.call_count(), 6);
    }

    #[test]
    fn test_search_builds_pinned_invocations_without_quiet() {
        let runner = ScriptedRunner::repeating(done(0, ""));
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench -t fast", range(2, 2), 1).with_smt(1);

        run_search(&config, &runner, &mut out).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls[0].program, "likwid-pin");
        assert_eq!(calls[0].args, vec!["-c", "E:S0:2:1:1", "./bench", "-t", "fast"]);
    }

    #[test]
    fn test_search_scans_every_output_line() {
        let runner = ScriptedRunner::with_steps(vec![done(
            0,
            "copy: 10.0\nnoise line\ntriad: 50.0\nsum: 25.0\n",
        )]);
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(4, 4), 1);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best.kernel, "triad");
        assert_eq!(best.threads, 4);
        assert_eq!(best.value, 50.0);
    }

    #[test]
    fn test_search_ties_keep_earliest_thread_count() {
        let runner = ScriptedRunner::with_steps(vec![
            done(0, "triad: 30.0\n"),
            done(0, "triad: 30.0\n"),
        ]);
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(2, 3), 1);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best.threads, 2);
    }

    #[test]
    fn test_search_failure_is_reported_and_skipped() {
        let runner = ScriptedRunner::with_steps(vec![
            done(1, "boom"),
            done(0, "triad: 5.0\n"),
        ]);
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(2, 2), 2);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best.value, 5.0);
        let text = String::from_utf8_lossy(&out);
        assert_eq!(
            text.trim(),
            "Execution failed: likwid-pin -c E:S0:2:1:2 ./bench"
        );
    }

    #[test]
    fn test_search_spawn_error_is_reported_and_skipped() {
        let runner = ScriptedRunner::then_repeat(vec![Step::SpawnError], done(0, "triad: 2.0\n"));
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(2, 2), 2);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best.value, 2.0);
        assert!(String::from_utf8_lossy(&out).starts_with("Execution failed: likwid-pin"));
    }

    #[test]
    fn test_search_without_matches_returns_initial_accumulator() {
        let runner = ScriptedRunner::repeating(done(0, "nothing to parse\n"));
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(1, 2), 1);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(best, BestResult::new());
    }

    #[test]
    fn test_search_zero_repeats_spawns_nothing() {
        let runner = ScriptedRunner::with_steps(Vec::new());
        let mut out = Vec::new();
        let config = SearchConfig::new("./bench", range(1, 4), 0);

        let best = run_search(&config, &runner, &mut out).unwrap();

        assert_eq!(runner.call_count(), 0);
        assert_eq!(best, BestResult::new());
    }
}
