//! Line parsers for benchmark output.
//!
//! Both parsers take a text fixture and return `None` on any miss; they
//! know nothing about processes. The patterns match the output of the
//! striad benchmark (`<time> <performance>`) and of kernel-reporting
//! workloads (`<kernel>: <value>`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PERF_PAIR: Regex = Regex::new(r"([0-9.]+) ([0-9.]+)").unwrap();
    static ref KERNEL_VALUE: Regex = Regex::new(r"^(\w+):\s+([0-9.]+)").unwrap();
}

/// Extracts `(time, performance)` from a benchmark result line.
///
/// The pair may sit anywhere in `text`. The second field is the
/// performance value that drives the sweep's retry/advance decision.
pub fn parse_perf_pair(text: &str) -> Option<(f64, f64)> {
    let captures = PERF_PAIR.captures(text)?;
    let time = captures[1].parse().ok()?;
    let performance = captures[2].parse().ok()?;
    Some((time, performance))
}

/// Extracts `(kernel label, value)` from a `<label>: <value>` line.
///
/// The label must start the line. Callers skip lines that do not match.
pub fn parse_kernel_value(line: &str) -> Option<(&str, f64)> {
    let captures = KERNEL_VALUE.captures(line)?;
    let label = captures.get(1)?.as_str();
    let value = captures.get(2)?.as_str().parse().ok()?;
    Some((label, value))
}
