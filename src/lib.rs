//! Drivers for `likwid-pin` based benchmark runs.
//!
//! Two command-line tools share this library:
//! - `striad-sweep` runs a fixed benchmark binary over a growing problem
//!   size and streams one parsed result line per size.
//! - `thread-search` runs an arbitrary command over a thread-count range
//!   and reports the single best labeled value seen across the sweep.
//!
//! The behavior splits into process invocation ([`exec`]), pin-expression
//! construction ([`pin`]), output parsing ([`parse`]) and the two driver
//! loops ([`sweep`], [`search`]).

pub mod exec;
pub mod parse;
pub mod pin;
pub mod search;
pub mod sweep;

pub use exec::{CommandRunner, Completed, Invocation, SystemRunner};
pub use search::{run_search, BestResult, SearchConfig, ThreadRange};
pub use sweep::{run_sweep, KernelVariant, RetryPolicy, SweepConfig, SweepStats};
