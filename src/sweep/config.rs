//! Configuration types for the problem-size sweep

use std::fmt;
use std::time::Duration;

use crate::pin::DEFAULT_SMT;

/// First problem size of a sweep.
pub const START_SIZE: u64 = 100;
/// The sweep stops once the size reaches this ceiling.
pub const MAX_SIZE: u64 = 8_000_000;
/// Per-step size multiplier, truncated toward zero.
pub const GROWTH_FACTOR: f64 = 1.2;
/// Benchmark binary the sweep drives.
pub const DEFAULT_BENCHMARK: &str = "./striad";

/// Benchmark kernel variant, passed to the benchmark as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelVariant {
    /// Sequential triad
    Seq,
    /// Throughput triad
    Tp,
    /// Write-streaming triad
    Ws,
}

impl KernelVariant {
    /// Positional selector understood by the benchmark binary.
    pub fn code(&self) -> u32 {
        match self {
            KernelVariant::Seq => 0,
            KernelVariant::Tp => 1,
            KernelVariant::Ws => 2,
        }
    }
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelVariant::Seq => write!(f, "seq"),
            KernelVariant::Tp => write!(f, "tp"),
            KernelVariant::Ws => write!(f, "ws"),
        }
    }
}

impl std::str::FromStr for KernelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seq" => Ok(KernelVariant::Seq),
            "tp" => Ok(KernelVariant::Tp),
            "ws" => Ok(KernelVariant::Ws),
            _ => Err(format!(
                "unknown benchmark type: '{}'. Valid types: seq, tp, ws",
                s
            )),
        }
    }
}

/// Retry behavior for a single sweep size.
///
/// The default keeps retrying a zero-performance result forever, exactly
/// like the drivers this replaces. Tests inject an attempt cap so a stuck
/// fake cannot hang the suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per size (`None` = unbounded).
    pub max_attempts: Option<u64>,
    /// Pause between attempts at the same size (`None` = busy retry).
    pub delay: Option<Duration>,
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Main sweep configuration.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Physical cores the benchmark is pinned to.
    pub cores: u32,
    /// Kernel variant under test.
    pub kernel: KernelVariant,
    /// Hardware threads per core in the pin expression.
    pub smt: u32,
    /// Benchmark executable to invoke.
    pub benchmark: String,
    /// First size of the sweep.
    pub start_size: u64,
    /// Size ceiling ending the sweep.
    pub max_size: u64,
    /// Per-size retry behavior.
    pub retry: RetryPolicy,
}

impl SweepConfig {
    pub fn new(cores: u32, kernel: KernelVariant) -> Self {
        Self {
            cores,
            kernel,
            smt: DEFAULT_SMT,
            benchmark: DEFAULT_BENCHMARK.to_string(),
            start_size: START_SIZE,
            max_size: MAX_SIZE,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_smt(mut self, smt: u32) -> Self {
        self.smt = smt;
        self
    }

    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    pub fn with_sizes(mut self, start_size: u64, max_size: u64) -> Self {
        self.start_size = start_size;
        self.max_size = max_size;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
