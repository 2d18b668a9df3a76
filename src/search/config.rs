//! Configuration types for the thread-count search

use std::fmt;

use crate::pin::DEFAULT_SMT;

/// Inclusive thread-count range, parsed from a single `min-max` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadRange {
    pub min: u32,
    pub max: u32,
}

impl ThreadRange {
    /// Rejects empty and zero-based ranges before any process is run.
    pub fn new(min: u32, max: u32) -> Result<Self, String> {
        if min == 0 || min > max {
            return Err(format!("cannot use thread range values: {} {}", min, max));
        }
        Ok(Self { min, max })
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl fmt::Display for ThreadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl std::str::FromStr for ThreadRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| format!("thread range not readable: '{}' (expected <min>-<max>)", s))?;
        let min = min
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("thread range not readable: '{}'", s))?;
        let max = max
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("thread range not readable: '{}'", s))?;
        ThreadRange::new(min, max)
    }
}

/// Main search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Command template run under the pinning tool, split on whitespace.
    pub command: String,
    /// Thread counts to try.
    pub threads: ThreadRange,
    /// Runs per thread count.
    pub repeats: u32,
    /// Hardware threads per core in the pin expression.
    pub smt: u32,
}

impl SearchConfig {
    pub fn new(command: impl Into<String>, threads: ThreadRange, repeats: u32) -> Self {
        Self {
            command: command.into(),
            threads,
            repeats,
            smt: DEFAULT_SMT,
        }
    }

    pub fn with_smt(mut self, smt: u32) -> Self {
        self.smt = smt;
        self
    }
}
