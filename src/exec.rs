//! Structured process invocation.
//!
//! Drivers never build shell command strings: an [`Invocation`] is a
//! program name plus an argument vector, and a [`CommandRunner`] turns it
//! into an exit code and the child's combined output. Tests substitute a
//! scripted runner so no real process is spawned.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// A program invocation as an explicit argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    /// Renders the full command text, as it appears in failure notices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of a child process that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    /// Exit code, or `None` if the child was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout followed by captured stderr.
    pub output: String,
}

impl Completed {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs invocations to completion, one at a time.
///
/// The driver loops are generic over this trait so tests can replay
/// canned outcomes instead of spawning real children.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<Completed>;
}

/// Runner backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<Completed> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(Completed {
            code: output.status.code(),
            output: combined,
        })
    }
}
