//! External build tool invocation.
//!
//! The packager only cares whether each step passed, so every call reports
//! a [`ToolStatus`] and nothing else. Output goes straight to the terminal.

mod cargo;

use anyhow::Result;
use std::fmt;

pub use cargo::CargoToolchain;

/// Exit status of an external tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    code: Option<i32>,
}

impl ToolStatus {
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// `None` when the process was terminated by a signal.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self::from_code(status.code())
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// The build tool, seen as a set of blocking pass/fail commands.
///
/// `Err` means the process could not be started at all.
#[cfg_attr(test, mockall::automock)]
pub trait Toolchain {
    /// Report the compiler version (diagnostic only).
    fn interpreter_version(&self) -> Result<ToolStatus>;

    /// Report the build tool version (diagnostic only).
    fn tool_version(&self) -> Result<ToolStatus>;

    /// Download all dependencies ahead of the build.
    fn fetch(&self) -> Result<ToolStatus>;

    fn build(&self, release: bool) -> Result<ToolStatus>;

    /// Install a helper subcommand, e.g. `cargo-bundle`.
    fn install(&self, helper: &str) -> Result<ToolStatus>;

    /// Produce a native application bundle via the installed helper.
    fn bundle(&self, release: bool) -> Result<ToolStatus>;
}
