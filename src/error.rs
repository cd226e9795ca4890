//! Typed errors the entry point needs to tell apart.
//!
//! Everything else travels as a plain `anyhow::Error` with context.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A checked step of the build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    Install,
    Build,
    Bundle,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Fetch => "fetch",
            Step::Install => "install",
            Step::Build => "build",
            Step::Bundle => "bundle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("cargo {step} failed with {}", describe_code(.code))]
    StepFailed { step: Step, code: Option<i32> },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Build output not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

impl PackageError {
    /// Process exit code the packager should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackageError::StepFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
