use anyhow::{Context, Result};
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use super::{ToolStatus, Toolchain};

/// `cargo` / `rustc` run as child processes inside the project directory.
pub struct CargoToolchain {
    project_dir: PathBuf,
    cargo: OsString,
    rustc: OsString,
}

impl CargoToolchain {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            cargo: OsString::from("cargo"),
            rustc: OsString::from("rustc"),
        }
    }

    /// Use a specific `cargo` executable instead of the one on `PATH`.
    pub fn with_cargo(mut self, cargo: impl Into<OsString>) -> Self {
        self.cargo = cargo.into();
        self
    }

    pub fn with_rustc(mut self, rustc: impl Into<OsString>) -> Self {
        self.rustc = rustc.into();
        self
    }

    fn run(&self, program: &OsString, args: &[&str]) -> Result<ToolStatus> {
        let display = format!("{} {}", program.to_string_lossy(), args.join(" "));
        info!("Running {}", display);

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.project_dir)
            .status()
            .with_context(|| format!("Failed to run {}", display))?;
        Ok(status.into())
    }

    fn release_args<'a>(subcommand: &'a str, release: bool) -> Vec<&'a str> {
        let mut args = vec![subcommand];
        if release {
            args.push("--release");
        }
        args
    }
}

impl Toolchain for CargoToolchain {
    #[tracing::instrument(skip(self))]
    fn interpreter_version(&self) -> Result<ToolStatus> {
        self.run(&self.rustc, &["--version"])
    }

    #[tracing::instrument(skip(self))]
    fn tool_version(&self) -> Result<ToolStatus> {
        self.run(&self.cargo, &["--version"])
    }

    #[tracing::instrument(skip(self))]
    fn fetch(&self) -> Result<ToolStatus> {
        self.run(&self.cargo, &["fetch"])
    }

    #[tracing::instrument(skip(self))]
    fn build(&self, release: bool) -> Result<ToolStatus> {
        self.run(&self.cargo, &Self::release_args("build", release))
    }

    #[tracing::instrument(skip(self))]
    fn install(&self, helper: &str) -> Result<ToolStatus> {
        self.run(&self.cargo, &["install", helper])
    }

    #[tracing::instrument(skip(self))]
    fn bundle(&self, release: bool) -> Result<ToolStatus> {
        self.run(&self.cargo, &Self::release_args("bundle", release))
    }
}
