//! Release packaging use case.
//!
//! Runs the whole packaging flow for the host, top to bottom:
//! - Platform detection
//! - Toolchain diagnostics (never fatal)
//! - Dependency fetch, helper install, release build (all checked)
//! - Platform-specific bundling into one archive

use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use crate::archive::{ArchiveEntry, ArchiveFormat, write_archive};
use crate::assets::{collect_assets, collect_tree};
use crate::config::{MacosPackaging, PackagerConfig};
use crate::error::{PackageError, Step};
use crate::platform::{Platform, Target, detect_target};
use crate::runtime::Runtime;
use crate::toolchain::{ToolStatus, Toolchain};

/// What goes into the archive for a given target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The raw release binary plus the assets
    Binary,
    /// The `.app` tree produced by the bundle helper
    NativeBundle,
}

impl Strategy {
    pub fn for_target(target: &Target, config: &PackagerConfig) -> Self {
        match target.platform {
            Platform::Windows | Platform::Linux => Strategy::Binary,
            Platform::Osx => match config.macos_packaging {
                MacosPackaging::NativeBundle => Strategy::NativeBundle,
                MacosPackaging::PlainBinary => Strategy::Binary,
            },
        }
    }
}

pub struct Packager<'a, R: Runtime, T: Toolchain> {
    runtime: &'a R,
    toolchain: &'a T,
    config: &'a PackagerConfig,
}

impl<'a, R: Runtime, T: Toolchain> Packager<'a, R, T> {
    pub fn new(runtime: &'a R, toolchain: &'a T, config: &'a PackagerConfig) -> Self {
        Self {
            runtime,
            toolchain,
            config,
        }
    }

    /// Build and package for the host. Returns the path of the written archive.
    #[tracing::instrument(skip(self))]
    pub fn run(&self) -> Result<PathBuf> {
        let target = detect_target(self.runtime)?;
        info!("Packaging for {}", target);

        let strategy = Strategy::for_target(&target, self.config);

        self.diagnostics();
        checked(Step::Fetch, self.toolchain.fetch())?;
        if strategy == Strategy::NativeBundle {
            checked(Step::Install, self.toolchain.install(&self.config.bundle_helper))?;
        }
        checked(Step::Build, self.toolchain.build(true))?;

        let entries = match strategy {
            Strategy::Binary => self.binary_entries(target.platform)?,
            Strategy::NativeBundle => {
                checked(Step::Bundle, self.toolchain.bundle(true))?;
                self.bundle_entries()?
            }
        };

        let archive_path = self.config.archive_path(&target);
        let format = ArchiveFormat::for_platform(target.platform);
        write_archive(self.runtime, format, &archive_path, &entries)?;

        Ok(archive_path)
    }

    fn diagnostics(&self) {
        report_diagnostic("rustc --version", self.toolchain.interpreter_version());
        report_diagnostic("cargo --version", self.toolchain.tool_version());
    }

    fn binary_entries(&self, platform: Platform) -> Result<Vec<ArchiveEntry>> {
        let artifact = self.config.artifact_path(platform);
        if !self.runtime.is_file(&artifact) {
            return Err(PackageError::MissingArtifact(artifact).into());
        }
        let mode = self.runtime.file_mode(&artifact)?;

        let mut entries = vec![ArchiveEntry::new(
            artifact,
            self.config.binary_entry_name(platform),
            mode,
        )];
        entries.extend(collect_assets(self.runtime, self.config)?);
        Ok(entries)
    }

    fn bundle_entries(&self) -> Result<Vec<ArchiveEntry>> {
        let bundle_dir = self.config.bundle_dir();
        if !self.runtime.is_dir(&bundle_dir) {
            return Err(PackageError::MissingArtifact(bundle_dir).into());
        }

        // Names are relative to the directory holding the .app, so the bundle is the archive root
        let entries = collect_tree(self.runtime, &bundle_dir, &bundle_dir)?;
        if entries.is_empty() {
            return Err(PackageError::MissingArtifact(bundle_dir).into());
        }
        Ok(entries)
    }
}

/// Convenience wrapper around [`Packager::run`].
pub fn package<R: Runtime, T: Toolchain>(
    runtime: &R,
    toolchain: &T,
    config: &PackagerConfig,
) -> Result<PathBuf> {
    Packager::new(runtime, toolchain, config).run()
}

fn checked(step: Step, status: Result<ToolStatus>) -> Result<()> {
    let status = status?;
    if status.is_success() {
        return Ok(());
    }
    Err(PackageError::StepFailed {
        step,
        code: status.code(),
    }
    .into())
}

fn report_diagnostic(what: &str, status: Result<ToolStatus>) {
    match status {
        Ok(status) if status.is_success() => {}
        Ok(status) => warn!("{} returned {}, continuing", what, status),
        Err(e) => warn!("{} could not be run: {:#}, continuing", what, e),
    }
}
