use std::path::{Path, PathBuf};

use crate::archive::ArchiveFormat;
use crate::platform::{Platform, Target};

/// How the macOS archive is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacosPackaging {
    /// Build a `.app` bundle with the bundle helper and zip its tree.
    #[default]
    NativeBundle,
    /// Zip the raw release binary, the same way Windows is packaged.
    PlainBinary,
}

/// Project layout conventions the packager relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerConfig {
    pub project_dir: PathBuf,
    pub binary_name: String,
    pub archive_prefix: String,
    pub assets_dir: String,
    pub target_dir: String,
    pub bundle_helper: String,
    pub macos_packaging: MacosPackaging,
}

impl PackagerConfig {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            binary_name: "work_timer".to_string(),
            archive_prefix: "work-timer".to_string(),
            assets_dir: "assets".to_string(),
            target_dir: "target".to_string(),
            bundle_helper: "cargo-bundle".to_string(),
            macos_packaging: MacosPackaging::default(),
        }
    }

    pub fn with_macos_packaging(mut self, packaging: MacosPackaging) -> Self {
        self.macos_packaging = packaging;
        self
    }

    fn release_dir(&self) -> PathBuf {
        self.project_dir.join(&self.target_dir).join("release")
    }

    /// Path of the release binary the build step produces.
    pub fn artifact_path(&self, platform: Platform) -> PathBuf {
        self.release_dir()
            .join(format!("{}{}", self.binary_name, platform.exe_suffix()))
    }

    /// Canonical name of the binary inside the archive.
    pub fn binary_entry_name(&self, platform: Platform) -> String {
        format!("{}{}", self.binary_name, platform.exe_suffix())
    }

    /// Directory the bundle helper writes the `.app` tree into.
    pub fn bundle_dir(&self) -> PathBuf {
        self.release_dir().join("bundle").join("osx")
    }

    pub fn assets_path(&self) -> PathBuf {
        self.project_dir.join(&self.assets_dir)
    }

    /// Glob pattern matching everything under the assets directory, recursively.
    pub fn asset_pattern(&self) -> String {
        let escaped = glob::Pattern::escape(&self.assets_path().to_string_lossy());
        format!("{}/**/*", escaped)
    }

    /// File name of the archive for `target`.
    ///
    /// Linux archives are always labelled `amd64`.
    pub fn archive_name(&self, target: &Target) -> String {
        let format = ArchiveFormat::for_platform(target.platform);
        let arch = match target.platform {
            Platform::Linux => "amd64",
            Platform::Windows | Platform::Osx => target.arch.as_str(),
        };
        format!(
            "{}-{}-{}.{}",
            self.archive_prefix,
            target.platform,
            arch,
            format.extension()
        )
    }

    pub fn archive_path(&self, target: &Target) -> PathBuf {
        self.project_dir.join(self.archive_name(target))
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
