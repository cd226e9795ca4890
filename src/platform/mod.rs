//! Host platform and architecture detection.
//!
//! Raw names reported by the host are mapped onto a closed set of canonical
//! identifiers used in archive names: `windows`, `osx`, `linux` for the
//! platform and `arm64`, `amd64` for the architecture.

use anyhow::Result;
use log::{debug, warn};
use std::fmt;

use crate::error::PackageError;
use crate::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Osx,
    Linux,
}

impl Platform {
    /// Map a raw operating system name onto a canonical platform.
    pub fn from_raw(os: &str) -> Result<Self> {
        match os.trim().to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "darwin" | "macos" => Ok(Platform::Osx),
            "linux" => Ok(Platform::Linux),
            other => Err(PackageError::UnsupportedPlatform(other.to_string()).into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Osx => "osx",
            Platform::Linux => "linux",
        }
    }

    /// Executable file extension, including the dot.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Osx | Platform::Linux => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm64,
    Amd64,
}

impl Arch {
    /// Map a raw machine name onto a canonical architecture.
    ///
    /// Only the exact name `arm64` maps to [`Arch::Arm64`]. Everything else,
    /// including `aarch64` and 32-bit machines, is labelled [`Arch::Amd64`].
    pub fn from_raw(machine: &str) -> Self {
        match machine.trim().to_lowercase().as_str() {
            "arm64" => Arch::Arm64,
            "x86_64" | "amd64" => Arch::Amd64,
            other => {
                warn!("Unrecognized machine {:?}, labelling it amd64", other);
                Arch::Amd64
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical platform and architecture of the host, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub platform: Platform,
    pub arch: Arch,
}

impl Target {
    pub fn new(platform: Platform, arch: Arch) -> Self {
        Self { platform, arch }
    }

    pub fn from_raw(os: &str, machine: &str) -> Result<Self> {
        Ok(Self {
            platform: Platform::from_raw(os)?,
            arch: Arch::from_raw(machine),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}

/// Detect the host target from the raw names the runtime reports.
#[tracing::instrument(skip(runtime))]
pub fn detect_target<R: Runtime>(runtime: &R) -> Result<Target> {
    let os = runtime.os_name();
    let machine = runtime.machine()?;
    debug!("Raw host: os={:?} machine={:?}", os, machine);
    Target::from_raw(&os, &machine)
}
